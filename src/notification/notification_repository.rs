use super::notification_models::{Notification, NotificationKind};
use crate::db::DbPool;
use crate::error::Result;
use chrono::Utc;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: DbPool,
}

impl NotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All notifications owned by the user, oldest first (creation order).
    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(notification)
    }

    /// Flips the read flag. The flag only ever moves false -> true, so
    /// repeating the update is harmless.
    pub async fn mark_as_read(&self, id: Uuid) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        title: Option<&str>,
        message: &str,
        link: Option<&str>,
        kind: NotificationKind,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, user_id, title, message, link, kind, is_read, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, 0, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(link)
        .bind(kind)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM notifications")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
