use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Reminder,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Reminder => write!(f, "reminder"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub message: String,
    pub link: Option<String>,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Wire shape consumed by the notification center; the owning user is
/// implied by the bearer token and never exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub title: Option<String>,
    pub message: String,
    pub link: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            link: n.link,
            kind: n.kind,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_kind_display() {
        assert_eq!(NotificationKind::Info.to_string(), "info");
        assert_eq!(NotificationKind::Reminder.to_string(), "reminder");
    }

    #[test]
    fn test_response_wire_shape() {
        let response = NotificationResponse {
            id: Uuid::new_v4(),
            title: Some("New course".to_string()),
            message: "Rust 101 is live".to_string(),
            link: Some("/courses/rust-101".to_string()),
            kind: NotificationKind::Info,
            is_read: false,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "info");
        assert_eq!(value["isRead"], false);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("userId").is_none());
    }
}
