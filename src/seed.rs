use crate::auth::hash_password;
use crate::notification::notification_service::STUDY_REMINDERS;
use crate::notification::NotificationKind;
use crate::state::AppState;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

const DEMO_PASSWORD: &str = "123456";

/// Wipes and repopulates demo users plus a handful of study notifications
/// for each of them. Destructive; meant for local environments only.
pub async fn seed_demo_data(state: &AppState) -> anyhow::Result<()> {
    state.notification_repository.delete_all().await?;
    state.user_repository.delete_all().await?;

    let password_hash = hash_password(DEMO_PASSWORD)?;

    let demo_users = [
        ("Admin User", "admin@example.com", "admin"),
        ("John Doe", "john@example.com", "student"),
        ("Jane Doe", "jane@example.com", "student"),
    ];

    for (username, email, role) in demo_users {
        let user = state
            .user_repository
            .create(username, email, &password_hash, role)
            .await?;

        // 2-4 notifications per user, random pick, random initial read state
        let picks: Vec<(&str, bool)> = {
            let mut rng = rand::thread_rng();
            let count = rng.gen_range(2..=4);
            let mut messages = STUDY_REMINDERS.to_vec();
            messages.shuffle(&mut rng);
            messages
                .into_iter()
                .take(count)
                .map(|message| (message, rng.gen_bool(0.5)))
                .collect()
        };

        let count = picks.len();
        for (message, already_read) in picks {
            let notification = state
                .notification_repository
                .create(user.id, None, message, None, NotificationKind::Info)
                .await?;

            if already_read {
                state
                    .notification_repository
                    .mark_as_read(notification.id)
                    .await?;
            }
        }

        info!("Added {} study notifications for {}", count, email);
    }

    Ok(())
}
