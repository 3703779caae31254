use super::notification_models::NotificationKind;
use crate::state::AppState;
use rand::seq::SliceRandom;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Study nudges rotated through by the reminder job and the seeder.
pub const STUDY_REMINDERS: [&str; 8] = [
    "Reminder: Study for at least 30 minutes today to stay on track!",
    "Tip: Review your course materials. Consistency beats cramming.",
    "Time to learn! Your next lesson is waiting. Keep the streak alive!",
    "Study reminder: A little progress each day adds up to big results.",
    "Ready to learn? Spend 20 minutes on a course you're working on.",
    "Don't forget: Daily practice builds mastery. Start a session today!",
    "Your brain will thank you: 15 minutes of study can make a difference.",
    "Stay curious! Open a course and learn something new.",
];

pub async fn start_reminder_service(state: AppState) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new().await?;

    // Run every morning at 09:00 and nudge everyone who still wants reminders
    let job = Job::new_async("0 0 9 * * *", move |_uuid, _l| {
        let state = state.clone();

        Box::pin(async move {
            if let Err(e) = create_study_reminders(state).await {
                error!("Error creating study reminders: {:?}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Reminder service started");
    Ok(())
}

async fn create_study_reminders(state: AppState) -> anyhow::Result<()> {
    let users = state.user_repository.find_all_notifiable().await?;

    for user in users {
        let message = {
            let mut rng = rand::thread_rng();
            STUDY_REMINDERS
                .choose(&mut rng)
                .copied()
                .unwrap_or(STUDY_REMINDERS[0])
        };

        state
            .notification_repository
            .create(
                user.id,
                Some("Study reminder"),
                message,
                Some("/dashboard"),
                NotificationKind::Reminder,
            )
            .await?;

        info!("Created study reminder for {}", user.email);
    }

    Ok(())
}
