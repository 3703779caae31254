use super::api::{ApiClient, ClientError};
use crate::notification::NotificationResponse;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

/// Refresh cadence of the notification mirror.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Client-local mirror of the authenticated user's notification list.
#[derive(Clone)]
pub struct NotificationPoller {
    api: ApiClient,
    mirror: Arc<RwLock<Vec<NotificationResponse>>>,
}

impl NotificationPoller {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            mirror: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn snapshot(&self) -> Vec<NotificationResponse> {
        self.mirror.read().await.clone()
    }

    /// One fetch. A successful response replaces the mirror wholesale; a
    /// failed one leaves it untouched and is reported to the caller, who is
    /// expected to log it and wait for the next tick.
    pub async fn poll_once(&self) -> Result<(), ClientError> {
        let notifications = self.api.list_notifications().await?;
        *self.mirror.write().await = notifications;
        Ok(())
    }

    /// Starts the refresh loop: one fetch immediately, then every
    /// [`POLL_INTERVAL`] until the token is cancelled. Ticks do not wait for
    /// in-flight fetches, so a stalled response can be overtaken by a newer
    /// one; the mirror keeps whichever lands last.
    pub fn spawn(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let poller = poller.clone();
                        tokio::spawn(async move {
                            if let Err(err) = poller.poll_once().await {
                                warn!("notification poll failed: {err}");
                            }
                        });
                    }
                    _ = cancel.cancelled() => {
                        debug!("notification poller stopped");
                        break;
                    }
                }
            }
        })
    }

    /// Optimistically flips the mirrored flag, then fires the server update
    /// on a detached task. The local flip is never rolled back on failure;
    /// the returned handle only lets a caller observe the request outcome.
    pub async fn mark_read(&self, id: Uuid) -> JoinHandle<()> {
        {
            let mut mirror = self.mirror.write().await;
            if let Some(notification) = mirror.iter_mut().find(|n| n.id == id) {
                notification.is_read = true;
            }
        }

        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(err) = api.mark_read(id).await {
                warn!("mark-read request failed: {err}");
            }
        })
    }
}
