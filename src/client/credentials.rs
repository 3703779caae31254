use super::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

pub const CREDENTIALS_KEY: &str = "learnhub_user";

/// Last authenticated identity, kept in the durable per-browser store and
/// read once at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub token: String,
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
}

/// `None` means logged out: the notification poller is simply not started.
/// Unreadable data counts as logged out rather than an error.
pub fn load_credentials(store: &dyn KeyValueStore) -> Option<Credentials> {
    let raw = store.get(CREDENTIALS_KEY)?;
    serde_json::from_str(&raw).ok()
}

pub fn save_credentials(store: &dyn KeyValueStore, credentials: &Credentials) {
    match serde_json::to_string(credentials) {
        Ok(json) => {
            if let Err(err) = store.set(CREDENTIALS_KEY, &json) {
                warn!("failed to persist credentials: {err}");
            }
        }
        Err(err) => warn!("failed to serialize credentials: {err}"),
    }
}
