//! Embeddable notification-center logic: a polling mirror of the server
//! notification list, session-scoped study tips, and the combined
//! feed/badge projection a front end renders.

pub mod api;
pub mod credentials;
pub mod feed;
pub mod poller;
pub mod storage;
pub mod tips;

pub use api::{ApiClient, ClientError};
pub use credentials::{load_credentials, save_credentials, Credentials};
pub use feed::{assemble_feed, badge_count, FeedItem, NotificationCenter};
pub use poller::{NotificationPoller, POLL_INTERVAL};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use tips::{StudyTip, TipDeck, TIP_CATALOG};
