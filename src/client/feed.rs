use super::poller::NotificationPoller;
use super::tips::{StudyTip, TipDeck};
use crate::notification::NotificationResponse;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One row of the notification dropdown: either a client-only study tip or a
/// server notification, behind a common projection so badge and list logic
/// never count the two sources separately.
#[derive(Debug, Clone)]
pub enum FeedItem {
    Tip(StudyTip),
    Notification(NotificationResponse),
}

impl FeedItem {
    pub fn id(&self) -> String {
        match self {
            FeedItem::Tip(tip) => tip.id.to_string(),
            FeedItem::Notification(n) => n.id.to_string(),
        }
    }

    pub fn body(&self) -> &str {
        match self {
            FeedItem::Tip(tip) => tip.message,
            FeedItem::Notification(n) => &n.message,
        }
    }

    /// Visible tips and unread notifications both count toward the badge.
    pub fn needs_attention(&self) -> bool {
        match self {
            FeedItem::Tip(_) => true,
            FeedItem::Notification(n) => !n.is_read,
        }
    }
}

/// Tips first (catalog order), then server notifications (server order).
pub fn assemble_feed(
    tips: &[StudyTip],
    notifications: &[NotificationResponse],
) -> Vec<FeedItem> {
    let mut feed = Vec::with_capacity(tips.len() + notifications.len());
    feed.extend(tips.iter().cloned().map(FeedItem::Tip));
    feed.extend(notifications.iter().cloned().map(FeedItem::Notification));
    feed
}

pub fn badge_count(feed: &[FeedItem]) -> usize {
    feed.iter().filter(|item| item.needs_attention()).count()
}

/// Composition layer over the poller and the tip deck; holds no state of its
/// own and always reflects the latest values of its two sources.
pub struct NotificationCenter {
    poller: NotificationPoller,
    tips: TipDeck,
}

impl NotificationCenter {
    pub fn new(poller: NotificationPoller, tips: TipDeck) -> Self {
        Self { poller, tips }
    }

    pub fn poller(&self) -> &NotificationPoller {
        &self.poller
    }

    pub async fn feed(&self) -> Vec<FeedItem> {
        assemble_feed(&self.tips.visible(), &self.poller.snapshot().await)
    }

    pub async fn badge(&self) -> usize {
        badge_count(&self.feed().await)
    }

    pub fn dismiss_tip(&mut self, tip_id: &str) {
        self.tips.dismiss(tip_id);
    }

    pub async fn mark_read(&self, id: Uuid) -> JoinHandle<()> {
        self.poller.mark_read(id).await
    }
}
