use super::storage::KeyValueStore;
use std::sync::Arc;
use tracing::warn;

pub const DISMISSED_TIPS_KEY: &str = "learnhub_dismissed_tips";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyTip {
    pub id: &'static str,
    pub message: &'static str,
}

/// Client-only reminders. Never persisted server-side.
pub const TIP_CATALOG: [StudyTip; 5] = [
    StudyTip {
        id: "tip1",
        message: "📚 Reminder: Study daily to achieve your goals!",
    },
    StudyTip {
        id: "tip2",
        message: "💡 Tip: Practice coding for at least 30 minutes today.",
    },
    StudyTip {
        id: "tip3",
        message: "🚀 Keep pushing! Consistency is the key to mastery.",
    },
    StudyTip {
        id: "tip4",
        message: "🎓 Don't forget to review your latest course materials.",
    },
    StudyTip {
        id: "tip5",
        message: "🌟 You're doing great! Take a break and come back refreshed.",
    },
];

/// Decides which tips are currently visible, backed by a session-scoped
/// dismissal list in the injected store.
pub struct TipDeck {
    store: Arc<dyn KeyValueStore>,
    dismissed: Vec<String>,
}

impl TipDeck {
    /// Anything unreadable in the store degrades to "nothing dismissed".
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let dismissed = store
            .get(DISMISSED_TIPS_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();

        Self { store, dismissed }
    }

    /// Catalog minus dismissals, in catalog order.
    pub fn visible(&self) -> Vec<StudyTip> {
        TIP_CATALOG
            .iter()
            .filter(|tip| !self.dismissed.iter().any(|d| d == tip.id))
            .cloned()
            .collect()
    }

    /// Hides the tip for the rest of the session. The updated list is written
    /// to the store before the visible list changes; a failed write still
    /// hides the tip in memory. Re-dismissing a hidden tip is a no-op.
    pub fn dismiss(&mut self, tip_id: &str) {
        if self.dismissed.iter().any(|d| d == tip_id) {
            return;
        }

        let mut updated = self.dismissed.clone();
        updated.push(tip_id.to_string());

        match serde_json::to_string(&updated) {
            Ok(json) => {
                if let Err(err) = self.store.set(DISMISSED_TIPS_KEY, &json) {
                    warn!("failed to persist dismissed tips: {err}");
                }
            }
            Err(err) => warn!("failed to serialize dismissed tips: {err}"),
        }

        self.dismissed = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::MemoryStore;

    #[test]
    fn test_fresh_session_sees_full_catalog() {
        let deck = TipDeck::load(Arc::new(MemoryStore::new()));
        assert_eq!(deck.visible().len(), TIP_CATALOG.len());
    }

    #[test]
    fn test_dismiss_hides_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = TipDeck::load(store.clone());

        deck.dismiss("tip2");

        let visible = deck.visible();
        assert_eq!(visible.len(), 4);
        assert!(visible.iter().all(|tip| tip.id != "tip2"));
        assert_eq!(
            store.get(DISMISSED_TIPS_KEY).as_deref(),
            Some(r#"["tip2"]"#)
        );

        // reload within the same session: still hidden
        let reloaded = TipDeck::load(store.clone());
        assert_eq!(reloaded.visible().len(), 4);

        // a new session (fresh store) sees the full catalog again
        let new_session = TipDeck::load(Arc::new(MemoryStore::new()));
        assert_eq!(new_session.visible().len(), 5);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = TipDeck::load(store.clone());

        deck.dismiss("tip3");
        let persisted = store.get(DISMISSED_TIPS_KEY);

        deck.dismiss("tip3");
        assert_eq!(deck.visible().len(), 4);
        assert_eq!(store.get(DISMISSED_TIPS_KEY), persisted);
    }

    #[test]
    fn test_malformed_storage_degrades_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(DISMISSED_TIPS_KEY, "{{{ not json").unwrap();

        let deck = TipDeck::load(store);
        assert_eq!(deck.visible().len(), TIP_CATALOG.len());
    }
}
