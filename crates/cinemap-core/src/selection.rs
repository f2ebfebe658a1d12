//! Tracks which request is the current one so that results of a replaced
//! selection are never shown.

use std::sync::Mutex;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// Handle for one in-flight request.
///
/// Dropping the ticket stops the task that forwards cancellation from a
/// caller's token.
#[derive(Debug)]
pub struct Ticket {
    pub key: String,
    pub generation: u64,
    pub token: CancellationToken,
    _link: Option<DropGuard>,
}

struct Current {
    generation: u64,
    key: Option<String>,
    token: CancellationToken,
}

pub struct SelectionTracker {
    current: Mutex<Current>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Current {
                generation: 0,
                key: None,
                token: CancellationToken::new(),
            }),
        }
    }

    /// Start a request for `key`.
    ///
    /// A request for a different key cancels the previous ticket; a repeat of
    /// the same key shares its token so both callers see the same result.
    /// With a `parent`, the ticket is also cancelled when `parent` is, for as
    /// long as the ticket lives.
    pub fn begin(&self, key: &str, parent: Option<&CancellationToken>) -> Ticket {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.generation += 1;

        if current.key.as_deref() != Some(key) {
            if let Some(ref previous) = current.key {
                debug!("Selection changed from {} to {}, cancelling", previous, key);
            }
            current.token.cancel();
            current.token = CancellationToken::new();
            current.key = Some(key.to_string());
        }

        let (token, link) = match parent {
            Some(parent) if parent.is_cancelled() => {
                let token = current.token.child_token();
                token.cancel();
                (token, None)
            }
            Some(parent) => {
                let token = current.token.child_token();
                let link = CancellationToken::new();
                let (parent, linked, done) = (parent.clone(), token.clone(), link.clone());
                tokio::spawn(async move {
                    tokio::select! {
                        _ = parent.cancelled() => linked.cancel(),
                        _ = linked.cancelled() => {}
                        _ = done.cancelled() => {}
                    }
                });
                (token, Some(link.drop_guard()))
            }
            None => (current.token.clone(), None),
        };

        Ticket {
            key: key.to_string(),
            generation: current.generation,
            token,
            _link: link,
        }
    }

    /// True while no request for another key has begun since `ticket`
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.key.as_deref() == Some(ticket.key.as_str()) && !ticket.token.is_cancelled()
    }
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_key_cancels_previous() {
        let tracker = SelectionTracker::new();
        let japan = tracker.begin("movies:country_JP", None);
        assert!(tracker.is_current(&japan));

        let korea = tracker.begin("movies:country_KR", None);
        assert!(japan.token.is_cancelled());
        assert!(!tracker.is_current(&japan));
        assert!(tracker.is_current(&korea));
        assert!(korea.generation > japan.generation);
    }

    #[tokio::test]
    async fn test_same_key_keeps_request_alive() {
        let tracker = SelectionTracker::new();
        let first = tracker.begin("movies:country_JP", None);
        let second = tracker.begin("movies:country_JP", None);
        assert!(!first.token.is_cancelled());
        assert!(tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[tokio::test]
    async fn test_parent_token_cancels_ticket() {
        let tracker = SelectionTracker::new();
        let parent = CancellationToken::new();
        let ticket = tracker.begin("shows:country_FR", Some(&parent));
        parent.cancel();
        tokio::time::timeout(std::time::Duration::from_secs(1), ticket.token.cancelled())
            .await
            .unwrap();
        assert!(!tracker.is_current(&ticket));

        let late = tracker.begin("shows:country_FR", Some(&parent));
        assert!(late.token.is_cancelled());
    }

    #[tokio::test]
    async fn test_linked_ticket_follows_selection_change() {
        let tracker = SelectionTracker::new();
        let parent = CancellationToken::new();
        let ticket = tracker.begin("shows:country_FR", Some(&parent));
        tracker.begin("shows:country_DE", None);
        tokio::time::timeout(std::time::Duration::from_secs(1), ticket.token.cancelled())
            .await
            .unwrap();
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_tickets_release_their_link_tasks() {
        let tracker = SelectionTracker::new();
        let metrics = tokio::runtime::Handle::current().metrics();

        for _ in 0..100 {
            let parent = CancellationToken::new();
            let ticket = tracker.begin("movies:country_JP", Some(&parent));
            drop(ticket);
        }

        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while metrics.num_alive_tasks() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_live_ticket_still_follows_parent() {
        let tracker = SelectionTracker::new();
        let parent = CancellationToken::new();
        let first = tracker.begin("movies:country_JP", Some(&parent));
        let second = tracker.begin("movies:country_JP", None);

        parent.cancel();
        tokio::time::timeout(std::time::Duration::from_secs(1), first.token.cancelled())
            .await
            .unwrap();
        // the shared request for the key keeps running
        assert!(!second.token.is_cancelled());
        assert!(tracker.is_current(&second));
    }
}
