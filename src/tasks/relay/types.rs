use crate::errors::{DeliveryError, FeedError, StateError};
use crate::models::feed_entry::FeedEntry;

/// Where feed entries come from. Entries are returned in feed order,
/// newest first by the provider's convention.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError>;
}

/// Delivers one entry downstream.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn deliver(&self, title: &str, link: &str, published: &str) -> Result<(), DeliveryError>;
}

/// How a single relay run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The feed had no entries at all.
    NoEntries,
    /// Every entry was delivered by an earlier run.
    NothingNew,
    /// `id` was delivered and committed. `deferred` pending entries were left for later runs.
    Delivered { id: String, deferred: usize },
    MissingWebhook,
    FeedFailed(FeedError),
    DeliveryFailed { id: String, error: DeliveryError },
    /// Delivery succeeded but the state file could not be written, so the
    /// entry will be delivered again next run.
    CommitFailed { id: String, error: StateError },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            RunOutcome::NoEntries | RunOutcome::NothingNew | RunOutcome::Delivered { .. }
        )
    }

    /// Process exit status for the scheduler.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::NoEntries | RunOutcome::NothingNew | RunOutcome::Delivered { .. } => 0,
            RunOutcome::DeliveryFailed { .. } | RunOutcome::CommitFailed { .. } => 1,
            RunOutcome::MissingWebhook => 2,
            RunOutcome::FeedFailed(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunOutcome::NoEntries.exit_code(), 0);
        assert_eq!(RunOutcome::NothingNew.exit_code(), 0);
        assert_eq!(
            RunOutcome::Delivered {
                id: "a".into(),
                deferred: 0
            }
            .exit_code(),
            0
        );
        assert_eq!(
            RunOutcome::DeliveryFailed {
                id: "a".into(),
                error: DeliveryError::NotConfigured
            }
            .exit_code(),
            1
        );
        assert_eq!(RunOutcome::MissingWebhook.exit_code(), 2);
        assert_eq!(
            RunOutcome::FeedFailed(FeedError::Status {
                url: "https://example.com".into(),
                status: 404
            })
            .exit_code(),
            3
        );
    }

    #[test]
    fn test_feed_failure_exit_code_ignores_cause() {
        let malformed = crate::feed::client::parse_entries(b"").unwrap_err();
        assert_eq!(RunOutcome::FeedFailed(malformed).exit_code(), 3);

        // what the binary reports when the feed HTTP client cannot be built
        let client = reqwest::Client::builder()
            .user_agent("bad\nagent")
            .build()
            .unwrap_err();
        assert_eq!(RunOutcome::FeedFailed(FeedError::Client(client)).exit_code(), 3);
    }

    #[test]
    fn test_only_clean_endings_are_success() {
        assert!(RunOutcome::NothingNew.is_success());
        assert!(!RunOutcome::MissingWebhook.is_success());
        assert!(!RunOutcome::CommitFailed {
            id: "a".into(),
            error: StateError::Write {
                path: "/nope".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            },
        }
        .is_success());
    }
}
