use super::types::{FeedSource, Notifier, RunOutcome};
use crate::config::Config;
use crate::models::processed_set::ProcessedSet;

/// One pass of fetch, diff, deliver, commit.
pub struct Relay<'a, F, N> {
    config: &'a Config,
    feed: &'a F,
    notifier: &'a N,
}

impl<'a, F: FeedSource, N: Notifier> Relay<'a, F, N> {
    pub fn new(config: &'a Config, feed: &'a F, notifier: &'a N) -> Self {
        Self {
            config,
            feed,
            notifier,
        }
    }

    /// Delivers at most one entry: the first one in feed order that is not
    /// in the processed set. State is only written after a confirmed delivery.
    pub async fn run(&self) -> RunOutcome {
        if self.config.require_webhook().is_err() {
            tracing::error!("WEBHOOK_URL not set");
            return RunOutcome::MissingWebhook;
        }

        let entries = match self.feed.fetch().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("{e}");
                return RunOutcome::FeedFailed(e);
            }
        };
        if entries.is_empty() {
            tracing::info!("No entries found.");
            return RunOutcome::NoEntries;
        }

        let mut processed = self.load_processed();

        let mut new_items = entries.iter().filter(|e| !processed.contains(&e.id));
        let latest = match new_items.next() {
            Some(entry) => entry,
            None => {
                tracing::info!("No new items.");
                return RunOutcome::NothingNew;
            }
        };
        let deferred = new_items.count();
        if deferred > 0 {
            tracing::debug!(deferred, "Older new items left for later runs");
        }

        tracing::info!(id = %latest.id, "Processing latest: {}", latest.title);

        if let Err(error) = self
            .notifier
            .deliver(&latest.title, &latest.link, &latest.published)
            .await
        {
            tracing::error!(id = %latest.id, "Delivery failed, state not updated: {error}");
            return RunOutcome::DeliveryFailed {
                id: latest.id.clone(),
                error,
            };
        }

        processed.insert(latest.id.clone());
        if let Err(error) = processed.save(&self.config.state_file) {
            tracing::error!(id = %latest.id, "Delivered but could not record it: {error}");
            return RunOutcome::CommitFailed {
                id: latest.id.clone(),
                error,
            };
        }

        RunOutcome::Delivered {
            id: latest.id.clone(),
            deferred,
        }
    }

    // An unusable state file must not wedge the scheduled job, so it is
    // treated as empty and replaced on the next successful delivery.
    fn load_processed(&self) -> ProcessedSet {
        ProcessedSet::load(&self.config.state_file).unwrap_or_else(|e| {
            tracing::warn!("{e}; treating as empty");
            ProcessedSet::new()
        })
    }
}
