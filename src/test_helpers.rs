use crate::config::Config;
use crate::errors::{DeliveryError, FeedError};
use crate::models::feed_entry::FeedEntry;
use crate::tasks::relay::{FeedSource, Notifier};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

/// Config with a webhook and a state file inside a fresh temp directory.
pub fn test_config() -> (TempDir, Config) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = Config {
        feed_url: "https://status.example.com/history.rss".to_string(),
        webhook_url: Some("https://open.feishu.cn/open-apis/bot/v2/hook/test".to_string()),
        webhook_secret: None,
        state_file: temp_dir.path().join("cache").join("processed.json"),
    };
    std::fs::create_dir_all(temp_dir.path().join("cache")).expect("Failed to create cache dir");
    (temp_dir, config)
}

pub fn entry(id: &str) -> FeedEntry {
    FeedEntry {
        id: id.to_string(),
        title: format!("Title {id}"),
        link: format!("https://status.example.com/incidents/{id}"),
        published: "Mon, 02 Jan 2023 15:04:05 +0000".to_string(),
    }
}

pub struct FakeFeed {
    entries: Option<Vec<FeedEntry>>,
    calls: Cell<usize>,
}

impl FakeFeed {
    pub fn with_entries(entries: Vec<FeedEntry>) -> Self {
        Self {
            entries: Some(entries),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl FeedSource for FakeFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        self.calls.set(self.calls.get() + 1);
        self.entries.clone().ok_or_else(|| FeedError::Status {
            url: "https://status.example.com/history.rss".to_string(),
            status: 503,
        })
    }
}

pub struct FakeNotifier {
    succeed: bool,
    delivered: RefCell<Vec<(String, String, String)>>,
}

impl FakeNotifier {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            delivered: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            delivered: RefCell::new(Vec::new()),
        }
    }

    /// Number of delivery attempts, successful or not.
    pub fn calls(&self) -> usize {
        self.delivered.borrow().len()
    }

    pub fn delivered(&self) -> Vec<(String, String, String)> {
        self.delivered.borrow().clone()
    }

    pub fn delivered_titles(&self) -> Vec<String> {
        self.delivered.borrow().iter().map(|d| d.0.clone()).collect()
    }
}

impl Notifier for FakeNotifier {
    async fn deliver(&self, title: &str, link: &str, published: &str) -> Result<(), DeliveryError> {
        self.delivered
            .borrow_mut()
            .push((title.to_string(), link.to_string(), published.to_string()));
        if self.succeed {
            Ok(())
        } else {
            Err(DeliveryError::HttpStatus {
                status: 500,
                body: "internal error".to_string(),
            })
        }
    }
}
