use crate::errors::ConfigError;
use std::env;
use std::fmt;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_FEED_URL: &str = "https://status.linode.com/history.rss";
pub const DEFAULT_STATE_FILE: &str = "/app/cache/processed.json";

/// Everything a run needs, resolved once at process start.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub feed_url: String,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub state_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let feed_url = match get("RSS_URL") {
            Some(url) => {
                tracing::info!("Using feed from RSS_URL: {}", url);
                url
            }
            None => {
                tracing::info!("Using default feed: {}", DEFAULT_FEED_URL);
                DEFAULT_FEED_URL.to_string()
            }
        };
        Url::parse(&feed_url).map_err(|source| ConfigError::InvalidUrl {
            name: "RSS_URL",
            source,
        })?;

        let webhook_url = get("WEBHOOK_URL");
        if let Some(url) = &webhook_url {
            let parsed = Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
                name: "WEBHOOK_URL",
                source,
            })?;
            tracing::info!("Using webhook from WEBHOOK_URL: {}", mask_url(&parsed));
        }

        let webhook_secret = get("WEBHOOK_SECRET");
        tracing::info!(signing = webhook_secret.is_some(), "Webhook signing configured");

        let state_file = match get("STATE_FILE") {
            Some(path) => {
                tracing::info!("Using state file from STATE_FILE: {}", path);
                PathBuf::from(path)
            }
            None => PathBuf::from(DEFAULT_STATE_FILE),
        };

        Ok(Self {
            feed_url,
            webhook_url,
            webhook_secret,
            state_file,
        })
    }

    /// Fails with [`ConfigError::MissingWebhook`] when there is nowhere to deliver to.
    pub fn require_webhook(&self) -> Result<&str, ConfigError> {
        self.webhook_url.as_deref().ok_or(ConfigError::MissingWebhook)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let webhook = self
            .webhook_url
            .as_deref()
            .map(|u| Url::parse(u).map(|p| mask_url(&p)).unwrap_or_else(|_| "***".into()));
        f.debug_struct("Config")
            .field("feed_url", &self.feed_url)
            .field("webhook_url", &webhook)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "***"))
            .field("state_file", &self.state_file)
            .finish()
    }
}

/// Hide the bot token that webhook URLs carry in their last path segment.
pub fn mask_url(url: &Url) -> String {
    let mut masked = url.clone();
    masked.set_query(None);
    if let Ok(mut segments) = masked.path_segments_mut() {
        segments.pop_if_empty().pop().push("***");
    }
    masked.to_string()
}
