use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving configuration at process start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEBHOOK_URL not set")]
    MissingWebhook,

    #[error("Invalid {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Errors raised while retrieving or parsing the status feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to build feed client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to fetch feed {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Feed {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("RSS parse error: {0}")]
    Malformed(#[from] feed_rs::parser::ParseFeedError),
}

/// Errors raised by the processed-set state file.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Unable to read state file {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is corrupt: {source}", path = .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to write state file {path}: {source}", path = .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every way a webhook delivery can fail. None of these abort the process;
/// the relay turns them into a failed run without committing state.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("WEBHOOK_URL not set")]
    NotConfigured,

    #[error("Exception: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid signature header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Feishu API error: {body}")]
    Api { code: Option<i64>, body: String },

    #[error("Invalid response body {body:?}: {source}")]
    InvalidResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DeliveryError {
    /// HTTP status reported by the webhook, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::HttpStatus { status, .. } => Some(*status),
            DeliveryError::Api { .. } | DeliveryError::InvalidResponse { .. } => Some(200),
            DeliveryError::Transport(e) => e.status().map(|s| s.as_u16()),
            DeliveryError::NotConfigured | DeliveryError::InvalidHeader(_) => None,
        }
    }
}
