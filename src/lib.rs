pub mod config;
pub mod errors;
pub mod feed;
pub mod feishu;
pub mod models;
pub mod observability;
pub mod security;
pub mod tasks;
#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use feed::HttpFeedSource;
pub use feishu::FeishuClient;
pub use tasks::relay::{Relay, RunOutcome};
