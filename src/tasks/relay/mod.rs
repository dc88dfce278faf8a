pub mod runner;
pub mod types;

pub use runner::Relay;
pub use types::{FeedSource, Notifier, RunOutcome};
