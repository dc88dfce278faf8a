use clap::Parser;
use dotenvy::dotenv;
use statusrelay::{observability, Config, FeishuClient, HttpFeedSource, Relay, RunOutcome};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_CONFIG_ERROR: u8 = 2;

/// Relay the newest status-history entry to a Feishu/Lark webhook
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Feed to watch (overrides RSS_URL)
    #[clap(long)]
    feed_url: Option<String>,

    /// Where delivered entry ids are recorded (overrides STATE_FILE)
    #[clap(long)]
    state_file: Option<PathBuf>,

    /// Resolve and report configuration, then exit without any network call
    #[clap(long)]
    check_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();
    observability::init_logging();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("ERROR: {e}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    if args.check_config {
        return check_config(&config);
    }

    tracing::info!(feed = %config.feed_url, "Starting RSS check...");

    let feed = match HttpFeedSource::new(&config) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(RunOutcome::FeedFailed(e).exit_code());
        }
    };
    let notifier = match FeishuClient::new(&config) {
        Ok(notifier) => notifier,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = Relay::new(&config, &feed, &notifier).run().await;
    tracing::info!(success = outcome.is_success(), "Run finished: {outcome:?}");
    ExitCode::from(outcome.exit_code())
}

fn load_config(args: &Args) -> Result<Config, statusrelay::errors::ConfigError> {
    let state_file = args
        .state_file
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());

    Config::from_lookup(|key| match key {
        "RSS_URL" => args.feed_url.clone().or_else(|| env::var(key).ok()),
        "STATE_FILE" => state_file.clone().or_else(|| env::var(key).ok()),
        _ => env::var(key).ok(),
    })
}

fn check_config(config: &Config) -> ExitCode {
    tracing::info!("Resolved configuration: {config:?}");
    match config.require_webhook() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("ERROR: {e}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}
