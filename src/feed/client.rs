use crate::config::Config;
use crate::errors::FeedError;
use crate::models::feed_entry::FeedEntry;
use crate::tasks::relay::FeedSource;
use feed_rs::model::{Link, Text};
use feed_rs::parser;
use reqwest::Client;
use std::collections::HashMap;

// See: https://stackoverflow.com/a/7001617/5155484
const ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, application/feed+json, application/xml;q=0.9, text/xml;q=0.8";
const USER_AGENT: &str = concat!("statusrelay/", env!("CARGO_PKG_VERSION"));

/// Fetches the status feed over HTTP. No explicit timeout: the client's
/// defaults govern how long the fetch may wait.
pub struct HttpFeedSource {
    client: Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FeedError::Client)?;

        Ok(Self {
            client,
            url: config.feed_url.clone(),
        })
    }
}

impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        tracing::debug!("Fetching feed {}", self.url);
        let fetch_err = |source: reqwest::Error| FeedError::Fetch {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Got non-success response for feed {}: {}", self.url, status);
            return Err(FeedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_err)?;
        let entries = parse_entries(&body)?;
        tracing::info!("Found {} items in {}", entries.len(), self.url);
        Ok(entries)
    }
}

/// Parse a feed document into entries, preserving document order.
///
/// Entries without a guid are identified by their first link. RSS `pubDate`
/// values are passed through untouched.
pub fn parse_entries(body: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let feed = parser::Builder::new()
        .id_generator(link_id)
        .build()
        .parse(body)?;
    let mut pub_dates = raw_pub_dates(body);

    Ok(feed
        .entries
        .into_iter()
        .map(|e| {
            let mut entry = FeedEntry::from_feed_rs(e);
            if let Some(raw) = pub_dates.remove(&entry.id) {
                entry.published = raw;
            }
            entry
        })
        .collect())
}

/// `pubDate` strings of an RSS 2.0 document, keyed the way entries are identified.
/// Empty for anything the rss crate cannot read, such as Atom.
fn raw_pub_dates(body: &[u8]) -> HashMap<String, String> {
    let channel = match rss::Channel::read_from(body) {
        Ok(channel) => channel,
        Err(e) => {
            tracing::debug!("Not reading raw pubDate values: {e}");
            return HashMap::new();
        }
    };

    channel
        .items()
        .iter()
        .filter_map(|item| {
            let published = item.pub_date()?.trim();
            let id = item.guid().map(|g| g.value()).or(item.link())?.trim();
            Some((id.to_string(), published.to_string()))
        })
        .collect()
}

fn link_id(links: &[Link], _title: &Option<Text>, _base: Option<&str>) -> String {
    links.first().map(|l| l.href.clone()).unwrap_or_default()
}
