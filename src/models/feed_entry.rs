/// One item of the status-history feed, as the relay sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Feed guid, or the entry link when the feed gives no guid.
    pub id: String,
    pub title: String,
    pub link: String,
    /// Publish date exactly as the provider wrote it, empty when the feed omits it.
    pub published: String,
}

impl FeedEntry {
    /// `published` falls back to an RFC 2822 rendering of the parsed date;
    /// callers holding the raw RSS `pubDate` overwrite it.
    pub fn from_feed_rs(entry: feed_rs::model::Entry) -> Self {
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();
        // parsers built without the link id generator leave this empty
        let id = if entry.id.is_empty() {
            link.clone()
        } else {
            entry.id
        };
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let published = entry
            .published
            .map(|p| p.to_rfc2822())
            .unwrap_or_default();

        Self {
            id,
            title,
            link,
            published,
        }
    }
}
