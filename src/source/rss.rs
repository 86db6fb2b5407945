//! RSS feed source implementation.
//!
//! [`RssSource`] downloads a feed over HTTP with [`reqwest`] and turns the
//! RSS 2.0 document into [`FeedItem`]s with the [`rss`](::rss) crate.  The
//! parsing half is exposed as [`RssSource::parse_channel`] so tests (and
//! fixture sources) can reuse it without touching the network.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{FeedItem, FeedSource, FetchError};
use crate::registry::FeedDescriptor;

/// An HTTP-backed RSS feed source.
///
/// One instance serves every feed in the registry; the descriptor passed to
/// [`fetch`](FeedSource::fetch) says which URL to hit.
pub struct RssSource {
    client: reqwest::Client,
}

impl RssSource {
    /// Create a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Parse an already-fetched [`rss::Channel`](::rss::Channel) into
    /// [`FeedItem`]s labelled with `feed_name`.
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// parsing logic without hitting the network.
    pub fn parse_channel(channel: &::rss::Channel, feed_name: &str) -> Vec<FeedItem> {
        channel
            .items()
            .iter()
            .map(|item| {
                // Prefer <guid>, fall back to <link>, then the title.
                let id = item
                    .guid()
                    .map(|g| g.value().to_string())
                    .or_else(|| item.link().map(String::from))
                    .or_else(|| item.title().map(String::from))
                    .unwrap_or_default();

                // Parse RFC-2822 date; gracefully degrade to None on failure.
                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.with_timezone(&Utc));

                FeedItem {
                    id,
                    title: item.title().unwrap_or("(untitled)").to_string(),
                    description: item.description().map(String::from),
                    link: item.link().map(String::from),
                    published,
                    source_name: feed_name.to_string(),
                }
            })
            .collect()
    }

    /// Parse raw RSS bytes.
    pub fn parse_bytes(body: &[u8], feed_name: &str) -> Result<Vec<FeedItem>, FetchError> {
        let channel = ::rss::Channel::read_from(body)?;
        Ok(Self::parse_channel(&channel, feed_name))
    }
}

#[async_trait]
impl FeedSource for RssSource {
    async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError> {
        let body = self
            .client
            .get(&feed.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(feed = %feed.name, bytes = body.len(), "fetched feed body");
        Self::parse_bytes(body.as_ref(), &feed.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_channel_extracts_items() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <item>
      <title>First Post</title>
      <link>https://example.com/1</link>
      <guid>guid-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
      <description>First description</description>
    </item>
    <item>
      <title>Second Post</title>
      <link>https://example.com/2</link>
      <guid>guid-2</guid>
      <pubDate>Tue, 02 Jan 2024 12:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

        let items = RssSource::parse_bytes(xml.as_bytes(), "TestFeed").unwrap();

        assert_eq!(items.len(), 2);

        assert_eq!(items[0].id, "guid-1");
        assert_eq!(items[0].title, "First Post");
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/1"));
        assert_eq!(items[0].description.as_deref(), Some("First description"));
        assert_eq!(items[0].source_name, "TestFeed");
        assert!(items[0].published.is_some());

        assert_eq!(items[1].id, "guid-2");
        assert!(items[1].description.is_none());
    }

    #[test]
    fn falls_back_to_link_when_no_guid() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <title>No GUID</title>
      <link>https://example.com/no-guid</link>
    </item>
  </channel>
</rss>"#;

        let items = RssSource::parse_bytes(xml.as_bytes(), "t").unwrap();
        assert_eq!(items[0].id, "https://example.com/no-guid");
    }

    #[test]
    fn handles_missing_title() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <guid>g1</guid>
    </item>
  </channel>
</rss>"#;

        let items = RssSource::parse_bytes(xml.as_bytes(), "t").unwrap();
        assert_eq!(items[0].title, "(untitled)");
    }

    #[test]
    fn handles_invalid_date() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <guid>g1</guid>
      <title>Bad Date</title>
      <pubDate>not-a-real-date</pubDate>
    </item>
  </channel>
</rss>"#;

        let items = RssSource::parse_bytes(xml.as_bytes(), "t").unwrap();
        assert!(items[0].published.is_none());
    }

    #[test]
    fn rejects_non_rss_body() {
        let err = RssSource::parse_bytes(b"<html><body>nope</body></html>", "t").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
