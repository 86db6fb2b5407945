//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::loader::FeedReader;
use crate::registry::{FeedDescriptor, FeedRegistry};
use crate::source::{FeedItem, FeedSource, FetchError};

/// Serves three dated items per feed, titled after the feed.
pub struct StaticSource;

#[async_trait]
impl FeedSource for StaticSource {
    async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError> {
        Ok((1..=3)
            .map(|n| FeedItem {
                id: format!("{}#{n}", feed.url),
                title: format!("{} story {n}", feed.name),
                description: Some(format!("<p>About {} {n}</p>", feed.name)),
                link: Some(format!("{}/{n}", feed.url)),
                published: Some(Utc.with_ymd_and_hms(2025, 1, n, 0, 0, 0).unwrap()),
                source_name: feed.name.clone(),
            })
            .collect())
    }
}

/// A reader over feeds named `names`, served by [`StaticSource`].
pub fn reader(names: &[&str]) -> Arc<FeedReader> {
    let registry = FeedRegistry::from(
        names
            .iter()
            .map(|name| FeedDescriptor::new(*name, format!("http://{}.test/rss", name.to_lowercase())))
            .collect::<Vec<_>>(),
    );
    Arc::new(FeedReader::new(registry, Arc::new(StaticSource)))
}
