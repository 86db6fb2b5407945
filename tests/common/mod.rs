//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use feedreader::loader::FeedReader;
use feedreader::registry::{FeedDescriptor, FeedRegistry};
use feedreader::source::{FeedItem, FeedSource, FetchError, RssSource};
use feedreader::suite::PageUnderTest;

pub const CSS_TRICKS: &str = include_str!("../fixtures/css-tricks.xml");
pub const HTML5_ROCKS: &str = include_str!("../fixtures/html5-rocks.xml");
pub const EMPTY: &str = include_str!("../fixtures/empty.xml");

/// Serves RSS documents from memory, keyed by feed url.
pub struct FixtureSource {
    documents: HashMap<String, &'static str>,
}

impl FixtureSource {
    pub fn new(documents: &[(&str, &'static str)]) -> Self {
        Self {
            documents: documents
                .iter()
                .map(|(url, body)| (url.to_string(), *body))
                .collect(),
        }
    }
}

#[async_trait]
impl FeedSource for FixtureSource {
    async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError> {
        // An unknown url behaves like a server answering with an empty body.
        let body = self.documents.get(&feed.url).copied().unwrap_or("");
        RssSource::parse_bytes(body.as_bytes(), &feed.name)
    }
}

/// A reader over two fixture feeds with different content.
pub fn fixture_reader() -> FeedReader {
    let registry = FeedRegistry::from(vec![
        FeedDescriptor::new("CSS Tricks", "http://feeds.test/css-tricks"),
        FeedDescriptor::new("HTML5 Rocks", "https://feeds.test/html5-rocks"),
    ]);
    let source = FixtureSource::new(&[
        ("http://feeds.test/css-tricks", CSS_TRICKS),
        ("https://feeds.test/html5-rocks", HTML5_ROCKS),
    ]);
    FeedReader::new(registry, Arc::new(source))
}

/// A reader whose source serves `documents` for feeds named after their index.
pub fn reader_serving(documents: &[&'static str]) -> FeedReader {
    let urls: Vec<String> = (0..documents.len())
        .map(|index| format!("http://feeds.test/{index}"))
        .collect();
    let registry = FeedRegistry::from(
        urls.iter()
            .enumerate()
            .map(|(index, url)| FeedDescriptor::new(format!("Feed {index}"), url.clone()))
            .collect::<Vec<_>>(),
    );
    let pairs: Vec<(&str, &'static str)> = urls
        .iter()
        .map(String::as_str)
        .zip(documents.iter().copied())
        .collect();
    FeedReader::new(registry, Arc::new(FixtureSource::new(&pairs)))
}

/// How a [`StubPage`] answers `load_feed`.
pub enum LoadBehaviour {
    /// Resolve immediately, leaving the container as it is.
    Instant,
    /// Never resolve.
    Never,
}

/// A hand-written page double with plain fields.
pub struct StubPage {
    pub feeds: Option<FeedRegistry>,
    pub hidden: AtomicBool,
    /// When false, clicking the icon does nothing.
    pub icon_wired: bool,
    pub html: String,
    pub entries: usize,
    pub load: LoadBehaviour,
}

impl Default for StubPage {
    fn default() -> Self {
        Self {
            feeds: Some(FeedRegistry::from(vec![FeedDescriptor::new("A", "http://a.com/rss")])),
            hidden: AtomicBool::new(true),
            icon_wired: true,
            html: String::new(),
            entries: 0,
            load: LoadBehaviour::Instant,
        }
    }
}

#[async_trait]
impl PageUnderTest for StubPage {
    fn feeds(&self) -> Option<&FeedRegistry> {
        self.feeds.as_ref()
    }

    fn menu_hidden(&self) -> bool {
        self.hidden.load(Ordering::SeqCst)
    }

    fn click_menu_icon(&self) {
        if self.icon_wired {
            self.hidden.fetch_xor(true, Ordering::SeqCst);
        }
    }

    fn feed_html(&self) -> String {
        self.html.clone()
    }

    fn entry_count(&self) -> usize {
        self.entries
    }

    async fn load_feed(&self, _index: usize) -> anyhow::Result<()> {
        match self.load {
            LoadBehaviour::Instant => Ok(()),
            LoadBehaviour::Never => std::future::pending().await,
        }
    }
}
