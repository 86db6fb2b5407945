//! Feed loading.
//!
//! [`FeedReader`] is the application context: it owns the registry, the
//! feed source and the [`Page`].  [`FeedReader::load_feed`] is the only way
//! display content changes.
//!
//! ## Sequencing
//!
//! `load_feed` resolves only after the new content is visible on the page,
//! so awaiting one load before starting the next gives strictly ordered
//! snapshots.  The page lock is never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{info, warn};

use crate::page::Page;
use crate::registry::FeedRegistry;
use crate::source::{FeedSource, FetchError};

/// Errors returned by [`FeedReader::load_feed`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The index does not address a feed in the registry.
    #[error("no feed at index {index} (registry has {len})")]
    UnknownFeed { index: usize, len: usize },
    /// The feed could not be fetched or parsed.
    #[error("loading {name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: FetchError,
    },
}

/// The feed reader application state.
pub struct FeedReader {
    registry: FeedRegistry,
    source: Arc<dyn FeedSource>,
    page: Mutex<Page>,
}

impl FeedReader {
    pub fn new(registry: FeedRegistry, source: Arc<dyn FeedSource>) -> Self {
        Self {
            registry,
            source,
            page: Mutex::new(Page::default()),
        }
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    /// Lock the page for reading or mutation.
    ///
    /// A panic while holding the lock cannot leave the page half-written
    /// (every mutation is a single assignment), so poisoning is ignored.
    pub fn page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch feed `index` and replace the display container with its items.
    ///
    /// Resolves once the new entries are on the page, returning how many
    /// were rendered.  On error the page keeps its previous content.
    pub async fn load_feed(&self, index: usize) -> Result<usize, LoadError> {
        let feed = self.registry.get(index).ok_or(LoadError::UnknownFeed {
            index,
            len: self.registry.len(),
        })?;

        info!(index, feed = %feed.name, url = %feed.url, "loading feed");
        let items = match self.source.fetch(feed).await {
            Ok(items) => items,
            Err(source) => {
                warn!(index, feed = %feed.name, error = %source, "feed load failed");
                return Err(LoadError::Fetch {
                    name: feed.name.clone(),
                    source,
                });
            }
        };

        let count = self.page().show_feed(&feed.name, items);
        info!(index, feed = %feed.name, entries = count, "feed loaded");
        Ok(count)
    }

    /// Activate the menu icon.
    pub fn click_menu_icon(&self) {
        self.page().menu.toggle();
    }
}
