//! Feed source abstraction layer.
//!
//! This module defines the [`FeedSource`] trait and the common [`FeedItem`]
//! type.  Concrete source implementations live in sub-modules (currently only
//! [`rss`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Define a struct (e.g. `AtomSource`) and implement [`FeedSource`] for it.
//! 3. Add `mod atom;` below and re-export your struct in the `pub use` block.
//! 4. Construct an instance in `main.rs` and hand it to
//!    [`FeedReader::new`](crate::loader::FeedReader::new).
//!
//! The loader, the display container and the UI are all source-agnostic.

mod feed_item;
mod rss;

// Re-export the public API of this module so callers can write
// `use feedreader::source::{FeedItem, FeedSource, RssSource};`
pub use feed_item::FeedItem;
pub use rss::RssSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::registry::FeedDescriptor;

/// Errors produced while fetching or parsing a single feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request failed or returned an error status.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The response body was not a valid RSS document.
    #[error("invalid rss document: {0}")]
    Parse(#[from] ::rss::Error),
}

/// Trait that every feed source must implement.
///
/// The loader awaits [`fetch()`](FeedSource::fetch) from tokio tasks, so
/// implementations must be [`Send`] and [`Sync`].
///
/// ## Implementing a new source
///
/// ```ignore
/// pub struct MySource { /* client, credentials, ... */ }
///
/// #[async_trait]
/// impl FeedSource for MySource {
///     async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError> {
///         // Perform HTTP / IO, then convert into FeedItem values.
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the latest batch of items for `feed`.
    ///
    /// Implementations perform their own HTTP/IO work and return parsed
    /// [`FeedItem`] values tagged with `feed.name`.
    async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError>;
}
