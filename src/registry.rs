//! The feed registry: the ordered list of feeds the reader knows about.
//!
//! The registry is built once from configuration and only read afterwards.
//! Feeds are addressed by their position, which is what
//! [`FeedReader::load_feed`](crate::loader::FeedReader::load_feed) takes.

use serde::{Deserialize, Serialize};

/// One subscribable feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    /// Display name, shown in the menu and as the header title.
    pub name: String,
    /// Location of the RSS document.
    pub url: String,
}

impl FeedDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Ordered sequence of [`FeedDescriptor`]s.
///
/// Construction does not validate anything; configuration loading does that.
/// Keeping the container permissive lets the check suite be pointed at
/// registries that are deliberately wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRegistry {
    feeds: Vec<FeedDescriptor>,
}

impl FeedRegistry {
    pub fn new(feeds: Vec<FeedDescriptor>) -> Self {
        Self { feeds }
    }

    pub fn get(&self, index: usize) -> Option<&FeedDescriptor> {
        self.feeds.get(index)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedDescriptor> {
        self.feeds.iter()
    }
}

impl From<Vec<FeedDescriptor>> for FeedRegistry {
    fn from(feeds: Vec<FeedDescriptor>) -> Self {
        Self::new(feeds)
    }
}

impl<'a> IntoIterator for &'a FeedRegistry {
    type Item = &'a FeedDescriptor;
    type IntoIter = std::slice::Iter<'a, FeedDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether `url` starts with `http://` or `https://`.
///
/// Only the optional `s` is matched case-insensitively (`httpS://` passes,
/// `HTTP://` does not).
pub fn has_http_scheme(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("http") else {
        return false;
    };
    let rest = rest
        .strip_prefix('s')
        .or_else(|| rest.strip_prefix('S'))
        .unwrap_or(rest);
    rest.starts_with("://")
}
