//! The core data type shared across all feed sources.
//!
//! `FeedItem` is one entry of a loaded feed.  Every source converts its native
//! format into `FeedItem`s; the display container turns them into rendered
//! entries.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A single feed entry, normalised from any feed source.
///
/// ## Sorting
///
/// `FeedItem` implements [`Ord`] for **reverse-chronological** ordering:
/// newer items sort before older ones, and items without a date sort last.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedItem {
    /// Key used to drop duplicates within one load.
    ///
    /// RSS items use `<guid>`, then `<link>`, then the title.
    pub id: String,

    /// Headline, rendered as the entry's `<h2>`.
    pub title: String,

    /// Raw description; may contain markup.  See [`FeedItem::snippet`].
    pub description: Option<String>,

    /// Target of the entry link.
    pub link: Option<String>,

    /// Publication time.  Undated items sort after dated ones.
    pub published: Option<DateTime<Utc>>,

    /// Name of the feed this came from (e.g. "CSS Tricks").
    pub source_name: String,
}

// ---------------------------------------------------------------------------
// Ordering — reverse chronological (newest first)
// ---------------------------------------------------------------------------

impl Ord for FeedItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compared backwards; `None < Some(_)` then puts undated items last.
        // Ties fall back to the id so the order is total.
        other
            .published
            .cmp(&self.published)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for FeedItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FeedItem {
    /// Short plain-text excerpt of the description, used as the entry body.
    ///
    /// Markup is stripped and the result is cut at `max_chars` characters
    /// (with a trailing ellipsis when something was cut).
    pub fn snippet(&self, max_chars: usize) -> String {
        let Some(description) = self.description.as_deref() else {
            return String::new();
        };

        let mut text = String::with_capacity(description.len());
        let mut in_tag = false;
        for ch in description.chars() {
            match ch {
                '<' => in_tag = true,
                '>' if in_tag => {
                    in_tag = false;
                    text.push(' ');
                }
                _ if !in_tag => text.push(ch),
                _ => {}
            }
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }
        let mut cut: String = collapsed.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
