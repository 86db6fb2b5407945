//! Presentation state of the reader: menu marker, header and feed container.
//!
//! Nothing in here does I/O.  [`FeedReader`](crate::loader::FeedReader)
//! owns a [`Page`] and is the only thing that mutates it; the UI and the
//! check suite read it.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::source::FeedItem;

/// Maximum length of the text excerpt rendered inside an entry.
const SNIPPET_CHARS: usize = 200;

/// The slide-out feed menu.  Starts hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    hidden: bool,
}

impl Default for Menu {
    fn default() -> Self {
        Self { hidden: true }
    }
}

impl Menu {
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Flip visibility.  Two toggles always restore the previous state.
    pub fn toggle(&mut self) {
        self.hidden = !self.hidden;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }
}

/// The container that holds the entries of the currently loaded feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDisplay {
    entries: Vec<FeedItem>,
}

impl FeedDisplay {
    /// Replace the whole container with `items`.
    ///
    /// Items are de-duplicated by id (first occurrence wins) and ordered
    /// newest first.  Returns the number of entries now displayed.
    pub fn replace(&mut self, items: Vec<FeedItem>) -> usize {
        let mut seen = HashSet::new();
        let mut entries: Vec<FeedItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        entries.sort(); // uses Ord impl (reverse-chronological)
        self.entries = entries;
        self.entries.len()
    }

    pub fn entries(&self) -> &[FeedItem] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Serialized markup of the container's contents.
    ///
    /// Two displays render the same string exactly when they show the same
    /// entries in the same order.
    pub fn html(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = write!(
                out,
                r#"<a class="entry-link" href="{}"><article class="entry"><h2>{}</h2><p>{}</p></article></a>"#,
                escape(entry.link.as_deref().unwrap_or("#")),
                escape(&entry.title),
                escape(&entry.snippet(SNIPPET_CHARS)),
            );
        }
        out
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Everything the reader shows.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub menu: Menu,
    /// Name of the feed on screen; empty until the first load lands.
    pub title: String,
    pub display: FeedDisplay,
}

impl Page {
    /// Show a freshly loaded feed.  Returns the number of entries displayed.
    pub fn show_feed(&mut self, name: &str, items: Vec<FeedItem>) -> usize {
        self.title = name.to_string();
        self.display.replace(items)
    }
}
