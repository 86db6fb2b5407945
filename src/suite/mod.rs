//! Behavioural checks for the reader's feed, menu and loading contract.
//!
//! The checks are written against [`PageUnderTest`], the query interface a
//! page exposes: read the registry, read and toggle the menu marker, load a
//! feed and inspect the feed container.  [`FeedReader`] implements it for
//! the real application; tests implement it for doubles.
//!
//! ```text
//! ┌────────────┐ run(&mut suites, &dyn PageUnderTest) ┌──────────────┐
//! │ runner.rs  │ ───────────────────────────────────► │ contract.rs  │
//! │ (timeouts) │ ◄─── Expectations / Outcome ──────── │  (4 suites)  │
//! └────────────┘                                      └──────────────┘
//! ```

mod contract;
mod expect;
mod runner;

pub use contract::{all_suites, InitialEntries, NewFeedSelection, RssFeeds, TheMenu};
pub use expect::{Expectations, Failure};
pub use runner::{CheckReport, Outcome, Phase, Report, Runner, SuiteReport};

use async_trait::async_trait;

use crate::loader::FeedReader;
use crate::registry::FeedRegistry;

/// What a check may observe and do on the page under test.
///
/// Checks never mutate page state except through `click_menu_icon` and
/// `load_feed`.
#[async_trait]
pub trait PageUnderTest: Send + Sync {
    /// The feed registry, or `None` if the page never defined one.
    fn feeds(&self) -> Option<&FeedRegistry>;

    /// Whether the menu marker currently says "hidden".
    fn menu_hidden(&self) -> bool;

    /// Activate the menu icon once.
    fn click_menu_icon(&self);

    /// Serialized contents of the feed container.
    fn feed_html(&self) -> String;

    /// Number of entry elements inside the feed container.
    fn entry_count(&self) -> usize;

    /// Load feed `index`; resolves once its entries are on the page.
    async fn load_feed(&self, index: usize) -> anyhow::Result<()>;
}

/// A named group of checks sharing a `before_each` step.
///
/// Suites are stateful so that `before_each` can stash what the checks
/// later assert on (see [`NewFeedSelection`]).
#[async_trait]
pub trait Suite: Send {
    fn name(&self) -> &'static str;

    /// Check names, in execution order.
    fn checks(&self) -> &'static [&'static str];

    /// Runs before every check.  An error marks that check as a setup failure.
    async fn before_each(&mut self, _page: &dyn PageUnderTest) -> anyhow::Result<()> {
        Ok(())
    }

    /// Run check number `index` (into [`checks`](Suite::checks)).
    async fn run_check(&mut self, index: usize, page: &dyn PageUnderTest, expect: &mut Expectations);
}

#[async_trait]
impl PageUnderTest for FeedReader {
    fn feeds(&self) -> Option<&FeedRegistry> {
        Some(self.registry())
    }

    fn menu_hidden(&self) -> bool {
        self.page().menu.is_hidden()
    }

    fn click_menu_icon(&self) {
        FeedReader::click_menu_icon(self);
    }

    fn feed_html(&self) -> String {
        self.page().display.html()
    }

    fn entry_count(&self) -> usize {
        self.page().display.entry_count()
    }

    async fn load_feed(&self, index: usize) -> anyhow::Result<()> {
        FeedReader::load_feed(self, index).await?;
        Ok(())
    }
}
