//! The four suites describing the reader's contract.

use async_trait::async_trait;

use super::{Expectations, PageUnderTest, Suite};
use crate::registry::has_http_scheme;

/// Every suite, in the order they run.
pub fn all_suites() -> Vec<Box<dyn Suite>> {
    vec![
        Box::new(RssFeeds),
        Box::new(TheMenu),
        Box::new(InitialEntries),
        Box::new(NewFeedSelection::default()),
    ]
}

/// The feed registry is defined, non-empty and well formed.
pub struct RssFeeds;

#[async_trait]
impl Suite for RssFeeds {
    fn name(&self) -> &'static str {
        "RSS Feeds"
    }

    fn checks(&self) -> &'static [&'static str] {
        &["are defined", "have a url", "have a name"]
    }

    async fn run_check(&mut self, index: usize, page: &dyn PageUnderTest, expect: &mut Expectations) {
        let Some(feeds) = page.feeds() else {
            expect.fail("feed registry", "defined", "undefined");
            return;
        };

        match index {
            0 => expect.greater_than(feeds.len(), 0, "number of feeds"),
            1 => {
                for (position, feed) in feeds.iter().enumerate() {
                    expect.is_true(!feed.url.is_empty(), format!("feeds[{position}].url is set"));
                    if !has_http_scheme(&feed.url) {
                        expect.fail(
                            format!("feeds[{position}].url scheme"),
                            "a url starting with http:// or https://",
                            format!("{:?}", feed.url),
                        );
                    }
                }
            }
            2 => {
                for (position, feed) in feeds.iter().enumerate() {
                    expect.not_equal(feed.name.as_str(), "", format!("feeds[{position}].name"));
                }
            }
            _ => {}
        }
    }
}

/// The menu starts hidden and the icon toggles it.
pub struct TheMenu;

#[async_trait]
impl Suite for TheMenu {
    fn name(&self) -> &'static str {
        "The Menu"
    }

    fn checks(&self) -> &'static [&'static str] {
        &["is hidden by default", "changes visibility when the menu icon is clicked"]
    }

    async fn run_check(&mut self, index: usize, page: &dyn PageUnderTest, expect: &mut Expectations) {
        match index {
            0 => expect.equal(page.menu_hidden(), true, "menu hidden on load"),
            1 => {
                page.click_menu_icon();
                expect.equal(page.menu_hidden(), false, "menu hidden after one click");
                page.click_menu_icon();
                expect.equal(page.menu_hidden(), true, "menu hidden after two clicks");
            }
            _ => {}
        }
    }
}

/// Loading the first feed puts at least one entry in the container.
pub struct InitialEntries;

#[async_trait]
impl Suite for InitialEntries {
    fn name(&self) -> &'static str {
        "Initial Entries"
    }

    fn checks(&self) -> &'static [&'static str] {
        &["has at least one entry after loading"]
    }

    async fn before_each(&mut self, page: &dyn PageUnderTest) -> anyhow::Result<()> {
        page.load_feed(0).await
    }

    async fn run_check(&mut self, _index: usize, page: &dyn PageUnderTest, expect: &mut Expectations) {
        expect.greater_than(page.entry_count(), 0, "entries in the feed container");
    }
}

/// Loading a different feed changes the container's content.
#[derive(Default)]
pub struct NewFeedSelection {
    before: Option<String>,
    after: Option<String>,
}

#[async_trait]
impl Suite for NewFeedSelection {
    fn name(&self) -> &'static str {
        "New Feed Selection"
    }

    fn checks(&self) -> &'static [&'static str] {
        &["changes content when a new feed is loaded"]
    }

    async fn before_each(&mut self, page: &dyn PageUnderTest) -> anyhow::Result<()> {
        self.before = None;
        self.after = None;

        page.load_feed(0).await?;
        self.before = Some(page.feed_html());
        page.load_feed(1).await?;
        self.after = Some(page.feed_html());
        Ok(())
    }

    async fn run_check(&mut self, _index: usize, _page: &dyn PageUnderTest, expect: &mut Expectations) {
        match (&self.before, &self.after) {
            (Some(before), Some(after)) => {
                expect.not_equal(before, after, "feed content after loading feed 1")
            }
            _ => expect.fail("feed content snapshots", "both captured", "missing"),
        }
    }
}
