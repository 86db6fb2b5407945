//! TUI application state.
//!
//! [`App`] wraps the shared [`FeedReader`] with the bits of state that only
//! the terminal front end cares about: list cursors, the status line and
//! pending load requests.

use std::sync::Arc;

use ratatui::widgets::ListState;

use crate::loader::FeedReader;
use crate::worker::LoadMsg;

pub struct App {
    reader: Arc<FeedReader>,
    /// Cursor over the entries of the loaded feed.
    pub list_state: ListState,
    /// Cursor over the feeds in the menu.
    pub menu_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last load status message.
    pub status: String,
    load_request: Option<usize>,
    current_feed: Option<usize>,
}

impl App {
    pub fn new(reader: Arc<FeedReader>) -> Self {
        Self {
            reader,
            list_state: ListState::default(),
            menu_state: ListState::default(),
            quit: false,
            status: "Starting…".into(),
            load_request: None,
            current_feed: None,
        }
    }

    pub fn reader(&self) -> &Arc<FeedReader> {
        &self.reader
    }

    pub fn menu_visible(&self) -> bool {
        !self.reader.page().menu.is_hidden()
    }

    pub fn current_feed(&self) -> Option<usize> {
        self.current_feed
    }

    // -- loading -------------------------------------------------------------

    /// Queue feed `index` for loading.
    pub fn request_feed(&mut self, index: usize) {
        if let Some(feed) = self.reader.registry().get(index) {
            self.status = format!("Loading {}…", feed.name);
            self.load_request = Some(index);
        }
    }

    /// Take the pending load request, if any.
    pub fn take_load_request(&mut self) -> Option<usize> {
        self.load_request.take()
    }

    /// Apply a result from the load worker.
    pub fn apply(&mut self, msg: LoadMsg) {
        match msg {
            LoadMsg::Loaded { index, entries } => {
                let refreshed = self.current_feed == Some(index);
                self.current_feed = Some(index);
                let name = self
                    .reader
                    .registry()
                    .get(index)
                    .map(|feed| feed.name.as_str())
                    .unwrap_or("feed");
                self.status = format!("Loaded {entries} entries from {name}");
                let selected = match (entries, self.list_state.selected()) {
                    (0, _) => None,
                    // A refresh of the same feed keeps the reader's place.
                    (_, Some(i)) if refreshed => Some(i.min(entries - 1)),
                    _ => Some(0),
                };
                self.list_state.select(selected);
            }
            LoadMsg::Failed { error, .. } => {
                self.status = format!("Error: {error}");
            }
        }
    }

    // -- menu ----------------------------------------------------------------

    /// The menu icon: show or hide the feed menu.
    pub fn toggle_menu(&mut self) {
        self.reader.click_menu_icon();
        if self.menu_visible() {
            self.menu_state.select(Some(self.current_feed.unwrap_or(0)));
        }
    }

    /// Load the feed under the menu cursor and close the menu.
    pub fn choose_menu_feed(&mut self) {
        if !self.menu_visible() {
            return;
        }
        if let Some(index) = self.menu_state.selected() {
            self.request_feed(index);
        }
        self.reader.page().menu.hide();
    }

    // -- navigation ----------------------------------------------------------

    /// Length of whichever list the cursor keys currently drive.
    fn active_len(&self) -> usize {
        if self.menu_visible() {
            self.reader.registry().len()
        } else {
            self.reader.page().display.entry_count()
        }
    }

    fn active_state(&mut self) -> &mut ListState {
        if self.menu_visible() {
            &mut self.menu_state
        } else {
            &mut self.list_state
        }
    }

    pub fn select_next(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let state = self.active_state();
        let i = match state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.active_len() == 0 {
            return;
        }
        let state = self.active_state();
        let i = match state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.active_len() > 0 {
            self.active_state().select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.active_len();
        if len > 0 {
            self.active_state().select(Some(len - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::reader;

    async fn loaded_app() -> App {
        let reader = reader(&["Alpha", "Beta", "Gamma"]);
        let entries = reader.load_feed(0).await.unwrap();
        let mut app = App::new(reader);
        app.apply(LoadMsg::Loaded { index: 0, entries });
        app
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_with_hidden_menu_and_no_selection() {
        let app = App::new(reader(&["Alpha"]));
        assert!(!app.menu_visible());
        assert!(!app.quit);
        assert!(app.list_state.selected().is_none());
        assert!(app.current_feed().is_none());
    }

    // -- loading -------------------------------------------------------------

    #[test]
    fn request_feed_queues_once() {
        let mut app = App::new(reader(&["Alpha", "Beta"]));
        app.request_feed(1);
        assert_eq!(app.status, "Loading Beta…");
        assert_eq!(app.take_load_request(), Some(1));
        assert_eq!(app.take_load_request(), None);
    }

    #[test]
    fn request_for_unknown_feed_is_ignored() {
        let mut app = App::new(reader(&["Alpha"]));
        app.request_feed(5);
        assert_eq!(app.take_load_request(), None);
    }

    #[tokio::test]
    async fn apply_loaded_selects_first_entry() {
        let app = loaded_app().await;
        assert_eq!(app.current_feed(), Some(0));
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.status, "Loaded 3 entries from Alpha");
    }

    #[tokio::test]
    async fn refresh_of_same_feed_keeps_cursor() {
        let mut app = loaded_app().await;
        app.select_last();
        app.apply(LoadMsg::Loaded { index: 0, entries: 3 });
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[tokio::test]
    async fn refresh_with_fewer_entries_clamps_cursor() {
        let mut app = loaded_app().await;
        app.select_last();
        app.apply(LoadMsg::Loaded { index: 0, entries: 2 });
        assert_eq!(app.list_state.selected(), Some(1));
        app.apply(LoadMsg::Loaded { index: 0, entries: 0 });
        assert_eq!(app.list_state.selected(), None);
    }

    #[tokio::test]
    async fn switching_feeds_resets_cursor_to_top() {
        let mut app = loaded_app().await;
        app.select_last();
        app.apply(LoadMsg::Loaded { index: 1, entries: 3 });
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn apply_failed_reports_error() {
        let mut app = App::new(reader(&["Alpha"]));
        app.apply(LoadMsg::Failed {
            index: 0,
            error: "boom".into(),
        });
        assert_eq!(app.status, "Error: boom");
        assert!(app.current_feed().is_none());
    }

    // -- menu ----------------------------------------------------------------

    #[tokio::test]
    async fn toggle_menu_shows_and_hides() {
        let mut app = loaded_app().await;
        app.toggle_menu();
        assert!(app.menu_visible());
        assert_eq!(app.menu_state.selected(), Some(0));
        app.toggle_menu();
        assert!(!app.menu_visible());
    }

    #[tokio::test]
    async fn choosing_a_feed_requests_it_and_hides_menu() {
        let mut app = loaded_app().await;
        app.toggle_menu();
        app.select_next();
        app.select_next();
        app.choose_menu_feed();

        assert!(!app.menu_visible());
        assert_eq!(app.take_load_request(), Some(2));
        assert_eq!(app.status, "Loading Gamma…");
    }

    #[test]
    fn choosing_with_menu_hidden_does_nothing() {
        let mut app = App::new(reader(&["Alpha"]));
        app.choose_menu_feed();
        assert_eq!(app.take_load_request(), None);
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_display_is_noop() {
        let mut app = App::new(reader(&["Alpha"]));
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[tokio::test]
    async fn entry_cursor_clamps_at_both_ends() {
        let mut app = loaded_app().await;
        app.select_last();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
        app.select_first();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn cursor_keys_drive_menu_while_visible() {
        let mut app = loaded_app().await;
        app.toggle_menu();
        app.select_last();
        assert_eq!(app.menu_state.selected(), Some(2));
        // The entry cursor did not move.
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
