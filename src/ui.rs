//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a three-row split: a header with the menu icon and the
//!   feed title, the body, and a one-line status bar.
//! * When the menu is visible the body splits again: the feed menu on the
//!   left, the entries on the right.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Width of the slide-out feed menu.
const MENU_WIDTH: u16 = 28;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(app, frame, header_area);

    if app.menu_visible() {
        let [menu_area, feed_area] =
            Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(1)])
                .areas(body_area);
        draw_menu(app, frame, menu_area);
        draw_feed(app, frame, feed_area);
    } else {
        draw_feed(app, frame, body_area);
    }

    draw_status_bar(app, frame, status_area);
}

/// Render the header: menu icon plus the loaded feed's name.
fn draw_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = app.reader().page().title.clone();
    let title = if title.is_empty() { "Feeds".to_string() } else { title };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ☰ ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
    ]));
    frame.render_widget(header, area);
}

/// Render the feed menu.
fn draw_menu(app: &mut App, frame: &mut Frame, area: Rect) {
    let reader = Arc::clone(app.reader());
    let items: Vec<ListItem> = reader
        .registry()
        .iter()
        .map(|feed| ListItem::new(Line::from(feed.name.as_str())))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" All Feeds ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.menu_state);
}

/// Render the scrollable list of entries.
fn draw_feed(app: &mut App, frame: &mut Frame, area: Rect) {
    let reader = Arc::clone(app.reader());
    let page = reader.page();

    let list_items: Vec<ListItem> = page
        .display
        .entries()
        .iter()
        .map(|entry| {
            let date_str = entry
                .published
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "no date".into());

            let line = Line::from(vec![
                Span::styled(format!("{:<18}", date_str), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(entry.title.as_str(), Style::default().fg(Color::White)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(Block::default().title(" Entries ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let entries = app.reader().page().display.entry_count();
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.status.as_str(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(format!("{entries} entries"), Style::default().fg(Color::Green)),
        Span::raw("  q: quit  m: menu  enter: open feed  r: reload  ↑/↓: scroll"),
    ]));
    frame.render_widget(status, area);
}
