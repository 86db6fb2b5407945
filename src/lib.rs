//! feedreader — a terminal feed reader with a built-in behavioural check
//! suite.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ LoadMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ worker.rs │ ───────► │  app.rs  │ ───────► │  ui.rs   │
//! │  (task)   │ (channel)│ (state)  │          │ (render) │
//! └───────────┘          └──────────┘          └──────────┘
//!       │ load_feed()         ▲ handle_key_event()
//!       ▼                     │
//! ┌───────────┐          ┌──────────┐
//! │ loader.rs │          │ input.rs │
//! │ (context) │          └──────────┘
//! └───────────┘
//!       ▲ PageUnderTest
//! ┌───────────┐
//! │  suite/   │
//! └───────────┘
//! ```
//!
//! * **`registry`** — the ordered list of feeds.
//! * **`source/`** — the `FeedSource` trait and the HTTP/RSS implementation.
//! * **`page`** — menu marker, header title and the feed container.
//! * **`loader`** — `FeedReader`, the application context, and `load_feed`.
//! * **`worker`** — background task that performs the UI's load requests.
//! * **`suite/`** — the checks, their query interface and the runner.
//! * **`app`**, **`ui`**, **`input`** — the terminal front end.
//! * **`config`**, **`logging`** — TOML configuration and tracing setup.

pub mod app;
pub mod config;
pub mod input;
pub mod loader;
pub mod logging;
pub mod page;
pub mod registry;
pub mod source;
pub mod suite;
pub mod ui;
pub mod worker;

#[cfg(test)]
mod test_support;
