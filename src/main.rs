//! `feedreader` binary: the TUI, the check runner and a registry listing.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;
use tracing::info;

use feedreader::app::App;
use feedreader::config::Config;
use feedreader::loader::FeedReader;
use feedreader::logging::{self, LogTarget};
use feedreader::source::RssSource;
use feedreader::suite::{self, Runner};
use feedreader::{input, ui, worker};

#[derive(Debug, Parser)]
#[command(name = "feedreader", version, about = "Terminal feed reader")]
struct Cli {
    /// Path to a TOML config file (falls back to $FEEDREADER_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the terminal reader (default).
    Run,
    /// Run the feed, menu and loading checks against the live feeds.
    Check {
        /// Per-step timeout in milliseconds (overrides check_timeout_ms).
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Print the configured feeds.
    Feeds,
}

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let loaded = Config::load(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Command::Run);

    logging::init(log_target(&command, &loaded.config))?;
    loaded.log_origin();
    let config = loaded.config;

    let runtime = Runtime::new().context("starting tokio runtime")?;
    let source = RssSource::new(config.request_timeout())?;
    let reader = Arc::new(FeedReader::new(config.registry(), Arc::new(source)));

    match command {
        Command::Run => {
            run_tui(&runtime, reader, config.refresh_interval())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { timeout_ms } => {
            let timeout = timeout_ms.map_or_else(|| config.check_timeout(), Duration::from_millis);
            let runner = Runner::new(timeout);
            let mut suites = suite::all_suites();
            let report = runtime.block_on(runner.run(&mut suites, &*reader));
            println!("{report}");
            Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Feeds => {
            for (index, feed) in reader.registry().iter().enumerate() {
                println!("{index}\t{}\t{}", feed.name, feed.url);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// The TUI owns the terminal, so `run` logs to the configured file or not at
/// all; everything else logs to stderr.
fn log_target(command: &Command, config: &Config) -> LogTarget {
    match (command, &config.log_file) {
        (Command::Run, Some(path)) => LogTarget::File(path.clone()),
        (Command::Run, None) => LogTarget::Off,
        _ => LogTarget::Stderr,
    }
}

fn run_tui(runtime: &Runtime, reader: Arc<FeedReader>, refresh: Duration) -> Result<()> {
    install_panic_hook();

    // -- start background loading --------------------------------------------
    let mut loads = {
        let _enter = runtime.enter();
        worker::spawn(Arc::clone(&reader), refresh)
    };

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(reader);
    app.request_feed(0);
    info!("reader started");

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Forward any load request and drain results from the worker.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Loads
        if let Some(index) = app.take_load_request() {
            if !loads.request(index) {
                app.status = "Error: load worker stopped".into();
            }
        }
        while let Some(msg) = loads.try_next() {
            app.apply(msg);
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
