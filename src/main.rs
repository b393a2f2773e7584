//! picsum-gallery — a terminal image gallery over the Picsum image list.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐ PageReply  ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread) │ ◄───────── │ gallery/ │          │ (render) │
//! └──────────┘ PageRequest└──────────┘          └──────────┘
//!                              ▲
//!                              │ handle_key_event()
//!                         ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`source/`** — the `ImageSource` trait, the `Item` record and the
//!   Picsum implementation.
//! * **`gallery/`** — cards, known ids, page cursor, in-flight flag and every
//!   operation on them.
//! * **`fetch`** — the worker thread that performs page requests, plus a
//!   blocking driver for headless runs.
//! * **`app`** — gallery plus selection; bridges gallery and worker.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` actions.
//! * **`main`** — parses args, sets up logging and the terminal, and runs the
//!   event loop.

mod app;
mod config;
mod error;
mod fetch;
mod gallery;
mod input;
mod logging;
mod source;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::Args;
use fetch::Fetcher;
use gallery::Gallery;
use source::{ImageSource, PicsumSource};

// ---------------------------------------------------------------------------
// RAII terminal guard
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

fn main() -> Result<()> {
    let args = Args::parse();
    let source = PicsumSource::new(&args.endpoint, args.timeout())?;

    if args.headless {
        logging::init_stderr_logging()?;
        return run_headless(&args, &source);
    }

    let _log_guard = logging::init_file_logging(&args.log_file)?;
    tracing::info!(endpoint = %args.endpoint, per_page = args.per_page, "starting gallery");
    install_panic_hook();

    let fetcher = fetch::spawn(Box::new(source));
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(args.gallery_config());

    // Initial fetch, as if "load more" had been pressed.
    app.load_more();

    run_tui(&mut guard, &mut app, &fetcher)?;

    tracing::info!(images = app.gallery.len(), "gallery closed");
    Ok(())
}

/// Main event loop.
///
/// Runs at ~10 fps (100 ms tick).  Each iteration:
///   1. Hand any pending page request to the worker.
///   2. Apply finished replies.
///   3. Render the UI.
///   4. Poll for keyboard input (non-blocking, up to tick_rate).
fn run_tui(guard: &mut TerminalGuard, app: &mut App, fetcher: &Fetcher) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        dispatch_requests(app, fetcher);

        while let Some(reply) = fetcher.try_recv() {
            app.apply_reply(reply);
            dispatch_requests(app, fetcher);
        }

        guard.terminal.draw(|f| ui::draw(app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(app, key);
            }
        }

        if app.quit {
            return Ok(());
        }
    }
}

fn dispatch_requests(app: &mut App, fetcher: &Fetcher) {
    while let Some(req) = app.take_request() {
        if !fetcher.request(req) {
            tracing::error!(page = req.page, "fetch worker is gone");
            app.apply_reply(fetch::PageReply {
                request: req,
                result: Err(error::FetchError::Network("fetch worker stopped".into())),
            });
        }
    }
}

/// Run `--pages` loads without a terminal UI and print the result.
fn run_headless(args: &Args, source: &dyn ImageSource) -> Result<()> {
    let mut gallery = Gallery::new(args.gallery_config());

    for _ in 0..args.pages {
        fetch::load_more_blocking(&mut gallery, source);
        let status = gallery.status();
        if status.is_error {
            tracing::warn!(source = source.name(), "{}", status.message);
            break;
        }
        tracing::info!("{}", status.message);
    }

    for (i, card) in gallery.cards().iter().enumerate() {
        println!(
            "{:>3}. [{}] {}  {}  {}",
            i + 1,
            card.item.id,
            card.item.author,
            card.item.url,
            card.item.image_url(400, 300)
        );
    }
    println!("{}", gallery.summary());
    Ok(())
}
