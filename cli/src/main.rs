//! dicebag - binary entry point and terminal session management.
//!
//! ```text
//! main() -> load config -> GroupStore::load(backend) -> TerminalSession -> run_app()
//! ```
//!
//! The event loop is synchronous: wait for a key (with a short timeout),
//! apply it to the [`App`], redraw. Every store transition writes through to
//! disk before the next frame.

mod logging;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

use dicebag_config::{DicebagConfig, StorageLocation};
use dicebag_core::{FileStore, GroupStore, KeyValueStore, MemoryStore};
use dicebag_tui::{App, draw, handle_events};

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode and the alternate screen are restored even after panics or
/// early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn load_config() -> DicebagConfig {
    match DicebagConfig::load() {
        Ok(Some(config)) => config,
        Ok(None) => DicebagConfig::default(),
        Err(err) => {
            tracing::warn!("{err}; using defaults");
            DicebagConfig::default()
        }
    }
}

fn open_backend(location: StorageLocation) -> Box<dyn KeyValueStore> {
    match location {
        StorageLocation::Directory(dir) => {
            tracing::info!(dir = %dir.display(), "Using file storage");
            Box::new(FileStore::new(dir))
        }
        StorageLocation::Ephemeral => {
            tracing::info!("Using in-memory storage; groups will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    logging::init_tracing();

    let config = load_config();
    let backend = open_backend(config.storage_location());
    let store = GroupStore::load(backend)
        .context("failed to load saved dice groups")?
        .with_placeholder(config.placeholder_name());
    let mut app = App::new(store).with_default_sides(config.default_sides());

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app)
    };

    if let Err(err) = &result {
        tracing::error!("Exiting with error: {err:?}");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if handle_events(app)? {
            return Ok(());
        }
    }
}
