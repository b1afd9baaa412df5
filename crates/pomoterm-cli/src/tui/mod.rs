//! Interactive timer.
//!
//! # Event Loop
//!
//! Three producers feed the runtime queue:
//!
//! 1. the 1 Hz timer clock (`runtime::spawn_ticker`)
//! 2. the spinner clock at `ui.spinner_fps`
//! 3. the [`InputPump`] thread (keys and resizes)
//!
//! The runtime loop applies each message to the session and the screen is
//! redrawn whenever the update asks for it.

mod input;
mod keymap;
mod view;

use std::io::{stdout, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pomoterm_core::runtime::{self, spawn_frames, spawn_ticker};
use pomoterm_core::{Config, Session, Update};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::commands::{build_session, SessionArgs};
use input::InputPump;

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode and the alternate screen; both are restored on drop so
/// the shell stays usable after errors and early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> std::io::Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err);
            }
        };
        let mut session = Self { terminal };
        session.terminal.hide_cursor()?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub async fn run(args: &SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = build_session(&config, args)?;

    let mut terminal = TerminalSession::new()?;
    terminal.terminal.draw(|frame| view::draw(frame, &session))?;

    let (tx, rx) = mpsc::unbounded_channel();
    let ticker = spawn_ticker(tx.clone());
    let frames = spawn_frames(tx.clone(), config.ui.spinner_fps);
    let mut input = InputPump::spawn(tx);

    let redraw = |session: &Session, update: &Update| -> std::io::Result<()> {
        if update.redraw {
            terminal.terminal.draw(|frame| view::draw(frame, session))?;
        }
        Ok(())
    };
    let result = runtime::run(session, rx, redraw).await;

    ticker.abort();
    frames.abort();
    input.shutdown();
    drop(terminal);

    let session = result?;
    let state = session.engine().state();
    tracing::info!(
        phase = %state.phase(),
        cycle = state.cycle().get(),
        elapsed_secs = state.elapsed_secs(),
        "exiting"
    );
    Ok(())
}
