//! Single-consumer event loop around the timer engine.
//!
//! Ticks, operator commands and redraw requests all travel through one
//! ordered channel. Exactly one task drains it and owns the [`Session`], so
//! the engine is never touched concurrently and a command queued before a
//! tick is always applied before that tick.
//!
//! ```text
//! ticker ─┐
//! frames ─┼─> mpsc::UnboundedSender<Message> ─> run() ─> Session::handle ─> on_update
//! input  ─┘
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::alert::Alert;
use crate::events::Event;
use crate::timer::TimerEngine;

/// Period of the timer clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Fastest spinner clock accepted; `ui.spinner_fps` is validated against it.
pub const MAX_SPINNER_FPS: u32 = 60;

/// Operator commands, independent of how they were entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start when stopped, otherwise pause or resume.
    StartPause,
    Reset,
    HardReset,
    Advance,
    ToggleHint,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// One second of wall-clock time. The timestamp is informational.
    Tick(DateTime<Utc>),
    Command(Command),
    /// Spinner animation frame.
    Frame,
    /// Repaint without a state change (e.g. terminal resize).
    Redraw,
}

/// What handling one message produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub events: Vec<Event>,
    /// Clamped progress emitted by an effective tick.
    pub progress: Option<f64>,
    pub redraw: bool,
    pub quit: bool,
}

/// The engine plus its alert collaborator and spinner animation clock.
pub struct Session {
    engine: TimerEngine,
    alert: Box<dyn Alert>,
    spinner_frame: usize,
}

impl Session {
    pub fn new(engine: TimerEngine, alert: Box<dyn Alert>) -> Self {
        Self {
            engine,
            alert,
            spinner_frame: 0,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Spinner frame counter; only advances while the timer accumulates.
    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn handle(&mut self, message: Message) -> Update {
        match message {
            Message::Tick(at) => self.on_tick(at),
            Message::Command(command) => self.on_command(command),
            Message::Frame => {
                let state = self.engine.state();
                let animate = state.is_running() && !state.is_paused();
                if animate {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                Update {
                    redraw: animate,
                    ..Update::default()
                }
            }
            Message::Redraw => Update {
                redraw: true,
                ..Update::default()
            },
        }
    }

    fn on_tick(&mut self, at: DateTime<Utc>) -> Update {
        let Some(tick) = self.engine.tick() else {
            return Update::default();
        };
        tracing::trace!(%at, elapsed = self.engine.state().elapsed_secs(), progress = tick.progress, "tick");

        let mut events = Vec::new();
        if let Some(event) = tick.finished {
            if let Some(phase) = event.finished_phase() {
                if let Err(e) = self.alert.notify(phase) {
                    tracing::warn!(error = %e, %phase, "alert failed");
                }
            }
            events.push(event);
        }
        Update {
            events,
            progress: Some(tick.progress),
            redraw: true,
            quit: false,
        }
    }

    /// Route a command to the engine, dropping ones that do not apply.
    fn on_command(&mut self, command: Command) -> Update {
        let event = match command {
            Command::StartPause => {
                if self.engine.state().is_running() {
                    self.engine.toggle_pause()
                } else {
                    self.engine.start()
                }
            }
            Command::Reset => Some(self.engine.reset()),
            Command::HardReset => {
                self.spinner_frame = 0;
                Some(self.engine.hard_reset())
            }
            Command::Advance => {
                self.spinner_frame = 0;
                Some(self.engine.advance())
            }
            Command::ToggleHint => Some(self.engine.toggle_hint_verbosity()),
            Command::Quit => {
                tracing::info!("quit requested");
                return Update {
                    quit: true,
                    ..Update::default()
                };
            }
        };
        Update {
            redraw: event.is_some(),
            events: event.into_iter().collect(),
            progress: None,
            quit: false,
        }
    }
}

/// Drain `rx` into `session` until a quit command or every sender is gone.
///
/// `on_update` runs after each message; its error stops the loop.
pub async fn run<F, E>(
    mut session: Session,
    mut rx: mpsc::UnboundedReceiver<Message>,
    mut on_update: F,
) -> Result<Session, E>
where
    F: FnMut(&Session, &Update) -> Result<(), E>,
{
    while let Some(message) = rx.recv().await {
        let update = session.handle(message);
        on_update(&session, &update)?;
        if update.quit {
            break;
        }
    }
    Ok(session)
}

/// Post `make()` every `period`, starting one period from now.
///
/// Missed ticks are skipped so a stalled consumer never sees a burst.
pub fn spawn_periodic<F>(
    tx: mpsc::UnboundedSender<Message>,
    period: Duration,
    mut make: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Message + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(make()).is_err() {
                break;
            }
        }
    })
}

/// 1 Hz timer clock.
pub fn spawn_ticker(tx: mpsc::UnboundedSender<Message>) -> JoinHandle<()> {
    spawn_periodic(tx, TICK_PERIOD, || Message::Tick(Utc::now()))
}

/// Spinner animation clock at `fps` frames per second, clamped to
/// `1..=MAX_SPINNER_FPS`.
pub fn spawn_frames(tx: mpsc::UnboundedSender<Message>, fps: u32) -> JoinHandle<()> {
    let period = Duration::from_secs(1) / fps.clamp(1, MAX_SPINNER_FPS);
    spawn_periodic(tx, period, || Message::Frame)
}
