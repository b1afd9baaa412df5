//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not own a clock; the
//! caller delivers one `tick()` per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running <-> Paused
//!            Running -> Finished (elapsed reached target)
//! any     -> Stopped (reset / hard reset)
//! ```
//!
//! `advance()` moves to the next phase from any of these and keeps the
//! timer running if it was running, clearing a pause on the way.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(ProgressPolicy::default());
//! engine.start();
//! // Once per second:
//! if let Some(tick) = engine.tick() {
//!     draw(tick.progress);
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::{Cycle, Phase, PhaseCycle, SpinnerStyle, MAX_CYCLE};
use super::progress::ProgressPolicy;
use crate::events::Event;

/// How much of the key hint line the renderer shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintVerbosity {
    #[default]
    Full,
    Minimal,
}

impl HintVerbosity {
    pub fn toggled(self) -> Self {
        match self {
            HintVerbosity::Full => HintVerbosity::Minimal,
            HintVerbosity::Minimal => HintVerbosity::Full,
        }
    }
}

/// Coarse status derived from the running/paused/finished flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Stopped,
    Running,
    Paused,
    Finished,
}

/// The single mutable aggregate behind the engine.
///
/// Only `TimerEngine` mutates it, which keeps `elapsed_secs <= target`,
/// `finished == (elapsed_secs == target)` and `paused => running`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    phase_cycle: PhaseCycle,
    elapsed_secs: u64,
    running: bool,
    paused: bool,
    finished: bool,
    hint: HintVerbosity,
}

impl TimerState {
    fn new(hint: HintVerbosity) -> Self {
        Self {
            phase_cycle: PhaseCycle::default(),
            elapsed_secs: 0,
            running: false,
            paused: false,
            finished: false,
            hint,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase_cycle.phase
    }

    pub fn cycle(&self) -> Cycle {
        self.phase_cycle.cycle
    }

    pub fn phase_cycle(&self) -> PhaseCycle {
        self.phase_cycle
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn target_secs(&self) -> u64 {
        self.phase().target_secs()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn hint(&self) -> HintVerbosity {
        self.hint
    }

    pub fn status(&self) -> TimerStatus {
        match (self.running, self.paused, self.finished) {
            (false, _, _) => TimerStatus::Stopped,
            (true, true, _) => TimerStatus::Paused,
            (true, false, true) => TimerStatus::Finished,
            (true, false, false) => TimerStatus::Running,
        }
    }

    /// Zero the activation: elapsed, finish flag and run flags.
    fn clear_activation(&mut self) {
        self.elapsed_secs = 0;
        self.finished = false;
        self.running = false;
        self.paused = false;
    }
}

/// Read-only view handed to renderers after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub label: String,
    pub cycle: Cycle,
    pub max_cycle: u8,
    pub status: TimerStatus,
    pub elapsed_secs: u64,
    pub target_secs: u64,
    pub remaining_secs: u64,
    pub progress: f64,
    pub running: bool,
    pub paused: bool,
    pub finished: bool,
    pub hint: HintVerbosity,
    pub spinner: SpinnerStyle,
}

impl Snapshot {
    /// Header text, e.g. `Focus (2/4)` or `Long Break`.
    pub fn title(&self) -> String {
        if self.phase.shows_cycle() {
            format!("{} ({})", self.label, self.cycle)
        } else {
            self.label.clone()
        }
    }

    /// Right-hand header text: `paused`, `done`, or the phase length.
    pub fn subtitle(&self) -> String {
        if self.paused {
            "paused".into()
        } else if self.finished {
            "done".into()
        } else {
            format!("{:>2}m", self.phase.duration_min())
        }
    }
}

/// Result of a tick that actually advanced the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Clamped progress ratio to draw.
    pub progress: f64,
    /// `Some(Event::TimerFinished)` on the finish edge only.
    pub finished: Option<Event>,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    policy: ProgressPolicy,
}

impl TimerEngine {
    /// Create an engine at `Focus (1/4)`, stopped, with nothing elapsed.
    pub fn new(policy: ProgressPolicy) -> Self {
        Self::with_hint(policy, HintVerbosity::default())
    }

    pub fn with_hint(policy: ProgressPolicy, hint: HintVerbosity) -> Self {
        Self {
            state: TimerState::new(hint),
            policy,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn policy(&self) -> &ProgressPolicy {
        &self.policy
    }

    /// Clamped progress for the current state.
    pub fn progress(&self) -> f64 {
        self.policy.display(
            self.state.elapsed_secs,
            self.state.target_secs(),
            self.state.finished,
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        let phase = s.phase();
        Snapshot {
            phase,
            label: phase.label().to_string(),
            cycle: s.cycle(),
            max_cycle: MAX_CYCLE,
            status: s.status(),
            elapsed_secs: s.elapsed_secs,
            target_secs: s.target_secs(),
            remaining_secs: s.target_secs().saturating_sub(s.elapsed_secs),
            progress: self.progress(),
            running: s.running,
            paused: s.paused,
            finished: s.finished,
            hint: s.hint,
            spinner: phase.spinner_style(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.snapshot(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin accumulating. Ignored while already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        self.state.paused = false;
        tracing::debug!(phase = %self.state.phase(), cycle = self.state.cycle().get(), "timer started");
        Some(Event::TimerStarted {
            phase: self.state.phase(),
            cycle: self.state.cycle(),
            duration_secs: self.state.target_secs(),
            at: Utc::now(),
        })
    }

    /// Flip the pause flag. Ignored while stopped.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.paused = !self.state.paused;
        let elapsed_secs = self.state.elapsed_secs;
        let at = Utc::now();
        if self.state.paused {
            tracing::debug!(elapsed_secs, "timer paused");
            Some(Event::TimerPaused { elapsed_secs, at })
        } else {
            tracing::debug!(elapsed_secs, "timer resumed");
            Some(Event::TimerResumed { elapsed_secs, at })
        }
    }

    /// Stop and zero the current phase, keeping phase and cycle.
    pub fn reset(&mut self) -> Event {
        self.state.clear_activation();
        tracing::debug!(phase = %self.state.phase(), "timer reset");
        Event::TimerReset {
            phase: self.state.phase(),
            cycle: self.state.cycle(),
            at: Utc::now(),
        }
    }

    /// Back to `Focus (1/4)`, stopped. The hint preference is kept.
    pub fn hard_reset(&mut self) -> Event {
        self.state = TimerState::new(self.state.hint);
        tracing::debug!("timer hard reset");
        Event::TimerHardReset { at: Utc::now() }
    }

    /// Move to the next phase regardless of progress.
    pub fn advance(&mut self) -> Event {
        let from = self.state.phase();
        let running = self.state.running;
        self.state.phase_cycle = self.state.phase_cycle.next();
        self.state.elapsed_secs = 0;
        self.state.finished = false;
        self.state.paused = false;
        self.state.running = running;
        tracing::debug!(
            %from,
            to = %self.state.phase(),
            cycle = self.state.cycle().get(),
            running,
            "phase advanced"
        );
        Event::PhaseAdvanced {
            from,
            to: self.state.phase(),
            cycle: self.state.cycle(),
            running,
            at: Utc::now(),
        }
    }

    pub fn toggle_hint_verbosity(&mut self) -> Event {
        self.state.hint = self.state.hint.toggled();
        Event::HintToggled {
            verbosity: self.state.hint,
            at: Utc::now(),
        }
    }

    /// Account for one elapsed second.
    ///
    /// Returns `None` when the clock is not accumulating (stopped or paused).
    /// Ticks after the finish edge are accepted and leave elapsed unchanged.
    pub fn tick(&mut self) -> Option<Tick> {
        if !self.state.running || self.state.paused {
            return None;
        }
        let target = self.state.target_secs();
        self.state.elapsed_secs = (self.state.elapsed_secs + 1).min(target);

        let mut finished = None;
        if self.state.elapsed_secs == target && !self.state.finished {
            self.state.finished = true;
            tracing::info!(phase = %self.state.phase(), cycle = self.state.cycle().get(), "phase finished");
            finished = Some(Event::TimerFinished {
                phase: self.state.phase(),
                cycle: self.state.cycle(),
                at: Utc::now(),
            });
        }

        Some(Tick {
            progress: self.progress(),
            finished,
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(ProgressPolicy::default())
    }
}
