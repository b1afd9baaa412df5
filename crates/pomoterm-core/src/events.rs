use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Cycle, HintVerbosity, Phase, Snapshot};

/// Every accepted command and every finish edge produces an Event.
/// Renderers redraw on them; the alert collaborator listens for
/// `TimerFinished`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        cycle: Cycle,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Elapsed time reached the phase target. Emitted once per activation.
    TimerFinished {
        phase: Phase,
        cycle: Cycle,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        cycle: Cycle,
        at: DateTime<Utc>,
    },
    TimerHardReset {
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        from: Phase,
        to: Phase,
        cycle: Cycle,
        running: bool,
        at: DateTime<Utc>,
    },
    HintToggled {
        verbosity: HintVerbosity,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        #[serde(flatten)]
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Phase carried by a finish edge, if this is one.
    pub fn finished_phase(&self) -> Option<Phase> {
        match self {
            Event::TimerFinished { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
