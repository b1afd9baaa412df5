mod engine;
mod phase;
mod progress;

pub use engine::{HintVerbosity, Snapshot, Tick, TimerEngine, TimerState, TimerStatus};
pub use phase::{Cycle, Phase, PhaseCycle, SpinnerStyle, MAX_CYCLE};
pub use progress::{
    ProgressPolicy, DEFAULT_MAX_BEFORE_FINISH_PROGRESS, DEFAULT_MIN_START_PROGRESS,
};
