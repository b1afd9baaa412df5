//! # pomoterm Core Library
//!
//! Timer logic for pomoterm, a terminal Pomodoro timer. The terminal front
//! end in `pomoterm-cli` is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Phase cycle**: the pure `(Phase, Cycle)` transition rule
//! - **Timer Engine**: a tick-driven state machine; the caller delivers one
//!   `tick()` per second and gets back clamped progress and finish edges
//! - **Runtime**: a single-consumer message loop that serializes ticks,
//!   commands and redraws onto one engine
//! - **Alert**: fires an external script once per finished phase
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`PhaseCycle`]: Phase transition rule
//! - [`Session`]: Engine plus alert, driven by [`runtime::run`]
//! - [`Config`]: Application configuration management

pub mod alert;
pub mod error;
pub mod events;
pub mod runtime;
pub mod storage;
pub mod timer;

pub use alert::{alert_for, Alert, NoAlert, ScriptAlert};
pub use error::{AlertError, ConfigError, CoreError};
pub use events::Event;
pub use runtime::{Command, Message, Session, Update};
pub use storage::Config;
pub use timer::{
    Cycle, HintVerbosity, Phase, PhaseCycle, ProgressPolicy, Snapshot, SpinnerStyle, Tick,
    TimerEngine, TimerState, TimerStatus, MAX_CYCLE,
};
