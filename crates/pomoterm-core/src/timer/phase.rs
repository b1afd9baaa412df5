//! Phase and cycle bookkeeping.
//!
//! A Pomodoro set is four focus intervals. Short breaks sit between them and
//! a long break closes the set. Moving between phases only ever happens on an
//! explicit advance; the clock never does it on its own.
//!
//! ```text
//! Focus(1) -> Break(1) -> Focus(2) -> Break(2) -> Focus(3) -> Break(3)
//!          -> Focus(4) -> LongBreak(4) -> Focus(1)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of focus intervals before a long break.
pub const MAX_CYCLE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    Break,
    LongBreak,
}

impl Phase {
    /// Fixed length of the phase in minutes.
    pub const fn duration_min(self) -> u64 {
        match self {
            Phase::Focus => 25,
            Phase::Break => 5,
            Phase::LongBreak => 30,
        }
    }

    /// Target elapsed seconds for one activation of this phase.
    pub const fn target_secs(self) -> u64 {
        self.duration_min() * 60
    }

    pub const fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Indicator motif the renderer should animate for this phase.
    pub const fn spinner_style(self) -> SpinnerStyle {
        match self {
            Phase::Focus => SpinnerStyle::Hamburger,
            Phase::Break | Phase::LongBreak => SpinnerStyle::Line,
        }
    }

    /// Whether the title should show the `(n/4)` cycle suffix.
    pub const fn shows_cycle(self) -> bool {
        !matches!(self, Phase::LongBreak)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinnerStyle {
    Hamburger,
    Line,
}

impl SpinnerStyle {
    pub const fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Hamburger => &["☱", "☲", "☴", "☲"],
            SpinnerStyle::Line => &["|", "/", "-", "\\"],
        }
    }
}

/// 1-based position within the Pomodoro set, always in `1..=MAX_CYCLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cycle(u8);

impl Cycle {
    pub const FIRST: Cycle = Cycle(1);

    pub fn new(value: u8) -> Option<Self> {
        (1..=MAX_CYCLE).contains(&value).then_some(Cycle(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether a following focus interval still fits in the set.
    pub const fn has_next(self) -> bool {
        self.0 < MAX_CYCLE
    }

    fn succ(self) -> Self {
        Cycle((self.0 + 1).min(MAX_CYCLE))
    }
}

impl Default for Cycle {
    fn default() -> Self {
        Cycle::FIRST
    }
}

impl TryFrom<u8> for Cycle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Cycle::new(value).ok_or_else(|| format!("cycle {value} outside 1..={MAX_CYCLE}"))
    }
}

impl From<Cycle> for u8 {
    fn from(cycle: Cycle) -> Self {
        cycle.0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_CYCLE)
    }
}

/// The `(phase, cycle)` pair and its transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCycle {
    pub phase: Phase,
    pub cycle: Cycle,
}

impl PhaseCycle {
    pub const fn new(phase: Phase, cycle: Cycle) -> Self {
        Self { phase, cycle }
    }

    /// Successor on a manual advance. Total over every input.
    pub fn next(self) -> Self {
        match self.phase {
            Phase::Focus if self.cycle.has_next() => Self::new(Phase::Break, self.cycle),
            Phase::Focus => Self::new(Phase::LongBreak, self.cycle),
            Phase::Break => Self::new(Phase::Focus, self.cycle.succ()),
            Phase::LongBreak => Self::new(Phase::Focus, Cycle::FIRST),
        }
    }
}

impl Default for PhaseCycle {
    fn default() -> Self {
        Self::new(Phase::Focus, Cycle::FIRST)
    }
}
