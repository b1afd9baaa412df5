//! Display clamping for the progress bar.
//!
//! The true ratio `elapsed / target` is bent slightly for display: a running
//! timer never shows an empty bar, and (optionally) never shows a full bar
//! before the finish edge has actually fired.

use crate::error::ConfigError;

pub const DEFAULT_MIN_START_PROGRESS: f64 = 0.012;
pub const DEFAULT_MAX_BEFORE_FINISH_PROGRESS: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPolicy {
    min_start: f64,
    max_before_finish: Option<f64>,
}

impl ProgressPolicy {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless
    /// `0 <= min_start <= max_before_finish <= 1`.
    pub fn new(min_start: f64, max_before_finish: Option<f64>) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&min_start) {
            return Err(ConfigError::InvalidValue {
                key: "progress.min_start".into(),
                message: format!("{min_start} is outside 0..=1"),
            });
        }
        if let Some(max) = max_before_finish {
            if !(0.0..=1.0).contains(&max) {
                return Err(ConfigError::InvalidValue {
                    key: "progress.max_before_finish".into(),
                    message: format!("{max} is outside 0..=1"),
                });
            }
            if max < min_start {
                return Err(ConfigError::InvalidValue {
                    key: "progress.max_before_finish".into(),
                    message: format!("{max} is below progress.min_start ({min_start})"),
                });
            }
        }
        Ok(Self {
            min_start,
            max_before_finish,
        })
    }

    pub fn min_start(&self) -> f64 {
        self.min_start
    }

    pub fn max_before_finish(&self) -> Option<f64> {
        self.max_before_finish
    }

    /// Same policy without the upper cap.
    pub fn uncapped(self) -> Self {
        Self {
            max_before_finish: None,
            ..self
        }
    }

    /// Ratio to draw for `elapsed_secs` out of `target_secs`.
    ///
    /// Nothing has accumulated yet at zero elapsed, so the bar stays empty.
    pub fn display(&self, elapsed_secs: u64, target_secs: u64, finished: bool) -> f64 {
        if finished {
            return 1.0;
        }
        if elapsed_secs == 0 || target_secs == 0 {
            return 0.0;
        }
        let raw = (elapsed_secs as f64 / target_secs as f64).min(1.0);
        let upper = self.max_before_finish.unwrap_or(1.0);
        raw.clamp(self.min_start, upper)
    }
}

impl Default for ProgressPolicy {
    fn default() -> Self {
        Self {
            min_start: DEFAULT_MIN_START_PROGRESS,
            max_before_finish: Some(DEFAULT_MAX_BEFORE_FINISH_PROGRESS),
        }
    }
}
