use std::path::PathBuf;

use clap::Args;
use pomoterm_core::{alert_for, Config, CoreError, HintVerbosity, Session, TimerEngine};

pub mod config;
pub mod headless;

/// Per-launch overrides on top of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Executable run with the finished phase name when an interval ends
    #[arg(long, env = "POMOTERM_ALERT_SCRIPT", global = true)]
    pub alert_script: Option<PathBuf>,

    /// Let the progress bar fill completely before the finish tick
    #[arg(long, global = true)]
    pub no_cap: bool,

    /// Start with the one-word key hint
    #[arg(long, global = true)]
    pub minimal_hints: bool,
}

/// Resolve config and flags into the immutable settings a session runs with.
pub fn build_session(config: &Config, args: &SessionArgs) -> Result<Session, CoreError> {
    let mut policy = config.progress_policy()?;
    if args.no_cap {
        policy = policy.uncapped();
    }
    let hint = if args.minimal_hints {
        HintVerbosity::Minimal
    } else {
        config.ui.hint_verbosity
    };
    let script = args
        .alert_script
        .as_deref()
        .or(config.alert.script.as_deref());

    tracing::info!(
        min_start = policy.min_start(),
        max_before_finish = ?policy.max_before_finish(),
        alert_script = ?script,
        "session configured"
    );
    Ok(Session::new(
        TimerEngine::with_hint(policy, hint),
        alert_for(script),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = Config::default();
        let args = SessionArgs {
            no_cap: true,
            minimal_hints: true,
            ..SessionArgs::default()
        };
        let session = build_session(&config, &args).unwrap();
        assert_eq!(session.engine().policy().max_before_finish(), None);
        assert_eq!(session.engine().state().hint(), HintVerbosity::Minimal);
    }

    #[test]
    fn config_values_apply_without_flags() {
        let mut config = Config::default();
        config.set("ui.hint_verbosity", "minimal").unwrap();
        config.set("progress.min_start", "0.02").unwrap();
        let session = build_session(&config, &SessionArgs::default()).unwrap();
        assert_eq!(session.engine().policy().min_start(), 0.02);
        assert_eq!(session.engine().policy().max_before_finish(), Some(0.95));
        assert_eq!(session.engine().state().hint(), HintVerbosity::Minimal);
    }
}
