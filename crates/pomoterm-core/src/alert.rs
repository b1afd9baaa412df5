//! End-of-interval alerts.
//!
//! When a phase finishes, the runtime hands the phase to an [`Alert`]. The
//! stock implementation runs a user-supplied executable with the phase label
//! as its only argument and does not wait for it.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::AlertError;
use crate::timer::Phase;

/// Receives one call per finish edge.
pub trait Alert: Send {
    /// Fire the alert for `phase`. Failures are reported, never retried.
    fn notify(&self, phase: Phase) -> Result<(), AlertError>;
}

/// Alert used when no script is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAlert;

impl Alert for NoAlert {
    fn notify(&self, phase: Phase) -> Result<(), AlertError> {
        tracing::debug!(%phase, "no alert script configured");
        Ok(())
    }
}

/// Runs `<script> <phase label>` as a detached child process.
#[derive(Debug, Clone)]
pub struct ScriptAlert {
    script: PathBuf,
}

impl ScriptAlert {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Alert for ScriptAlert {
    fn notify(&self, phase: Phase) -> Result<(), AlertError> {
        let mut child = Command::new(&self.script)
            .arg(phase.label())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AlertError::SpawnFailed {
                path: self.script.clone(),
                source,
            })?;

        tracing::info!(script = %self.script.display(), %phase, pid = child.id(), "alert spawned");

        // Reap in the background so the child never lingers as a zombie.
        let script = self.script.clone();
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::warn!(script = %script.display(), %status, "alert script exited with failure");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(script = %script.display(), error = %e, "failed to wait on alert script"),
        });
        Ok(())
    }
}

/// Pick the alert for an optional script path. Empty paths count as unset.
pub fn alert_for(script: Option<&Path>) -> Box<dyn Alert> {
    match script {
        Some(path) if !path.as_os_str().is_empty() => Box::new(ScriptAlert::new(path)),
        _ => Box::new(NoAlert),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_script_reports_spawn_failure() {
        let alert = ScriptAlert::new("/nonexistent/pomoterm-alert-script");
        let err = alert.notify(Phase::Focus).unwrap_err();
        assert!(matches!(err, AlertError::SpawnFailed { .. }));
        assert!(err.to_string().contains("pomoterm-alert-script"));
    }

    #[test]
    fn no_alert_is_a_no_op() {
        assert!(NoAlert.notify(Phase::Break).is_ok());
        assert!(alert_for(None).notify(Phase::LongBreak).is_ok());
        assert!(alert_for(Some(Path::new(""))).notify(Phase::LongBreak).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn script_receives_phase_label() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let script = dir.path().join("alert.sh");
        std::fs::write(
            &script,
            format!("#!/bin/sh\nprintf '%s' \"$1\" > '{}'\n", out.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        // A freshly written script can briefly report ETXTBSY while other
        // test threads fork.
        let alert = ScriptAlert::new(&script);
        let spawned = (0..20).any(|_| {
            alert.notify(Phase::LongBreak).is_ok() || {
                std::thread::sleep(Duration::from_millis(25));
                false
            }
        });
        assert!(spawned, "alert script could not be spawned");

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Ok(content) = std::fs::read_to_string(&out) {
                if content == "Long Break" {
                    break;
                }
            }
            assert!(Instant::now() < deadline, "alert script did not run");
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}
