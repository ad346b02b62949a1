//! Launches the inference service as a detached child process.

use thermowise_config::ServiceConfig;
use thermowise_core::error::ServiceError;
use thermowise_core::launcher::ProcessLauncher;
use tokio::process::Command;
use tracing::{debug, warn};

/// Starts the service by running a command (by default `ollama serve`).
///
/// The child's stdio is discarded and the handle is dropped right away; the
/// process keeps running after the launcher returns.
pub struct CommandLauncher {
    program: String,
    args: Vec<String>,
}

impl CommandLauncher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(&config.launch_command, config.launch_args.clone())
    }
}

impl ProcessLauncher for CommandLauncher {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn launch(&self) -> Result<(), ServiceError> {
        debug!(command = %self.describe(), "Spawning inference service");

        Command::new(&self.program)
            .args(&self.args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| {
                warn!(command = %self.describe(), error = %e, "Failed to spawn inference service");
                ServiceError::LaunchFailed(format!("{}: {e}", self.describe()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_full_command_line() {
        let launcher = CommandLauncher::from_config(&ServiceConfig::default());
        assert_eq!(launcher.describe(), "ollama serve");
    }

    #[tokio::test]
    async fn missing_executable_is_launch_failure() {
        let launcher = CommandLauncher::new("thermowise-no-such-binary-xyz", vec![]);
        let err = launcher.launch().unwrap_err();
        match err {
            ServiceError::LaunchFailed(detail) => {
                assert!(detail.contains("thermowise-no-such-binary-xyz"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn existing_executable_launches() {
        let launcher = CommandLauncher::new("true", vec![]);
        assert!(launcher.launch().is_ok());
    }
}
