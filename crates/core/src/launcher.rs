//! Process launcher: starts the inference service process.

use crate::error::ServiceError;

/// Capability to start the inference service.
///
/// `launch` must not wait for the service to become ready; the lifecycle
/// manager owns the grace period and the follow-up probe.
pub trait ProcessLauncher: Send + Sync {
    /// Human-readable description of what gets launched (e.g. "ollama serve").
    fn describe(&self) -> String;

    /// Spawn the service process in the background.
    fn launch(&self) -> Result<(), ServiceError>;
}
