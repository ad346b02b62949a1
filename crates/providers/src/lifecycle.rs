//! Service lifecycle manager.
//!
//! Owns the [`ServiceState`] of the inference service:
//!
//! ```text
//! Unknown ──check──▶ Up | Down
//! Down ──launch, wait grace, check──▶ Up | Down
//! ```
//!
//! A start is attempted exactly once per `ensure_available` call; there is no
//! retry loop. Callers wanting more resilience call it again.

use std::sync::Arc;
use std::time::Duration;

use thermowise_core::error::ServiceError;
use thermowise_core::launcher::ProcessLauncher;
use thermowise_core::provider::InferenceBackend;
use thermowise_core::service::ServiceState;
use tracing::{debug, info, warn};

/// Default wait between launching the service and re-probing it.
pub const DEFAULT_STARTUP_GRACE: Duration = Duration::from_secs(5);

pub struct ServiceLifecycle {
    backend: Arc<dyn InferenceBackend>,
    launcher: Arc<dyn ProcessLauncher>,
    startup_grace: Duration,
    state: ServiceState,
}

impl ServiceLifecycle {
    pub fn new(backend: Arc<dyn InferenceBackend>, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            backend,
            launcher,
            startup_grace: DEFAULT_STARTUP_GRACE,
            state: ServiceState::Unknown,
        }
    }

    pub fn with_startup_grace(mut self, grace: Duration) -> Self {
        self.startup_grace = grace;
        self
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn backend(&self) -> &Arc<dyn InferenceBackend> {
        &self.backend
    }

    /// Probe the service and record the result. Never touches the process.
    pub async fn check(&mut self) -> bool {
        let up = match self.backend.health_check().await {
            Ok(up) => up,
            Err(e) => {
                debug!(backend = self.backend.name(), error = %e, "Liveness probe failed");
                false
            }
        };
        self.transition(if up { ServiceState::Up } else { ServiceState::Down });
        up
    }

    /// Make sure the service is up, starting it at most once.
    ///
    /// When the state is not `Up` the service is probed first, so one that
    /// was started elsewhere is adopted without a launch.
    pub async fn ensure_available(&mut self) -> Result<(), ServiceError> {
        if self.state.is_up() {
            return Ok(());
        }

        if self.check().await {
            return Ok(());
        }

        info!(command = %self.launcher.describe(), "Inference service down, starting it");
        if let Err(e) = self.launcher.launch() {
            warn!(error = %e, "Could not start inference service");
            self.transition(ServiceState::Down);
            return Err(e);
        }

        self.transition(ServiceState::Starting);
        tokio::time::sleep(self.startup_grace).await;

        if self.check().await {
            info!("Inference service started");
            Ok(())
        } else {
            warn!(grace = ?self.startup_grace, "Inference service still down after start attempt");
            Err(ServiceError::Unavailable(format!(
                "no response within {:?} of running `{}`",
                self.startup_grace,
                self.launcher.describe()
            )))
        }
    }

    /// Record that the service stopped answering (e.g. a refused generation
    /// call), so the next `ensure_available` re-runs the start sequence.
    pub fn mark_down(&mut self) {
        self.transition(ServiceState::Down);
    }

    fn transition(&mut self, next: ServiceState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "Service state change");
            self.state = next;
        }
    }
}
