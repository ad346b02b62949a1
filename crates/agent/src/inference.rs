//! Inference client: brings the service up, sends one request and turns the
//! reply into answer text.

use thermowise_core::error::ServiceError;
use thermowise_core::provider::GenerateRequest;
use thermowise_core::service::ServiceState;
use thermowise_providers::ServiceLifecycle;
use tracing::{debug, warn};

use crate::context::clean_answer;

pub struct InferenceClient {
    lifecycle: ServiceLifecycle,
}

impl InferenceClient {
    pub fn new(lifecycle: ServiceLifecycle) -> Self {
        Self { lifecycle }
    }

    pub fn lifecycle(&self) -> &ServiceLifecycle {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut ServiceLifecycle {
        &mut self.lifecycle
    }

    pub fn state(&self) -> ServiceState {
        self.lifecycle.state()
    }

    /// Run one generation and return the cleaned answer.
    ///
    /// No request is sent unless the lifecycle reaches `Up`. A refused
    /// connection marks the service down so the next call re-runs the start
    /// sequence.
    pub async fn infer(&mut self, request: &GenerateRequest) -> Result<String, ServiceError> {
        self.lifecycle.ensure_available().await?;

        let backend = self.lifecycle.backend().clone();
        let reply = match backend.generate(request).await {
            Ok(reply) => reply,
            Err(e) => {
                if matches!(e, ServiceError::Connection(_)) {
                    self.lifecycle.mark_down();
                }
                warn!(backend = backend.name(), error = %e, "Generation failed");
                return Err(e);
            }
        };

        let text = reply.response.ok_or_else(|| {
            ServiceError::MalformedResponse("reply has no `response` field".into())
        })?;

        debug!(reply_chars = text.len(), done = reply.done, "Generation complete");
        Ok(clean_answer(&text))
    }
}
