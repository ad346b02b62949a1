//! Inference backend trait: the abstraction over the local model service.
//!
//! A backend knows how to probe the service, list its installed models and
//! run a single non-streaming generation.
//!
//! Implementations: Ollama (`thermowise-providers`), test doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ServiceError;

/// Sampling options sent with every generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,

    /// Nucleus-sampling threshold
    pub top_p: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Body of a generation call.
///
/// Serializes to `{model, prompt, stream, options: {temperature, top_p, max_tokens}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (e.g., "phi")
    pub model: String,

    /// The fully assembled prompt
    pub prompt: String,

    /// Always false: answers are read in one piece
    pub stream: bool,

    pub options: GenerateOptions,
}

/// Reply of a generation call. Only `response` is needed; the rest is
/// informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text. Absent in a malformed reply.
    #[serde(default)]
    pub response: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub done: bool,
}

/// The core backend trait.
///
/// The lifecycle manager calls `health_check()`; the inference client calls
/// `generate()`. Neither knows which service sits behind it.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a generation request and return the raw reply.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError>;

    /// Liveness probe: `Ok(true)` only on the expected success status.
    async fn health_check(&self) -> Result<bool, ServiceError>;

    /// List models installed in the service.
    async fn list_models(&self) -> Result<Vec<String>, ServiceError> {
        Ok(Vec::new())
    }
}
