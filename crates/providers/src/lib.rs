//! Inference service plumbing for Thermowise.
//!
//! - [`OllamaBackend`] implements `thermowise_core::InferenceBackend` over HTTP
//! - [`CommandLauncher`] implements `thermowise_core::ProcessLauncher`
//! - [`ServiceLifecycle`] decides when the service is usable and starts it

pub mod launcher;
pub mod lifecycle;
pub mod ollama;

pub use launcher::CommandLauncher;
pub use lifecycle::ServiceLifecycle;
pub use ollama::OllamaBackend;
