//! The question session.
//!
//! A [`Session`] owns everything one user's conversation needs: the dataset
//! handle, the conversation history and the inference client (which owns
//! the service state). Questions are processed one at a time:
//!
//! 1. **Classify** the question into an intent
//! 2. **Build context** from the dataset for that intent
//! 3. **Assemble** the prompt
//! 4. **Infer** (bringing the service up first if needed)
//! 5. **Record** the question and the answer (or failure text) in history
//!
//! Service failures never escape `submit_question`; they become the answer.

use std::path::Path;
use std::sync::Arc;

use thermowise_config::AppConfig;
use thermowise_core::error::{DatasetError, ServiceError};
use thermowise_core::launcher::ProcessLauncher;
use thermowise_core::message::{Conversation, Message};
use thermowise_core::provider::InferenceBackend;
use thermowise_core::service::ServiceState;
use thermowise_core::Dataset;
use thermowise_dataset::{load_csv, DatasetInfo};
use thermowise_providers::{CommandLauncher, OllamaBackend, ServiceLifecycle};
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::context::{assemble, build_context};
use crate::inference::InferenceClient;

/// Returned for a blank question; nothing is recorded.
pub const EMPTY_QUESTION_MESSAGE: &str = "Please enter a question about your thermostat.";

const SAMPLE_QUESTIONS: [&str; 6] = [
    "How can I reduce my energy bill?",
    "What is the ideal temperature setting?",
    "Should I run my HVAC at night?",
    "How to improve HVAC efficiency?",
    "Best temperature for sleeping?",
    "Save energy during peak hours?",
];

/// Canned questions offered to new users.
pub fn sample_questions() -> &'static [&'static str] {
    &SAMPLE_QUESTIONS
}

pub struct Session {
    model: String,
    dataset: Dataset,
    conversation: Conversation,
    client: InferenceClient,
}

impl Session {
    pub fn new(model: impl Into<String>, lifecycle: ServiceLifecycle) -> Self {
        Self {
            model: model.into(),
            dataset: Dataset::empty(),
            conversation: Conversation::new(),
            client: InferenceClient::new(lifecycle),
        }
    }

    /// Build a session from explicit backend and launcher implementations.
    pub fn with_backend(
        model: impl Into<String>,
        backend: Arc<dyn InferenceBackend>,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self::new(model, ServiceLifecycle::new(backend, launcher))
    }

    /// Build a session talking to the Ollama service described by `config`.
    ///
    /// The dataset is not loaded here; call [`Session::load_dataset`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let backend = OllamaBackend::from_config(&config.service)?;
        let launcher = CommandLauncher::from_config(&config.service);
        let lifecycle = ServiceLifecycle::new(Arc::new(backend), Arc::new(launcher))
            .with_startup_grace(config.service.startup_grace());
        Ok(Self::new(&config.service.model, lifecycle))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Load a CSV dataset, replacing the current one.
    ///
    /// On failure the previously loaded dataset stays in place.
    pub fn load_dataset(&mut self, path: impl AsRef<Path>) -> Result<DatasetInfo, DatasetError> {
        let dataset = load_csv(path.as_ref()).inspect_err(|e| {
            warn!(error = %e, "Dataset load failed, keeping previous dataset");
        })?;
        Ok(self.set_dataset(dataset))
    }

    /// Install an already built dataset.
    pub fn set_dataset(&mut self, dataset: Dataset) -> DatasetInfo {
        let info = DatasetInfo::of(&dataset);
        self.dataset = dataset;
        info
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Answer a question. Never fails: service failures are returned as
    /// answer text and recorded like any other answer.
    pub async fn submit_question(&mut self, text: &str) -> String {
        if text.trim().is_empty() {
            return EMPTY_QUESTION_MESSAGE.to_string();
        }

        let intent = classify(text);
        let context = build_context(&self.dataset, intent);
        let request = assemble(&self.model, text, &context);
        debug!(%intent, prompt_chars = request.prompt.len(), "Prompt assembled");

        self.conversation.push(Message::user(text));

        let answer = match self.client.infer(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                info!(error = %e, "Answering with failure text");
                e.user_message()
            }
        };

        self.conversation.push(Message::assistant(answer.clone()));
        answer
    }

    /// Probe the service without starting it.
    pub async fn check_service(&mut self) -> bool {
        self.client.lifecycle_mut().check().await
    }

    /// Make one attempt to bring the service up.
    pub async fn start_service(&mut self) -> bool {
        match self.client.lifecycle_mut().ensure_available().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Service start failed");
                false
            }
        }
    }

    /// Models installed in the service; empty if it cannot be reached.
    pub async fn list_models(&self) -> Vec<String> {
        self.client
            .lifecycle()
            .backend()
            .list_models()
            .await
            .unwrap_or_else(|e| {
                debug!(error = %e, "Could not list models");
                Vec::new()
            })
    }

    pub fn service_state(&self) -> ServiceState {
        self.client.state()
    }

    pub fn clear_conversation(&mut self) {
        self.conversation.clear();
    }

    pub fn history(&self) -> &[Message] {
        self.conversation.history()
    }
}
