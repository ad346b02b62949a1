//! Shared test doubles for the inference service and its launcher.

use std::collections::VecDeque;
use std::sync::Mutex;

use thermowise_core::error::ServiceError;
use thermowise_core::launcher::ProcessLauncher;
use thermowise_core::provider::{GenerateRequest, GenerateResponse, InferenceBackend};

/// A mock backend with scripted probe answers and generation replies.
///
/// Probe answers are consumed in order and the last one repeats. Each call
/// to `generate` returns the next scripted reply; panics if more calls are
/// made than replies provided.
pub struct ScriptedBackend {
    health: Mutex<VecDeque<bool>>,
    replies: Mutex<VecDeque<Result<GenerateResponse, ServiceError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(health: Vec<bool>, replies: Vec<Result<GenerateResponse, ServiceError>>) -> Self {
        Self {
            health: Mutex::new(health.into()),
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers the probe.
    pub fn up(replies: Vec<Result<GenerateResponse, ServiceError>>) -> Self {
        Self::new(vec![true], replies)
    }

    /// Never answers the probe.
    pub fn down(replies: Vec<Result<GenerateResponse, ServiceError>>) -> Self {
        Self::new(vec![false], replies)
    }

    /// Simple text replies, service always up.
    pub fn answering(texts: &[&str]) -> Self {
        Self::up(texts.iter().map(|t| Ok(reply(t))).collect())
    }

    pub fn generate_calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl InferenceBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(request.prompt.clone());

        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            panic!(
                "ScriptedBackend: no more replies (call #{})",
                prompts.len()
            )
        })
    }

    async fn health_check(&self) -> Result<bool, ServiceError> {
        let mut health = self.health.lock().unwrap();
        if health.len() > 1 {
            Ok(health.pop_front().unwrap_or(false))
        } else {
            Ok(health.front().copied().unwrap_or(false))
        }
    }
}

/// A launcher that only counts launches.
pub struct MockLauncher {
    launches: Mutex<usize>,
    fail: bool,
}

impl MockLauncher {
    pub fn ok() -> Self {
        Self {
            launches: Mutex::new(0),
            fail: false,
        }
    }

    /// Behaves like a missing executable.
    pub fn failing() -> Self {
        Self {
            launches: Mutex::new(0),
            fail: true,
        }
    }

    pub fn launch_count(&self) -> usize {
        *self.launches.lock().unwrap()
    }
}

impl ProcessLauncher for MockLauncher {
    fn describe(&self) -> String {
        "mock serve".into()
    }

    fn launch(&self) -> Result<(), ServiceError> {
        *self.launches.lock().unwrap() += 1;
        if self.fail {
            Err(ServiceError::LaunchFailed("mock: No such file or directory".into()))
        } else {
            Ok(())
        }
    }
}

/// A successful reply carrying `text`.
pub fn reply(text: &str) -> GenerateResponse {
    GenerateResponse {
        response: Some(text.to_string()),
        model: Some("mock-model".into()),
        done: true,
    }
}

/// A reply with no `response` field.
pub fn reply_without_text() -> GenerateResponse {
    GenerateResponse {
        response: None,
        model: Some("mock-model".into()),
        done: true,
    }
}
