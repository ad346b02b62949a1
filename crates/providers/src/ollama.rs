//! Ollama backend.
//!
//! Talks to the native Ollama API:
//! - `GET  /api/tags`: liveness probe and model listing
//! - `POST /api/generate`: single non-streaming completion

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thermowise_config::ServiceConfig;
use thermowise_core::error::ServiceError;
use thermowise_core::provider::{GenerateRequest, GenerateResponse, InferenceBackend};
use tracing::{debug, warn};

/// An Ollama inference backend.
pub struct OllamaBackend {
    base_url: String,
    client: reqwest::Client,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl OllamaBackend {
    /// Create a backend for `base_url` with the default timeouts
    /// (5s probe, 30s generation).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            probe_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Ok(Self::new(&config.base_url)?
            .with_timeouts(config.probe_timeout(), config.request_timeout()))
    }

    pub fn with_timeouts(mut self, probe: Duration, request: Duration) -> Self {
        self.probe_timeout = probe;
        self.request_timeout = request;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }
}

/// Classify a reqwest failure into the service error taxonomy.
fn map_transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout(e.to_string())
    } else if e.is_connect() {
        ServiceError::Connection(e.to_string())
    } else if e.is_decode() {
        ServiceError::MalformedResponse(e.to_string())
    } else {
        ServiceError::Transport(e.to_string())
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(ServiceError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        serde_json::from_str(&body)
            .map_err(|e| ServiceError::MalformedResponse(format!("failed to parse response: {e}")))
    }

    async fn health_check(&self) -> Result<bool, ServiceError> {
        let response = self
            .client
            .get(self.tags_url())
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        Ok(response.status().as_u16() == 200)
    }

    async fn list_models(&self) -> Result<Vec<String>, ServiceError> {
        let response = self
            .client
            .get(self.tags_url())
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Ok(Vec::new());
        }

        let tags: TagsResponse = response.json().await.map_err(map_transport_error)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

// --- Ollama API types (internal) ---

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::{get, post}};
    use std::sync::{Arc, Mutex};
    use thermowise_core::provider::GenerateOptions;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// An address nothing listens on.
    async fn dead_address() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: "phi".into(),
            prompt: prompt.into(),
            stream: false,
            options: GenerateOptions {
                temperature: 0.7,
                top_p: 0.9,
                max_tokens: 300,
            },
        }
    }

    #[test]
    fn trailing_slash_trimmed() {
        let backend = OllamaBackend::new("http://localhost:11434/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:11434");
        assert_eq!(backend.name(), "ollama");
    }

    #[tokio::test]
    async fn health_check_up_on_200() {
        let app = Router::new().route(
            "/api/tags",
            get(|| async { Json(serde_json::json!({"models": []})) }),
        );
        let backend = OllamaBackend::new(serve(app).await).unwrap();
        assert!(backend.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn health_check_down_on_error_status() {
        let app = Router::new().route(
            "/api/tags",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let backend = OllamaBackend::new(serve(app).await).unwrap();
        assert!(!backend.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn health_check_connection_refused() {
        let backend = OllamaBackend::new(dead_address().await).unwrap();
        let err = backend.health_check().await.unwrap_err();
        assert!(matches!(err, ServiceError::Connection(_)), "{err:?}");
    }

    #[tokio::test]
    async fn list_models_reads_tags() {
        let app = Router::new().route(
            "/api/tags",
            get(|| async {
                Json(serde_json::json!({
                    "models": [{"name": "phi:latest"}, {"name": "llama3:8b"}]
                }))
            }),
        );
        let backend = OllamaBackend::new(serve(app).await).unwrap();
        assert_eq!(
            backend.list_models().await.unwrap(),
            vec!["phi:latest", "llama3:8b"]
        );
    }

    #[tokio::test]
    async fn generate_sends_wire_body_and_parses_reply() {
        let seen: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let app = Router::new().route(
            "/api/generate",
            post(move |Json(body): Json<serde_json::Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(serde_json::json!({
                        "model": "phi",
                        "response": "Keep it at 20°C overnight.",
                        "done": true
                    }))
                }
            }),
        );
        let backend = OllamaBackend::new(serve(app).await).unwrap();

        let reply = backend.generate(&request("User Question: night?")).await.unwrap();
        assert_eq!(reply.response.as_deref(), Some("Keep it at 20°C overnight."));

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "phi");
        assert_eq!(body["prompt"], "User Question: night?");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["max_tokens"], 300);
    }

    #[tokio::test]
    async fn generate_non_200_is_api_error() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::NOT_FOUND, "model 'phi' not found") }),
        );
        let backend = OllamaBackend::new(serve(app).await).unwrap();
        match backend.generate(&request("q")).await.unwrap_err() {
            ServiceError::Api { status_code, message } => {
                assert_eq!(status_code, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_invalid_json_is_malformed() {
        let app = Router::new().route("/api/generate", post(|| async { "not json" }));
        let backend = OllamaBackend::new(serve(app).await).unwrap();
        let err = backend.generate(&request("q")).await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn generate_slow_reply_times_out() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({"response": "too late"}))
            }),
        );
        let backend = OllamaBackend::new(serve(app).await)
            .unwrap()
            .with_timeouts(Duration::from_secs(1), Duration::from_millis(100));
        let err = backend.generate(&request("q")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Timeout(_)), "{err:?}");
    }
}
