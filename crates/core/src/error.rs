//! Error types for the Thermowise domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Service failures are never raised past the session boundary: they are
//! rendered into answer text through [`ServiceError::user_message`].

use std::path::PathBuf;
use thiserror::Error;

/// Answer returned when the service cannot be brought up.
pub const UNAVAILABLE_MESSAGE: &str =
    "Ollama service is not running. Please start Ollama first.";

/// Answer returned when the generation endpoint refuses the connection.
pub const CANNOT_CONNECT_MESSAGE: &str = "Cannot connect to Ollama. Make sure Ollama is running.\nRun this command in terminal: `ollama serve`";

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The liveness probe and the single start attempt both failed.
    #[error("Inference service unavailable: {0}")]
    Unavailable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Failed to launch inference service: {0}")]
    LaunchFailed(String),

    /// Any other transport failure (request building, body read, redirect)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Render this failure as the text shown to the user in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable(_) | Self::LaunchFailed(_) => UNAVAILABLE_MESSAGE.to_string(),
            Self::Connection(_) => CANNOT_CONNECT_MESSAGE.to_string(),
            Self::Api { status_code, .. } => {
                format!("Error: API returned status code {status_code}")
            }
            Self::Timeout(detail) => format!("Error: request timed out ({detail})"),
            Self::MalformedResponse(detail) => {
                format!("Error: malformed response from inference service ({detail})")
            }
            Self::Transport(detail) => format!("Error: {detail}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read dataset at {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("Dataset has no header row")]
    MissingHeader,

    #[error("Malformed dataset at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
