//! # Thermowise Core
//!
//! Domain types, traits, and error definitions for the Thermowise thermostat
//! assistant. Every other crate depends inward on this one.
//!
//! ## Design Philosophy
//!
//! The two outside-world seams (the inference service and the process that
//! hosts it) are traits defined here. Real implementations live in
//! `thermowise-providers`; tests substitute in-memory doubles.

pub mod dataset;
pub mod error;
pub mod launcher;
pub mod message;
pub mod provider;
pub mod service;

// Re-export key types at crate root for ergonomics
pub use dataset::{ColumnData, Dataset};
pub use error::{DatasetError, ServiceError};
pub use launcher::ProcessLauncher;
pub use message::{Conversation, Message, Role};
pub use provider::{GenerateOptions, GenerateRequest, GenerateResponse, InferenceBackend};
pub use service::ServiceState;
