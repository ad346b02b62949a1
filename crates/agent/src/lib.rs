//! Question orchestration for Thermowise.
//!
//! A question flows **classify → build context → assemble → infer → record**:
//!
//! 1. [`classifier`] maps the text to an intent with an ordered keyword table
//! 2. [`context`] derives statistics for that intent and builds the prompt
//! 3. [`inference`] makes sure the service is up and sends the request
//! 4. [`orchestrator::Session`] stores both sides of the exchange
//!
//! History is kept for display only and is never fed back into prompts.

pub mod classifier;
pub mod context;
pub mod inference;
pub mod orchestrator;

#[cfg(test)]
mod test_helpers;

pub use classifier::{classify, QuestionIntent};
pub use context::{build_context, ContextSummary};
pub use inference::InferenceClient;
pub use orchestrator::{sample_questions, Session, EMPTY_QUESTION_MESSAGE};
