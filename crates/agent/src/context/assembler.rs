//! Prompt assembly.
//!
//! Builds the single generation request sent to the model. The prompt has
//! three labelled sections in fixed order:
//!
//! ```text
//! User Question: <question>
//!
//! System Context: <system block>
//!
//! Assistant Answer:
//! ```
//!
//! The system block states the assistant's role, then embeds the context
//! summary (or a fallback instruction when there is no data), then fixed
//! guidance. Assembly is deterministic.

use thermowise_core::provider::{GenerateOptions, GenerateRequest};

use super::builder::ContextSummary;

pub const QUESTION_LABEL: &str = "User Question:";
pub const CONTEXT_LABEL: &str = "System Context:";
/// Marks where the model's reply begins. Echoed copies are stripped from
/// replies by [`clean_answer`].
pub const ANSWER_CUE: &str = "Assistant Answer:";

const SECTION_BREAK: &str = "\n\n";

pub const ROLE: &str = "You are a smart thermostat AI assistant. You have access to the user's actual thermostat data.";

pub const FALLBACK: &str =
    "No specific data available. Provide general advice based on HVAC best practices.";

pub const GUIDANCE: &str = "IMPORTANT: Answer the user's question based on their actual data if available.
If data is available, reference the specific numbers.
If no specific data is available, provide general advice.

Keep answers concise, practical, and helpful.";

// Sampling is fixed, not configurable
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;
pub const MAX_TOKENS: u32 = 300;

/// Sampling options sent with every request.
pub fn sampling_options() -> GenerateOptions {
    GenerateOptions {
        temperature: TEMPERATURE,
        top_p: TOP_P,
        max_tokens: MAX_TOKENS,
    }
}

/// Build the system instruction block.
///
/// A summary with values is embedded verbatim. A summary whose every value
/// is `N/A` is still embedded, followed by the fallback instruction. An
/// empty summary is replaced by the fallback.
pub fn system_block(context: &ContextSummary) -> String {
    let mut grounding = Vec::new();
    if !context.is_empty() {
        grounding.push(context.render());
    }
    if !context.has_data() {
        grounding.push(FALLBACK.to_string());
    }

    [ROLE.to_string(), grounding.join("\n"), GUIDANCE.to_string()].join(SECTION_BREAK)
}

/// Combine question and system block into the final prompt text.
pub fn compose_prompt(question: &str, system: &str) -> String {
    format!(
        "{QUESTION_LABEL} {question}{SECTION_BREAK}{CONTEXT_LABEL} {system}{SECTION_BREAK}{ANSWER_CUE}"
    )
}

/// Build the full generation request for `model`.
pub fn assemble(model: &str, question: &str, context: &ContextSummary) -> GenerateRequest {
    let system = system_block(context);
    GenerateRequest {
        model: model.to_string(),
        prompt: compose_prompt(question, &system),
        stream: false,
        options: sampling_options(),
    }
}

/// Sections recovered from an assembled prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSections<'a> {
    pub question: &'a str,
    pub system: &'a str,
}

/// Split an assembled prompt back into its question and system sections.
///
/// Returns `None` if the markers are not laid out as [`compose_prompt`]
/// writes them.
pub fn parse_prompt(prompt: &str) -> Option<PromptSections<'_>> {
    let rest = prompt.strip_prefix(QUESTION_LABEL)?.strip_prefix(' ')?;
    let rest = rest.strip_suffix(ANSWER_CUE)?.strip_suffix(SECTION_BREAK)?;

    // The question may itself contain the context label; the system block
    // starts at the last one.
    let marker = format!("{SECTION_BREAK}{CONTEXT_LABEL} ");
    let split = rest.rfind(&marker)?;
    Some(PromptSections {
        question: &rest[..split],
        system: &rest[split + marker.len()..],
    })
}

/// Recover the embedded context text from a system block, if any.
pub fn extract_context(system: &str) -> Option<&str> {
    let body = system
        .strip_prefix(ROLE)?
        .strip_prefix(SECTION_BREAK)?
        .strip_suffix(GUIDANCE)?
        .strip_suffix(SECTION_BREAK)?;

    match body.strip_suffix(FALLBACK) {
        Some("") => None,
        Some(context) => context.strip_suffix('\n'),
        None => Some(body),
    }
}

/// Strip an echoed prompt from a raw model reply.
///
/// When the reply contains the answer cue, only the text after its last
/// occurrence is kept, trimmed. Otherwise the reply is returned unchanged.
pub fn clean_answer(raw: &str) -> String {
    match raw.rfind(ANSWER_CUE) {
        Some(pos) => raw[pos + ANSWER_CUE.len()..].trim().to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::QuestionIntent;
    use crate::context::builder::build_context;
    use thermowise_core::dataset::columns;
    use thermowise_core::Dataset;

    fn temperature_context() -> ContextSummary {
        let ds = Dataset::empty()
            .with_numeric(columns::INDOOR_TEMP, [20.0, 22.0, 24.0])
            .with_numeric(columns::OUTDOOR_TEMP, [10.0, 15.0]);
        build_context(&ds, QuestionIntent::Temperature)
    }

    #[test]
    fn prompt_has_three_sections_in_order() {
        let request = assemble("phi", "Is 22°C too warm?", &temperature_context());
        let prompt = &request.prompt;

        let q = prompt.find(QUESTION_LABEL).unwrap();
        let c = prompt.find(CONTEXT_LABEL).unwrap();
        let a = prompt.find(ANSWER_CUE).unwrap();
        assert!(q < c && c < a);
        assert!(prompt.starts_with("User Question: Is 22°C too warm?\n\nSystem Context: "));
        assert!(prompt.ends_with("\n\nAssistant Answer:"));
    }

    #[test]
    fn sampling_is_fixed() {
        let request = assemble("phi", "q", &ContextSummary::empty(QuestionIntent::General));
        assert_eq!(request.model, "phi");
        assert!(!request.stream);
        assert_eq!(request.options.temperature, 0.7);
        assert_eq!(request.options.top_p, 0.9);
        assert_eq!(request.options.max_tokens, 300);
    }

    #[test]
    fn context_embedded_without_fallback() {
        let system = system_block(&temperature_context());
        assert!(system.starts_with(ROLE));
        assert!(system.contains("- Average indoor temperature: 22.0°C"));
        assert!(!system.contains(FALLBACK));
        assert!(system.ends_with(GUIDANCE));
    }

    #[test]
    fn empty_context_uses_fallback() {
        let system = system_block(&ContextSummary::empty(QuestionIntent::General));
        assert_eq!(
            system,
            format!("{ROLE}\n\n{FALLBACK}\n\n{GUIDANCE}")
        );
    }

    #[test]
    fn all_missing_context_keeps_block_and_adds_fallback() {
        let ds = Dataset::empty().with_numeric(columns::INDOOR_HUMIDITY, [f64::NAN]);
        let ctx = build_context(&ds, QuestionIntent::Humidity);
        let system = system_block(&ctx);
        assert!(system.contains("Average indoor humidity: N/A\nNo specific data available."));
    }

    #[test]
    fn round_trip_recovers_question_and_context() {
        let ctx = temperature_context();
        let question = "What's my average temperature?";
        let request = assemble("phi", question, &ctx);

        let sections = parse_prompt(&request.prompt).unwrap();
        assert_eq!(sections.question, question);
        assert_eq!(extract_context(sections.system), Some(ctx.render().as_str()));
    }

    #[test]
    fn round_trip_with_awkward_question() {
        let question = "Line one\n\nSystem Context: tricky\nAssistant Answer: no";
        let request = assemble("phi", question, &ContextSummary::empty(QuestionIntent::General));

        let sections = parse_prompt(&request.prompt).unwrap();
        assert_eq!(sections.question, question);
        assert_eq!(extract_context(sections.system), None);
    }

    #[test]
    fn parse_rejects_foreign_text() {
        assert!(parse_prompt("hello").is_none());
        assert!(parse_prompt("User Question: q\n\nAssistant Answer:").is_none());
    }

    #[test]
    fn clean_answer_keeps_text_after_last_cue() {
        let raw = "User Question: q\n\nAssistant Answer: first\nAssistant Answer:   Set it to 20°C.  \n";
        assert_eq!(clean_answer(raw), "Set it to 20°C.");
    }

    #[test]
    fn clean_answer_leaves_plain_reply_alone() {
        assert_eq!(clean_answer("  Lower it at night.\n"), "  Lower it at night.\n");
    }
}
