//! Question classifier.
//!
//! Maps free text to a [`QuestionIntent`] with an ordered keyword table. The
//! first group with a case-insensitive substring hit wins, so a question
//! mentioning both "temperature" and "cost" is a temperature question.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionIntent {
    Temperature,
    Energy,
    Humidity,
    Schedule,
    General,
}

impl fmt::Display for QuestionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "temperature",
            Self::Energy => "energy",
            Self::Humidity => "humidity",
            Self::Schedule => "schedule",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

/// Keyword groups in priority order.
pub const KEYWORD_TABLE: &[(&[&str], QuestionIntent)] = &[
    (&["temperature", "temp"], QuestionIntent::Temperature),
    (&["energy", "bill", "cost"], QuestionIntent::Energy),
    (&["humidity"], QuestionIntent::Humidity),
    (&["schedule", "time"], QuestionIntent::Schedule),
];

/// Classify a question. Pure; never fails.
pub fn classify(question: &str) -> QuestionIntent {
    let lowered = question.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(QuestionIntent::General)
}
