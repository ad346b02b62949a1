//! Question grounding: statistics for the question's intent, and the prompt
//! that carries them.
//!
//! | Intent | Source columns | Rendered as |
//! |--------|----------------|-------------|
//! | Temperature | `indoor_temp_c`, `outdoor_temp_c` | headed list |
//! | Energy | `energy_consumption_kwh`, `energy_cost_usd`, hour of day | headed list |
//! | Humidity | `indoor_humidity` | single line |
//! | Schedule | hour of day, `energy_consumption_kwh` | single line |
//! | General | none | fallback instruction |

pub mod assembler;
pub mod builder;

pub use assembler::{assemble, clean_answer, parse_prompt, PromptSections, ANSWER_CUE};
pub use builder::{build_context, ContextLine, ContextSummary, NOT_AVAILABLE};
