//! Context builder: derives the statistics block for one question.
//!
//! Every statistic is tied to the column it reads. A missing column drops
//! its lines; a present column with nothing to aggregate (no rows, only
//! blanks) renders `N/A`. Nothing here can fail.

use thermowise_core::dataset::columns;
use thermowise_core::Dataset;
use thermowise_dataset::stats;

use crate::classifier::QuestionIntent;

/// Placeholder for a statistic whose column exists but yields no value.
pub const NOT_AVAILABLE: &str = "N/A";

// ── Types ─────────────────────────────────────────────────────────────────

/// One labelled statistic. `value` is `None` when it could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextLine {
    pub label: &'static str,
    pub value: Option<String>,
}

impl ContextLine {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self { label, value }
    }
}

/// Statistics derived for a single intent evaluation. Recomputed per
/// question, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSummary {
    pub intent: QuestionIntent,
    pub heading: Option<&'static str>,
    pub lines: Vec<ContextLine>,
}

impl ContextSummary {
    pub fn empty(intent: QuestionIntent) -> Self {
        Self {
            intent,
            heading: None,
            lines: Vec::new(),
        }
    }

    /// No statistic applied (no relevant column, or a general question).
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// At least one statistic has an actual value.
    pub fn has_data(&self) -> bool {
        self.lines.iter().any(|l| l.value.is_some())
    }

    /// Text block embedded in the prompt; empty string for an empty summary.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let value = |line: &ContextLine| {
            line.value
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        match self.heading {
            Some(heading) => {
                let mut out = heading.to_string();
                for line in &self.lines {
                    out.push_str(&format!("\n- {}: {}", line.label, value(line)));
                }
                out
            }
            None => self
                .lines
                .iter()
                .map(|line| format!("{}: {}", line.label, value(line)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Look a statistic up by label.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .and_then(|l| l.value.as_deref())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────

/// Derive the summary for `intent` from `dataset`.
pub fn build_context(dataset: &Dataset, intent: QuestionIntent) -> ContextSummary {
    let summary = match intent {
        QuestionIntent::Temperature => temperature(dataset),
        QuestionIntent::Energy => energy(dataset),
        QuestionIntent::Humidity => humidity(dataset),
        QuestionIntent::Schedule => schedule(dataset),
        QuestionIntent::General => ContextSummary::empty(intent),
    };
    tracing::debug!(
        %intent,
        lines = summary.lines.len(),
        has_data = summary.has_data(),
        "Derived question context"
    );
    summary
}

fn celsius(v: f64) -> String {
    format!("{v:.1}°C")
}

fn hour_label(h: u32) -> String {
    format!("{h}:00")
}

fn with_heading(
    intent: QuestionIntent,
    heading: &'static str,
    lines: Vec<ContextLine>,
) -> ContextSummary {
    if lines.is_empty() {
        return ContextSummary::empty(intent);
    }
    ContextSummary {
        intent,
        heading: Some(heading),
        lines,
    }
}

fn temperature(dataset: &Dataset) -> ContextSummary {
    let mut lines = Vec::new();

    if let Some(indoor) = dataset.numeric(columns::INDOOR_TEMP) {
        lines.push(ContextLine::new(
            "Average indoor temperature",
            stats::mean(indoor).map(celsius),
        ));
        lines.push(ContextLine::new(
            "Minimum indoor temperature",
            stats::min(indoor).map(celsius),
        ));
        lines.push(ContextLine::new(
            "Maximum indoor temperature",
            stats::max(indoor).map(celsius),
        ));
        lines.push(ContextLine::new(
            "Current indoor temperature",
            stats::last(indoor).map(celsius),
        ));
    }

    if let Some(outdoor) = dataset.numeric(columns::OUTDOOR_TEMP) {
        let range = stats::min(outdoor)
            .zip(stats::max(outdoor))
            .map(|(lo, hi)| format!("{} to {}", celsius(lo), celsius(hi)));
        lines.push(ContextLine::new("Outdoor temperature range", range));
    }

    with_heading(QuestionIntent::Temperature, "USER'S THERMOSTAT DATA:", lines)
}

fn energy(dataset: &Dataset) -> ContextSummary {
    let mut lines = Vec::new();

    if let Some(kwh) = dataset.numeric(columns::ENERGY_CONSUMPTION) {
        lines.push(ContextLine::new(
            "Total energy consumption",
            stats::sum(kwh).map(|v| format!("{v:.1} kWh")),
        ));
        lines.push(ContextLine::new(
            "Average consumption per reading",
            stats::mean(kwh).map(|v| format!("{v:.2} kWh")),
        ));
    }

    if let Some(cost) = dataset.numeric(columns::ENERGY_COST) {
        lines.push(ContextLine::new(
            "Total energy cost",
            stats::sum(cost).map(|v| format!("${v:.2}")),
        ));
    }

    if let Some(hours) = dataset.hour_of_day() {
        lines.push(ContextLine::new(
            "Peak consumption hour",
            stats::mode(&hours).map(hour_label),
        ));
    }

    with_heading(QuestionIntent::Energy, "USER'S ENERGY DATA:", lines)
}

fn humidity(dataset: &Dataset) -> ContextSummary {
    let Some(humidity) = dataset.numeric(columns::INDOOR_HUMIDITY) else {
        return ContextSummary::empty(QuestionIntent::Humidity);
    };

    ContextSummary {
        intent: QuestionIntent::Humidity,
        heading: None,
        lines: vec![ContextLine::new(
            "Average indoor humidity",
            stats::mean(humidity).map(|v| format!("{v:.1}%")),
        )],
    }
}

fn schedule(dataset: &Dataset) -> ContextSummary {
    // Without an hour source there is nothing to group by
    let Some(hours) = dataset.hour_of_day() else {
        return ContextSummary::empty(QuestionIntent::Schedule);
    };

    let peak = dataset
        .numeric(columns::ENERGY_CONSUMPTION)
        .and_then(|kwh| stats::argmax_group_sum(&hours, kwh))
        .map(hour_label);

    ContextSummary {
        intent: QuestionIntent::Schedule,
        heading: None,
        lines: vec![ContextLine::new("Peak energy usage hour", peak)],
    }
}
