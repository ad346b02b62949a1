//! The thermostat dataset: a read-only table of named, typed columns.
//!
//! Every column is optional. Consumers ask for a column by name and degrade
//! gracefully when it is absent; nothing here fails on a missing column.
//! Row order is trusted to be time order.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Column names of the thermostat export.
pub mod columns {
    pub const TIMESTAMP: &str = "timestamp";
    pub const INDOOR_TEMP: &str = "indoor_temp_c";
    pub const OUTDOOR_TEMP: &str = "outdoor_temp_c";
    pub const INDOOR_HUMIDITY: &str = "indoor_humidity";
    pub const ENERGY_CONSUMPTION: &str = "energy_consumption_kwh";
    pub const ENERGY_COST: &str = "energy_cost_usd";
    pub const COP_EFFICIENCY: &str = "cop_efficiency";
    /// Pre-computed hour of day, used when there is no timestamp column.
    pub const HOUR: &str = "hour";
}

/// Values of one column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Timestamp(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Timestamp(_) => "timestamp",
            Self::Text(_) => "text",
        }
    }

    fn pad_to(&mut self, rows: usize) {
        match self {
            Self::Numeric(v) => v.resize(rows, None),
            Self::Timestamp(v) => v.resize(rows, None),
            Self::Text(v) => v.resize(rows, None),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// An immutable table of columns sharing one row count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a table from columns. Shorter columns are padded with missing
    /// values up to the longest one.
    pub fn new(columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(|c| c.data.len()).max().unwrap_or(0);
        let columns = columns
            .into_iter()
            .map(|mut c| {
                c.data.pad_to(rows);
                c
            })
            .collect();
        Self { columns, rows }
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add (or replace) a column.
    pub fn with_column(self, name: impl Into<String>, data: ColumnData) -> Self {
        let name = name.into();
        let mut columns: Vec<Column> = self
            .columns
            .into_iter()
            .filter(|c| c.name != name)
            .collect();
        columns.push(Column { name, data });
        Self::new(columns)
    }

    /// Add a fully populated numeric column.
    pub fn with_numeric(self, name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let data = ColumnData::Numeric(values.into_iter().map(Some).collect());
        self.with_column(name, data)
    }

    /// Add a fully populated `timestamp` column.
    pub fn with_timestamps(self, values: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        let data = ColumnData::Timestamp(values.into_iter().map(Some).collect());
        self.with_column(columns::TIMESTAMP, data)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// True when the table has no rows (it may still have columns).
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// Values of a numeric column, or `None` if absent or not numeric.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.column(name)? {
            ColumnData::Numeric(values) => Some(values),
            _ => None,
        }
    }

    /// Values of the `timestamp` column, if it exists and was parsed.
    pub fn timestamps(&self) -> Option<&[Option<NaiveDateTime>]> {
        match self.column(columns::TIMESTAMP)? {
            ColumnData::Timestamp(values) => Some(values),
            _ => None,
        }
    }

    /// Hour of day per row.
    ///
    /// Derived from `timestamp` when present, otherwise read from an integral
    /// `hour` column in 0..=23. `None` when neither source exists.
    pub fn hour_of_day(&self) -> Option<Vec<Option<u32>>> {
        if let Some(stamps) = self.timestamps() {
            return Some(stamps.iter().map(|t| t.map(|t| t.hour())).collect());
        }

        let hours = self.numeric(columns::HOUR)?;
        Some(
            hours
                .iter()
                .map(|h| {
                    h.filter(|h| h.fract() == 0.0 && (0.0..=23.0).contains(h))
                        .map(|h| h as u32)
                })
                .collect(),
        )
    }
}
