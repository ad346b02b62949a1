//! Dashboard figures: headline totals, hourly energy profile and
//! temperature descriptions.

use serde::Serialize;
use thermowise_core::dataset::columns;
use thermowise_core::Dataset;

use crate::stats;

/// Shape of a loaded dataset, reported back after a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<String>,
}

impl DatasetInfo {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            rows: dataset.row_count(),
            columns: dataset.column_names().into_iter().map(String::from).collect(),
        }
    }
}

/// Headline numbers. Each is `None` when its column is absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuickStats {
    pub total_energy_kwh: Option<f64>,
    pub avg_indoor_temp_c: Option<f64>,
    pub total_cost_usd: Option<f64>,
    /// Mean over strictly positive readings only (0 means the heat pump was off)
    pub avg_cop: Option<f64>,
}

impl QuickStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let avg_cop = dataset.numeric(columns::COP_EFFICIENCY).and_then(|cop| {
            let running: Vec<Option<f64>> = cop.iter().map(|v| v.filter(|v| *v > 0.0)).collect();
            stats::mean(&running)
        });

        Self {
            total_energy_kwh: dataset.numeric(columns::ENERGY_CONSUMPTION).and_then(stats::sum),
            avg_indoor_temp_c: dataset.numeric(columns::INDOOR_TEMP).and_then(stats::mean),
            total_cost_usd: dataset.numeric(columns::ENERGY_COST).and_then(stats::sum),
            avg_cop,
        }
    }
}

/// Mean consumption per hour of day, ascending by hour.
pub fn hourly_average_energy(dataset: &Dataset) -> Vec<(u32, f64)> {
    let (Some(hours), Some(kwh)) = (
        dataset.hour_of_day(),
        dataset.numeric(columns::ENERGY_CONSUMPTION),
    ) else {
        return Vec::new();
    };
    stats::group_mean(&hours, kwh)
}

/// Count, mean and sample standard deviation of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

pub fn describe(dataset: &Dataset, name: &str) -> Option<ColumnDescription> {
    let values = dataset.numeric(name)?;
    Some(ColumnDescription {
        name: name.to_string(),
        count: stats::present(values).len(),
        mean: stats::mean(values),
        std: stats::std_dev(values),
    })
}

/// Descriptions of whichever temperature columns exist.
pub fn describe_temperatures(dataset: &Dataset) -> Vec<ColumnDescription> {
    [columns::INDOOR_TEMP, columns::OUTDOOR_TEMP]
        .into_iter()
        .filter_map(|name| describe(dataset, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Dataset {
        let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        Dataset::empty()
            .with_timestamps([
                day.and_hms_opt(6, 0, 0).unwrap(),
                day.and_hms_opt(6, 30, 0).unwrap(),
                day.and_hms_opt(18, 0, 0).unwrap(),
            ])
            .with_numeric(columns::INDOOR_TEMP, [20.0, 21.0, 22.0])
            .with_numeric(columns::ENERGY_CONSUMPTION, [1.0, 2.0, 4.0])
            .with_numeric(columns::ENERGY_COST, [0.15, 0.30, 0.60])
            .with_numeric(columns::COP_EFFICIENCY, [0.0, 3.0, 4.0])
    }

    #[test]
    fn quick_stats_headline_numbers() {
        let stats = QuickStats::from_dataset(&sample());
        assert_eq!(stats.total_energy_kwh, Some(7.0));
        assert_eq!(stats.avg_indoor_temp_c, Some(21.0));
        assert!((stats.total_cost_usd.unwrap() - 1.05).abs() < 1e-9);
        assert_eq!(stats.avg_cop, Some(3.5));
    }

    #[test]
    fn quick_stats_on_bare_table() {
        assert_eq!(QuickStats::from_dataset(&Dataset::empty()), QuickStats::default());
    }

    #[test]
    fn hourly_profile() {
        assert_eq!(hourly_average_energy(&sample()), vec![(6, 1.5), (18, 4.0)]);
        assert!(hourly_average_energy(&Dataset::empty()).is_empty());
    }

    #[test]
    fn describe_only_existing_temperature_columns() {
        let descriptions = describe_temperatures(&sample());
        assert_eq!(descriptions.len(), 1);
        assert_eq!(descriptions[0].name, columns::INDOOR_TEMP);
        assert_eq!(descriptions[0].count, 3);
        assert_eq!(descriptions[0].mean, Some(21.0));
        assert!((descriptions[0].std.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn info_lists_columns_in_order() {
        let info = DatasetInfo::of(&sample());
        assert_eq!(info.rows, 3);
        assert_eq!(info.columns[0], columns::TIMESTAMP);
    }
}
