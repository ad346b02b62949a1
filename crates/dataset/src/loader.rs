//! CSV loading and column typing.
//!
//! The thermostat export is a plain CSV with a header row. Columns are typed
//! on load:
//! - `timestamp` → date-time (several common layouts accepted)
//! - every other column → numeric when all non-empty cells parse as `f64`,
//!   text otherwise
//!
//! Empty cells and unparseable timestamps become missing values.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thermowise_core::dataset::{columns, Column, ColumnData};
use thermowise_core::{Dataset, DatasetError};
use tracing::{debug, info};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Load a dataset from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| DatasetError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let dataset = parse_csv(BufReader::new(file)).map_err(|e| match e {
        DatasetError::Unreadable { reason, .. } => DatasetError::Unreadable {
            path: path.to_path_buf(),
            reason,
        },
        other => other,
    })?;

    info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "Loaded thermostat dataset"
    );
    Ok(dataset)
}

/// Parse CSV text from any buffered reader.
pub fn parse_csv<R: BufRead>(reader: R) -> Result<Dataset, DatasetError> {
    let mut header: Option<Vec<String>> = None;
    let mut cells: Vec<Vec<Option<String>>> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| DatasetError::Unreadable {
            path: Default::default(),
            reason: e.to_string(),
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let fields = csv_split(&line);

        let Some(names) = &header else {
            let names: Vec<String> = fields
                .iter()
                .map(|f| f.trim().trim_start_matches('\u{feff}').to_string())
                .collect();
            cells = vec![Vec::new(); names.len()];
            header = Some(names);
            continue;
        };

        if fields.len() > names.len() {
            return Err(DatasetError::Malformed {
                line: line_no,
                reason: format!(
                    "expected {} fields, found {}",
                    names.len(),
                    fields.len()
                ),
            });
        }

        for (i, column) in cells.iter_mut().enumerate() {
            let cell = fields
                .get(i)
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(str::to_string);
            column.push(cell);
        }
    }

    let names = header.ok_or(DatasetError::MissingHeader)?;

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| {
            let data = type_column(&name, raw);
            debug!(column = %name, kind = data.kind(), "Typed dataset column");
            Column { name, data }
        })
        .collect();

    Ok(Dataset::new(columns))
}

fn type_column(name: &str, raw: Vec<Option<String>>) -> ColumnData {
    if name == columns::TIMESTAMP {
        return ColumnData::Timestamp(
            raw.iter()
                .map(|cell| cell.as_deref().and_then(parse_timestamp))
                .collect(),
        );
    }

    let numeric: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| match cell {
            Some(s) => s.parse::<f64>().ok().map(Some),
            None => Some(None),
        })
        .collect();

    match numeric {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Text(raw),
    }
}

/// Parse one timestamp cell. Offsets are dropped after converting to the
/// wall-clock time they carry.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::io::Cursor;

    const SAMPLE: &str = "\
timestamp,indoor_temp_c,outdoor_temp_c,indoor_humidity,energy_consumption_kwh,energy_cost_usd,mode
2024-01-15 06:00:00,19.5,2.0,41,1.2,0.18,heat
2024-01-15 07:00:00,20.5,3.5,43,1.8,0.27,heat
2024-01-15 08:00:00,21.0,,44,,0.30,\"heat, eco\"
";

    fn parse(text: &str) -> Result<Dataset, DatasetError> {
        parse_csv(Cursor::new(text))
    }

    #[test]
    fn parses_and_types_columns() {
        let ds = parse(SAMPLE).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert!(matches!(
            ds.column(columns::TIMESTAMP),
            Some(ColumnData::Timestamp(_))
        ));
        assert!(matches!(ds.column("mode"), Some(ColumnData::Text(_))));

        let indoor = ds.numeric(columns::INDOOR_TEMP).unwrap();
        assert_eq!(indoor, &[Some(19.5), Some(20.5), Some(21.0)]);

        let outdoor = ds.numeric(columns::OUTDOOR_TEMP).unwrap();
        assert_eq!(outdoor[2], None);
    }

    #[test]
    fn quoted_commas_stay_in_one_field() {
        let ds = parse(SAMPLE).unwrap();
        match ds.column("mode") {
            Some(ColumnData::Text(values)) => {
                assert_eq!(values[2].as_deref(), Some("heat, eco"));
            }
            other => panic!("unexpected column: {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = parse("a,b,c\n1,2\n4,5,6\n").unwrap();
        assert_eq!(ds.numeric("c").unwrap(), &[None, Some(6.0)]);
    }

    #[test]
    fn long_rows_are_rejected_with_line_number() {
        let err = parse("a,b\n1,2\n3,4,5\n").unwrap_err();
        match err {
            DatasetError::Malformed { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn header_only_gives_empty_table() {
        let ds = parse("timestamp,energy_consumption_kwh\n").unwrap();
        assert!(ds.is_empty());
        assert!(ds.has_column(columns::ENERGY_CONSUMPTION));
    }

    #[test]
    fn blank_input_has_no_header() {
        assert!(matches!(parse("\n\n"), Err(DatasetError::MissingHeader)));
    }

    #[test]
    fn timestamp_layouts() {
        for s in [
            "2024-03-01 17:45:00",
            "2024-03-01T17:45:00",
            "2024-03-01 17:45",
            "2024-03-01T17:45:00+01:00",
            "2024-03-01 17:45:00.250",
        ] {
            let ts = parse_timestamp(s).unwrap_or_else(|| panic!("failed on {s}"));
            assert_eq!(ts.hour(), 17, "{s}");
        }
        assert_eq!(parse_timestamp("2024-03-01").unwrap().hour(), 0);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn bad_timestamps_become_missing() {
        let ds = parse("timestamp,x\nnot-a-date,1\n2024-01-01 05:00:00,2\n").unwrap();
        assert_eq!(ds.hour_of_day().unwrap(), vec![None, Some(5)]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thermostat.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column_names().len(), 7);
    }
}
