//! Price file loading.
//!
//! JSON input is an array of records carrying a closing price field
//! (`rate_close`, `close`, `Close` or `price`, numeric or a numeric string)
//! and an optional `timestamp`/`date`/`time` field, or a bare array of
//! numbers. CSV input needs a header row.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde_json::Value;

use parvar_core::{PricePoint, PriceSeries};

use crate::error::{CliError, CliResult};

/// Closing price field names tried in order when none is configured.
const PRICE_FIELDS: [&str; 4] = ["rate_close", "close", "Close", "price"];

/// Timestamp field names tried in order.
const TIME_FIELDS: [&str; 4] = ["timestamp", "date", "time", "Open time"];

/// Price file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON array of records or numbers
    Json,
    /// CSV with a header row
    Csv,
}

impl InputFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(InputFormat::Json),
            Some("csv") => Ok(InputFormat::Csv),
            _ => Err(CliError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Loads a price series from a file.
pub fn load_prices(
    path: &Path,
    format: Option<InputFormat>,
    column: Option<&str>,
) -> CliResult<PriceSeries> {
    let format = match format {
        Some(f) => f,
        None => InputFormat::from_path(path)?,
    };
    let content = std::fs::read_to_string(path)?;

    let series = match format {
        InputFormat::Json => parse_json(&content, column)?,
        InputFormat::Csv => parse_csv(&content, column)?,
    };

    tracing::info!("Loaded {} prices from {}", series.len(), path.display());
    if !is_chronological(&series) {
        tracing::warn!("price timestamps are not in ascending order; using file order");
    }
    Ok(series)
}

/// Parses JSON price records.
pub fn parse_json(content: &str, column: Option<&str>) -> CliResult<PriceSeries> {
    let value: Value = serde_json::from_str(content)?;
    let records = value.as_array().ok_or_else(|| CliError::InvalidRecord {
        index: 0,
        reason: "expected a JSON array of price records".into(),
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| json_point(index, record, column))
        .collect()
}

fn json_point(index: usize, record: &Value, column: Option<&str>) -> CliResult<PricePoint> {
    let invalid = |reason: String| CliError::InvalidRecord { index, reason };

    match record {
        Value::Number(_) | Value::String(_) => {
            let close = json_number(record).ok_or_else(|| invalid("price is not a number".into()))?;
            Ok(PricePoint::new(close))
        }
        Value::Object(fields) => {
            let close_value = match column {
                Some(name) => fields.get(name),
                None => PRICE_FIELDS.iter().find_map(|name| fields.get(*name)),
            }
            .ok_or_else(|| invalid("no closing price field".into()))?;
            let close = json_number(close_value)
                .ok_or_else(|| invalid(format!("closing price {close_value} is not a number")))?;

            let timestamp = match TIME_FIELDS.iter().find_map(|name| fields.get(*name)) {
                Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
                Some(Value::String(s)) => parse_timestamp(s),
                _ => None,
            };

            Ok(PricePoint { timestamp, close })
        }
        other => Err(invalid(format!("unexpected value {other}"))),
    }
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses CSV price rows.
pub fn parse_csv(content: &str, column: Option<&str>) -> CliResult<PriceSeries> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let find = |name: &str| headers.iter().position(|h| h.trim() == name);
    let price_idx = match column {
        Some(name) => find(name).ok_or_else(|| CliError::MissingColumn(name.to_string()))?,
        None => PRICE_FIELDS
            .iter()
            .find_map(|name| find(*name))
            .ok_or_else(|| CliError::MissingColumn(PRICE_FIELDS.join("|")))?,
    };
    let time_idx = TIME_FIELDS.iter().find_map(|name| find(*name));

    let mut points = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let raw = row.get(price_idx).unwrap_or_default().trim();
        let close: f64 = raw.parse().map_err(|_| CliError::InvalidRecord {
            index,
            reason: format!("closing price '{raw}' is not a number"),
        })?;
        let timestamp = time_idx
            .and_then(|i| row.get(i))
            .and_then(|s| parse_timestamp(s.trim()));
        points.push(PricePoint { timestamp, close });
    }

    Ok(PriceSeries::new(points))
}

/// Parses RFC 3339, `YYYY-MM-DD` or epoch-millisecond timestamps.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

/// Returns false if any timestamp precedes the one before it.
///
/// Points without a timestamp are skipped.
pub fn is_chronological(series: &PriceSeries) -> bool {
    let stamps: Vec<DateTime<Utc>> = series.points().iter().filter_map(|p| p.timestamp).collect();
    stamps.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_rate_close_records() {
        let json = r#"[
            {"rate_close": 1850.5, "timestamp": "2023-01-01T00:00:00Z"},
            {"rate_close": "1862.25", "timestamp": "2023-01-02T00:00:00Z"}
        ]"#;
        let series = parse_json(json, None).unwrap();
        assert_eq!(series.closes(), vec![1850.5, 1862.25]);
        assert_eq!(
            series.points()[0].timestamp,
            Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_descending_timestamps_keep_file_order() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[
                {"rate_close": 103.0, "timestamp": "2023-01-03T00:00:00Z"},
                {"rate_close": 102.0, "timestamp": "2023-01-02T00:00:00Z"},
                {"rate_close": 101.0, "timestamp": "2023-01-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();

        let series = load_prices(file.path(), None, None).unwrap();

        assert_eq!(series.closes(), vec![103.0, 102.0, 101.0]);
        assert_eq!(series.points()[0].timestamp.unwrap().day(), 3);
        assert!(!is_chronological(&series));
    }

    #[test]
    fn test_chronological_ignores_missing_timestamps() {
        let json = r#"[
            {"close": 1.0, "timestamp": "2023-01-01"},
            {"close": 2.0},
            {"close": 3.0, "timestamp": "2023-01-02"}
        ]"#;
        assert!(is_chronological(&parse_json(json, None).unwrap()));
        assert!(is_chronological(&PriceSeries::from_closes(&[3.0, 2.0, 1.0])));
    }

    #[test]
    fn test_bare_numbers() {
        let series = parse_json("[100, 101.5, \"99\"]", None).unwrap();
        assert_eq!(series.closes(), vec![100.0, 101.5, 99.0]);
    }

    #[test]
    fn test_custom_json_column() {
        let series = parse_json(r#"[{"px": 5.0}, {"px": 6.0}]"#, Some("px")).unwrap();
        assert_eq!(series.closes(), vec![5.0, 6.0]);
    }

    #[test]
    fn test_json_missing_price() {
        let err = parse_json(r#"[{"rate_close": 1.0}, {"open": 2.0}]"#, None).unwrap_err();
        assert!(matches!(err, CliError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_json_not_array() {
        assert!(parse_json(r#"{"rate_close": 1.0}"#, None).is_err());
    }

    #[test]
    fn test_csv_close_column() {
        let csv = "date,open,close\n2024-01-02,99.0,100.0\n2024-01-03,100.0,101.0\n";
        let series = parse_csv(csv, None).unwrap();
        assert_eq!(series.closes(), vec![100.0, 101.0]);
        assert_eq!(series.points()[1].timestamp.map(|t| t.day()), Some(3));
    }

    #[test]
    fn test_csv_missing_column() {
        let err = parse_csv("a,b\n1,2\n", Some("close")).unwrap_err();
        assert!(matches!(err, CliError::MissingColumn(_)));
    }

    #[test]
    fn test_csv_bad_number() {
        let err = parse_csv("close\n100\nabc\n", None).unwrap_err();
        assert!(matches!(err, CliError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2024-03-01").is_some());
        assert!(parse_timestamp("2024-03-01T12:00:00+02:00").is_some());
        assert_eq!(
            parse_timestamp("1704067200000"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("prices.JSON")).unwrap(),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::from_path(Path::new("prices.csv")).unwrap(),
            InputFormat::Csv
        );
        assert!(InputFormat::from_path(Path::new("prices.txt")).is_err());
    }
}
