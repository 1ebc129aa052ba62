use chrono::NaiveTime;

use crate::core::TraceError;
use crate::core::schema::{MEASUREMENT_COLUMN, TIMESTAMP_COLUMN, TIMESTAMP_FORMAT};
use crate::store::{Table, Value};

/// Time-ordered (timestamp, measurement) pairs extracted from a query
/// result.
///
/// Construction is all-or-nothing: a missing timestamp column or a
/// single unparseable timestamp abandons the whole series rather than
/// dropping the offending row. Rows whose measurement is null or
/// non-finite are left out of the series (a gap in the plot), but a
/// non-numeric measurement is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub points: Vec<(NaiveTime, f64)>,
}

impl Series {
    pub fn from_table(table: &Table) -> Result<Series, TraceError> {
        let ts_idx = table.column_index(TIMESTAMP_COLUMN).ok_or_else(|| {
            TraceError::TimestampParseError(format!("column {TIMESTAMP_COLUMN:?} not present"))
        })?;
        let value_idx = table.column_index(MEASUREMENT_COLUMN).ok_or_else(|| {
            TraceError::ChartError(format!("column {MEASUREMENT_COLUMN:?} not present"))
        })?;

        let mut points = Vec::with_capacity(table.num_rows());
        for row in &table.rows {
            let timestamp = parse_timestamp(&row[ts_idx])?;
            match &row[value_idx] {
                Value::Null => continue,
                value => {
                    let measurement = value.as_f64().ok_or_else(|| {
                        TraceError::ChartError(format!(
                            "non-numeric {MEASUREMENT_COLUMN} value {value}"
                        ))
                    })?;
                    if measurement.is_finite() {
                        points.push((timestamp, measurement));
                    }
                }
            }
        }

        points.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Series { points })
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn parse_timestamp(value: &Value) -> Result<NaiveTime, TraceError> {
    let text = value.as_str().ok_or_else(|| {
        TraceError::TimestampParseError(format!("timestamp value {value} is not text"))
    })?;
    // chrono will not build a NaiveTime without an hour field, and the
    // exported values carry none, so match with a zero hour in front.
    NaiveTime::parse_from_str(&format!("00:{text}"), TIMESTAMP_FORMAT)
        .map_err(|e| TraceError::TimestampParseError(format!("value {text:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn table(rows: Vec<Vec<Value>>) -> Table {
        let mut t = Table::new(vec![
            "Engine no".to_string(),
            "Reception date/time".to_string(),
            "Torque".to_string(),
        ]);
        t.rows = rows;
        t
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_fractional_seconds_order() {
        let t = table(vec![
            vec![text("E1"), text("03:46.000000"), Value::Real(2.0)],
            vec![text("E1"), text("03:45.120000"), Value::Real(1.0)],
        ]);
        let series = Series::from_table(&t).unwrap();
        // unordered input comes out ascending by parsed time
        assert_eq!(series.points[0].1, 1.0);
        assert_eq!(series.points[1].1, 2.0);
        assert!(series.points[0].0 < series.points[1].0);
        assert_eq!(series.points[0].0.minute(), 3);
        assert_eq!(series.points[0].0.second(), 45);
        assert_eq!(series.points[0].0.nanosecond(), 120_000_000);
    }

    #[test]
    fn test_timestamp_without_fraction_parses() {
        let t = table(vec![vec![text("E1"), text("03:45"), Value::Real(1.0)]]);
        let series = Series::from_table(&t).unwrap();
        assert_eq!(series.points[0].0.minute(), 3);
        assert_eq!(series.points[0].0.second(), 45);
    }

    #[test]
    fn test_malformed_timestamp_fails_whole_series() {
        let t = table(vec![
            vec![text("E1"), text("03:45.000"), Value::Real(1.0)],
            vec![text("E1"), text("not a time"), Value::Real(2.0)],
        ]);
        let err = Series::from_table(&t).unwrap_err();
        assert!(matches!(err, TraceError::TimestampParseError(_)));
    }

    #[test]
    fn test_missing_timestamp_column_fails() {
        let mut t = Table::new(vec!["Engine no".to_string(), "Torque".to_string()]);
        t.rows.push(vec![text("E1"), Value::Real(1.0)]);
        let err = Series::from_table(&t).unwrap_err();
        assert!(matches!(err, TraceError::TimestampParseError(_)));
    }

    #[test]
    fn test_missing_measurement_column_fails() {
        let mut t = Table::new(vec![
            "Engine no".to_string(),
            "Reception date/time".to_string(),
        ]);
        t.rows.push(vec![text("E1"), text("01:00.000")]);
        let err = Series::from_table(&t).unwrap_err();
        assert!(matches!(err, TraceError::ChartError(_)));
    }

    #[test]
    fn test_null_measurement_is_a_gap() {
        let t = table(vec![
            vec![text("E1"), text("01:00.000"), Value::Real(1.0)],
            vec![text("E1"), text("01:01.000"), Value::Null],
            vec![text("E1"), text("01:02.000"), Value::Integer(3)],
        ]);
        let series = Series::from_table(&t).unwrap();
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[1].1, 3.0);
    }

    #[test]
    fn test_text_measurement_is_an_error() {
        let t = table(vec![vec![text("E1"), text("01:00.000"), text("abc")]]);
        let err = Series::from_table(&t).unwrap_err();
        assert!(matches!(err, TraceError::ChartError(_)));
    }

    #[test]
    fn test_empty_result_gives_empty_series() {
        let t = table(vec![]);
        let series = Series::from_table(&t).unwrap();
        assert!(series.is_empty());
    }
}
