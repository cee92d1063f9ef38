//! Sale event timestamps.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::schema::DATE_TIME_COLUMN;
use crate::table::{Table, Value};
use crate::validation::{TimePeriodFilter, apply_filter};

use super::DataCleaner;

/// Columns folded into `date_time`, in the order they are read.
const PARTS: [&str; 4] = ["year", "month", "day", "timestamp"];

fn integer_part(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn calendar_date(year: &Value, month: &Value, day: &Value) -> Option<NaiveDate> {
    let y = i32::try_from(integer_part(year)?).ok()?;
    let m = u32::try_from(integer_part(month)?).ok()?;
    let d = u32::try_from(integer_part(day)?).ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Build a timestamp from year, month, day and `HH:MM:SS` cells.
pub fn combine_date_time(year: &Value, month: &Value, day: &Value, time: &Value) -> Value {
    let date = calendar_date(year, month, day);
    let time = time
        .as_str()
        .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M:%S").ok());

    match (date, time) {
        (Some(d), Some(t)) => Value::DateTime(NaiveDateTime::new(d, t)),
        _ => Value::Null,
    }
}

impl DataCleaner {
    /// Clean the date details table. Only the four known time periods are
    /// kept. With `combine_date_time` set, the date and time parts are
    /// replaced by a single `date_time` column.
    pub fn clean_date_times(&self, table: Table) -> Result<Table> {
        let dataset = Dataset::DateTimes.name();
        let table = self.row_clean(Dataset::DateTimes, table, None);
        let table = apply_filter(table, dataset, &TimePeriodFilter::new("time_period"))?;

        if !self.config().combine_date_time {
            return Ok(table);
        }

        let mut indices = [0usize; 4];
        for (slot, column) in indices.iter_mut().zip(PARTS) {
            *slot = table.require_column(dataset, column)?;
        }
        let [year, month, day, time] = indices;

        Ok(table
            .with_column(DATE_TIME_COLUMN, |row| {
                combine_date_time(
                    &row.cells[year],
                    &row.cells[month],
                    &row.cells[day],
                    &row.cells[time],
                )
            })
            .drop_columns(&PARTS)
            .drop_nulls())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::CleanerConfig;

    fn date_times() -> Table {
        Table::from_rows(
            ["timestamp", "month", "year", "day", "time_period", "date_uuid"],
            vec![
                vec![
                    "22:00:06",
                    "9",
                    "2012",
                    "19",
                    "Evening",
                    "3b7ca996-37f9-433f-b6d0-ce8391b615ad",
                ],
                vec![
                    "22:44:06",
                    "2",
                    "1997",
                    "10",
                    "Late_Hours",
                    "adc86836-6c35-49ca-bb0d-65b6507a00fa",
                ],
                vec!["NULL", "NULL", "NULL", "NULL", "NULL", "NULL"],
                vec![
                    "10:00:00",
                    "2",
                    "1997",
                    "30",
                    "Morning",
                    "5ff791bf-d3b9-4b1d-8c8f-0e7a5b3c2e9d",
                ],
                vec!["1YMRDJNU2T"; 6],
            ]
            .into_iter()
            .map(|r| r.into_iter().map(Value::text).collect::<Vec<_>>()),
        )
    }

    #[test]
    fn test_unknown_time_periods_are_dropped() {
        let cleaned = DataCleaner::new().clean_date_times(date_times()).unwrap();
        assert_eq!(cleaned.row_count(), 3);
        assert_eq!(cleaned.key_name, None);
    }

    #[test]
    fn test_combined_date_time() {
        let cleaner = DataCleaner::with_config(CleanerConfig {
            combine_date_time: true,
            ..CleanerConfig::default()
        });
        let cleaned = cleaner.clean_date_times(date_times()).unwrap();

        // 30 February does not exist.
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.columns, vec!["time_period", "date_uuid", "date_time"]);
        assert_eq!(
            cleaned.get(0, "date_time").map(Value::to_string),
            Some("2012-09-19 22:00:06".to_string())
        );
    }

    #[test]
    fn test_combine_rejects_bad_parts() {
        let v = |s: &str| Value::text(s);
        assert_eq!(combine_date_time(&v("2012"), &v("13"), &v("1"), &v("10:00:00")), Value::Null);
        assert_eq!(combine_date_time(&v("2012"), &v("1"), &v("1"), &v("25:00:00")), Value::Null);
        assert_eq!(combine_date_time(&Value::Null, &v("1"), &v("1"), &v("10:00:00")), Value::Null);
    }
}
