use crate::error::DataSourceError;
use chrono::NaiveDate;
use core_types::{Observation, TimeSeries};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DATE_COLUMNS: &[&str] = &["date", "Date", "DATE", "TransDate", "timestamp", "Timestamp"];
const VALUE_COLUMNS: &[&str] = &[
    "value", "Value", "price", "Price", "Avg_Price", "close", "Close", "Adj Close",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Reads a two-column `date,value` CSV file into a cleaned series.
///
/// - Rows whose date cannot be parsed are skipped.
/// - Non-numeric or non-finite values become absent.
/// - Repeated dates collapse to the mean of their recorded values.
/// - The result is sorted ascending by date.
pub fn read_series(path: &Path, name: &str) -> Result<TimeSeries, DataSourceError> {
    let file = File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_series(file, path, name)
}

pub(crate) fn parse_series<R: Read>(
    reader: R,
    path: &Path,
    name: &str,
) -> Result<TimeSeries, DataSourceError> {
    let csv_err = |source| DataSourceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let date_idx = find_column(&headers, DATE_COLUMNS).ok_or_else(|| {
        DataSourceError::MissingColumn {
            path: path.to_path_buf(),
            column: "date",
        }
    })?;
    let value_idx = find_column(&headers, VALUE_COLUMNS).ok_or_else(|| {
        DataSourceError::MissingColumn {
            path: path.to_path_buf(),
            column: "value",
        }
    })?;

    // date -> (sum of recorded values, number recorded)
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let Some(date) = record.get(date_idx).and_then(parse_date) else {
            skipped += 1;
            continue;
        };
        let entry = by_date.entry(date).or_insert((0.0, 0));
        if let Some(value) = record.get(value_idx).and_then(parse_value) {
            entry.0 += value;
            entry.1 += 1;
        }
    }

    if skipped > 0 {
        tracing::warn!(
            series = %name,
            path = %path.display(),
            skipped,
            "Skipped rows with unparsable dates"
        );
    }

    let observations = by_date
        .into_iter()
        .map(|(date, (sum, count))| {
            let value = (count > 0).then(|| sum / count as f64);
            Observation::new(date, value)
        })
        .collect();

    Ok(TimeSeries::new(name, observations)?)
}

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| candidates.contains(&h.trim_start_matches('\u{feff}')))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<TimeSeries, DataSourceError> {
        parse_series(csv.as_bytes(), Path::new("inline.csv"), "inline")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn sorts_and_parses_basic_rows() {
        let series = parse("date,value\n2024-02-03,3.5\n2024-02-01,1.0\n").unwrap();
        assert_eq!(
            series.observations(),
            &[
                Observation::new(day(1), Some(1.0)),
                Observation::new(day(3), Some(3.5)),
            ]
        );
    }

    #[test]
    fn non_numeric_values_become_absent() {
        let series = parse("Date,Price\n2024-02-01,-\n2024-02-02,NaN\n2024-02-03,4\n").unwrap();
        let values: Vec<Option<f64>> = series.observations().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![None, None, Some(4.0)]);
    }

    #[test]
    fn duplicate_dates_are_averaged() {
        let series =
            parse("TransDate,Avg_Price\n2024-02-01,10\n2024-02-01,20\n2024-02-01,n/a\n").unwrap();
        assert_eq!(series.observations(), &[Observation::new(day(1), Some(15.0))]);
    }

    #[test]
    fn unparsable_dates_are_skipped() {
        let series = parse("date,value\n113.02.01,1\n2024/02/02,2\n,3\n").unwrap();
        assert_eq!(series.observations(), &[Observation::new(day(2), Some(2.0))]);
    }

    #[test]
    fn missing_value_column_is_reported() {
        let err = parse("date,volume\n2024-02-01,1\n").unwrap_err();
        assert!(matches!(err, DataSourceError::MissingColumn { column: "value", .. }));
    }

    #[test]
    fn short_rows_count_as_absent_values() {
        let series = parse("date,value\n2024-02-01\n2024-02-02,2\n").unwrap();
        assert_eq!(series.observations()[0].value, None);
        assert_eq!(series.recorded(), 1);
    }
}
