use analytics::{
    AnalyticsError, LagScanner, ScanEngine, SeriesAligner, TargetOutcome, DEFAULT_MIN_ROWS,
};
use approx::assert_relative_eq;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use core_types::{LagSpec, Observation, TimeSeries};
use rust_decimal::Decimal;

fn start() -> NaiveDate {
    // a Monday
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn daily(name: &str, values: &[f64]) -> TimeSeries {
    TimeSeries::from_values(
        name,
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start() + Duration::days(i as i64), v)),
    )
    .unwrap()
}

fn wiggle(i: usize) -> f64 {
    (i as f64 * 0.7).sin() * 10.0 + ((i * i) % 7) as f64
}

#[test]
fn weekday_reference_tracks_calendar_day_target() {
    let target = daily("cabbage", &(0..40).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
    let reference = TimeSeries::from_values(
        "Gold",
        (0..40)
            .map(|i| (start() + Duration::days(i), 10.0 + i as f64))
            .filter(|(d, _)| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)),
    )
    .unwrap();

    let outcome = ScanEngine::default().run(&target, &[reference]).unwrap();

    let TargetOutcome::Report(report) = outcome else {
        panic!("expected a report, got {outcome:?}");
    };
    assert_eq!(report.target, "cabbage");
    assert_eq!(report.len(), 1);
    let top = report.top().unwrap();
    assert_eq!(top.reference, "Gold");
    assert_eq!(top.best_offset, 0);
    assert_eq!(top.timing, "Synchronized");
    assert_relative_eq!(top.best_raw(), 1.0, epsilon = 0.01);
    assert_eq!(top.lags.len(), 3);
    assert!(top.lags.iter().all(|lag| lag.correlation.is_some()));
}

#[test]
fn reference_leading_by_a_week_is_found_at_lag_five() {
    let base: Vec<f64> = (0..65).map(wiggle).collect();
    // reference[i] == target[i + 5]: the reference moves five rows ahead
    let target = daily("banana", &base[..60]);
    let reference = daily("Oil (Cost)", &base[5..]);

    let table = SeriesAligner::default().align(&target, &[reference]).unwrap();
    let report = LagScanner::default().scan(&table);

    let top = report.top().unwrap();
    assert_eq!(top.best_offset, 5);
    assert_eq!(top.timing, "Leading (1 Week)");
    assert_eq!(top.best_correlation, Decimal::ONE);
    assert_relative_eq!(top.best_raw(), 1.0, epsilon = 1e-12);
    assert!(top.correlation_at(0).unwrap().abs() < Decimal::ONE);
}

#[test]
fn equal_strength_lags_resolve_to_the_first_listed() {
    let values: Vec<f64> = (0..40).map(f64::from).collect();
    let target = daily("garlic", &values);
    let reference = daily(
        "Commodity Index",
        &values.iter().map(|v| v + 3.0).collect::<Vec<_>>(),
    );
    let table = SeriesAligner::default().align(&target, &[reference]).unwrap();

    // every lag of a linear pair is a perfect 1.0
    let default_order = LagScanner::default().scan(&table);
    assert_eq!(default_order.top().unwrap().best_offset, 0);

    let reordered = LagScanner::new(vec![
        LagSpec::with_default_label(20),
        LagSpec::with_default_label(0),
        LagSpec::with_default_label(5),
    ])
    .unwrap()
    .scan(&table);
    let top = reordered.top().unwrap();
    assert_eq!(top.best_offset, 20);
    assert_eq!(top.timing, "Leading (1 Month)");
}

#[test]
fn ten_rows_are_skipped_as_insufficient() {
    let target = daily("ginger", &(0..10).map(f64::from).collect::<Vec<_>>());
    let reference = daily("Gold", &(0..10).map(f64::from).collect::<Vec<_>>());

    let outcome = ScanEngine::default().run(&target, &[reference]).unwrap();

    assert_eq!(
        outcome,
        TargetOutcome::Skipped {
            rows: 10,
            required: DEFAULT_MIN_ROWS,
        }
    );
}

#[test]
fn no_references_gives_an_empty_report_not_an_error() {
    let target = daily("onion", &(0..45).map(f64::from).collect::<Vec<_>>());

    let table = SeriesAligner::default().align(&target, &[]).unwrap();
    assert!(table.reference_names().is_empty());
    assert_eq!(table.len(), 45);
    assert!(LagScanner::default().scan(&table).is_empty());

    let outcome = ScanEngine::default().run(&target, &[]).unwrap();
    assert_eq!(outcome, TargetOutcome::NoSignal);
}

#[test]
fn flat_reference_is_dropped_but_others_are_kept() {
    let values: Vec<f64> = (0..50).map(wiggle).collect();
    let target = daily("leek", &values);
    let flat = daily("Pegged", &[7.0; 50]);
    let moving = daily("Gold", &values.iter().map(|v| v * 2.0).collect::<Vec<_>>());

    let outcome = ScanEngine::default().run(&target, &[flat, moving]).unwrap();

    let TargetOutcome::Report(report) = outcome else {
        panic!("expected a report");
    };
    let names: Vec<&str> = report.rows.iter().map(|r| r.reference.as_str()).collect();
    assert_eq!(names, vec!["Gold"]);
}

#[test]
fn flat_reference_at_an_inexact_price_is_dropped() {
    let values: Vec<f64> = (0..50).map(wiggle).collect();
    let target = daily("leek", &values);

    for level in [0.1, 19.99] {
        let flat = daily("Pegged", &[level; 50]);
        let outcome = ScanEngine::default().run(&target, &[flat]).unwrap();
        assert_eq!(outcome, TargetOutcome::NoSignal, "flat at {level}");
    }
}

#[test]
fn nan_reference_reading_is_filled_over_like_a_gap() {
    let values: Vec<f64> = (0..50).map(wiggle).collect();
    let target = daily("leek", &values);
    let reference = TimeSeries::new(
        "Gold",
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let value = if i == 45 { f64::NAN } else { v + 3.0 };
                Observation::new(start() + Duration::days(i as i64), Some(value))
            })
            .collect(),
    )
    .unwrap();

    let table = SeriesAligner::default().align(&target, &[reference.clone()]).unwrap();
    assert_eq!(table.len(), 50);
    let column = table.column(0).unwrap();
    assert!(column.iter().all(|v| v.is_finite()));
    assert_eq!(column[45], values[44] + 3.0);

    let outcome = ScanEngine::default().run(&target, &[reference]).unwrap();
    let TargetOutcome::Report(report) = outcome else {
        panic!("expected a report");
    };
    let top = report.top().unwrap();
    assert_eq!(top.best_offset, 0);
    assert!(top.best_raw() > 0.99);
}

#[test]
fn lag_beyond_table_length_is_reported_as_no_value() {
    let values: Vec<f64> = (0..30).map(wiggle).collect();
    let target = daily("taro", &values);
    let reference = daily("Gas (Fertilizer)", &values);
    let scanner = LagScanner::new(vec![
        LagSpec::with_default_label(0),
        LagSpec::with_default_label(29),
        LagSpec::with_default_label(40),
    ])
    .unwrap();

    let table = SeriesAligner::default().align(&target, &[reference]).unwrap();
    let top = scanner.scan(&table).top().cloned().unwrap();

    assert_eq!(top.best_offset, 0);
    assert_eq!(top.correlation_at(29), None);
    assert_eq!(top.correlation_at(40), None);
    assert_eq!(top.lags.len(), 3);
}

#[test]
fn gappy_target_values_are_removed_before_counting_rows() {
    let observations: Vec<Observation> = (0..40)
        .map(|i| {
            let value = (i % 4 != 0).then_some(i as f64);
            Observation::new(start() + Duration::days(i), value)
        })
        .collect();
    let target = TimeSeries::new("spinach", observations).unwrap();

    let table = SeriesAligner::default().align(&target, &[]).unwrap();
    assert_eq!(table.len(), 30);

    let err = SeriesAligner::new(31).align(&target, &[]).unwrap_err();
    assert_eq!(
        err,
        AnalyticsError::InsufficientData {
            target: "spinach".to_string(),
            rows: 30,
            required: 31,
        }
    );
}
