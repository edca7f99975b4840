//! Reverse-pass labeling contracts, on both hand-built sequences and
//! real simulation output.

use chrono::NaiveDate;
use fleetsim_core::{
    labeler::label_time_to_failure,
    loader::{TractorRecord, TractorSpecifications},
    record::{DailyRecord, NO_UPCOMING_FAILURE},
    types::{ComponentId, ExperienceLevel, Provider},
    Horizon, SimConfig, SimError, SimulationDriver,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn day(offset: u32, cumulative: f64, is_failure: u8) -> DailyRecord {
    DailyRecord {
        asset_id: "label-test".into(),
        date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + chrono::Duration::days(offset as i64),
        operating_hours_today: 8.0,
        cumulative_operating_hours: cumulative,
        seasonal_use_factor: 8.0,
        driver_experience: ExperienceLevel::Experienced,
        maintenance_provider: Provider::Dealer,
        is_failure,
        failed_component: (is_failure == 1).then_some(ComponentId::EngineSystem),
        failure_type: None,
        error_code: None,
        time_until_next_failure_hours: None,
        telemetry: Vec::new(),
    }
}

fn labels(records: &[DailyRecord]) -> Vec<f64> {
    records
        .iter()
        .map(|r| r.time_until_next_failure_hours.expect("labeled"))
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn failure_days_are_labeled_zero() {
    let mut records = vec![
        day(0, 10.0, 0),
        day(1, 20.0, 1),
        day(2, 30.0, 0),
        day(3, 40.0, 1),
    ];
    label_time_to_failure(&mut records).unwrap();

    assert_eq!(labels(&records), vec![10.0, 0.0, 10.0, 0.0]);
}

#[test]
fn labels_measure_exact_hour_gap_to_next_failure() {
    let mut records = vec![
        day(0, 5.25, 0),
        day(1, 12.5, 0),
        day(2, 18.75, 0),
        day(3, 30.0, 1),
        day(4, 35.0, 0),
    ];
    label_time_to_failure(&mut records).unwrap();

    assert_eq!(
        labels(&records),
        vec![24.75, 17.5, 11.25, 0.0, NO_UPCOMING_FAILURE]
    );
}

#[test]
fn tail_after_last_failure_is_sentinel() {
    let mut records = vec![day(0, 10.0, 1), day(1, 20.0, 0), day(2, 30.0, 0)];
    label_time_to_failure(&mut records).unwrap();

    assert_eq!(labels(&records), vec![0.0, NO_UPCOMING_FAILURE, NO_UPCOMING_FAILURE]);
}

#[test]
fn horizon_without_failures_is_all_sentinel() {
    let mut records: Vec<_> = (0..10).map(|i| day(i, (i as f64 + 1.0) * 8.0, 0)).collect();
    label_time_to_failure(&mut records).unwrap();

    assert!(labels(&records).iter().all(|&l| l == NO_UPCOMING_FAILURE));
}

/// An idle stretch (no hours accumulated) right before a failure still
/// labels non-negatively; the floor catches any rounding wobble.
#[test]
fn labels_are_never_negative_before_a_failure() {
    let mut records = vec![day(0, 100.0, 0), day(1, 100.0, 0), day(2, 100.0, 1)];
    label_time_to_failure(&mut records).unwrap();

    assert_eq!(labels(&records), vec![0.0, 0.0, 0.0]);
}

#[test]
fn already_labeled_input_is_a_contract_violation() {
    let mut records = vec![day(0, 10.0, 0), day(1, 20.0, 0)];
    records[1].time_until_next_failure_hours = Some(5.0);

    let err = label_time_to_failure(&mut records).unwrap_err();
    assert!(
        matches!(err, SimError::LabelerContract { .. }),
        "expected LabelerContract, got: {err}"
    );
}

/// On real engine output: label is 0 exactly on failure days, -1
/// exactly on the tail, and non-increasing as each failure approaches.
#[test]
fn labels_hold_on_simulated_output() {
    let mut config = SimConfig::default();
    config.hazard.scaling_factor = 0.005;
    config.validate().unwrap();

    let driver =
        SimulationDriver::new(config, Horizon { days: 730, ..Horizon::default() }).unwrap();
    let asset = TractorRecord {
        tractor_id: "labeled-sim".into(),
        tractor_specifications: Some(TractorSpecifications {
            hours_at_purchase: Some(6_500.0),
            ..Default::default()
        }),
        monthly_telemetry_records: Vec::new(),
    };
    let run = driver.run_asset(&asset).unwrap();

    let last_failure = run
        .records
        .iter()
        .rposition(|r| r.is_failure == 1)
        .expect("worn asset should fail within two years");

    for (i, record) in run.records.iter().enumerate() {
        let label = record.time_until_next_failure_hours.expect("all days labeled");
        if record.is_failure == 1 {
            assert_eq!(label, 0.0, "failure day {} not labeled 0", record.date);
        } else if i > last_failure {
            assert_eq!(label, NO_UPCOMING_FAILURE, "tail day {} not sentinel", record.date);
        } else {
            assert!(label >= 0.0, "negative label {label} on {}", record.date);
        }
    }

    // Non-increasing between consecutive non-failure days that share
    // the same upcoming failure.
    for window in run.records[..=last_failure].windows(2) {
        if window[0].is_failure == 0 && window[1].is_failure == 0 {
            let a = window[0].time_until_next_failure_hours.unwrap();
            let b = window[1].time_until_next_failure_hours.unwrap();
            assert!(
                b <= a,
                "label increased toward a failure: {a} -> {b} at {}",
                window[1].date
            );
        }
    }
}
