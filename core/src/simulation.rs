//! The daily simulation loop — the forward pass for one asset.
//!
//! EXECUTION ORDER within a day (fixed, never reordered):
//!   1. Resolve the month's seasonal profile and the driver profile.
//!   2. Draw today's operating hours.
//!   3. Zero the hours if any component is down (see note below).
//!   4. Accumulate cumulative operating hours.
//!   5. Generate telemetry from PRE-update wear.
//!   6. Run the wear/failure evaluation, component by component.
//!   7. Emit the day's record.
//!
//! Days are strictly sequential — each depends on the prior day's wear
//! and cumulative hours. Across assets there is no shared state at
//! all; the per-asset RNG derivation makes runs order-independent.

use crate::{
    config::SimConfig,
    error::SimResult,
    loader::TractorRecord,
    record::{DailyRecord, FailureEvent},
    rng::AssetRng,
    telemetry::TelemetryGenerator,
    types::{round2, ExperienceLevel, Provider},
    wear::WearFleet,
};
use chrono::{Datelike, Duration, NaiveDate};

/// The simulated calendar window. Defaults to three years of daily
/// records starting 2022-01-01.
#[derive(Debug, Clone)]
pub struct Horizon {
    pub start_date: NaiveDate,
    pub days:       u32,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid start date"),
            days:       365 * 3,
        }
    }
}

/// Output of one asset's forward pass. `failures` is the event view of
/// the same information carried by the records' failure flags; the
/// labeler works from the records, and tests hold both views to agree.
pub struct ForwardPass {
    pub records:  Vec<DailyRecord>,
    pub failures: Vec<FailureEvent>,
}

/// Simulate one asset across the full horizon.
///
/// Spec fields absent from the input are filled by a uniform draw over
/// the configured categories, from the asset's own stream — so the
/// fill-in is as reproducible as everything else.
pub fn simulate_asset(
    config: &SimConfig,
    asset: &TractorRecord,
    horizon: &Horizon,
) -> SimResult<ForwardPass> {
    let mut rng = AssetRng::for_asset(&asset.tractor_id);

    let specs = asset.tractor_specifications.clone().unwrap_or_default();
    let driver_experience = specs
        .driver_experience
        .unwrap_or_else(|| *rng.pick(&ExperienceLevel::ALL));
    let maintenance_provider = specs
        .maintenance_provider
        .unwrap_or_else(|| *rng.pick(&Provider::ALL));
    let initial_hours = specs.hours_at_purchase.unwrap_or(0.0);

    let mut wear = WearFleet::new(config, maintenance_provider, initial_hours)?;
    let generator = TelemetryGenerator::new(config);
    let driver_profile = config.drivers.get(driver_experience).clone();

    let mut cumulative_hours = initial_hours;
    let mut records: Vec<DailyRecord> = Vec::with_capacity(horizon.days as usize);
    let mut failures: Vec<FailureEvent> = Vec::new();

    for day_offset in 0..horizon.days {
        let date = horizon.start_date + Duration::days(day_offset as i64);
        let season = config.seasonal_for_month(date.month());

        let avg = season.avg_daily_hours;
        let mut hours_today = rng
            .gauss(avg, avg * driver_profile.hours_std_dev_fraction)
            .max(0.0);

        // Asset down for repair. Unreachable under same-day repair
        // semantics (the failed flag never survives into the next
        // day), but the check is part of the observable contract.
        if wear.any_failed() {
            hours_today = 0.0;
        }

        cumulative_hours += hours_today;

        // Telemetry reads the wear fleet before today's wear update.
        let telemetry =
            generator.generate_day(season, &driver_profile, &wear, hours_today, &mut rng);

        let mut record = DailyRecord {
            asset_id: asset.tractor_id.clone(),
            date,
            operating_hours_today: round2(hours_today),
            cumulative_operating_hours: round2(cumulative_hours),
            seasonal_use_factor: avg,
            driver_experience,
            maintenance_provider,
            is_failure: 0,
            failed_component: None,
            failure_type: None,
            error_code: None,
            time_until_next_failure_hours: None,
            telemetry,
        };

        // At most one failure survives in the day's fields: later
        // components overwrite earlier ones. The event list keeps all.
        for failure in wear.evaluate_day(config, hours_today, &mut rng) {
            record.is_failure = 1;
            record.failed_component = Some(failure.component);
            record.failure_type = Some(format!(
                "{} Failure (Simulated)",
                failure.component.display_name()
            ));
            record.error_code = failure.error_code;

            failures.push(FailureEvent {
                date,
                cumulative_hours,
                component: failure.component,
            });
        }

        records.push(record);
    }

    log::debug!(
        "asset {}: {} days simulated, {} failure events",
        asset.tractor_id,
        records.len(),
        failures.len()
    );

    Ok(ForwardPass { records, failures })
}
