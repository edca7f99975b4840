//! Daily telemetry generation.
//!
//! One value per configured parameter per day, built in five steps:
//! seasonal base, Gaussian noise, driver stress, precursor drift from
//! the linked component's wear, then a clamp to the nominal range.
//! Depleting fluids get a sixth step — consumption applied after the
//! clamp, so a heavily used machine can sit below its nominal minimum.
//!
//! RULE: drift reads the wear fleet as it stands at generation time.
//! The simulation loop calls this before the day's wear update, so
//! telemetry always reflects pre-update wear.

use crate::{
    config::{DriverProfile, SeasonalProfile, SimConfig, TelemetryParamSpec},
    rng::AssetRng,
    types::ParamId,
    wear::WearFleet,
};

/// Drift starts once a linked component passes this wear ratio and
/// ramps linearly to the full drift factor at ratio 1.0.
const DRIFT_THRESHOLD: f64 = 0.7;
const DRIFT_RAMP: f64 = 0.3;

/// Fraction of the range width the stress adjustment spans per unit
/// of stress factor above/below neutral.
const STRESS_RANGE_FRACTION: f64 = 0.1;

/// Fluid consumption is configured per this many operating hours.
const FLUID_HOURS_BASIS: f64 = 8.0;

pub struct TelemetryGenerator<'a> {
    config: &'a SimConfig,
}

impl<'a> TelemetryGenerator<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Generate the full day's vector, in configured column order.
    pub fn generate_day(
        &self,
        season: &SeasonalProfile,
        driver: &DriverProfile,
        wear: &WearFleet,
        hours_today: f64,
        rng: &mut AssetRng,
    ) -> Vec<(ParamId, f64)> {
        self.config
            .telemetry
            .iter()
            .map(|spec| {
                let value = self.generate_param(spec, season, driver, wear, hours_today, rng);
                (spec.param, value)
            })
            .collect()
    }

    /// One parameter's reading for one day.
    pub fn generate_param(
        &self,
        spec: &TelemetryParamSpec,
        season: &SeasonalProfile,
        driver: &DriverProfile,
        wear: &WearFleet,
        hours_today: f64,
        rng: &mut AssetRng,
    ) -> f64 {
        // 1. Base: range midpoint; ambient temperature also carries
        //    the month's seasonal shift.
        let mut base = spec.midpoint();
        if spec.param == ParamId::AmbientTempC {
            base += season.temp_shift;
        }

        // 2. Daily Gaussian fluctuation.
        let mut value = rng.gauss(base, spec.daily_std_dev);

        // 3. Driver stress pushes sensitive channels off-nominal.
        if spec.is_stress_sensitive() {
            value += (driver.stress_factor - 1.0) * spec.range_width() * STRESS_RANGE_FRACTION;
        }

        // 4. Precursor drift from the linked component's wear.
        if let Some(component) = spec.component {
            let state = wear.state(component);
            if !state.is_failed {
                let ratio = state.wear_ratio();
                if ratio > DRIFT_THRESHOLD {
                    value +=
                        (ratio - DRIFT_THRESHOLD) / DRIFT_RAMP
                            * spec.range_width()
                            * spec.drift_factor;
                }
            }
        }

        // 5. Clamp to the nominal range.
        let mut value = value.clamp(spec.normal_min, spec.normal_max);

        // 6. Fluids deplete with use, after the clamp. This can take
        //    the level below normal_min; only zero is a hard floor.
        if spec.is_depleting_fluid() {
            value = (value
                - self.config.fluid_consumption_rate * (hours_today / FLUID_HOURS_BASIS))
                .max(0.0);
        }

        value
    }
}
