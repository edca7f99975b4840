//! Component wear tracking and the daily failure hazard.
//!
//! Each component is a two-state machine: Operational or Failed.
//! A failure is entered and exited within the same simulated day —
//! the repair is applied synchronously right after the failure is
//! recorded, with a partial wear reset scaled by the maintenance
//! provider's repair effectiveness. Imperfect repair means wear (and
//! therefore hazard) climbs back faster after each incident.

use crate::{
    config::{HazardTuning, SimConfig},
    error::{SimError, SimResult},
    rng::AssetRng,
    types::{ComponentId, Provider},
};

/// Wear ratio clamp applied before exponentiation: the floor keeps a
/// fresh component's ratio off zero, the ceiling bounds extreme-wear
/// blow-up past twice the effective lifespan.
const WEAR_RATIO_MIN: f64 = 0.001;
const WEAR_RATIO_MAX: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct ComponentState {
    pub hours_since_last_repair: f64,
    /// Nominal lifespan scaled by the provider's multiplier. Always
    /// positive — enforced at construction.
    pub effective_lifespan:      f64,
    /// Transient within a day; see module docs.
    pub is_failed:               bool,
}

impl ComponentState {
    /// Raw wear ratio, unclamped. Telemetry drift reads this directly;
    /// only the hazard exponent sees the clamped version.
    pub fn wear_ratio(&self) -> f64 {
        self.hours_since_last_repair / self.effective_lifespan
    }
}

/// Per-day hazard: a wear term rising with the clamped ratio to the
/// configured exponent, plus a wear-independent baseline. Both scale
/// with hours operated; zero hours means zero hazard.
fn hazard_probability(hazard: &HazardTuning, state: &ComponentState, hours_today: f64) -> f64 {
    let ratio = state.wear_ratio().clamp(WEAR_RATIO_MIN, WEAR_RATIO_MAX);
    let wear_prob = ratio.powf(hazard.exponent) * hazard.scaling_factor * hours_today;
    let p = (wear_prob + hazard.base_prob_per_hour * hours_today).min(1.0);
    // Out-of-range p is a programming error, never a data error.
    assert!((0.0..=1.0).contains(&p), "failure probability out of range: {p}");
    p
}

/// A failure observed during one day's hazard evaluation.
#[derive(Debug, Clone)]
pub struct ComponentFailure {
    pub component:  ComponentId,
    pub error_code: Option<String>,
}

/// All component wear state for a single asset's run.
///
/// Owned exclusively by that run; nothing is shared across assets.
pub struct WearFleet {
    components:           Vec<(ComponentId, ComponentState)>,
    repair_effectiveness: f64,
    hazard:               HazardTuning,
}

impl WearFleet {
    pub fn new(config: &SimConfig, provider: Provider, initial_hours: f64) -> SimResult<Self> {
        let profile = config.maintenance.get(provider);
        if profile.lifespan_multiplier <= 0.0 {
            return Err(SimError::Config {
                message: format!(
                    "lifespan_multiplier for {} must be positive, got {}",
                    provider.as_str(),
                    profile.lifespan_multiplier
                ),
            });
        }

        let components = ComponentId::ALL
            .iter()
            .map(|&component| {
                let state = ComponentState {
                    hours_since_last_repair: initial_hours,
                    effective_lifespan: config.base_lifespan(component)
                        * profile.lifespan_multiplier,
                    is_failed: false,
                };
                (component, state)
            })
            .collect();

        Ok(Self {
            components,
            repair_effectiveness: profile.repair_effectiveness,
            hazard: config.hazard.clone(),
        })
    }

    pub fn state(&self, component: ComponentId) -> &ComponentState {
        // Construction covers every ComponentId exactly once.
        &self.components
            .iter()
            .find(|(c, _)| *c == component)
            .expect("component missing from wear fleet")
            .1
    }

    pub fn any_failed(&self) -> bool {
        self.components.iter().any(|(_, s)| s.is_failed)
    }

    /// Advance every component by one day's operation and roll for
    /// failures, in the fixed ComponentId::ALL order.
    ///
    /// A component already failed this day is skipped (cannot fail
    /// twice in one day). On failure the repair is applied in the same
    /// step: wear is multiplied by (1 − repair_effectiveness) and the
    /// component returns to Operational before the next day begins.
    pub fn evaluate_day(
        &mut self,
        config: &SimConfig,
        hours_today: f64,
        rng: &mut AssetRng,
    ) -> Vec<ComponentFailure> {
        let mut failures = Vec::new();

        for (component, state) in &mut self.components {
            if state.is_failed {
                continue;
            }

            state.hours_since_last_repair += hours_today;
            let p = hazard_probability(&self.hazard, state, hours_today);

            if rng.chance(p) {
                state.is_failed = true;

                let codes = config.error_codes_for(*component);
                let error_code = if codes.is_empty() {
                    None
                } else {
                    Some(rng.pick(codes).clone())
                };
                failures.push(ComponentFailure { component: *component, error_code });

                // Repair immediately after logging. Partial reset:
                // imperfect repair leaves residual wear behind.
                state.hours_since_last_repair *= 1.0 - self.repair_effectiveness;
                state.is_failed = false;
            }
        }

        failures
    }

    /// Hazard for a single component without mutating state.
    /// Exposed for property tests over the probability bounds.
    pub fn probe_failure_probability(&self, component: ComponentId, hours_today: f64) -> f64 {
        hazard_probability(&self.hazard, self.state(component), hours_today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_lifespan_scales_with_provider() {
        let config = SimConfig::default();
        let dealer = WearFleet::new(&config, Provider::Dealer, 0.0).unwrap();
        let owner = WearFleet::new(&config, Provider::Owner, 0.0).unwrap();

        let base = config.base_lifespan(ComponentId::EngineSystem);
        assert_eq!(dealer.state(ComponentId::EngineSystem).effective_lifespan, base);
        assert_eq!(owner.state(ComponentId::EngineSystem).effective_lifespan, base * 0.9);
    }

    #[test]
    fn hazard_is_bounded_even_at_extreme_wear() {
        let config = SimConfig::default();
        let mut fleet = WearFleet::new(&config, Provider::Dealer, 1.0e9).unwrap();
        let p = fleet.probe_failure_probability(ComponentId::EngineSystem, 1.0e9);
        assert!((0.0..=1.0).contains(&p), "p={p} escaped [0,1]");

        // Evaluation at extreme wear must not panic either.
        let mut rng = AssetRng::for_asset("extreme-wear");
        fleet.evaluate_day(&config, 1.0e9, &mut rng);
    }

    #[test]
    fn repair_is_partial_for_imperfect_providers() {
        let mut config = SimConfig::default();
        // Force failure on the first roll so the repair path runs.
        config.hazard.scaling_factor = 1.0e6;
        let mut fleet = WearFleet::new(&config, Provider::Owner, 5_000.0).unwrap();
        let mut rng = AssetRng::for_asset("repair-check");

        let failures = fleet.evaluate_day(&config, 10.0, &mut rng);
        assert!(!failures.is_empty(), "forced hazard produced no failure");

        // Owner repair_effectiveness = 0.7 → 30% of wear survives.
        let engine = fleet.state(ComponentId::EngineSystem);
        assert!(
            engine.hours_since_last_repair > 0.0,
            "imperfect repair must not fully reset wear"
        );
        assert!(
            (engine.hours_since_last_repair - 5_010.0 * 0.3).abs() < 1e-9,
            "expected 30% residual wear, got {}",
            engine.hours_since_last_repair
        );
    }

    #[test]
    fn failed_state_never_survives_evaluation() {
        let mut config = SimConfig::default();
        config.hazard.scaling_factor = 1.0e6;
        let mut fleet = WearFleet::new(&config, Provider::Dealer, 5_000.0).unwrap();
        let mut rng = AssetRng::for_asset("transient-failure");

        fleet.evaluate_day(&config, 10.0, &mut rng);
        assert!(!fleet.any_failed(), "repair must clear the failed flag same-day");
    }
}
