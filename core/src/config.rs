//! Static lookup tables for the wear-and-failure engine.
//!
//! RULE: configuration is loaded (or defaulted) once, validated, and
//! then passed around immutably. No module mutates it mid-run and no
//! module reads ambient/global configuration state.
//!
//! Unknown component or parameter names in a config file fail at load
//! time (serde rejects them against the typed enums) instead of
//! silently defaulting at simulation time.

use crate::{
    error::{SimError, SimResult},
    types::{ComponentId, ExperienceLevel, ParamId, Provider},
};
use serde::{Deserialize, Serialize};

/// Hazard-curve tuning constants.
///
/// scaling_factor shapes how strongly wear drives failure; exponent
/// shapes the curve (>1 accelerates toward end of life); the base rate
/// is a wear-independent chance of purely random failure per operated
/// hour. Tests zero these out to isolate the wear term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardTuning {
    pub scaling_factor:     f64,
    pub exponent:           f64,
    pub base_prob_per_hour: f64,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            scaling_factor:     0.000_005,
            exponent:           1.5,
            base_prob_per_hour: 0.000_000_05,
        }
    }
}

/// One telemetry channel: nominal range, daily noise, and the signed
/// drift applied as the linked component approaches end of life.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryParamSpec {
    pub param:         ParamId,
    pub normal_min:    f64,
    pub normal_max:    f64,
    pub daily_std_dev: f64,
    /// Fraction of the range width added at wear ratio 1.0.
    /// Negative for parameters that fall ahead of failure.
    pub drift_factor:  f64,
    /// Component whose wear this parameter foreshadows, if any.
    pub component:     Option<ComponentId>,
}

impl TelemetryParamSpec {
    pub fn range_width(&self) -> f64 {
        self.normal_max - self.normal_min
    }

    pub fn midpoint(&self) -> f64 {
        (self.normal_min + self.normal_max) / 2.0
    }

    /// Parameters pushed off-nominal by an aggressive operator.
    pub fn is_stress_sensitive(&self) -> bool {
        matches!(
            self.param,
            ParamId::EngineCoolantTempC
                | ParamId::EngineOilPressurePsi
                | ParamId::VibrationLevelG
                | ParamId::HydraulicFluidTempC
                | ParamId::HydraulicPressurePsi
        )
    }

    /// Fluids deplete with use and may legitimately sit below the
    /// nominal minimum; they are floored at zero, never re-clamped.
    pub fn is_depleting_fluid(&self) -> bool {
        matches!(self.param, ParamId::DefLevelPercent | ParamId::OilLevelPercent)
    }
}

/// Monthly operating profile: how many hours a day the asset typically
/// runs and how far ambient temperature sits from its annual midpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalProfile {
    pub avg_daily_hours: f64,
    pub temp_shift:      f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfile {
    /// Std-dev of daily hours as a fraction of the seasonal average.
    pub hours_std_dev_fraction: f64,
    /// 1.0 = neutral. >1 pushes stress-sensitive telemetry off-nominal.
    pub stress_factor:          f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceProfile {
    /// Fraction of accumulated wear removed by a repair, in [0, 1].
    pub repair_effectiveness: f64,
    /// Scales every component's nominal lifespan. Must be positive.
    pub lifespan_multiplier:  f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfiles {
    pub novice:      DriverProfile,
    pub experienced: DriverProfile,
    pub expert:      DriverProfile,
}

impl DriverProfiles {
    pub fn get(&self, level: ExperienceLevel) -> &DriverProfile {
        match level {
            ExperienceLevel::Novice      => &self.novice,
            ExperienceLevel::Experienced => &self.experienced,
            ExperienceLevel::Expert      => &self.expert,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceProfiles {
    pub dealer:      MaintenanceProfile,
    pub independent: MaintenanceProfile,
    pub owner:       MaintenanceProfile,
}

impl MaintenanceProfiles {
    pub fn get(&self, provider: Provider) -> &MaintenanceProfile {
        match provider {
            Provider::Dealer      => &self.dealer,
            Provider::Independent => &self.independent,
            Provider::Owner       => &self.owner,
        }
    }
}

/// The full, immutable configuration for one engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Nominal lifespan in operating hours, in evaluation order.
    pub lifespans:    Vec<(ComponentId, f64)>,
    /// Telemetry channel specs, in column order.
    pub telemetry:    Vec<TelemetryParamSpec>,
    /// Index 0 = January.
    pub seasonal:     [SeasonalProfile; 12],
    pub drivers:      DriverProfiles,
    pub maintenance:  MaintenanceProfiles,
    /// Diagnostic codes drawn when a component fails. Components
    /// without an entry emit no code.
    pub error_codes:  Vec<(ComponentId, Vec<String>)>,
    pub hazard:       HazardTuning,
    /// Fluid level lost per 8-hour block of operation.
    pub fluid_consumption_rate: f64,
}

impl SimConfig {
    /// Load from `<data_dir>/simulation/failure_model.json`.
    /// In tests, use SimConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/simulation/failure_model.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Non-positive lifespans or multipliers would corrupt the wear
    /// ratio (division by zero or negative wear), so they are rejected
    /// here as fatal rather than handled per day.
    pub fn validate(&self) -> SimResult<()> {
        for &(component, hours) in &self.lifespans {
            if hours <= 0.0 {
                return Err(SimError::Config {
                    message: format!(
                        "lifespan for {} must be positive, got {hours}",
                        component.as_str()
                    ),
                });
            }
        }
        for component in ComponentId::ALL {
            let count = self.lifespans.iter().filter(|(c, _)| *c == component).count();
            if count != 1 {
                return Err(SimError::Config {
                    message: format!(
                        "component {} must appear exactly once in lifespans, found {count}",
                        component.as_str()
                    ),
                });
            }
        }
        for spec in &self.telemetry {
            if spec.normal_min >= spec.normal_max {
                return Err(SimError::Config {
                    message: format!(
                        "normal range for {} is empty: [{}, {}]",
                        spec.param.as_str(),
                        spec.normal_min,
                        spec.normal_max
                    ),
                });
            }
            if spec.daily_std_dev < 0.0 {
                return Err(SimError::Config {
                    message: format!("negative std-dev for {}", spec.param.as_str()),
                });
            }
        }
        for provider in Provider::ALL {
            let profile = self.maintenance.get(provider);
            if profile.lifespan_multiplier <= 0.0 {
                return Err(SimError::Config {
                    message: format!(
                        "lifespan_multiplier for {} must be positive, got {}",
                        provider.as_str(),
                        profile.lifespan_multiplier
                    ),
                });
            }
            if !(0.0..=1.0).contains(&profile.repair_effectiveness) {
                return Err(SimError::Config {
                    message: format!(
                        "repair_effectiveness for {} must be in [0, 1], got {}",
                        provider.as_str(),
                        profile.repair_effectiveness
                    ),
                });
            }
        }
        if self.hazard.exponent <= 0.0
            || self.hazard.scaling_factor < 0.0
            || self.hazard.base_prob_per_hour < 0.0
        {
            return Err(SimError::Config {
                message: "hazard tuning must have positive exponent and non-negative rates"
                    .to_string(),
            });
        }
        if self.fluid_consumption_rate < 0.0 {
            return Err(SimError::Config {
                message: "fluid_consumption_rate must be non-negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn base_lifespan(&self, component: ComponentId) -> f64 {
        // validate() guarantees exactly one entry per component.
        self.lifespans
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, hours)| *hours)
            .unwrap_or_else(|| unreachable!("unvalidated config"))
    }

    pub fn error_codes_for(&self, component: ComponentId) -> &[String] {
        self.error_codes
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, codes)| codes.as_slice())
            .unwrap_or(&[])
    }

    /// `month` is 1-based (chrono convention).
    pub fn seasonal_for_month(&self, month: u32) -> &SeasonalProfile {
        &self.seasonal[(month - 1) as usize]
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        use ComponentId::*;
        use ParamId::*;

        let spec = |param, normal_min, normal_max, daily_std_dev, drift_factor, component| {
            TelemetryParamSpec {
                param,
                normal_min,
                normal_max,
                daily_std_dev,
                drift_factor,
                component,
            }
        };

        Self {
            lifespans: vec![
                (EngineSystem, 15_000.0),
                (TransmissionDriveSystem, 12_000.0),
                (HydraulicSystem, 10_000.0),
                (FuelSystem, 8_000.0),
                (CoolingSystem, 7_500.0),
                (ElectricalSystem, 7_000.0),
                (AirSystem, 10_000.0),
                (ProcessingCleaningSystem, 4_000.0),
                (AugerUnloadingSystem, 5_000.0),
                (SensorVisionSystem, 6_000.0),
                (ChassisStructural, 12_000.0),
                (DefSystem, 6_000.0),
            ],
            telemetry: vec![
                spec(EngineCoolantTempC, 85.0, 95.0, 2.0, 0.5, Some(CoolingSystem)),
                // Negative drift: oil pressure drops ahead of engine failure.
                spec(EngineOilPressurePsi, 40.0, 60.0, 3.0, -0.4, Some(EngineSystem)),
                spec(HydraulicFluidTempC, 70.0, 85.0, 2.0, 0.3, Some(HydraulicSystem)),
                spec(HydraulicPressurePsi, 2_000.0, 2_500.0, 50.0, -0.2, Some(HydraulicSystem)),
                spec(VibrationLevelG, 0.5, 1.5, 0.1, 0.8, Some(ProcessingCleaningSystem)),
                spec(ElectricalVoltageV, 12.5, 14.0, 0.2, -0.1, Some(ElectricalSystem)),
                spec(FuelPressurePsi, 50.0, 70.0, 2.0, -0.3, Some(FuelSystem)),
                spec(DefLevelPercent, 20.0, 100.0, 1.0, -0.5, Some(DefSystem)),
                spec(OilLevelPercent, 80.0, 100.0, 0.5, -0.2, Some(EngineSystem)),
                spec(EngineRpm, 1_500.0, 2_200.0, 100.0, 0.1, Some(EngineSystem)),
                spec(EngineLoadPercent, 40.0, 80.0, 10.0, 0.1, Some(EngineSystem)),
                // Weather, not a machine channel: no linked component.
                spec(AmbientTempC, 10.0, 30.0, 3.0, 0.0, None),
            ],
            seasonal: [
                SeasonalProfile { avg_daily_hours: 2.0,  temp_shift: -10.0 }, // Jan
                SeasonalProfile { avg_daily_hours: 3.0,  temp_shift: -8.0 },
                SeasonalProfile { avg_daily_hours: 5.0,  temp_shift: -3.0 },
                SeasonalProfile { avg_daily_hours: 8.0,  temp_shift: 2.0 },
                SeasonalProfile { avg_daily_hours: 10.0, temp_shift: 5.0 },
                SeasonalProfile { avg_daily_hours: 7.0,  temp_shift: 8.0 },
                SeasonalProfile { avg_daily_hours: 6.0,  temp_shift: 10.0 }, // Jul
                SeasonalProfile { avg_daily_hours: 9.0,  temp_shift: 7.0 },
                SeasonalProfile { avg_daily_hours: 12.0, temp_shift: 3.0 },  // Sep harvest
                SeasonalProfile { avg_daily_hours: 10.0, temp_shift: -2.0 },
                SeasonalProfile { avg_daily_hours: 4.0,  temp_shift: -5.0 },
                SeasonalProfile { avg_daily_hours: 2.0,  temp_shift: -10.0 }, // Dec
            ],
            drivers: DriverProfiles {
                novice:      DriverProfile { hours_std_dev_fraction: 0.3,  stress_factor: 1.2 },
                experienced: DriverProfile { hours_std_dev_fraction: 0.1,  stress_factor: 0.9 },
                expert:      DriverProfile { hours_std_dev_fraction: 0.05, stress_factor: 0.8 },
            },
            maintenance: MaintenanceProfiles {
                dealer:      MaintenanceProfile { repair_effectiveness: 1.0, lifespan_multiplier: 1.0 },
                independent: MaintenanceProfile { repair_effectiveness: 0.9, lifespan_multiplier: 0.95 },
                owner:       MaintenanceProfile { repair_effectiveness: 0.7, lifespan_multiplier: 0.9 },
            },
            error_codes: vec![
                (EngineSystem, vec!["P0100".into(), "P0200".into(), "P0300".into()]),
                (HydraulicSystem, vec!["H101".into(), "H102".into()]),
                (ElectricalSystem, vec!["E001".into(), "E002".into()]),
                (CoolingSystem, vec!["C001".into()]),
                (FuelSystem, vec!["F001".into()]),
                (TransmissionDriveSystem, vec!["T001".into()]),
                (ProcessingCleaningSystem, vec!["PC01".into()]),
                (AugerUnloadingSystem, vec!["AU01".into()]),
                (DefSystem, vec!["D001".into()]),
                (SensorVisionSystem, vec!["S001".into()]),
            ],
            hazard: HazardTuning::default(),
            fluid_consumption_rate: 0.05,
        }
    }
}
