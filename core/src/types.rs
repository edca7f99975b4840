//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};

/// A stable, unique identifier for one asset (tractor) in the fleet.
pub type AssetId = String;

/// Round to 2 decimal places. Every value that leaves the engine
/// (hours, cumulative hours, telemetry, labels) goes through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mechanical/electrical subsystems tracked by the wear model.
///
/// ORDER IS CONTRACT: components are evaluated for failure in the order
/// listed here, every day, for every asset. Reordering changes which
/// component "wins" the per-day failure fields and therefore changes
/// output byte-for-byte. Append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentId {
    EngineSystem,
    TransmissionDriveSystem,
    HydraulicSystem,
    FuelSystem,
    CoolingSystem,
    ElectricalSystem,
    AirSystem,
    ProcessingCleaningSystem,
    AugerUnloadingSystem,
    SensorVisionSystem,
    ChassisStructural,
    DefSystem,
}

impl ComponentId {
    pub const ALL: [ComponentId; 12] = [
        ComponentId::EngineSystem,
        ComponentId::TransmissionDriveSystem,
        ComponentId::HydraulicSystem,
        ComponentId::FuelSystem,
        ComponentId::CoolingSystem,
        ComponentId::ElectricalSystem,
        ComponentId::AirSystem,
        ComponentId::ProcessingCleaningSystem,
        ComponentId::AugerUnloadingSystem,
        ComponentId::SensorVisionSystem,
        ComponentId::ChassisStructural,
        ComponentId::DefSystem,
    ];

    /// Stable snake_case name, used in CSV output and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EngineSystem             => "engine_system",
            Self::TransmissionDriveSystem  => "transmission_drive_system",
            Self::HydraulicSystem          => "hydraulic_system",
            Self::FuelSystem               => "fuel_system",
            Self::CoolingSystem            => "cooling_system",
            Self::ElectricalSystem         => "electrical_system",
            Self::AirSystem                => "air_system",
            Self::ProcessingCleaningSystem => "processing_cleaning_system",
            Self::AugerUnloadingSystem     => "auger_unloading_system",
            Self::SensorVisionSystem       => "sensor_vision_system",
            Self::ChassisStructural        => "chassis_structural",
            Self::DefSystem                => "def_system",
        }
    }

    /// Title-case display name, used to build failure_type strings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EngineSystem             => "Engine System",
            Self::TransmissionDriveSystem  => "Transmission Drive System",
            Self::HydraulicSystem          => "Hydraulic System",
            Self::FuelSystem               => "Fuel System",
            Self::CoolingSystem            => "Cooling System",
            Self::ElectricalSystem         => "Electrical System",
            Self::AirSystem                => "Air System",
            Self::ProcessingCleaningSystem => "Processing Cleaning System",
            Self::AugerUnloadingSystem     => "Auger Unloading System",
            Self::SensorVisionSystem       => "Sensor Vision System",
            Self::ChassisStructural        => "Chassis Structural",
            Self::DefSystem                => "Def System",
        }
    }
}

/// Telemetry parameters emitted for every simulated day.
///
/// ORDER IS CONTRACT: parameters are generated and serialized in this
/// order so CSV columns line up across runs and assets. Append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamId {
    EngineCoolantTempC,
    EngineOilPressurePsi,
    HydraulicFluidTempC,
    HydraulicPressurePsi,
    VibrationLevelG,
    ElectricalVoltageV,
    FuelPressurePsi,
    DefLevelPercent,
    OilLevelPercent,
    EngineRpm,
    EngineLoadPercent,
    AmbientTempC,
}

impl ParamId {
    pub const ALL: [ParamId; 12] = [
        ParamId::EngineCoolantTempC,
        ParamId::EngineOilPressurePsi,
        ParamId::HydraulicFluidTempC,
        ParamId::HydraulicPressurePsi,
        ParamId::VibrationLevelG,
        ParamId::ElectricalVoltageV,
        ParamId::FuelPressurePsi,
        ParamId::DefLevelPercent,
        ParamId::OilLevelPercent,
        ParamId::EngineRpm,
        ParamId::EngineLoadPercent,
        ParamId::AmbientTempC,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EngineCoolantTempC   => "engine_coolant_temp_c",
            Self::EngineOilPressurePsi => "engine_oil_pressure_psi",
            Self::HydraulicFluidTempC  => "hydraulic_fluid_temp_c",
            Self::HydraulicPressurePsi => "hydraulic_pressure_psi",
            Self::VibrationLevelG      => "vibration_level_g",
            Self::ElectricalVoltageV   => "electrical_voltage_v",
            Self::FuelPressurePsi      => "fuel_pressure_psi",
            Self::DefLevelPercent      => "def_level_percent",
            Self::OilLevelPercent      => "oil_level_percent",
            Self::EngineRpm            => "engine_rpm",
            Self::EngineLoadPercent    => "engine_load_percent",
            Self::AmbientTempC         => "ambient_temp_c",
        }
    }
}

/// Operator experience bucket. Drives day-to-day hour variance and the
/// stress adjustment applied to sensitive telemetry parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Novice,
    Experienced,
    Expert,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Novice,
        ExperienceLevel::Experienced,
        ExperienceLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novice      => "Novice",
            Self::Experienced => "Experienced",
            Self::Expert      => "Expert",
        }
    }
}

/// Who services the asset. Drives repair quality and effective lifespan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Dealer,
    Independent,
    Owner,
}

impl Provider {
    pub const ALL: [Provider; 3] = [
        Provider::Dealer,
        Provider::Independent,
        Provider::Owner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dealer      => "Dealer",
            Self::Independent => "Independent",
            Self::Owner       => "Owner",
        }
    }
}
