//! fleetsim-core — synthetic wear-and-failure telemetry for a fleet of
//! heavy-equipment assets.
//!
//! The engine manufactures labeled daily telemetry history: sensor
//! readings that drift as components age, failures drawn from a
//! wear-dependent hazard, and a backward-computed "hours until next
//! failure" label on every day. Two passes per asset:
//!
//!   forward:  day-by-day wear, hours, telemetry, failure draws
//!   backward: reverse scan filling the time-to-failure label
//!
//! RULE: output is a pure function of (asset identifier, config,
//! horizon). Every random draw comes from the asset's own stream, so
//! assets can be simulated in any order without changing anything.

pub mod config;
pub mod driver;
pub mod error;
pub mod labeler;
pub mod loader;
pub mod record;
pub mod rng;
pub mod simulation;
pub mod telemetry;
pub mod types;
pub mod wear;

pub use config::SimConfig;
pub use driver::{LabeledRun, RunSummary, SimulationDriver};
pub use error::{SimError, SimResult};
pub use record::{csv_header, DailyRecord, FailureEvent, NO_UPCOMING_FAILURE};
pub use simulation::Horizon;
