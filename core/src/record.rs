//! Per-day output records and the stable CSV surface.
//!
//! A DailyRecord is immutable once appended to a run's sequence, with
//! one exception: the label field, which starts unset and is written
//! exactly once by the reverse-pass labeler.
//!
//! COLUMN ORDER IS CONTRACT: downstream pipelines concatenate CSVs
//! from many runs and assets, so the header layout below never changes
//! between runs. Telemetry columns follow the config's channel order.

use crate::{
    config::SimConfig,
    types::{round2, AssetId, ComponentId, ExperienceLevel, ParamId, Provider},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label value when no further failure is known for the rest of the
/// horizon (including every day after the last recorded failure).
pub const NO_UPCOMING_FAILURE: f64 = -1.0;

/// One failure observed during the forward pass. The labeler derives
/// its state from the DailyRecord sequence instead, but the two views
/// must agree — tests hold them to that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    pub date:             NaiveDate,
    pub cumulative_hours: f64,
    pub component:        ComponentId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub asset_id:                   AssetId,
    pub date:                       NaiveDate,
    pub operating_hours_today:      f64,
    pub cumulative_operating_hours: f64,
    /// The month's average daily hours, echoed for downstream features.
    pub seasonal_use_factor:        f64,
    pub driver_experience:          ExperienceLevel,
    pub maintenance_provider:       Provider,
    pub is_failure:                 u8,
    pub failed_component:           Option<ComponentId>,
    pub failure_type:               Option<String>,
    pub error_code:                 Option<String>,
    /// Unset until the reverse pass runs; then hours to the next
    /// failure, 0.0 on failure days, NO_UPCOMING_FAILURE otherwise.
    pub time_until_next_failure_hours: Option<f64>,
    /// In configured channel order, unrounded. Rounding happens at
    /// the serialization boundary.
    pub telemetry:                  Vec<(ParamId, f64)>,
}

/// Format a float the way the export expects: rounded to 2 places,
/// no trailing zero padding.
fn fmt_num(value: f64) -> String {
    format!("{}", round2(value))
}

/// Stable CSV header for a given configuration.
pub fn csv_header(config: &SimConfig) -> String {
    let mut columns: Vec<String> = [
        "tractor_id",
        "date",
        "operating_hours_today",
        "cumulative_operating_hours",
        "seasonal_use_factor",
        "driver_experience",
        "maintenance_provider",
        "is_failure",
        "failed_component",
        "failure_type",
        "error_code",
        "time_until_next_failure_hours",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for spec in &config.telemetry {
        columns.push(format!("telemetry_{}", spec.param.as_str()));
    }
    columns.join(",")
}

impl DailyRecord {
    /// One CSV line matching csv_header(). None fields serialize as
    /// empty cells.
    pub fn csv_row(&self) -> String {
        let mut cells: Vec<String> = vec![
            self.asset_id.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            fmt_num(self.operating_hours_today),
            fmt_num(self.cumulative_operating_hours),
            fmt_num(self.seasonal_use_factor),
            self.driver_experience.as_str().to_string(),
            self.maintenance_provider.as_str().to_string(),
            self.is_failure.to_string(),
            self.failed_component.map(|c| c.as_str().to_string()).unwrap_or_default(),
            self.failure_type.clone().unwrap_or_default(),
            self.error_code.clone().unwrap_or_default(),
            self.time_until_next_failure_hours.map(fmt_num).unwrap_or_default(),
        ];

        for &(_, value) in &self.telemetry {
            cells.push(fmt_num(value));
        }
        cells.join(",")
    }
}
