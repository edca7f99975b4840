//! Asset input loading and aggregation.
//!
//! One asset's history may be spread across many JSON files in one
//! folder (one per exported month). Files are merged by tractor_id and
//! each asset's records are sorted by timestamp.
//!
//! RULE: a malformed file or a record without an identifier is skipped
//! with a warning — one bad export must never abort the whole fleet.

use crate::{
    error::SimResult,
    types::{AssetId, ExperienceLevel, Provider},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Optional per-asset metadata. Anything absent is filled in by the
/// simulation from the asset's deterministic stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TractorSpecifications {
    #[serde(default)]
    pub model:                Option<String>,
    #[serde(default)]
    pub driver_experience:    Option<ExperienceLevel>,
    #[serde(default)]
    pub maintenance_provider: Option<Provider>,
    #[serde(default)]
    pub hours_at_purchase:    Option<f64>,
}

/// A prior telemetry export row. The simulation itself only needs the
/// asset's identity and specs; the history is carried through (sorted)
/// for collaborators that want it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTelemetryRecord {
    pub timestamp: String,
    #[serde(flatten)]
    pub readings:  serde_json::Map<String, serde_json::Value>,
}

/// One asset's consolidated input, merged across files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TractorRecord {
    pub tractor_id:                AssetId,
    pub tractor_specifications:    Option<TractorSpecifications>,
    pub monthly_telemetry_records: Vec<MonthlyTelemetryRecord>,
}

impl TractorRecord {
    /// A record with nothing but an identifier. Used by tests and by
    /// callers simulating assets that have no prior exports.
    pub fn bare(tractor_id: impl Into<AssetId>) -> Self {
        Self {
            tractor_id: tractor_id.into(),
            tractor_specifications: None,
            monthly_telemetry_records: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssetFile {
    #[serde(default)]
    tractor_id:                Option<String>,
    #[serde(default)]
    tractor_specifications:    Option<TractorSpecifications>,
    #[serde(default)]
    monthly_telemetry_records: Vec<MonthlyTelemetryRecord>,
}

/// Load every `*.json` file in `folder` and merge by tractor_id.
/// Returned assets are in identifier order; the simulation does not
/// care (runs are order-independent), but deterministic iteration
/// keeps logs and batch outputs stable.
pub fn load_asset_folder(folder: &str) -> SimResult<Vec<TractorRecord>> {
    let mut by_id: BTreeMap<AssetId, TractorRecord> = BTreeMap::new();

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Cannot read '{}': {e}. Skipping.", path.display());
                continue;
            }
        };

        let file: AssetFile = match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Could not decode JSON from '{}': {e}. Skipping.", path.display());
                continue;
            }
        };

        let Some(tractor_id) = file.tractor_id else {
            log::warn!("'{}' does not contain 'tractor_id'. Skipping.", path.display());
            continue;
        };

        let asset = by_id
            .entry(tractor_id.clone())
            .or_insert_with(|| TractorRecord::bare(tractor_id));
        if asset.tractor_specifications.is_none() {
            asset.tractor_specifications = file.tractor_specifications;
        }
        asset
            .monthly_telemetry_records
            .extend(file.monthly_telemetry_records);
    }

    let mut assets: Vec<TractorRecord> = by_id.into_values().collect();
    for asset in &mut assets {
        asset.monthly_telemetry_records.sort_by_key(|record| {
            NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).ok()
        });
    }
    Ok(assets)
}
