//! Run orchestration: one forward+reverse pass per asset, plus the
//! fleet summary handed to callers for reporting.

use crate::{
    config::SimConfig,
    error::SimResult,
    labeler::label_time_to_failure,
    loader::TractorRecord,
    record::DailyRecord,
    simulation::{simulate_asset, ForwardPass, Horizon},
    types::AssetId,
};

/// End-of-run statistics for one asset.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    pub asset_id:           AssetId,
    pub model:              String,
    pub total_records:      usize,
    /// Days flagged as failures. Can undercount raw failure events if
    /// two components fail on the same day.
    pub simulated_failures: usize,
}

/// One asset's finished, labeled output.
pub struct LabeledRun {
    pub records: Vec<DailyRecord>,
    pub summary: RunSummary,
}

pub struct SimulationDriver {
    config:  SimConfig,
    horizon: Horizon,
}

impl SimulationDriver {
    /// Validates the configuration up front — a bad lifespan multiplier
    /// is fatal here, not a per-day condition.
    pub fn new(config: SimConfig, horizon: Horizon) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, horizon })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Forward pass, then the reverse labeling pass, for one asset.
    pub fn run_asset(&self, asset: &TractorRecord) -> SimResult<LabeledRun> {
        let ForwardPass { mut records, failures } =
            simulate_asset(&self.config, asset, &self.horizon)?;

        label_time_to_failure(&mut records)?;

        let failure_days = records.iter().filter(|r| r.is_failure == 1).count();
        if failure_days != failures.len() {
            log::debug!(
                "asset {}: {} failure events collapsed into {} failure days",
                asset.tractor_id,
                failures.len(),
                failure_days
            );
        }

        let model = asset
            .tractor_specifications
            .as_ref()
            .and_then(|s| s.model.clone())
            .unwrap_or_else(|| "Unknown Model".to_string());

        let summary = RunSummary {
            asset_id: asset.tractor_id.clone(),
            model,
            total_records: records.len(),
            simulated_failures: failure_days,
        };

        Ok(LabeledRun { records, summary })
    }

    /// Run every asset in the slice. Runs share nothing, so order is
    /// irrelevant to any individual asset's output.
    pub fn run_fleet(&self, assets: &[TractorRecord]) -> SimResult<Vec<LabeledRun>> {
        assets.iter().map(|asset| self.run_asset(asset)).collect()
    }
}
