use crate::{
    stage::ProcessStage,
    status::Status,
    water_quality::{Metric, WaterQuality},
};
use serde::{Deserialize, Serialize};

/// Percentage reduction of each tracked metric between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RemovalEfficiencies {
    pub bod: f64,
    pub tss: f64,
    pub cod: f64,
    pub ammonia: f64,
    pub turbidity: f64,
    pub coliform: f64,
}

impl RemovalEfficiencies {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Bod => self.bod,
            Metric::Tss => self.tss,
            Metric::Cod => self.cod,
            Metric::Ammonia => self.ammonia,
            Metric::Turbidity => self.turbidity,
            Metric::Coliform => self.coliform,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: ProcessStage,
    pub stage_name: String,
    pub hrt_ratio: f64,
    pub hrt_hours: f64,
    pub influent: WaterQuality,
    pub effluent: WaterQuality,
    pub removal_efficiencies: RemovalEfficiencies,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub raw_water: WaterQuality,
    pub stages: Vec<StageResult>,
    pub treated_water: WaterQuality,
    pub overall_removal: RemovalEfficiencies,
    pub overall_status: Status,
}

impl PipelineResult {
    pub fn stage(&self, stage: ProcessStage) -> Option<&StageResult> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}
