use super::{curve::round_to, stages};
use crate::{
    constants::{design_hrt_hours, DESIGN_HRT_RATIO, RAW_WATER},
    removal::removal_efficiencies,
    status::{assess_final_status, assess_stage_status},
};
use aquaview_schemas::{
    pipeline::{PipelineResult, StageResult},
    stage::{ProcessStage, StageParams},
    water_quality::WaterQuality,
};
use log::{debug, warn};
use std::collections::HashMap;

/// Runs the five treatment stages in canonical order for a fixed set of HRT ratios.
///
/// The engine holds nothing but the ratio lookup; `run` is a pure function of
/// it, so one engine can be run any number of times from any thread.
#[derive(Debug, Clone, Default)]
pub struct PipelineEngine {
    pub(super) ratios: HashMap<ProcessStage, f64>,
}

impl PipelineEngine {
    /// An engine with every stage at its design retention time.
    pub fn design() -> Self {
        Self::default()
    }

    /// Builds the ratio lookup from overrides. Order is irrelevant; when a
    /// stage appears more than once the last entry wins.
    pub fn from_params(params: &[StageParams]) -> Self {
        let mut ratios = HashMap::new();
        for p in params {
            if let Some(previous) = ratios.insert(p.stage, p.hrt_ratio) {
                warn!(
                    "Stage '{}' given more than once; ratio {} replaces {}",
                    p.stage, p.hrt_ratio, previous
                );
            }
        }
        Self { ratios }
    }

    /// Ratio applied to `stage`; stages without an override run at design.
    pub fn hrt_ratio(&self, stage: ProcessStage) -> f64 {
        self.ratios.get(&stage).copied().unwrap_or(DESIGN_HRT_RATIO)
    }

    pub fn run(&self) -> PipelineResult {
        let mut current = RAW_WATER;
        let mut stage_results = Vec::with_capacity(ProcessStage::ORDER.len());

        for stage in ProcessStage::ORDER {
            let result = self.run_stage(stage, current);
            current = result.effluent;
            stage_results.push(result);
        }

        let treated = current;
        PipelineResult {
            raw_water: RAW_WATER,
            stages: stage_results,
            treated_water: treated,
            overall_removal: removal_efficiencies(&RAW_WATER, &treated),
            overall_status: assess_final_status(&treated),
        }
    }

    fn run_stage(&self, stage: ProcessStage, influent: WaterQuality) -> StageResult {
        let hrt_ratio = self.hrt_ratio(stage);
        let hrt_hours = design_hrt_hours(stage) * hrt_ratio;

        let effluent = stages::transfer(stage, &influent, hrt_ratio);
        let status = assess_stage_status(&effluent);
        debug!(
            "Stage {}: ratio {:.3}, HRT {:.2} h, status {}",
            stage, hrt_ratio, hrt_hours, status
        );

        StageResult {
            stage,
            stage_name: stage.label().to_string(),
            hrt_ratio: round_to(hrt_ratio, 3),
            hrt_hours: round_to(hrt_hours, 2),
            influent,
            effluent,
            removal_efficiencies: removal_efficiencies(&influent, &effluent),
            status,
        }
    }
}

/// Runs the pipeline. `None` runs every stage at design retention time.
///
/// Ratios are used as given; range checks belong to the caller
/// (see [`crate::validation::validate_params`]).
pub fn run_pipeline(params: Option<&[StageParams]>) -> PipelineResult {
    match params {
        Some(params) => PipelineEngine::from_params(params).run(),
        None => PipelineEngine::design().run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaview_schemas::status::Status;

    #[test]
    fn default_run_uses_design_hrt() {
        let result = run_pipeline(None);
        let hours: Vec<f64> = result.stages.iter().map(|s| s.hrt_hours).collect();
        assert_eq!(hours, vec![2.0, 6.0, 1.5, 10.0, 0.5]);
        assert!(result.stages.iter().all(|s| s.hrt_ratio == 1.0));
    }

    #[test]
    fn stages_run_in_canonical_order_regardless_of_input_order() {
        let params = [
            StageParams::new(ProcessStage::Disinfection, 2.0),
            StageParams::new(ProcessStage::PrimarySettling, 0.5),
        ];
        let result = run_pipeline(Some(&params));
        let order: Vec<ProcessStage> = result.stages.iter().map(|s| s.stage).collect();
        assert_eq!(order, ProcessStage::ORDER.to_vec());
        assert_eq!(result.stages[0].hrt_ratio, 0.5);
        assert_eq!(result.stages[4].hrt_ratio, 2.0);
        assert_eq!(result.stages[4].hrt_hours, 1.0);
    }

    #[test]
    fn last_duplicate_override_wins() {
        let engine = PipelineEngine::from_params(&[
            StageParams::new(ProcessStage::Aeration, 0.5),
            StageParams::new(ProcessStage::Aeration, 1.5),
        ]);
        assert_eq!(engine.hrt_ratio(ProcessStage::Aeration), 1.5);
        assert_eq!(engine.hrt_ratio(ProcessStage::Nitrification), 1.0);
    }

    #[test]
    fn reported_ratio_is_rounded_but_transfer_uses_exact_value() {
        let params = [StageParams::new(ProcessStage::Aeration, 1.23456)];
        let result = run_pipeline(Some(&params));
        let aeration = result.stage(ProcessStage::Aeration).unwrap();
        assert_eq!(aeration.hrt_ratio, 1.235);
        assert_eq!(aeration.hrt_hours, 7.41);
        let expected = stages::aeration(&aeration.influent, 1.23456);
        assert_eq!(aeration.effluent, expected);
    }

    #[test]
    fn empty_params_match_default_run() {
        assert_eq!(run_pipeline(Some(&[])), run_pipeline(None));
    }

    #[test]
    fn stage_labels_are_filled_in() {
        let result = run_pipeline(None);
        assert_eq!(result.stages[1].stage_name, "Aeration (Activated Sludge)");
        assert_eq!(result.overall_status, Status::Danger);
    }
}
