use crate::{
    error::AquaviewError,
    simulation::engine::PipelineEngine,
    validation::validate_params,
};
use aquaview_schemas::stage::{ProcessStage, StageParams, StageParamsRequest};

/// A fluent builder for constructing a validated `PipelineEngine`.
///
/// Overrides may be added as typed parameters or as raw caller requests;
/// everything is checked together in [`PipelineBuilder::build`], so an
/// invalid entry rejects the whole configuration.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    requests: Vec<StageParamsRequest>,
}

impl PipelineBuilder {
    /// Creates a builder with no overrides; every stage runs at design HRT.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HRT ratio of a single stage.
    pub fn with_stage_ratio(mut self, stage: ProcessStage, hrt_ratio: f64) -> Self {
        self.requests.push(StageParamsRequest {
            stage: stage.token().to_string(),
            hrt_ratio,
        });
        self
    }

    /// Appends typed overrides.
    pub fn with_params(mut self, params: &[StageParams]) -> Self {
        for p in params {
            self = self.with_stage_ratio(p.stage, p.hrt_ratio);
        }
        self
    }

    /// Appends raw overrides, e.g. from a scenario file or the command line.
    pub fn with_requests(mut self, requests: &[StageParamsRequest]) -> Self {
        self.requests.extend_from_slice(requests);
        self
    }

    /// Consumes the builder and returns a configured `PipelineEngine`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStage` or `InvalidRatio` for the first bad override.
    pub fn build(self) -> Result<PipelineEngine, AquaviewError> {
        let params = validate_params(&self.requests)?;
        Ok(PipelineEngine::from_params(&params))
    }
}
