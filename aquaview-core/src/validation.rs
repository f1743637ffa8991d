use crate::{
    constants::{MAX_HRT_RATIO, MIN_HRT_RATIO},
    error::AquaviewError,
};
use aquaview_schemas::stage::{ProcessStage, StageParams, StageParamsRequest};

/// Checks one ratio against the accepted operating range.
pub fn validate_ratio(stage: ProcessStage, ratio: f64) -> Result<f64, AquaviewError> {
    if (MIN_HRT_RATIO..=MAX_HRT_RATIO).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(AquaviewError::InvalidRatio { stage, ratio })
    }
}

/// Turns caller-supplied overrides into typed parameters.
///
/// Fails on the first unknown stage or out-of-range ratio, before anything
/// is computed.
pub fn validate_params(requests: &[StageParamsRequest]) -> Result<Vec<StageParams>, AquaviewError> {
    requests
        .iter()
        .map(|req| {
            let stage = ProcessStage::from_token(&req.stage)
                .ok_or_else(|| AquaviewError::UnknownStage(req.stage.clone()))?;
            let ratio = validate_ratio(stage, req.hrt_ratio)?;
            Ok(StageParams::new(stage, ratio))
        })
        .collect()
}
