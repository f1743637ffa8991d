use crate::{
    error::AquaviewError,
    logger::StageLogEntry,
    simulation::engine::PipelineEngine,
    validation::validate_ratio,
};
use aquaview_schemas::{
    stage::{ProcessStage, StageParams},
    status::Status,
    water_quality::WaterQuality,
};
use serde::Serialize;

/// Operator guidance for an HRT ratio. Advisory only; it never changes results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioBand {
    /// Below half the design time: poor treatment likely.
    TooShort,
    Marginal,
    Design,
    /// More than twice the design time: wasted tank volume and energy.
    OverDesign,
}

impl RatioBand {
    pub fn label(&self) -> &'static str {
        match self {
            RatioBand::TooShort => "risk of poor treatment",
            RatioBand::Marginal => "marginal",
            RatioBand::Design => "normal",
            RatioBand::OverDesign => "over-design (energy waste)",
        }
    }
}

pub fn ratio_band(hrt_ratio: f64) -> RatioBand {
    if hrt_ratio < 0.5 {
        RatioBand::TooShort
    } else if hrt_ratio < 0.7 {
        RatioBand::Marginal
    } else if hrt_ratio > 2.0 {
        RatioBand::OverDesign
    } else {
        RatioBand::Design
    }
}

/// One point of an HRT sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub hrt_ratio: f64,
    pub hrt_hours: f64,
    pub stage_effluent: WaterQuality,
    pub stage_status: Status,
    pub treated_water: WaterQuality,
    pub overall_status: Status,
}

/// Runs the pipeline at `steps` evenly spaced ratios of `stage` between
/// `from` and `to` inclusive, with every other stage at design.
pub fn sweep_stage(stage: ProcessStage, from: f64, to: f64, steps: usize) -> Result<Vec<SweepPoint>, AquaviewError> {
    validate_ratio(stage, from)?;
    validate_ratio(stage, to)?;
    if steps < 2 {
        return Err(AquaviewError::ConfigError(format!(
            "A sweep needs at least 2 points, got {}",
            steps
        )));
    }
    if from >= to {
        return Err(AquaviewError::ConfigError(format!(
            "Sweep range must be increasing, got {} to {}",
            from, to
        )));
    }

    let step_size = (to - from) / (steps - 1) as f64;
    let mut points = Vec::with_capacity(steps);
    for i in 0..steps {
        // land exactly on `to` at the last point
        let ratio = if i == steps - 1 { to } else { from + step_size * i as f64 };
        let result = PipelineEngine::from_params(&[StageParams::new(stage, ratio)]).run();
        let stage_result = result.stage(stage).ok_or_else(|| {
            AquaviewError::ConfigError(format!("Stage '{}' missing from pipeline result", stage))
        })?;
        points.push(SweepPoint {
            hrt_ratio: stage_result.hrt_ratio,
            hrt_hours: stage_result.hrt_hours,
            stage_effluent: stage_result.effluent,
            stage_status: stage_result.status,
            treated_water: result.treated_water,
            overall_status: result.overall_status,
        });
    }
    Ok(points)
}

/// Reads a stage log written by [`crate::logger::StageLogger`].
pub fn read_stage_log(log_path: &str) -> Result<Vec<StageLogEntry>, AquaviewError> {
    let mut reader = csv::Reader::from_path(log_path)
        .map_err(|e| AquaviewError::CsvError(log_path.to_string(), e))?;
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let record: StageLogEntry = result.map_err(|e| AquaviewError::CsvError(log_path.to_string(), e))?;
        entries.push(record);
    }
    Ok(entries)
}
