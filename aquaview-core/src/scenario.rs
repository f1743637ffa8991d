//! Scenario files and result export.

use crate::{error::AquaviewError, validation::validate_params};
use aquaview_schemas::{
    file_formats::ScenarioFile,
    pipeline::PipelineResult,
    stage::StageParams,
};
use std::fs;

pub const SCENARIO_SCHEMA_VERSION: &str = "1.0";

/// Reads and parses a YAML scenario file. Overrides are not validated here.
pub fn load_scenario(path: &str) -> Result<ScenarioFile, AquaviewError> {
    let content = fs::read_to_string(path).map_err(|e| AquaviewError::FileIO(path.to_string(), e))?;
    let scenario: ScenarioFile =
        serde_yaml::from_str(&content).map_err(|e| AquaviewError::YamlParsing(path.to_string(), e))?;
    if scenario.schema_version != SCENARIO_SCHEMA_VERSION {
        return Err(AquaviewError::ConfigError(format!(
            "Scenario '{}' has schema version '{}', expected '{}'",
            path, scenario.schema_version, SCENARIO_SCHEMA_VERSION
        )));
    }
    validate_scenario_name(&scenario.name)?;
    Ok(scenario)
}

/// Scenario names become output directory names, so they must be a single
/// plain path component.
pub fn validate_scenario_name(name: &str) -> Result<(), AquaviewError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed.contains("..") {
        return Err(AquaviewError::ConfigError(format!(
            "Scenario name '{}' must be a non-empty name without path separators or '..'",
            name
        )));
    }
    Ok(())
}

/// Validated overrides of a scenario.
pub fn scenario_params(scenario: &ScenarioFile) -> Result<Vec<StageParams>, AquaviewError> {
    validate_params(&scenario.params)
}

pub fn write_result_json(path: &str, result: &PipelineResult) -> Result<(), AquaviewError> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json).map_err(|e| AquaviewError::FileIO(path.to_string(), e))
}
