use crate::stage::StageParamsRequest;
use serde::{Deserialize, Serialize};

/// A named set of HRT overrides, as stored in a scenario YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub schema_version: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<StageParamsRequest>,
    #[serde(default)]
    pub sweep: Option<SweepSpec>,
}

/// Ratio range to sweep for one stage; the other stages stay at design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub stage: String,
    #[serde(default = "default_sweep_from")]
    pub from: f64,
    #[serde(default = "default_sweep_to")]
    pub to: f64,
    #[serde(default = "default_sweep_steps")]
    pub steps: usize,
}

fn default_sweep_from() -> f64 {
    0.25
}

fn default_sweep_to() -> f64 {
    2.5
}

fn default_sweep_steps() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_defaults_missing_sections() {
        let json = r#"{"schema_version": "1.0", "name": "design"}"#;
        let file: ScenarioFile = serde_json::from_str(json).unwrap();
        assert!(file.params.is_empty());
        assert!(file.sweep.is_none());
        assert!(file.description.is_none());
    }

    #[test]
    fn sweep_spec_fills_range_defaults() {
        let spec: SweepSpec = serde_json::from_str(r#"{"stage": "aeration"}"#).unwrap();
        assert_eq!(spec.from, 0.25);
        assert_eq!(spec.to, 2.5);
        assert_eq!(spec.steps, 10);
    }
}
