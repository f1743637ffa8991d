use aquaview_schemas::stage::ProcessStage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AquaviewError {
    #[error("HRT ratio {ratio} for stage '{stage}' is outside the valid range [0.25, 2.5]")]
    InvalidRatio { stage: ProcessStage, ratio: f64 },

    #[error("Unknown treatment stage '{0}'")]
    UnknownStage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
