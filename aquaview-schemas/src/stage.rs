use serde::{Deserialize, Serialize};
use std::fmt;

/// The five treatment stages, in canonical execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStage {
    PrimarySettling,
    Aeration,
    SecondarySettling,
    Nitrification,
    Disinfection,
}

impl ProcessStage {
    /// Canonical order the pipeline executes stages in.
    pub const ORDER: [ProcessStage; 5] = [
        ProcessStage::PrimarySettling,
        ProcessStage::Aeration,
        ProcessStage::SecondarySettling,
        ProcessStage::Nitrification,
        ProcessStage::Disinfection,
    ];

    /// Stable wire identifier, e.g. `primary_settling`.
    pub fn token(&self) -> &'static str {
        match self {
            ProcessStage::PrimarySettling => "primary_settling",
            ProcessStage::Aeration => "aeration",
            ProcessStage::SecondarySettling => "secondary_settling",
            ProcessStage::Nitrification => "nitrification",
            ProcessStage::Disinfection => "disinfection",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|s| s.token() == token)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProcessStage::PrimarySettling => "Primary Settling",
            ProcessStage::Aeration => "Aeration (Activated Sludge)",
            ProcessStage::SecondarySettling => "Secondary Settling",
            ProcessStage::Nitrification => "Nitrification (Advanced Treatment)",
            ProcessStage::Disinfection => "Disinfection",
        }
    }
}

impl fmt::Display for ProcessStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A validated HRT override for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    pub stage: ProcessStage,
    pub hrt_ratio: f64,
}

impl StageParams {
    pub fn new(stage: ProcessStage, hrt_ratio: f64) -> Self {
        Self { stage, hrt_ratio }
    }
}

/// An HRT override as received from a caller, before validation.
///
/// The stage is kept as a raw token so that unknown identifiers can be
/// reported as such instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageParamsRequest {
    pub stage: String,
    pub hrt_ratio: f64,
}
