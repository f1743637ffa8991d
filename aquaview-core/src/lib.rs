//! Deterministic simulation of a five-stage municipal wastewater treatment train.
//!
//! [`run_pipeline`] threads the raw influent through primary settling,
//! aeration, secondary settling, nitrification and disinfection, and reports
//! each stage's effluent, removal efficiencies and status along with the
//! regulatory status of the treated water.

pub mod analysis;
pub mod constants;
pub mod error;
pub mod logger;
pub mod removal;
pub mod scenario;
pub mod simulation;
pub mod status;
pub mod validation;

pub use error::AquaviewError;
pub use simulation::{builder::PipelineBuilder, engine::{run_pipeline, PipelineEngine}};
