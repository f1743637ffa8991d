pub mod builder;
pub mod curve;
pub mod engine;
pub mod stages;
