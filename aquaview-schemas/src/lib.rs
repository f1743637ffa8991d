pub mod file_formats;
pub mod pipeline;
pub mod stage;
pub mod status;
pub mod water_quality;
