//! CLI command implementations.

mod config;
mod doctor;
mod extract;

pub use config::run_config;
pub use doctor::run_doctor;
pub use extract::{run_extract, ThresholdOverrides};
