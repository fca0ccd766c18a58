//! Price-range estimates for painting jobs, and the lead intake built around them.

pub mod config;
pub mod error;
pub mod estimate;
pub mod leads;
pub mod telemetry;
