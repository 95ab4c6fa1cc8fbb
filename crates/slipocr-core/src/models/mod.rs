//! Data models and configuration.

pub mod config;
pub mod slip;

pub use config::{ModelConfig, OcrConfig, SlipConfig};
pub use slip::SlipFields;
