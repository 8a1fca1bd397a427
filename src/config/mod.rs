//! Configuration loading and management for the timesheet engine.
//!
//! This module loads engine settings, the default weekly schedule and the
//! user-defined holidays from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Noise threshold: {} min", config.settings().normalization.noise_threshold_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineSettings, HolidaysConfig, LabelSettings, NormalizationSettings,
    ScheduleConfig, WarningSettings,
};
