//! Configuration module for tasklift
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{CalendarSettings, ExtractionSettings, GeneralSettings, Settings};
