//! tasklift - Rule-based action item extraction from meeting transcripts
//!
//! Reads Portuguese meeting transcripts and lifts out what the tracked person
//! was asked to do, what they promised, and what the counterpart promised,
//! along with any deadline mentioned nearby.

pub mod cli;
pub mod config;
pub mod extraction;
pub mod report;
pub mod storage;

use thiserror::Error;

/// Main error type for tasklift
#[derive(Error, Debug)]
pub enum TaskliftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, TaskliftError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "tasklift";
