//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::TaskliftError;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Who to extract tasks for and how wide to look around each line
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Calendar event settings
    #[serde(default)]
    pub calendar: CalendarSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the pending-tasks snapshot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Person whose tasks are extracted, matched by name in transcript lines
    #[serde(default = "default_tracked_person")]
    pub tracked_person: String,

    /// Conversation partner whose commitments are tracked (empty = disabled)
    #[serde(default)]
    pub counterpart: String,

    /// Product names whose feature descriptions should not become tasks
    #[serde(default = "default_product_names")]
    pub product_names: Vec<String>,

    /// Context lines on each side of a direct assignment
    #[serde(default = "default_direct_context_window")]
    pub direct_context_window: usize,

    /// Context lines on each side of a commitment
    #[serde(default = "default_commitment_context_window")]
    pub commitment_context_window: usize,

    /// Lines on each side searched for a deadline when the context has none
    #[serde(default = "default_deadline_search_radius")]
    pub deadline_search_radius: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// IANA time zone for timed events
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Popup reminders, in minutes before the event
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: Vec<u32>,

    /// Maximum characters of task text in an event title
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "tasklift", "tasklift")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/tasklift"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tracked_person() -> String {
    "Victor".to_string()
}

fn default_product_names() -> Vec<String> {
    vec!["factorial".to_string()]
}

fn default_direct_context_window() -> usize {
    3
}

fn default_commitment_context_window() -> usize {
    8
}

fn default_deadline_search_radius() -> usize {
    5
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_reminder_minutes() -> Vec<u32> {
    vec![24 * 60, 60]
}

fn default_title_max_chars() -> usize {
    100
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            tracked_person: default_tracked_person(),
            counterpart: String::new(),
            product_names: default_product_names(),
            direct_context_window: default_direct_context_window(),
            commitment_context_window: default_commitment_context_window(),
            deadline_search_radius: default_deadline_search_radius(),
        }
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            reminder_minutes: default_reminder_minutes(),
            title_max_chars: default_title_max_chars(),
        }
    }
}

impl GeneralSettings {
    /// Default `EnvFilter` directive; `--verbose` wins over the configured level
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            self.log_level.trim()
        }
    }
}

impl CalendarSettings {
    /// Parse the configured IANA time zone
    pub fn time_zone(&self) -> crate::Result<chrono_tz::Tz> {
        self.timezone.parse::<chrono_tz::Tz>().map_err(|_| {
            TaskliftError::Config(format!("Invalid calendar.timezone: {}", self.timezone))
        })
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML, filling in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(person) = std::env::var("TASKLIFT_TRACKED_PERSON") {
            if !person.trim().is_empty() {
                self.extraction.tracked_person = person;
            }
        }
        if let Ok(counterpart) = std::env::var("TASKLIFT_COUNTERPART") {
            self.extraction.counterpart = counterpart;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "tasklift", "tasklift")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the pending calendar snapshot path
    pub fn pending_path(&self) -> PathBuf {
        self.general.data_dir.join("pending_calendar.json")
    }
}
