//! Configuration handling for the portal

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "SEVIS_PORTAL_CONFIG";

const DEFAULT_VERIFICATION_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SIMULATED_DELAY_MS: u64 = 1_500;
const DEFAULT_RECORD_MATCH_RATE: f64 = 0.3;
const DEFAULT_FACE_MATCH_RATE: f64 = 0.7;

/// Display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn next(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }
}

/// User configuration for the portal
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Color theme
    pub theme: Option<ThemePreference>,
    /// Deadline for one verification attempt
    pub verification_timeout_ms: Option<u64>,
    /// How long the simulated services take to answer
    pub simulated_delay_ms: Option<u64>,
    /// Chance that a record search finds an existing record
    pub record_match_rate: Option<f64>,
    /// Chance that a face capture matches
    pub face_match_rate: Option<f64>,
}

impl PortalConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("pg", "sevis", "sevis-portal")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: PortalConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file, creating its directory
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.unwrap_or_default()
    }

    pub fn verification_timeout(&self) -> Duration {
        Duration::from_millis(
            self.verification_timeout_ms
                .unwrap_or(DEFAULT_VERIFICATION_TIMEOUT_MS),
        )
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms.unwrap_or(DEFAULT_SIMULATED_DELAY_MS))
    }

    pub fn record_match_rate(&self) -> f64 {
        self.record_match_rate.unwrap_or(DEFAULT_RECORD_MATCH_RATE)
    }

    pub fn face_match_rate(&self) -> f64 {
        self.face_match_rate.unwrap_or(DEFAULT_FACE_MATCH_RATE)
    }
}
