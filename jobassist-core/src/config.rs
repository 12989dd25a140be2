//! Configuration management
//!
//! settings.json format:
//! ```json
//! {
//!   "app": { "latencyMs": 500, ... }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::services::auth::Latency;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    latency_ms: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Assistant configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Uniform simulated latency override in milliseconds; None means the
    /// built-in per-operation defaults
    pub latency_ms: Option<u64>,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Config {
    /// Load config from the app directory
    ///
    /// The latency override can come from:
    /// 1. Settings file (`app.latencyMs`)
    /// 2. Environment variable JOBASSIST_LATENCY_MS (for CI/testing)
    pub fn load(app_dir: &Path) -> Result<Self> {
        let settings_path = app_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Check env var for latency override (for CI/testing)
        let latency_ms = match std::env::var("JOBASSIST_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            Some(ms) => Some(ms),
            None => raw.app.latency_ms,
        };

        Ok(Self {
            latency_ms,
            _raw_settings: raw,
        })
    }

    /// Save config to the app directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.latency_ms = self.latency_ms;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Effective per-operation simulated latency
    pub fn latency(&self) -> Latency {
        match self.latency_ms {
            Some(ms) => Latency::uniform(Duration::from_millis(ms)),
            None => Latency::default(),
        }
    }
}
