// SPDX-License-Identifier: GPL-3.0-only

use crate::app::{CaptureMode, Facing};
use crate::constants::{TimerPreset, timing};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Application name used for config and media directories
pub const APP_NAME: &str = "viewfinder";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mode selected when the screen mounts
    pub initial_mode: CaptureMode,
    /// Camera facing selected when the screen mounts
    pub initial_facing: Facing,
    /// Start with the 4:3 sensor ratio (false = 16:9)
    pub wide_aspect: bool,
    /// Continuous autofocus
    pub autofocus: bool,
    /// Self-timer countdown length
    pub timer: TimerPreset,
    /// Bound for take-photo and stop-recording requests (None = wait forever)
    pub capture_timeout_secs: Option<u64>,
    /// Copy captures into the media library
    pub save_to_library: bool,
    /// Media library directory (default: ~/Pictures/viewfinder)
    pub library_dir: Option<PathBuf>,
    /// Directory the camera writes fresh captures to (default: cache dir)
    pub capture_dir: Option<PathBuf>,
    /// How long an error banner stays visible
    pub banner_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_mode: CaptureMode::Photo,
            initial_facing: Facing::Back,
            wide_aspect: true,
            autofocus: true,
            timer: TimerPreset::default(),
            capture_timeout_secs: Some(timing::CAPTURE_TIMEOUT_SECS),
            save_to_library: true,
            library_dir: None,
            capture_dir: None,
            banner_duration_ms: timing::BANNER_DURATION_MS,
        }
    }
}

impl Config {
    /// Config format version, bumped on incompatible changes
    pub const VERSION: u64 = 1;

    /// Default config file location (`<config_dir>/viewfinder/config.json`)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.json"))
    }

    /// Load the user's config, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            info!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config
            }
            Err(err) => {
                error!(%err, path = %path.display(), "Errors loading config");
                Self::default()
            }
        }
    }

    /// Load a config file, reporting read and parse errors
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Pretty JSON of the effective configuration
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn capture_timeout(&self) -> Option<Duration> {
        self.capture_timeout_secs.map(Duration::from_secs)
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_duration_ms)
    }

    pub fn library_directory(&self) -> PathBuf {
        self.library_dir
            .clone()
            .unwrap_or_else(crate::storage::default_library_directory)
    }

    pub fn capture_directory(&self) -> PathBuf {
        self.capture_dir
            .clone()
            .unwrap_or_else(crate::storage::default_capture_directory)
    }
}
