//! Runner settings
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_STEP;
use crate::error::{LoadError, SimError, SimResult};

/// Simulation settings for the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame delta fed to each tick (seconds)
    pub frame_dt: f64,
    /// Largest sub-step a tick may take (seconds)
    pub max_step: f64,
    /// Frame budget per level before giving up
    pub max_frames: u32,
    /// Seed for coin animation phases
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_dt: 1.0 / 60.0,
            max_step: MAX_STEP,
            // One minute of play at 60 Hz
            max_frames: 60 * 60,
            seed: 0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject time values the tick loop cannot use
    pub fn validate(&self) -> SimResult<()> {
        if !self.frame_dt.is_finite() || self.frame_dt <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "frame_dt {} must be finite and positive",
                self.frame_dt
            )));
        }
        if !self.max_step.is_finite() || self.max_step <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "max_step {} must be finite and positive",
                self.max_step
            )));
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
