//! Runtime settings
//!
//! Camera easing rates, timing and motion preferences, stored as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Soft-lock follow rate (per second)
    pub acceleration: f32,
    /// Zoom easing rate (per second)
    pub zoom_speed: f32,
    /// Scale a new camera starts at
    pub initial_scale: f32,
    /// Scale a new camera eases toward
    pub target_scale: f32,
    /// Lag behind follow targets instead of snapping
    pub soft_lock: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            acceleration: DEFAULT_ACCELERATION,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            initial_scale: INITIAL_SCALE,
            target_scale: DEFAULT_TARGET_SCALE,
            soft_lock: false,
        }
    }
}

/// Runtime settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraSettings,

    // === Timing ===
    /// Global time multiplier (slow-mo < 1 < fast-forward)
    pub time_scale: f32,
    /// RNG seed for shake; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Screen shake on impacts
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            time_scale: DEFAULT_TIME_SCALE,
            seed: None,
            screen_shake: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Reject values the camera cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.camera.initial_scale == 0.0 || !self.camera.initial_scale.is_finite() {
            return Err(SettingsError::Invalid {
                field: "camera.initial_scale",
                reason: "must be finite and non-zero",
            });
        }
        if self.camera.target_scale == 0.0 || !self.camera.target_scale.is_finite() {
            return Err(SettingsError::Invalid {
                field: "camera.target_scale",
                reason: "must be finite and non-zero",
            });
        }
        if self.camera.acceleration < 0.0 {
            return Err(SettingsError::Invalid {
                field: "camera.acceleration",
                reason: "must not be negative",
            });
        }
        if self.camera.zoom_speed < 0.0 {
            return Err(SettingsError::Invalid {
                field: "camera.zoom_speed",
                reason: "must not be negative",
            });
        }
        if self.time_scale < 0.0 || !self.time_scale.is_finite() {
            return Err(SettingsError::Invalid {
                field: "time_scale",
                reason: "must be finite and not negative",
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
