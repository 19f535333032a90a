//! Game settings and preferences
//!
//! Stored as JSON next to the executable's working directory. A missing or
//! unreadable file is never fatal: defaults are used and the problem logged.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tuning::{CollisionRule, PalettePolicy, Tuning, Variant};

/// Default settings file name
pub const SETTINGS_FILE: &str = "neon_dodge.json";
/// Environment variable overriding the settings path
pub const SETTINGS_ENV: &str = "NEON_DODGE_SETTINGS";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Whether to draw the background starfield
    pub fn starfield_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Errors from reading or writing the settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Variant selected when the game opens
    pub variant: Variant,
    /// Run seed (None = derived from the clock at startup)
    pub seed: Option<u64>,

    // === Rules ===
    /// Override the variant's collision rule
    pub collision_rule: Option<CollisionRule>,
    /// Override the variant's palette policy
    pub palette_policy: Option<PalettePolicy>,
    /// Clamp frame time to this many seconds (None = uncapped)
    pub max_frame_dt: Option<f32>,

    // === Visual Effects ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Screen shake on crash
    pub screen_shake: bool,
    /// Particle effects
    pub particles: bool,

    // === HUD ===
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Dodge,
            seed: None,

            collision_rule: None,
            palette_policy: None,
            max_frame_dt: None,

            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Frame time after the optional clamp
    pub fn frame_dt(&self, raw: f32) -> f32 {
        let raw = raw.max(0.0);
        match self.max_frame_dt {
            Some(max) if max > 0.0 => raw.min(max),
            _ => raw,
        }
    }

    /// Variant preset with this player's overrides applied
    pub fn tuning(&self, variant: Variant) -> Tuning {
        let mut tuning = Tuning::for_variant(variant);
        if let Some(rule) = self.collision_rule {
            tuning.collision_rule = rule;
        }
        if let Some(policy) = self.palette_policy {
            tuning.palette_policy = policy;
        }
        tuning.max_particles = self.max_particles();
        tuning
    }

    /// Settings path, honoring the environment override
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Read settings from `path`
    pub fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write settings to `path` as pretty JSON
    pub fn write_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::read_from(&path) {
            Ok(settings) => {
                log::info!(
                    "Loaded settings from {} (quality {})",
                    path.display(),
                    settings.quality.as_str()
                );
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged, not returned
    pub fn save(&self) {
        let path = Self::path();
        match self.write_to(&path) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}
