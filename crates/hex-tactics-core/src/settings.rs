//! Grid and terrain generation settings.

use crate::hex::hex_count;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported grid radius.
///
/// Lookups by world position scan every tile, so maps are kept small.
pub const MAX_RADIUS: u32 = 64;

/// Configuration for a grid session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Rings around the origin; the map holds `3r² + 3r + 1` tiles.
    pub radius: u32,
    /// Distance from a hex center to its corners, in world units.
    pub hex_size: f32,
    /// Seed for the terrain noise and jitter.
    pub seed: u64,
    /// Terrain classification parameters.
    pub terrain: TerrainSettings,
}

impl GridSettings {
    /// Default settings with the given radius.
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// A small map for quick skirmishes.
    pub fn skirmish() -> Self {
        Self::new(3)
    }

    /// Same settings with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of tiles a grid with these settings will contain.
    pub fn tile_count(&self) -> usize {
        hex_count(self.radius)
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.radius == 0 {
            return Err(SettingsError::RadiusTooSmall);
        }
        if self.radius > MAX_RADIUS {
            return Err(SettingsError::RadiusTooLarge(self.radius));
        }
        if !self.hex_size.is_finite() || self.hex_size <= 0.0 {
            return Err(SettingsError::InvalidHexSize(self.hex_size));
        }
        self.terrain.validate()
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: GridSettings =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            radius: 5,
            hex_size: 200.0,
            seed: 0,
            terrain: TerrainSettings::default(),
        }
    }
}

/// Noise thresholds used to classify inland tiles.
///
/// Classification order: below `desert_below` is desert; above
/// `mountain_above` (or a `mountain_chance` roll) is mountain; everything else
/// is grassland.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// World units are multiplied by this before sampling noise.
    pub noise_scale: f64,
    /// Maximum uniform perturbation added to the normalized noise.
    pub jitter: f32,
    /// Normalized noise below this becomes desert.
    pub desert_below: f32,
    /// Normalized noise above this becomes mountain.
    pub mountain_above: f32,
    /// Probability that any non-desert inland tile becomes mountain anyway.
    pub mountain_chance: f32,
}

impl TerrainSettings {
    /// Validate thresholds.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(SettingsError::InvalidNoiseScale);
        }
        let unit = 0.0..=1.0;
        for value in [
            self.jitter,
            self.desert_below,
            self.mountain_above,
            self.mountain_chance,
        ] {
            if !unit.contains(&value) {
                return Err(SettingsError::ThresholdOutOfRange(value));
            }
        }
        if self.desert_below >= self.mountain_above {
            return Err(SettingsError::OverlappingThresholds {
                desert_below: self.desert_below,
                mountain_above: self.mountain_above,
            });
        }
        Ok(())
    }
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            noise_scale: 0.01,
            jitter: 0.05,
            desert_below: 0.40,
            mountain_above: 0.75,
            mountain_chance: 0.10,
        }
    }
}

/// Errors from invalid grid settings.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SettingsError {
    #[error("Grid radius must be at least 1")]
    RadiusTooSmall,
    #[error("Grid radius {0} exceeds the maximum supported radius")]
    RadiusTooLarge(u32),
    #[error("Hex size must be a positive number, got {0}")]
    InvalidHexSize(f32),
    #[error("Noise scale must be a positive number")]
    InvalidNoiseScale,
    #[error("Terrain threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f32),
    #[error("Desert threshold {desert_below} must be below mountain threshold {mountain_above}")]
    OverlappingThresholds {
        desert_below: f32,
        mountain_above: f32,
    },
    #[error("Invalid settings JSON: {0}")]
    Parse(String),
}
