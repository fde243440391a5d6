//! Match settings
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::sim::Side;
use crate::tuning::Tuning;

/// How a ship picks its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Heading is an angle turned by key presses
    #[default]
    Keyboard,
    /// Heading follows the pointer and thrust is always engaged
    Pointer,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Keyboard => "Keyboard",
            ControlScheme::Pointer => "Pointer",
        }
    }
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for power-up timing, placement and shrapnel
    pub seed: u64,
    /// Control scheme for player one
    pub player_one: ControlScheme,
    /// Control scheme for player two
    pub player_two: ControlScheme,
    /// Balance tables
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x00d0_6f16,
            player_one: ControlScheme::Keyboard,
            player_two: ControlScheme::Keyboard,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn control(&self, side: Side) -> ControlScheme {
        match side {
            Side::One => self.player_one,
            Side::Two => self.player_two,
        }
    }

    /// The side steered by the pointer, if any (player two wins a tie)
    pub fn pointer_side(&self) -> Option<Side> {
        [Side::Two, Side::One]
            .into_iter()
            .find(|&side| self.control(side) == ControlScheme::Pointer)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject tunings the simulation can't run with
    pub fn validate(&self) -> anyhow::Result<()> {
        let t = &self.tuning;
        if t.arena.width <= 0.0 || t.arena.height <= 0.0 {
            bail!("arena must have a positive size, got {}x{}", t.arena.width, t.arena.height);
        }
        if t.ship.hp_max <= 0 {
            bail!("ship hp_max must be positive, got {}", t.ship.hp_max);
        }
        if t.ship.shot_delay == 0 {
            bail!("ship shot_delay must be at least one tick");
        }
        if t.ship.i_frames > t.ship.shot_delay {
            bail!(
                "ship i_frames ({}) can't exceed shot_delay ({})",
                t.ship.i_frames,
                t.ship.shot_delay
            );
        }
        if t.powerup.min_delay > t.powerup.max_delay {
            bail!(
                "power-up min_delay ({}) exceeds max_delay ({})",
                t.powerup.min_delay,
                t.powerup.max_delay
            );
        }
        if t.powerup.hp <= 0 || t.powerup.radius <= 0.0 || t.ship.radius() <= 0.0 {
            bail!("hit radii and power-up hp must be positive");
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42, "player_two": "Pointer" }"#).unwrap();
        assert_eq!(s.seed, 42);
        assert_eq!(s.player_one, ControlScheme::Keyboard);
        assert_eq!(s.player_two, ControlScheme::Pointer);
        assert_eq!(s.tuning.ship.hp_max, 4);
        assert_eq!(s.pointer_side(), Some(Side::Two));
    }

    #[test]
    fn test_nested_tuning_override() {
        let s = Settings::from_json(r#"{ "tuning": { "photon": { "lifetime": 12 } } }"#).unwrap();
        assert_eq!(s.tuning.photon.lifetime, 12);
        assert_eq!(s.tuning.photon.speed, 2.6);
    }

    #[test]
    fn test_validate_rejects_inverted_delays() {
        let mut s = Settings::default();
        assert!(s.validate().is_ok());
        s.tuning.powerup.min_delay = 900;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_from_json_rejects_inverted_delays() {
        let err = Settings::from_json(r#"{ "tuning": { "powerup": { "min_delay": 900 } } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("min_delay"));
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load_or_default("/nonexistent/dogfight.json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("dogfight_settings_test.json");
        let mut s = Settings::default();
        s.seed = 7;
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
        let _ = std::fs::remove_file(&path);
    }
}
