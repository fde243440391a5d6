//! Data-driven game balance
//!
//! Every entity copies the table it needs at construction, so changing one
//! ship's numbers never leaks into the other.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Ship handling, weapons and durability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Starting (and maximum) hitpoints
    pub hp_max: i32,
    /// Embers thrown when the ship is destroyed
    pub death_burst: u32,
    /// Ticks between shots
    pub shot_delay: u32,
    /// Ticks after firing during which the ship can't be hit
    pub i_frames: u32,
    /// Thrust acceleration per impulse frame
    pub acceleration: f32,
    /// Hard velocity cap
    pub max_speed: f32,
    /// Brake drag; one brake multiplies velocity by (1 - drag)^2
    pub drag: f32,
    /// Thrust multiplier once a speed boost is collected
    pub speed_boost: f32,
    /// Key presses for a full rotation
    pub turns_in_360: u32,
    /// Frames of thrust armed by one speed-up
    pub impulse_frames: u32,
    /// Turn momentum added by one turn press; bleeds off by one per tick
    pub turn_impulse: i32,
    /// Drawing scale of the hull
    pub scale: f32,
    /// Hit radius as a multiple of `scale`
    pub radius_factor: f32,
    /// Starting offset from the origin (mirrored for player two)
    pub start_x: f32,
    pub start_y: f32,
    /// Starting heading in degrees
    pub start_angle: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            hp_max: 4,
            death_burst: 12,
            shot_delay: 20,
            i_frames: 10,
            acceleration: 0.05,
            max_speed: 2.0,
            drag: 0.05,
            speed_boost: 2.0,
            turns_in_360: 20,
            impulse_frames: 4,
            turn_impulse: 3,
            scale: 3.0,
            radius_factor: 1.2,
            start_x: 5.0,
            start_y: 5.0,
            start_angle: 90.0,
        }
    }
}

impl ShipTuning {
    /// Hit radius
    pub fn radius(&self) -> f32 {
        self.radius_factor * self.scale
    }

    /// Degrees turned per unit of turn momentum per tick.
    ///
    /// One press of `turn_impulse` frames sums to `n + (n-1) + .. + 1` units,
    /// which adds up to exactly one `360 / turns_in_360` step.
    pub fn turn_rate(&self) -> f32 {
        let n = self.turn_impulse.max(1) as f32;
        let per_press = 360.0 / self.turns_in_360.max(1) as f32;
        per_press / (n * (n + 1.0) / 2.0)
    }
}

/// Projectile speed and range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotonTuning {
    pub speed: f32,
    /// Lifetime in ticks, not distance
    pub lifetime: u32,
}

impl Default for PhotonTuning {
    fn default() -> Self {
        Self {
            speed: 2.6,
            lifetime: 40,
        }
    }
}

/// Cosmetic shrapnel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmberTuning {
    pub initial_speed: f32,
    pub slowdown: f32,
    /// Embers slower than this burn out
    pub too_slow: f32,
}

impl Default for EmberTuning {
    fn default() -> Self {
        Self {
            initial_speed: 2.0,
            slowdown: 0.2,
            too_slow: 0.1,
        }
    }
}

/// Power-up size and spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub radius: f32,
    pub hp: i32,
    pub death_burst: u32,
    /// Extra ticks before the first spawn countdown starts
    pub start_delay: u32,
    /// Spawn countdown is uniform in [min_delay, max_delay]
    pub min_delay: u32,
    pub max_delay: u32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            radius: 1.0,
            hp: 1,
            death_burst: 2,
            start_delay: 0,
            min_delay: 180,
            max_delay: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Status display layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudTuning {
    pub console_lines: usize,
    /// Characters per hitpoint in the health bars
    pub hp_scale: usize,
}

impl Default for HudTuning {
    fn default() -> Self {
        Self {
            console_lines: 5,
            hp_scale: 3,
        }
    }
}

/// All balance tables for one match
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship: ShipTuning,
    pub photon: PhotonTuning,
    pub ember: EmberTuning,
    pub powerup: PowerUpTuning,
    pub arena: ArenaTuning,
    pub hud: HudTuning,
}
