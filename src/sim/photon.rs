//! Projectiles fired by ships

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Agent, Motion};
use super::ship::Side;
use crate::color::Color;
use crate::geometry::Bounds;
use crate::tuning::PhotonTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Photon {
    pub motion: Motion,
    /// Side of the ship that fired it
    pub side: Side,
    /// Ticks lived
    pub age: u32,
    pub lifetime: u32,
    /// Fired out of the ship's tail
    pub reversed: bool,
}

impl Photon {
    /// Spawn exactly at the muzzle, moving along `heading` (or against it when reversed)
    pub fn new(position: Vec2, heading: Vec2, side: Side, reversed: bool, tuning: &PhotonTuning) -> Self {
        let sign = if reversed { -1.0 } else { 1.0 };
        Self {
            motion: Motion::new(position, heading * tuning.speed * sign),
            side,
            age: 0,
            lifetime: tuning.lifetime,
            reversed,
        }
    }

    /// Move and age; leaves once the lifetime is used up.
    ///
    /// Returns true while the photon is still live and should look for a target.
    pub fn update(&mut self, bounds: &Bounds) -> bool {
        self.advance(bounds);
        self.age += 1;
        if self.age >= self.lifetime {
            self.motion.leave();
        }
        self.motion.alive
    }
}

impl Agent for Photon {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn color(&self) -> Color {
        match self.side {
            Side::One => Color::rgb(0xffaaa1),
            Side::Two => Color::rgb(0xbcdcff),
        }
    }
}
