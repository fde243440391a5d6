//! Cosmetic shrapnel thrown off by hits

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Agent, Motion};
use crate::color::Color;
use crate::geometry::{Bounds, direction_or_default, random_unit};
use crate::tuning::EmberTuning;

/// A spark that slows down and burns out. Never takes part in combat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ember {
    pub motion: Motion,
    pub tuning: EmberTuning,
}

impl Ember {
    /// Ember flying off in a random direction
    pub fn new<R: Rng>(position: Vec2, tuning: &EmberTuning, rng: &mut R) -> Self {
        Self {
            motion: Motion::new(position, random_unit(rng) * tuning.initial_speed),
            tuning: *tuning,
        }
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.advance(bounds);
        if self.motion.velocity.length() < self.tuning.too_slow {
            self.motion.leave();
        }
    }

    /// Current speed as a fraction of the launch speed
    fn heat(&self) -> f32 {
        if self.tuning.initial_speed <= 0.0 {
            return 0.0;
        }
        self.motion.velocity.length() / self.tuning.initial_speed
    }
}

impl Agent for Ember {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn color(&self) -> Color {
        let heat = self.heat();
        if heat > 0.5 {
            Color::rgb(0xffffff) // white hot
        } else if heat > 0.25 {
            Color::rgb(0xff8080) // burning
        } else {
            Color::rgb(0x808040) // smoldering
        }
    }

    fn steer(&mut self) -> Vec2 {
        -direction_or_default(self.motion.velocity) * self.tuning.slowdown
    }
}
