//! Moving bodies and the per-kind hooks every agent provides

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::TIME_STEP;
use crate::geometry::Bounds;

/// Half-width of the default square outline
const DOT_HALF: f32 = 0.125;

/// Kinematic state shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
    pub accel: Vec2,
    /// Cleared to flag the entity for removal at the end of the tick
    pub alive: bool,
}

impl Motion {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            accel: Vec2::ZERO,
            alive: true,
        }
    }

    /// Flag for removal
    pub fn leave(&mut self) {
        self.alive = false;
    }
}

/// Anything that lives in the arena
pub trait Agent {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;

    fn color(&self) -> Color;

    /// Polygon outline for drawing
    fn shape(&self) -> Vec<Vec2> {
        let p = self.motion().position;
        vec![
            p + Vec2::new(DOT_HALF, DOT_HALF),
            p + Vec2::new(-DOT_HALF, DOT_HALF),
            p + Vec2::new(-DOT_HALF, -DOT_HALF),
            p + Vec2::new(DOT_HALF, -DOT_HALF),
        ]
    }

    /// Acceleration for the next step
    fn steer(&mut self) -> Vec2 {
        Vec2::ZERO
    }

    /// Post-integration clamp (speed caps and the like)
    fn trim_physics(&mut self) {}

    fn is_alive(&self) -> bool {
        self.motion().alive
    }

    fn position(&self) -> Vec2 {
        self.motion().position
    }

    /// One fixed step: position from velocity, velocity from the previous
    /// acceleration, then a fresh acceleration from `steer`, then trim.
    fn advance(&mut self, bounds: &Bounds) {
        let m = self.motion_mut();
        m.position += m.velocity * TIME_STEP;
        m.velocity += m.accel * TIME_STEP;
        let accel = self.steer();
        self.motion_mut().accel = accel;
        self.trim_physics();
        let m = self.motion_mut();
        m.position = bounds.wrap(m.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Drifter(Motion);

    impl Agent for Drifter {
        fn motion(&self) -> &Motion {
            &self.0
        }
        fn motion_mut(&mut self) -> &mut Motion {
            &mut self.0
        }
        fn color(&self) -> Color {
            Color::rgb(0x000080)
        }
    }

    #[test]
    fn test_constant_velocity_integration() {
        let bounds = Bounds::centered(1000.0, 1000.0);
        let mut d = Drifter(Motion::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, -0.25)));
        for _ in 0..10 {
            d.advance(&bounds);
        }
        assert!((d.position() - Vec2::new(3.5, 0.75)).length() < 1e-5);
    }

    #[test]
    fn test_default_shape_is_square() {
        let d = Drifter(Motion::new(Vec2::ZERO, Vec2::ZERO));
        let shape = d.shape();
        assert_eq!(shape.len(), 4);
        assert_eq!(shape[0], Vec2::new(0.125, 0.125));
        assert_eq!(shape[2], Vec2::new(-0.125, -0.125));
    }

    #[test]
    fn test_leave_flags_removal() {
        let mut d = Drifter(Motion::new(Vec2::ZERO, Vec2::ZERO));
        assert!(d.is_alive());
        d.motion_mut().leave();
        assert!(!d.is_alive());
    }
}
