//! Vector and point helpers for a toroidal arena
//!
//! Points and vectors are both `glam::Vec2`; a point plus a vector is a point.
//! `Bounds` owns the wrap-around topology.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::DEFAULT_HEADING;

/// Unit direction of `v`, or the default heading for a zero-length vector
#[inline]
pub fn direction_or_default(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(DEFAULT_HEADING)
}

/// Counter-clockwise perpendicular
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Uniformly distributed unit vector
pub fn random_unit<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..TAU))
}

/// Axis-aligned wrap-around arena bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounds of the given size centered on the origin
    pub fn centered(width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) / 2.0;
        Self {
            min: -half,
            max: half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Point at fractional coordinates (0..1 on each axis)
    pub fn point_at(&self, fx: f32, fy: f32) -> Vec2 {
        self.min + self.size() * Vec2::new(fx, fy)
    }

    /// Uniformly random in-bounds point
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        self.point_at(rng.random(), rng.random())
    }

    /// Re-enter positions that left the arena on the opposite edge
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        let size = self.size();
        Vec2::new(
            wrap_axis(p.x, self.min.x, self.max.x, size.x),
            wrap_axis(p.y, self.min.y, self.max.y, size.y),
        )
    }

    /// Shortest displacement from `from` to `to` across the wrapped edges
    pub fn delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        let size = self.size();
        let d = to - from;
        Vec2::new(shortest(d.x, size.x), shortest(d.y, size.y))
    }

    /// Wrap-aware distance between two points
    pub fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        self.delta(a, b).length()
    }
}

// Single wraps use add/subtract so wrapping -x gives exactly -wrap(x).
// Anything further out is folded back with rem_euclid first.
fn wrap_axis(mut v: f32, min: f32, max: f32, size: f32) -> f32 {
    if !v.is_finite() || size <= 0.0 {
        return v;
    }
    if v > max + size || v < min - size {
        v = min + (v - min).rem_euclid(size);
    }
    while v > max {
        v -= size;
    }
    while v < min {
        v += size;
    }
    v
}

fn shortest(d: f32, size: f32) -> f32 {
    if size <= 0.0 {
        return d;
    }
    let half = size / 2.0;
    if d > half {
        d - size
    } else if d < -half {
        d + size
    } else {
        d
    }
}
