//! Dogfight - A two-player wrap-around arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, combat, power-ups, match state)
//! - `geometry`: Vector/point helpers and wrap-around bounds
//! - `tuning`: Data-driven game balance
//! - `settings`: Loadable match configuration
//! - `input`: Key bindings to per-side commands
//! - `hud`: Textual status line

pub mod color;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use geometry::Bounds;
pub use settings::{ControlScheme, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step. Physics advances by this much per tick regardless of wall time.
    pub const TIME_STEP: f32 = 0.5;
    /// Rate the outer loop paces ticks at
    pub const TICK_RATE_HZ: f32 = 60.0;

    /// Arena dimensions (world units, centered on the origin)
    pub const ARENA_WIDTH: f32 = 60.0;
    pub const ARENA_HEIGHT: f32 = 45.0;

    /// Ticks between a shot and each follow-up multi-shot
    pub const MULTI_SHOT_SPACING: u32 = 4;
}

/// Heading used when a direction can't be derived (zero-length vector)
pub const DEFAULT_HEADING: Vec2 = Vec2::Y;

/// Unit heading for an angle in degrees
#[inline]
pub fn heading_from_degrees(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}
