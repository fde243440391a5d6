//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ships, then arena entities in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod combat;
pub mod ember;
pub mod photon;
pub mod powerup;
pub mod ship;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Agent, Motion};
pub use combat::{Combat, Explosion, HitOutcome, Shootable, ShrapnelKind};
pub use ember::Ember;
pub use photon::Photon;
pub use powerup::{PowerUp, PowerUpKind};
pub use ship::{PowerUpFlags, Ship, Side, Steering};
pub use state::{HitTarget, MatchPhase, MatchState};
pub use tick::{TickInput, tick};
pub use world::{Entity, World};
