//! Hit detection and damage for anything that can be shot

use serde::{Deserialize, Serialize};

use super::body::Agent;
use super::photon::Photon;
use super::ship::Side;
use crate::geometry::Bounds;

/// What an entity throws off when hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShrapnelKind {
    Ember,
}

/// Durability block of a shootable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combat {
    /// Hit radius; projectiles are points
    pub radius: f32,
    pub hp: i32,
    pub hp_max: i32,
    /// Absorbs exactly one hit
    pub shield: bool,
    pub is_powerup: bool,
    pub shrapnel_kind: Option<ShrapnelKind>,
    /// Shrapnel pieces thrown on the killing hit
    pub death_burst: u32,
}

/// How a hit resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Shield soaked the hit
    Shielded,
    /// Lost a hitpoint and survived
    Damaged,
    /// Lost the last hitpoint
    Destroyed,
    /// Already destroyed; nothing happened
    Spent,
}

/// Result of `explode`: the caller spawns `shrapnel` pieces at the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explosion {
    pub outcome: HitOutcome,
    pub shrapnel: u32,
    pub kind: Option<ShrapnelKind>,
}

impl Combat {
    pub fn new(radius: f32, hp_max: i32, death_burst: u32) -> Self {
        Self {
            radius,
            hp: hp_max,
            hp_max,
            shield: false,
            is_powerup: false,
            shrapnel_kind: Some(ShrapnelKind::Ember),
            death_burst,
        }
    }

    /// Apply one hit
    pub fn take_hit(&mut self) -> Explosion {
        let kind = self.shrapnel_kind;
        if self.hp <= 0 {
            return Explosion {
                outcome: HitOutcome::Spent,
                shrapnel: 0,
                kind,
            };
        }
        if self.shield {
            self.shield = false;
            return Explosion {
                outcome: HitOutcome::Shielded,
                shrapnel: 1,
                kind,
            };
        }
        self.hp -= 1;
        if self.hp > 0 {
            // Feedback grows with cumulative damage
            Explosion {
                outcome: HitOutcome::Damaged,
                shrapnel: 2 * (self.hp_max - self.hp).max(0) as u32,
                kind,
            }
        } else {
            Explosion {
                outcome: HitOutcome::Destroyed,
                shrapnel: if kind.is_some() { self.death_burst } else { 0 },
                kind,
            }
        }
    }
}

/// An agent projectiles can hit
pub trait Shootable: Agent {
    fn combat(&self) -> &Combat;
    fn combat_mut(&mut self) -> &mut Combat;

    /// Owning side; power-ups have none until picked up
    fn side(&self) -> Option<Side>;

    /// Post-shot grace window during which nothing can hit this entity
    fn in_grace(&self) -> bool {
        false
    }

    fn is_hit_by(&self, photon: &Photon, bounds: &Bounds) -> bool {
        if !self.is_alive() || self.in_grace() {
            return false;
        }
        let combat = self.combat();
        if !combat.is_powerup && self.side() == Some(photon.side) {
            return false;
        }
        bounds.distance(self.position(), photon.position()) < combat.radius
    }

    /// Take a hit; flags the entity for removal on the killing hit
    fn explode(&mut self) -> Explosion {
        let explosion = self.combat_mut().take_hit();
        if explosion.outcome == HitOutcome::Destroyed {
            self.motion_mut().leave();
        }
        explosion
    }
}
