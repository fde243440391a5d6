//! Arena entity store
//!
//! Entities live in insertion order. Spawns made while a tick is in progress
//! go to a pending list and only join the live set at `flush`, so a tick
//! never visits something born during it. Removal is a flag; `purge` drops
//! flagged entities at one fixed point per tick.

use glam::Vec2;

use super::body::Agent;
use super::ember::Ember;
use super::photon::Photon;
use super::powerup::PowerUp;
use crate::geometry::Bounds;

/// Everything in the arena besides the two ships
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Photon(Photon),
    Ember(Ember),
    PowerUp(PowerUp),
}

impl Entity {
    pub fn agent(&self) -> &dyn Agent {
        match self {
            Entity::Photon(p) => p,
            Entity::Ember(e) => e,
            Entity::PowerUp(p) => p,
        }
    }

    pub fn agent_mut(&mut self) -> &mut dyn Agent {
        match self {
            Entity::Photon(p) => p,
            Entity::Ember(e) => e,
            Entity::PowerUp(p) => p,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.agent().is_alive()
    }

    pub fn leave(&mut self) {
        self.agent_mut().motion_mut().leave();
    }

    pub fn as_powerup(&self) -> Option<&PowerUp> {
        match self {
            Entity::PowerUp(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub bounds: Bounds,
    /// Last known pointer position
    pub pointer: Vec2,
    entities: Vec<Entity>,
    pending: Vec<Entity>,
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            pointer: Vec2::ZERO,
            entities: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Queue an entity; it becomes live at the next `flush`
    pub fn spawn(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    /// Move pending spawns into the live set
    pub fn flush(&mut self) {
        self.entities.append(&mut self.pending);
    }

    /// Drop everything flagged for removal
    pub fn purge(&mut self) {
        self.entities.retain(Entity::is_alive);
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Live power-ups still on the field
    pub fn powerups(&self) -> impl Iterator<Item = &PowerUp> {
        self.entities
            .iter()
            .filter_map(Entity::as_powerup)
            .filter(|p| p.is_alive())
    }
}
