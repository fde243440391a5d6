//! Fixed timestep simulation tick
//!
//! Order within a tick: input, power-up clock, ships, then the arena in
//! spawn order. Anything spawned during the tick waits for the next one.

use glam::Vec2;

use super::ship::Side;
use super::state::MatchState;
use super::world::Entity;
use crate::input::{Command, KeyBindings};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Key-derived commands in the order they were pressed
    pub commands: Vec<(Side, Command)>,
    /// Pointer position in world units, if it moved
    pub pointer: Option<Vec2>,
    /// Pointer button went down; fires for the pointer-steered ship (player two if none)
    pub pointer_pressed: bool,
}

impl TickInput {
    /// Commands for every bound key in `keys`; unbound keys are ignored
    pub fn from_keys(keys: &str, bindings: &KeyBindings) -> Self {
        Self {
            commands: keys.chars().filter_map(|k| bindings.command_for(k)).collect(),
            ..Default::default()
        }
    }

    pub fn command(side: Side, command: Command) -> Self {
        Self {
            commands: vec![(side, command)],
            ..Default::default()
        }
    }
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput) {
    state.time_ticks += 1;

    if let Some(pointer) = input.pointer {
        state.world.pointer = pointer;
    }
    for &(side, command) in &input.commands {
        state.apply_command(side, command);
    }
    if input.pointer_pressed {
        let side = state.pointer_side().unwrap_or(Side::Two);
        state.apply_command(side, Command::Shoot);
    }
    // Shots fired from input fly this tick; multi-shot follow-ups spawned
    // during the ship pass wait for the next one.
    state.world.flush();

    state.update_powerup_timer();
    state.world.flush();

    for side in Side::BOTH {
        state.update_ship(side);
    }

    // Only what was live at the start of this pass gets updated
    let live = state.world.len();
    for index in 0..live {
        step_entity(state, index);
    }

    state.world.flush();
    state.world.purge();
}

fn step_entity(state: &mut MatchState, index: usize) {
    let bounds = state.world.bounds;
    let Some(entity) = state.world.get_mut(index) else {
        return;
    };
    if !entity.is_alive() {
        return;
    }
    match entity {
        Entity::Ember(ember) => ember.update(&bounds),
        Entity::PowerUp(powerup) => powerup.update(&bounds),
        Entity::Photon(photon) => {
            if !photon.update(&bounds) {
                return;
            }
            let shot = *photon;
            if let Some(target) = state.find_target(&shot) {
                state.resolve_hit(target, shot.side);
                if let Some(entity) = state.world.get_mut(index) {
                    entity.leave();
                }
            }
        }
    }
}
