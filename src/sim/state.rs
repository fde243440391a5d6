//! Match state: both ships, the arena, the power-up clock and the status log
//!
//! Everything a tick reads or writes lives here; there is no ambient global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Agent;
use super::combat::{Explosion, HitOutcome, Shootable, ShrapnelKind};
use super::ember::Ember;
use super::photon::Photon;
use super::powerup::{PowerUp, PowerUpKind};
use super::ship::{Ship, Side};
use super::world::{Entity, World};
use crate::geometry::Bounds;
use crate::hud::{CONTROLS_HELP, StatusLog, health_bar, win_message};
use crate::input::Command;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Both ships flying
    Playing,
    /// A ship ran out of hitpoints; the simulation keeps running
    Won(Side),
}

/// What a photon struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Ship(Side),
    /// Index into the world's live entities
    PowerUp(usize),
}

pub struct MatchState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub world: World,
    ships: [Ship; 2],
    /// Ticks until the next power-up spawn
    pub powerup_timer: u32,
    pub phase: MatchPhase,
    /// Ship that pointer presses fire for
    pointer_side: Option<Side>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub status: StatusLog,
}

impl MatchState {
    /// Start a match. Fails if the settings don't validate.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        let tuning = settings.tuning;
        let bounds = Bounds::centered(tuning.arena.width, tuning.arena.height);
        let ships = Side::BOTH.map(|side| Ship::new(side, settings.control(side), &tuning));

        let mut state = Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            tuning,
            world: World::new(bounds),
            ships,
            powerup_timer: 0,
            phase: MatchPhase::Playing,
            pointer_side: settings.pointer_side(),
            time_ticks: 0,
            status: StatusLog::new(tuning.hud.console_lines),
        };
        state.powerup_timer = tuning.powerup.start_delay + state.roll_powerup_delay();

        for line in CONTROLS_HELP {
            state.status.report(line);
        }
        state.status.report(state.health_line());

        log::info!(
            "Match started with seed {} (first power-up in {} ticks)",
            state.seed,
            state.powerup_timer
        );
        Ok(state)
    }

    pub fn ship(&self, side: Side) -> &Ship {
        &self.ships[side.index()]
    }

    pub fn ship_mut(&mut self, side: Side) -> &mut Ship {
        &mut self.ships[side.index()]
    }

    pub fn ships(&self) -> &[Ship; 2] {
        &self.ships
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Won(side) => Some(side),
            MatchPhase::Playing => None,
        }
    }

    /// Side steered by the pointer, player two first
    pub fn pointer_side(&self) -> Option<Side> {
        self.pointer_side
    }

    pub fn both_alive(&self) -> bool {
        self.ships.iter().all(|s| s.hp() > 0)
    }

    /// Everything to draw: live ships first, then the arena in spawn order
    pub fn agents(&self) -> impl Iterator<Item = &dyn Agent> {
        self.ships
            .iter()
            .filter(|s| s.is_alive())
            .map(|s| s as &dyn Agent)
            .chain(
                self.world
                    .entities()
                    .iter()
                    .filter(|e| e.is_alive())
                    .map(Entity::agent),
            )
    }

    /// Forward one input command to a ship
    pub fn apply_command(&mut self, side: Side, command: Command) {
        let ship = &mut self.ships[side.index()];
        match command {
            Command::TurnLeft => ship.turn_left(),
            Command::TurnRight => ship.turn_right(),
            Command::SpeedUp => ship.speed_up(),
            Command::SlowDown => ship.slow_down(),
            Command::Shoot => {
                ship.shoot(&mut self.world);
            }
        }
    }

    pub fn update_ship(&mut self, side: Side) {
        self.ships[side.index()].update(&mut self.world);
    }

    fn roll_powerup_delay(&mut self) -> u32 {
        let t = self.tuning.powerup;
        self.rng.random_range(t.min_delay..=t.max_delay)
    }

    /// Count down and spawn a power-up when the clock runs out
    pub fn update_powerup_timer(&mut self) {
        if self.powerup_timer > 0 {
            self.powerup_timer -= 1;
        }
        if self.powerup_timer == 0 && self.both_alive() {
            self.spawn_powerup();
            self.powerup_timer = self.roll_powerup_delay();
        }
    }

    /// Drop a random power-up at a random spot
    pub fn spawn_powerup(&mut self) -> PowerUpKind {
        let kind = PowerUpKind::random(&mut self.rng);
        let position = self.world.bounds.random_point(&mut self.rng);
        self.spawn_powerup_at(kind, position);
        kind
    }

    pub fn spawn_powerup_at(&mut self, kind: PowerUpKind, position: Vec2) {
        log::debug!("Spawning {:?} at ({:.1}, {:.1})", kind, position.x, position.y);
        self.world
            .spawn(Entity::PowerUp(PowerUp::new(kind, position, &self.tuning.powerup)));
    }

    /// First shootable hit by the photon: ships, then power-ups in spawn order
    pub fn find_target(&self, photon: &Photon) -> Option<HitTarget> {
        let bounds = &self.world.bounds;
        if let Some(ship) = self.ships.iter().find(|s| s.is_hit_by(photon, bounds)) {
            return Some(HitTarget::Ship(ship.side));
        }
        self.world
            .entities()
            .iter()
            .position(|e| matches!(e, Entity::PowerUp(p) if p.is_hit_by(photon, bounds)))
            .map(HitTarget::PowerUp)
    }

    /// Apply a hit from a photon fired by `shooter`
    pub fn resolve_hit(&mut self, target: HitTarget, shooter: Side) {
        match target {
            HitTarget::Ship(side) => {
                let ship = &mut self.ships[side.index()];
                let explosion = ship.explode();
                let at = ship.position();
                self.spawn_shrapnel(at, explosion);
                match explosion.outcome {
                    HitOutcome::Shielded => log::debug!("{side:?} shield absorbed a hit"),
                    HitOutcome::Damaged => self.report_health(),
                    HitOutcome::Destroyed => {
                        log::debug!("{side:?} destroyed");
                        if self.phase == MatchPhase::Playing {
                            self.phase = MatchPhase::Won(side.other());
                            log::info!("{:?} wins after {} ticks", side.other(), self.time_ticks);
                        }
                        self.report_health();
                    }
                    HitOutcome::Spent => {}
                }
            }
            HitTarget::PowerUp(index) => {
                let Some(Entity::PowerUp(powerup)) = self.world.get_mut(index) else {
                    return;
                };
                // The effect goes to whoever shot it
                powerup.side = Some(shooter);
                powerup.kind.apply(&mut self.ships[shooter.index()]);
                let kind = powerup.kind;
                let explosion = powerup.explode();
                let at = powerup.position();
                log::info!("{shooter:?} picked up {kind:?}");
                self.spawn_shrapnel(at, explosion);
            }
        }
    }

    fn spawn_shrapnel(&mut self, at: Vec2, explosion: Explosion) {
        let Some(ShrapnelKind::Ember) = explosion.kind else {
            return;
        };
        for _ in 0..explosion.shrapnel {
            let ember = Ember::new(at, &self.tuning.ember, &mut self.rng);
            self.world.spawn(Entity::Ember(ember));
        }
    }

    fn health_line(&self) -> String {
        let [one, two] = &self.ships;
        health_bar(
            (one.hp(), one.combat.hp_max),
            (two.hp(), two.combat.hp_max),
            self.tuning.hud.hp_scale,
        )
    }

    fn report_health(&mut self) {
        self.status.blank();
        self.status.blank();
        self.status.report(self.health_line());
        for side in Side::BOTH {
            if self.ship(side).hp() <= 0 {
                self.status.report(win_message(side.other()));
            }
        }
        self.status.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_layout() {
        let state = MatchState::new(&Settings::default()).unwrap();
        assert_eq!(state.phase, MatchPhase::Playing);
        assert!(state.world.is_empty());
        assert!((180..=800).contains(&state.powerup_timer));
        assert_eq!(state.status.last(), Some("[████████████] VS [████████████]"));
        assert_eq!(state.agents().count(), 2);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.tuning.powerup.min_delay = 900;
        assert!(MatchState::new(&settings).is_err());
        settings.tuning.powerup.min_delay = 180;
        settings.tuning.ship.shot_delay = 0;
        assert!(MatchState::new(&settings).is_err());
    }

    #[test]
    fn test_ships_tried_before_powerups() {
        let mut state = MatchState::new(&Settings::default()).unwrap();
        let at = state.ship(Side::Two).position();
        state.spawn_powerup_at(PowerUpKind::Shield, at);
        state.world.flush();
        let photon = Photon::new(at, Vec2::X, Side::One, false, &state.tuning.photon);
        assert_eq!(state.find_target(&photon), Some(HitTarget::Ship(Side::Two)));
    }

    #[test]
    fn test_own_photon_passes_through() {
        let state = MatchState::new(&Settings::default()).unwrap();
        let at = state.ship(Side::One).position();
        let photon = Photon::new(at, Vec2::X, Side::One, false, &state.tuning.photon);
        assert_eq!(state.find_target(&photon), None);
    }

    #[test]
    fn test_powerup_goes_to_shooter() {
        let mut state = MatchState::new(&Settings::default()).unwrap();
        state.spawn_powerup_at(PowerUpKind::ReverseShot, Vec2::new(20.0, 0.0));
        state.world.flush();
        let photon = Photon::new(Vec2::new(20.0, 0.5), Vec2::X, Side::Two, false, &state.tuning.photon);
        let target = state.find_target(&photon);
        assert_eq!(target, Some(HitTarget::PowerUp(0)));
        state.resolve_hit(HitTarget::PowerUp(0), Side::Two);
        assert!(state.ship(Side::Two).powerups.reverse_shot);
        assert!(!state.ship(Side::One).powerups.reverse_shot);
        let p = state.world.get(0).and_then(Entity::as_powerup).unwrap();
        assert_eq!(p.side, Some(Side::Two));
        assert!(!p.is_alive());
        assert_eq!(state.world.pending_len(), 2);
    }

    #[test]
    fn test_kill_reports_winner() {
        let mut state = MatchState::new(&Settings::default()).unwrap();
        for _ in 0..4 {
            state.resolve_hit(HitTarget::Ship(Side::One), Side::Two);
        }
        assert_eq!(state.winner(), Some(Side::Two));
        assert!(!state.ship(Side::One).is_alive());
        let lines: Vec<_> = state.status.lines().collect();
        assert!(lines.contains(&"PLAYER TWO WINS!!!"));
        assert!(lines.contains(&"[            ] VS [████████████]"));
        assert!(!state.both_alive());
    }

    #[test]
    fn test_powerup_clock_stops_after_match() {
        let mut state = MatchState::new(&Settings::default()).unwrap();
        state.ship_mut(Side::One).combat.hp = 0;
        state.powerup_timer = 1;
        state.update_powerup_timer();
        assert_eq!(state.world.pending_len(), 0);
    }
}
