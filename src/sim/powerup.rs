//! Power-ups: stationary one-hit targets that grant an effect to whoever shoots them

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Agent, Motion};
use super::combat::{Combat, Shootable};
use super::ship::{Ship, Side};
use crate::color::Color;
use crate::geometry::Bounds;
use crate::tuning::PowerUpTuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ReverseShot,
    Shield,
    MultiShot,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ReverseShot,
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
        PowerUpKind::SpeedBoost,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::ReverseShot => Color::rgb(0x48c9b0),
            PowerUpKind::Shield => Color::rgb(0xe5e7e9),
            PowerUpKind::MultiShot => Color::rgb(0xbb8fce),
            PowerUpKind::SpeedBoost => Color::rgb(0xf9e79f),
        }
    }

    /// Grant the effect. Effects never expire.
    pub fn apply(self, ship: &mut Ship) {
        match self {
            PowerUpKind::ReverseShot => ship.powerups.reverse_shot = true,
            PowerUpKind::Shield => ship.combat.shield = true,
            PowerUpKind::MultiShot => {
                ship.powerups.multi_shot = ship.powerups.multi_shot.saturating_add(1)
            }
            PowerUpKind::SpeedBoost => ship.powerups.speed_boost = true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub motion: Motion,
    pub combat: Combat,
    pub kind: PowerUpKind,
    /// Unowned until a photon hits it; then the shooter's side
    pub side: Option<Side>,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2, tuning: &PowerUpTuning) -> Self {
        let mut combat = Combat::new(tuning.radius, tuning.hp, tuning.death_burst);
        combat.is_powerup = true;
        Self {
            motion: Motion::new(position, Vec2::ZERO),
            combat,
            kind,
            side: None,
        }
    }

    /// Stationary, but still trimmed each tick like any other body
    pub fn update(&mut self, bounds: &Bounds) {
        self.advance(bounds);
    }

    fn half_size(&self) -> f32 {
        self.combat.radius
    }
}

impl Agent for PowerUp {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn color(&self) -> Color {
        self.kind.color()
    }

    fn shape(&self) -> Vec<Vec2> {
        let p = self.motion.position;
        let s = self.half_size();
        vec![
            p + Vec2::new(0.0, s),
            p + Vec2::new(-s, 0.0),
            p + Vec2::new(0.0, -s),
            p + Vec2::new(s, 0.0),
        ]
    }
}

impl Shootable for PowerUp {
    fn combat(&self) -> &Combat {
        &self.combat
    }

    fn combat_mut(&mut self) -> &mut Combat {
        &mut self.combat
    }

    fn side(&self) -> Option<Side> {
        self.side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ControlScheme;
    use crate::sim::combat::HitOutcome;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_effects_flip_ship_flags() {
        let mut ship = Ship::new(Side::One, ControlScheme::Keyboard, &Tuning::default());
        PowerUpKind::ReverseShot.apply(&mut ship);
        PowerUpKind::Shield.apply(&mut ship);
        PowerUpKind::MultiShot.apply(&mut ship);
        PowerUpKind::MultiShot.apply(&mut ship);
        PowerUpKind::SpeedBoost.apply(&mut ship);
        assert!(ship.powerups.reverse_shot);
        assert!(ship.combat.shield);
        assert_eq!(ship.powerups.multi_shot, 2);
        assert!(ship.powerups.speed_boost);
    }

    #[test]
    fn test_powerup_dies_on_first_hit() {
        let mut p = PowerUp::new(PowerUpKind::Shield, Vec2::ZERO, &PowerUpTuning::default());
        assert!(p.combat.is_powerup);
        assert!(!p.combat.shield);
        let e = p.explode();
        assert_eq!(e.outcome, HitOutcome::Destroyed);
        assert_eq!(e.shrapnel, 2);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let k = PowerUpKind::random(&mut rng);
            let i = PowerUpKind::ALL.iter().position(|&a| a == k).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_diamond_shape() {
        let p = PowerUp::new(PowerUpKind::MultiShot, Vec2::new(1.0, 1.0), &PowerUpTuning::default());
        assert_eq!(p.shape()[0], Vec2::new(1.0, 2.0));
        assert_eq!(p.color().to_string(), "#bb8fce");
    }
}
