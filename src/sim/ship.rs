//! Player ships
//!
//! A ship is a shootable agent with thrust/turn physics, a shot cooldown that
//! doubles as its post-shot grace window, and the power-ups it has collected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Agent, Motion};
use super::combat::{Combat, Shootable};
use super::photon::Photon;
use super::world::{Entity, World};
use crate::color::Color;
use crate::consts::MULTI_SHOT_SPACING;
use crate::geometry::{Bounds, direction_or_default, perp};
use crate::heading_from_degrees;
use crate::settings::ControlScheme;
use crate::tuning::{PhotonTuning, ShipTuning, Tuning};

/// Which player a ship, photon or collected power-up belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// +1 for player one, -1 for player two; player two's layout is player
    /// one's reflected through the origin.
    #[inline]
    pub fn mirror(self) -> f32 {
        match self {
            Side::One => 1.0,
            Side::Two => -1.0,
        }
    }
}

/// Heading source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Angle in degrees plus turn momentum that bleeds off one unit per tick
    Keyboard { angle: f32, turn_impulse: i32 },
    /// Chase the pointer; `bungee` is sqrt of the distance to it
    Pointer { bungee: f32 },
}

/// Collected power-up effects. All permanent once granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerUpFlags {
    /// Every shot also fires out of the tail
    pub reverse_shot: bool,
    /// Thrust is multiplied by the speed-boost factor
    pub speed_boost: bool,
    /// Extra automatic shots per cooldown window
    pub multi_shot: u32,
    /// Extra shots already fired in the current window
    pub multi_shot_progress: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub motion: Motion,
    pub combat: Combat,
    pub side: Side,
    pub steering: Steering,
    /// Unit heading, refreshed every tick
    pub heading: Vec2,
    /// Ticks until the next shot is allowed
    pub shot_timer: u32,
    /// Remaining armed thrust frames
    pub impulse: u32,
    pub powerups: PowerUpFlags,
    pub tuning: ShipTuning,
    pub photon: PhotonTuning,
}

impl Ship {
    pub fn new(side: Side, scheme: ControlScheme, tuning: &Tuning) -> Self {
        let t = tuning.ship;
        let mirror = side.mirror();
        let position = Vec2::new(-t.start_x, t.start_y) * mirror;
        let steering = match scheme {
            ControlScheme::Keyboard => Steering::Keyboard {
                angle: t.start_angle,
                turn_impulse: 0,
            },
            ControlScheme::Pointer => Steering::Pointer { bungee: 0.0 },
        };
        Self {
            motion: Motion::new(position, Vec2::ZERO),
            combat: Combat::new(t.radius(), t.hp_max, t.death_burst),
            side,
            steering,
            heading: heading_from_degrees(t.start_angle) * mirror,
            shot_timer: 0,
            impulse: 0,
            powerups: PowerUpFlags::default(),
            tuning: t,
            photon: tuning.photon,
        }
    }

    pub fn hp(&self) -> i32 {
        self.combat.hp
    }

    pub fn turn_left(&mut self) {
        if let Steering::Keyboard { turn_impulse, .. } = &mut self.steering {
            *turn_impulse += self.tuning.turn_impulse;
        }
    }

    pub fn turn_right(&mut self) {
        if let Steering::Keyboard { turn_impulse, .. } = &mut self.steering {
            *turn_impulse -= self.tuning.turn_impulse;
        }
    }

    /// Arm a burst of thrust frames
    pub fn speed_up(&mut self) {
        self.impulse = self.tuning.impulse_frames;
    }

    /// One-shot brake: quadratic drag on the current velocity
    pub fn slow_down(&mut self) {
        let keep = 1.0 - self.tuning.drag;
        self.motion.velocity *= keep * keep;
    }

    /// Fire if the cooldown has run out. Returns whether a shot went out.
    pub fn shoot(&mut self, world: &mut World) -> bool {
        if !self.motion.alive || self.shot_timer > 0 {
            return false;
        }
        self.fire(world);
        self.powerups.multi_shot_progress = 0;
        self.shot_timer = self.tuning.shot_delay;
        true
    }

    /// Spawn the forward photon, plus a tail photon with reverse-shot
    fn fire(&self, world: &mut World) {
        let pos = self.motion.position;
        world.spawn(Entity::Photon(Photon::new(pos, self.heading, self.side, false, &self.photon)));
        if self.powerups.reverse_shot {
            world.spawn(Entity::Photon(Photon::new(pos, self.heading, self.side, true, &self.photon)));
        }
    }

    /// Follow-up shots land every `MULTI_SHOT_SPACING` ticks after the first shot
    fn multi_shot_due(&self) -> bool {
        let p = &self.powerups;
        if p.multi_shot == 0 || p.multi_shot_progress >= p.multi_shot {
            return false;
        }
        let offset = MULTI_SHOT_SPACING * (p.multi_shot_progress + 1);
        self.tuning.shot_delay.checked_sub(offset) == Some(self.shot_timer)
    }

    fn refresh_heading(&mut self, pointer: Vec2) {
        match &mut self.steering {
            Steering::Keyboard { angle, turn_impulse } => {
                if *turn_impulse != 0 {
                    *angle += *turn_impulse as f32 * self.tuning.turn_rate();
                    *turn_impulse -= turn_impulse.signum();
                }
                self.heading = heading_from_degrees(*angle) * self.side.mirror();
            }
            Steering::Pointer { bungee } => {
                let offset = pointer - self.motion.position;
                self.heading = direction_or_default(offset);
                *bungee = offset.length().sqrt();
                self.impulse = self.tuning.impulse_frames;
            }
        }
    }

    /// One tick: cooldown, scheduled multi-shots, heading, then motion
    pub fn update(&mut self, world: &mut World) {
        if !self.motion.alive {
            return;
        }
        if self.shot_timer > 0 {
            self.shot_timer -= 1;
        }
        self.refresh_heading(world.pointer);
        if self.multi_shot_due() {
            self.fire(world);
            self.powerups.multi_shot_progress += 1;
        }
        let bounds: Bounds = world.bounds;
        self.advance(&bounds);
    }
}

impl Agent for Ship {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn color(&self) -> Color {
        // Lighter while invincible
        match (self.side, self.in_grace()) {
            (Side::One, true) => Color::rgb(0xffaaa1),
            (Side::One, false) => Color::rgb(0xf74830),
            (Side::Two, true) => Color::rgb(0xbcdcff),
            (Side::Two, false) => Color::rgb(0x3090f7),
        }
    }

    fn shape(&self) -> Vec<Vec2> {
        let scale = self.tuning.scale;
        let p = self.motion.position;
        let side = perp(self.heading);
        vec![
            p + self.heading * 1.5 * scale,
            p + side * 0.5 * scale,
            p - side * 0.5 * scale,
        ]
    }

    fn steer(&mut self) -> Vec2 {
        if self.impulse == 0 {
            return Vec2::ZERO;
        }
        self.impulse -= 1;
        let boost = if self.powerups.speed_boost {
            self.tuning.speed_boost
        } else {
            1.0
        };
        let bungee = match self.steering {
            Steering::Pointer { bungee } => bungee,
            Steering::Keyboard { .. } => 1.0,
        };
        self.heading * self.tuning.acceleration * boost * bungee
    }

    fn trim_physics(&mut self) {
        let speed = self.motion.velocity.length();
        if speed > self.tuning.max_speed {
            self.motion.velocity *= self.tuning.max_speed / speed;
            self.impulse = 0;
        }
    }
}

impl Shootable for Ship {
    fn combat(&self) -> &Combat {
        &self.combat
    }

    fn combat_mut(&mut self) -> &mut Combat {
        &mut self.combat
    }

    fn side(&self) -> Option<Side> {
        Some(self.side)
    }

    fn in_grace(&self) -> bool {
        self.shot_timer + self.tuning.i_frames > self.tuning.shot_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUpKind;

    fn world() -> World {
        World::new(Bounds::centered(60.0, 45.0))
    }

    fn ship(side: Side) -> Ship {
        Ship::new(side, ControlScheme::Keyboard, &Tuning::default())
    }

    #[test]
    fn test_start_positions_are_mirrored() {
        assert_eq!(ship(Side::One).position(), Vec2::new(-5.0, 5.0));
        assert_eq!(ship(Side::Two).position(), Vec2::new(5.0, -5.0));
        assert_eq!(ship(Side::Two).heading, -ship(Side::One).heading);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut w = world();
        let mut s = ship(Side::One);
        assert!(s.shoot(&mut w));
        assert!(!s.shoot(&mut w));
        w.flush();
        assert_eq!(w.len(), 1);
        for _ in 0..20 {
            s.update(&mut w);
        }
        assert_eq!(s.shot_timer, 0);
        assert!(s.shoot(&mut w));
    }

    #[test]
    fn test_grace_window_after_shot() {
        let mut w = world();
        let mut s = ship(Side::One);
        assert!(!s.in_grace());
        s.shoot(&mut w);
        assert!(s.in_grace());
        for _ in 0..10 {
            s.update(&mut w);
        }
        // timer at 10 == delay - i_frames: window closed
        assert_eq!(s.shot_timer, 10);
        assert!(!s.in_grace());
    }

    #[test]
    fn test_reverse_shot_fires_tail_photon() {
        let mut w = world();
        let mut s = ship(Side::Two);
        s.powerups.reverse_shot = true;
        s.shoot(&mut w);
        w.flush();
        let velocities: Vec<Vec2> = w
            .entities()
            .iter()
            .filter_map(|e| match e {
                Entity::Photon(p) => Some(p.motion.velocity),
                _ => None,
            })
            .collect();
        assert_eq!(velocities.len(), 2);
        assert_eq!(velocities[0], -velocities[1]);
    }

    #[test]
    fn test_multi_shot_rides_inside_cooldown() {
        let mut w = world();
        let mut s = ship(Side::One);
        s.powerups.multi_shot = 2;
        s.shoot(&mut w);
        let mut fired_at = Vec::new();
        for tick in 1..=20 {
            let before = w.pending_len();
            s.update(&mut w);
            if w.pending_len() > before {
                fired_at.push(tick);
            }
        }
        assert_eq!(fired_at, vec![4, 8]);
        assert_eq!(s.powerups.multi_shot_progress, 2);
    }

    #[test]
    fn test_thrust_has_one_tick_lag_and_is_capped() {
        let mut w = world();
        let mut s = ship(Side::One);
        s.speed_up();
        s.update(&mut w);
        // acceleration only computed this tick
        assert_eq!(s.motion.velocity, Vec2::ZERO);
        s.update(&mut w);
        assert!(s.motion.velocity.y > 0.0);

        s.motion.velocity = Vec2::new(10.0, 0.0);
        s.impulse = 3;
        s.trim_physics();
        assert!((s.motion.velocity.length() - 2.0).abs() < 1e-5);
        assert_eq!(s.impulse, 0);
    }

    #[test]
    fn test_speed_boost_multiplies_thrust() {
        let mut w = world();
        let mut plain = ship(Side::One);
        let mut boosted = plain.clone();
        PowerUpKind::SpeedBoost.apply(&mut boosted);

        plain.speed_up();
        boosted.speed_up();
        plain.update(&mut w);
        boosted.update(&mut w);

        assert_ne!(plain.motion.accel, Vec2::ZERO);
        assert_eq!(boosted.motion.accel, plain.motion.accel * plain.tuning.speed_boost);
    }

    #[test]
    fn test_slow_down_applies_quadratic_drag() {
        let mut s = ship(Side::One);
        s.motion.velocity = Vec2::new(1.0, 0.0);
        s.slow_down();
        assert!((s.motion.velocity.x - 0.9025).abs() < 1e-6);
    }

    #[test]
    fn test_turn_momentum_bleeds_off() {
        let mut w = world();
        let mut s = ship(Side::One);
        s.turn_left();
        for _ in 0..5 {
            s.update(&mut w);
        }
        match s.steering {
            Steering::Keyboard { angle, turn_impulse } => {
                assert!((angle - 108.0).abs() < 1e-3);
                assert_eq!(turn_impulse, 0);
            }
            Steering::Pointer { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_pointer_heading_and_bungee() {
        let mut w = world();
        let mut s = Ship::new(Side::Two, ControlScheme::Pointer, &Tuning::default());
        w.pointer = Vec2::new(5.0, 4.0); // 9 units straight up from (5, -5)
        s.update(&mut w);
        assert!((s.heading - Vec2::Y).length() < 1e-6);
        assert!((s.motion.accel.y - 0.05 * 3.0).abs() < 1e-5);

        // Pointer sitting on the ship: default heading, no pull
        w.pointer = s.position();
        s.motion.velocity = Vec2::ZERO;
        s.update(&mut w);
        assert_eq!(s.heading, crate::DEFAULT_HEADING);
        assert_eq!(s.motion.accel, Vec2::ZERO);
    }

    #[test]
    fn test_ship_shape_is_triangle() {
        let s = ship(Side::One);
        let shape = s.shape();
        assert_eq!(shape.len(), 3);
        assert!((shape[0] - Vec2::new(-5.0, 9.5)).length() < 1e-5);
    }
}
