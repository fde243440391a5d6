//! Key bindings
//!
//! Maps discrete key-down characters to per-side ship commands.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// A single ship action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    TurnLeft,
    TurnRight,
    SpeedUp,
    SlowDown,
    Shoot,
}

/// Keys for one ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub speed_up: char,
    pub slow_down: char,
    pub turn_left: char,
    pub turn_right: char,
    pub shoot: char,
}

impl KeySet {
    fn command_for(&self, key: char) -> Option<Command> {
        match key {
            k if k == self.speed_up => Some(Command::SpeedUp),
            k if k == self.slow_down => Some(Command::SlowDown),
            k if k == self.turn_left => Some(Command::TurnLeft),
            k if k == self.turn_right => Some(Command::TurnRight),
            k if k == self.shoot => Some(Command::Shoot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub one: KeySet,
    pub two: KeySet,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            one: KeySet {
                speed_up: 'w',
                slow_down: 's',
                turn_left: 'a',
                turn_right: 'd',
                shoot: 'c',
            },
            two: KeySet {
                speed_up: 'p',
                slow_down: ';',
                turn_left: 'l',
                turn_right: '\'',
                shoot: '/',
            },
            quit: 'q',
        }
    }
}

impl KeyBindings {
    /// Command bound to a key, player one's bindings first
    pub fn command_for(&self, key: char) -> Option<(Side, Command)> {
        self.one
            .command_for(key)
            .map(|c| (Side::One, c))
            .or_else(|| self.two.command_for(key).map(|c| (Side::Two, c)))
    }

    pub fn is_quit(&self, key: char) -> bool {
        key == self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.command_for('w'), Some((Side::One, Command::SpeedUp)));
        assert_eq!(keys.command_for('c'), Some((Side::One, Command::Shoot)));
        assert_eq!(keys.command_for('\''), Some((Side::Two, Command::TurnRight)));
        assert_eq!(keys.command_for(';'), Some((Side::Two, Command::SlowDown)));
        assert_eq!(keys.command_for('x'), None);
        assert!(keys.is_quit('q'));
    }
}
