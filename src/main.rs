//! Dogfight entry point
//!
//! Headless replay runner: every stdin line is one tick, every character a
//! key press. `*` presses the pointer, a line starting with `@x,y` moves it,
//! and the quit key stops the replay.

use std::io::{self, BufRead, Write};

use glam::Vec2;

use dogfight::Settings;
use dogfight::input::KeyBindings;
use dogfight::sim::{MatchState, Side, TickInput, tick};

/// Parse `@x,y` into a pointer position
fn parse_pointer(line: &str) -> Option<Vec2> {
    let (x, y) = line.strip_prefix('@')?.split_once(',')?;
    Some(Vec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Turn one replay line into this tick's input. Returns `None` on quit.
fn parse_line(line: &str, bindings: &KeyBindings) -> Option<TickInput> {
    let mut input = TickInput::default();
    if let Some(pointer) = parse_pointer(line) {
        input.pointer = Some(pointer);
        return Some(input);
    }
    for key in line.chars() {
        if bindings.is_quit(key) {
            return None;
        }
        if key == '*' {
            input.pointer_pressed = true;
        } else if let Some(command) = bindings.command_for(key) {
            input.commands.push(command);
        }
    }
    Some(input)
}

/// Print whatever the status log gained since `seen`
fn print_new_status(state: &MatchState, seen: &mut u64, out: &mut impl Write) -> io::Result<()> {
    let fresh = (state.status.written() - *seen) as usize;
    let lines: Vec<&str> = state.status.lines().collect();
    for line in &lines[lines.len().saturating_sub(fresh)..] {
        writeln!(out, "{line}")?;
    }
    *seen = state.status.written();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    log::info!(
        "Dogfight starting (seed {}, player one {}, player two {})",
        settings.seed,
        settings.player_one.as_str(),
        settings.player_two.as_str()
    );

    let bindings = KeyBindings::default();
    let mut state = MatchState::new(&settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut seen = 0;
    print_new_status(&state, &mut seen, &mut out)?;

    for line in io::stdin().lock().lines() {
        let Some(input) = parse_line(&line?, &bindings) else {
            log::info!("Quit after {} ticks", state.time_ticks);
            break;
        };
        tick(&mut state, &input);
        print_new_status(&state, &mut seen, &mut out)?;
    }

    writeln!(out, "ticks: {}", state.time_ticks)?;
    for side in Side::BOTH {
        writeln!(out, "{:?} hp: {}", side, state.ship(side).hp())?;
    }
    match state.winner() {
        Some(side) => writeln!(out, "winner: {side:?}")?,
        None => writeln!(out, "winner: none")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogfight::input::Command;

    #[test]
    fn test_parse_pointer_line() {
        let input = parse_line("@3.5, -2", &KeyBindings::default()).unwrap();
        assert_eq!(input.pointer, Some(Vec2::new(3.5, -2.0)));
        assert!(input.commands.is_empty());
    }

    #[test]
    fn test_parse_keys_and_quit() {
        let bindings = KeyBindings::default();
        let input = parse_line("w*", &bindings).unwrap();
        assert_eq!(input.commands, vec![(Side::One, Command::SpeedUp)]);
        assert!(input.pointer_pressed);
        assert!(parse_line("wq", &bindings).is_none());
    }
}
