//! Textual status display: a fixed-height console of report lines

use std::collections::VecDeque;

use crate::sim::Side;

/// Controls help shown when a match starts
pub const CONTROLS_HELP: [&str; 3] = [
    "Player one (red): Press a and d to turn, w to accelerate, s to decelerate, and c to shoot.",
    "Player two (blue): Press l and ' to turn, p to accelerate, ; to decelerate, and / to shoot.",
    "Press q to quit.",
];

/// Fixed-height status log; the oldest line scrolls off
#[derive(Debug, Clone)]
pub struct StatusLog {
    lines: VecDeque<String>,
    capacity: usize,
    /// Total lines ever reported
    written: u64,
}

impl StatusLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    /// Append a line
    pub fn report(&mut self, line: impl Into<String>) {
        self.written += 1;
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Append an empty line
    pub fn blank(&mut self) {
        self.report(String::new());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

/// `[   ██████] VS [██████   ]` with each bar filling from the center
pub fn health_bar(one: (i32, i32), two: (i32, i32), scale: usize) -> String {
    let cells = |n: i32| n.max(0) as usize * scale;
    let (hp1, max1) = one;
    let (hp2, max2) = two;
    format!(
        "[{}{}] VS [{}{}]",
        " ".repeat(cells(max1 - hp1)),
        "█".repeat(cells(hp1)),
        "█".repeat(cells(hp2)),
        " ".repeat(cells(max2 - hp2)),
    )
}

pub fn win_message(winner: Side) -> &'static str {
    match winner {
        Side::One => "PLAYER ONE WINS!!!",
        Side::Two => "PLAYER TWO WINS!!!",
    }
}
