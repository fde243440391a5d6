//! 24-bit colour values handed to the render layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB colour packed as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(packed: u32) -> Self {
        Self(packed & 0x00ff_ffff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
