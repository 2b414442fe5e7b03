use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque color token carried by filled cells and pieces.
///
/// The engine never interprets colors; it only copies them from the
/// tetromino catalog onto the board and hands them to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);
    pub const GREEN: Self = Self::rgb(0x00, 0xff, 0x00);
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xff);
    pub const MAGENTA: Self = Self::rgb(0xff, 0x00, 0xff);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_as_hex() {
        assert_eq!(Color::rgb(0x00, 0xf0, 0xf0).to_string(), "#00f0f0");
        assert_eq!(Color::MAGENTA.to_string(), "#ff00ff");
    }
}
