//! RGBA colors and the markup color vocabulary

use serde::{Deserialize, Serialize};

/// Color (RGBA, straight alpha)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RAY_WHITE: Color = Color::rgb(245, 245, 245);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const DARK_BLUE: Color = Color::rgb(0, 82, 172);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);
    pub const MAROON: Color = Color::rgb(190, 33, 55);
    pub const GRAY: Color = Color::rgb(130, 130, 130);

    /// Color used for unknown names in `[color=...]` tags
    pub const DEFAULT_TAG: Color = Color::RAY_WHITE;

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Look up a markup color name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Color> {
        const NAMED: [(&str, Color); 12] = [
            ("red", Color::RED),
            ("green", Color::GREEN),
            ("blue", Color::BLUE),
            ("yellow", Color::YELLOW),
            ("purple", Color::PURPLE),
            ("orange", Color::ORANGE),
            ("darkblue", Color::DARK_BLUE),
            ("darkgray", Color::DARK_GRAY),
            ("maroon", Color::MAROON),
            ("white", Color::WHITE),
            ("black", Color::BLACK),
            ("gray", Color::GRAY),
        ];

        let name = name.trim();
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    /// Resolve a tag name, falling back to [`Color::DEFAULT_TAG`].
    pub fn from_name_or_default(name: &str) -> Color {
        Self::from_name(name).unwrap_or(Self::DEFAULT_TAG)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RAY_WHITE
    }
}
