//! Per-call rendering style

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Vec2;

/// Horizontal alignment relative to the render position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Lines start at the position
    #[default]
    Left,
    /// Lines are centered on the position
    Center,
    /// Lines end at the position
    Right,
}

impl TextAlign {
    /// Horizontal shift applied to a line of `width`
    pub fn offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        }
    }
}

/// Background panel behind the text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundStyle {
    pub enabled: bool,
    /// One panel around the whole paragraph instead of one per line
    pub global: bool,
    pub color: Color,
    pub padding_x: f32,
    pub padding_y: f32,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            global: false,
            color: Color::rgba(0, 0, 0, 160),
            padding_x: 8.0,
            padding_y: 6.0,
        }
    }
}

/// Drop shadow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowStyle {
    pub enabled: bool,
    pub color: Color,
    pub offset: Vec2,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            offset: Vec2::new(2.0, 2.0),
        }
    }
}

/// How outline copies are distributed around a glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineMode {
    /// Up, down, left and right
    #[default]
    Cross,
    /// Cross plus the four diagonals
    Ring,
}

impl OutlineMode {
    /// Unit offsets, scaled by the outline thickness when drawn
    pub fn directions(self) -> &'static [(f32, f32)] {
        const CROSS: [(f32, f32); 4] = [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)];
        const RING: [(f32, f32); 8] = [
            (-1.0, 0.0),
            (1.0, 0.0),
            (0.0, -1.0),
            (0.0, 1.0),
            (-0.707, -0.707),
            (0.707, -0.707),
            (-0.707, 0.707),
            (0.707, 0.707),
        ];
        match self {
            OutlineMode::Cross => &CROSS,
            OutlineMode::Ring => &RING,
        }
    }
}

/// Outline drawn from offset glyph copies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineStyle {
    pub enabled: bool,
    pub color: Color,
    pub thickness: f32,
    pub mode: OutlineMode,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            thickness: 1.0,
            mode: OutlineMode::Cross,
        }
    }
}

/// Rendering parameters for one `render_styled_text` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Color outside `[color=...]` tags
    pub base_color: Color,
    pub align: TextAlign,
    /// Wrap width in pixels, 0 for unlimited
    pub max_width: f32,
    /// Line height multiplier
    pub line_spacing: f32,
    pub background: BackgroundStyle,
    pub shadow: ShadowStyle,
    pub outline: OutlineStyle,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            base_color: Color::RAY_WHITE,
            align: TextAlign::Left,
            max_width: 0.0,
            line_spacing: 1.0,
            background: BackgroundStyle::default(),
            shadow: ShadowStyle::default(),
            outline: OutlineStyle::default(),
        }
    }
}

impl TextStyle {
    /// Set base color
    pub fn color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    /// Set text alignment
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set wrap width
    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = width;
        self
    }

    /// Set line spacing multiplier
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Enable a background panel
    pub fn background(mut self, color: Color, global: bool) -> Self {
        self.background.enabled = true;
        self.background.global = global;
        self.background.color = color;
        self
    }

    /// Enable a drop shadow
    pub fn shadow(mut self, color: Color, offset: Vec2) -> Self {
        self.shadow = ShadowStyle { enabled: true, color, offset };
        self
    }

    /// Enable an outline
    pub fn outline(mut self, color: Color, thickness: f32) -> Self {
        self.outline.enabled = true;
        self.outline.color = color;
        self.outline.thickness = thickness;
        self
    }

    /// Copy with zero-valued sizes replaced by their defaults
    pub fn resolved(&self) -> TextStyle {
        let mut style = *self;
        let defaults = TextStyle::default();
        if style.background.padding_x == 0.0 {
            style.background.padding_x = defaults.background.padding_x;
        }
        if style.background.padding_y == 0.0 {
            style.background.padding_y = defaults.background.padding_y;
        }
        if style.outline.thickness == 0.0 {
            style.outline.thickness = defaults.outline.thickness;
        }
        if style.line_spacing == 0.0 {
            style.line_spacing = defaults.line_spacing;
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_offset() {
        assert_eq!(TextAlign::Left.offset(40.0), 0.0);
        assert_eq!(TextAlign::Center.offset(40.0), -20.0);
        assert_eq!(TextAlign::Right.offset(40.0), -40.0);
    }

    #[test]
    fn test_resolved_fills_zeroes() {
        let mut style = TextStyle::default();
        style.line_spacing = 0.0;
        style.outline.thickness = 0.0;
        style.background.padding_x = 0.0;
        style.background.padding_y = 3.0;

        let resolved = style.resolved();
        assert_eq!(resolved.line_spacing, 1.0);
        assert_eq!(resolved.outline.thickness, 1.0);
        assert_eq!(resolved.background.padding_x, 8.0);
        assert_eq!(resolved.background.padding_y, 3.0);
    }

    #[test]
    fn test_outline_directions() {
        assert_eq!(OutlineMode::Cross.directions().len(), 4);
        assert_eq!(OutlineMode::Ring.directions().len(), 8);
    }

    #[test]
    fn test_style_from_json() {
        let json = r#"{
            "base_color": { "r": 10, "g": 20, "b": 30, "a": 255 },
            "align": "center",
            "max_width": 650.0,
            "background": { "enabled": true, "global": true },
            "outline": { "enabled": true, "mode": "ring" }
        }"#;
        let style: TextStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.base_color, Color::rgb(10, 20, 30));
        assert_eq!(style.align, TextAlign::Center);
        assert_eq!(style.max_width, 650.0);
        assert_eq!(style.line_spacing, 1.0);
        assert!(style.background.global);
        assert_eq!(style.background.padding_x, 8.0);
        assert_eq!(style.outline.mode, OutlineMode::Ring);
        assert!(!style.shadow.enabled);
    }
}
