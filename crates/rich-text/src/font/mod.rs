//! Font metrics and the rasterizer seam
//!
//! The glyph cache never parses fonts itself. It talks to a [`Rasterizer`],
//! which turns a codepoint into a single-channel coverage bitmap plus the
//! metrics needed to position it. [`TtfRasterizer`] is the bundled
//! implementation (ttf-parser outlines filled with tiny-skia).

mod ttf;

pub use ttf::TtfRasterizer;

/// Unscaled vertical metrics, in font units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalMetrics {
    /// Distance from baseline to the top of the tallest glyphs (positive)
    pub ascent: i32,
    /// Distance from baseline to the bottom of descenders (usually negative)
    pub descent: i32,
    /// Extra spacing between lines
    pub line_gap: i32,
}

/// A rasterized codepoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Coverage values, one byte per pixel, row-major. Empty for blank glyphs.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen origin to the bitmap's left edge
    pub offset_x: i32,
    /// Offset from the baseline to the bitmap's top edge (negative is up)
    pub offset_y: i32,
}

impl GlyphBitmap {
    /// Bitmap with no pixels (whitespace, missing outlines)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Font access needed by the glyph cache and layout.
pub trait Rasterizer {
    /// Scale factor that maps the font's ascent-descent span to `pixel_height`
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32;

    /// Unscaled ascent, descent and line gap
    fn vertical_metrics(&self) -> VerticalMetrics;

    /// Rasterize `ch` at `scale`. Blank glyphs return [`GlyphBitmap::empty`]
    /// with their offsets left at zero.
    fn rasterize_codepoint(&self, scale: f32, ch: char) -> GlyphBitmap;

    /// Unscaled horizontal advance of `ch`
    fn advance_width(&self, ch: char) -> i32;
}

/// Vertical metrics scaled to a pixel height, truncated to whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontMetrics {
    pub pixel_height: f32,
    pub scale: f32,
    pub ascent: i32,
    pub descent: i32,
    pub line_gap: i32,
}

impl FontMetrics {
    /// Scale a rasterizer's metrics to `pixel_height`
    pub fn from_rasterizer<R: Rasterizer + ?Sized>(rasterizer: &R, pixel_height: f32) -> Self {
        let scale = rasterizer.scale_for_pixel_height(pixel_height);
        let v = rasterizer.vertical_metrics();
        Self {
            pixel_height,
            scale,
            ascent: (v.ascent as f32 * scale) as i32,
            descent: (v.descent as f32 * scale) as i32,
            line_gap: (v.line_gap as f32 * scale) as i32,
        }
    }

    /// Unspaced line height (ascent - descent + line gap)
    pub fn line_height(&self) -> i32 {
        self.ascent - self.descent + self.line_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedRasterizer;

    #[test]
    fn test_metrics_are_scaled_and_truncated() {
        let raster = FixedRasterizer::new();
        let metrics = FontMetrics::from_rasterizer(&raster, 20.0);
        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.ascent, 16);
        assert_eq!(metrics.descent, -4);
        assert_eq!(metrics.line_gap, 2);
        assert_eq!(metrics.line_height(), 22);

        let half = FontMetrics::from_rasterizer(&raster, 10.0);
        assert_eq!(half.ascent, 8);
        assert_eq!(half.descent, -2);
        assert_eq!(half.line_gap, 1);
    }
}
