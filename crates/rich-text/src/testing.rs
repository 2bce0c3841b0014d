//! Test doubles shared by unit tests

use std::cell::Cell;

use crate::font::{FontMetrics, GlyphBitmap, Rasterizer, VerticalMetrics};
use crate::geometry::AtlasRect;
use crate::layout::GlyphSource;
use crate::render::{GlyphRecord, SurfaceId};

/// Monospace rasterizer: every visible codepoint is a solid box.
///
/// Font units: ascent 16, descent -4, line gap 2, advance 10, box 8x12.
/// `scale_for_pixel_height(20.0) == 1.0`.
pub(crate) struct FixedRasterizer {
    pub advance: i32,
    pub box_width: u32,
    pub box_height: u32,
    rasterized: Cell<usize>,
}

impl FixedRasterizer {
    pub fn new() -> Self {
        Self {
            advance: 10,
            box_width: 8,
            box_height: 12,
            rasterized: Cell::new(0),
        }
    }

    pub fn with_box(mut self, width: u32, height: u32) -> Self {
        self.box_width = width;
        self.box_height = height;
        self
    }

    /// Number of `rasterize_codepoint` calls so far
    pub fn rasterized(&self) -> usize {
        self.rasterized.get()
    }
}

impl Rasterizer for FixedRasterizer {
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        pixel_height / 20.0
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        VerticalMetrics { ascent: 16, descent: -4, line_gap: 2 }
    }

    fn rasterize_codepoint(&self, scale: f32, ch: char) -> GlyphBitmap {
        self.rasterized.set(self.rasterized.get() + 1);
        if ch.is_whitespace() {
            return GlyphBitmap::empty();
        }
        let width = (self.box_width as f32 * scale).ceil() as u32;
        let height = (self.box_height as f32 * scale).ceil() as u32;
        GlyphBitmap {
            pixels: vec![255; (width * height) as usize],
            width,
            height,
            offset_x: 1,
            offset_y: -(height as i32),
        }
    }

    fn advance_width(&self, _ch: char) -> i32 {
        self.advance
    }
}

/// Glyph source without a cache: advance 10, ascent 16, descent -4, gap 2.
/// Non-whitespace glyphs report an 8x12 rectangle at a fake atlas spot.
pub(crate) struct FixedGlyphs {
    pub lookups: usize,
}

impl FixedGlyphs {
    pub fn new() -> Self {
        Self { lookups: 0 }
    }
}

impl GlyphSource for FixedGlyphs {
    fn glyph(&mut self, ch: char) -> GlyphRecord {
        self.lookups += 1;
        let atlas_rect = if ch.is_whitespace() {
            AtlasRect::EMPTY
        } else {
            AtlasRect::new(2, 2, 8, 12)
        };
        GlyphRecord {
            codepoint: ch,
            atlas_rect,
            bearing_x: 1,
            bearing_y: -12,
            advance: 10,
            active: true,
        }
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            pixel_height: 20.0,
            scale: 1.0,
            ascent: 16,
            descent: -4,
            line_gap: 2,
        }
    }

    fn surface(&self) -> SurfaceId {
        SurfaceId(0)
    }
}
