//! Shared fakes for integration tests

use std::cell::RefCell;

use rich_text::{GlyphBitmap, Rasterizer, VerticalMetrics};

/// Monospace box font. At 20px: scale 1, ascent 16, descent -4, gap 2,
/// advance 10, 8x12 boxes. Whitespace has no bitmap.
pub struct BoxRasterizer {
    log: RefCell<Vec<char>>,
}

impl BoxRasterizer {
    pub fn new() -> Self {
        Self { log: RefCell::new(Vec::new()) }
    }

    /// Codepoints rasterized so far, in order
    pub fn rasterized(&self) -> Vec<char> {
        self.log.borrow().clone()
    }

    pub fn count(&self, ch: char) -> usize {
        self.log.borrow().iter().filter(|&&c| c == ch).count()
    }
}

impl Rasterizer for BoxRasterizer {
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        pixel_height / 20.0
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        VerticalMetrics { ascent: 16, descent: -4, line_gap: 2 }
    }

    fn rasterize_codepoint(&self, scale: f32, ch: char) -> GlyphBitmap {
        self.log.borrow_mut().push(ch);
        if ch.is_whitespace() {
            return GlyphBitmap::empty();
        }
        let width = (8.0 * scale).ceil() as u32;
        let height = (12.0 * scale).ceil() as u32;
        GlyphBitmap {
            pixels: vec![255; (width * height) as usize],
            width,
            height,
            offset_x: 1,
            offset_y: -(height as i32),
        }
    }

    fn advance_width(&self, _ch: char) -> i32 {
        10
    }
}
