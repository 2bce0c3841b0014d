//! Text layout module
//!
//! Two passes over the same markup scanner:
//! - [`measure`] sizes the whole document (for the global background)
//!   and ignores the visible-character limit;
//! - [`draw`] re-scans each line for its width, aligns it, then walks the
//!   same span emitting glyphs until the limit is reached.
//!
//! Line boundaries are a line break, the end of the text, or the glyph
//! whose advance would push the line past `max_width`.

mod draw;
mod line;

pub use draw::{DrawSummary, draw, global_background_rect};
pub use line::{LineSpan, measure, scan_line};

use crate::font::{FontMetrics, Rasterizer};
use crate::render::{GlyphCache, GlyphRecord, SurfaceId, TextureStore};

/// Where layout gets glyph metrics and atlas locations from.
pub trait GlyphSource {
    /// Record for `ch`; may rasterize and upload on first use
    fn glyph(&mut self, ch: char) -> GlyphRecord;

    /// Scaled font metrics
    fn metrics(&self) -> FontMetrics;

    /// Atlas surface the records point into
    fn surface(&self) -> SurfaceId;
}

/// [`GlyphSource`] over a [`GlyphCache`] and its collaborators
pub struct CachedGlyphs<'a, R: ?Sized, S: ?Sized> {
    pub cache: &'a mut GlyphCache,
    pub rasterizer: &'a R,
    pub store: &'a mut S,
    pub metrics: FontMetrics,
}

impl<R, S> GlyphSource for CachedGlyphs<'_, R, S>
where
    R: Rasterizer + ?Sized,
    S: TextureStore + ?Sized,
{
    fn glyph(&mut self, ch: char) -> GlyphRecord {
        self.cache.lookup(ch, self.rasterizer, self.store)
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn surface(&self) -> SurfaceId {
        self.cache.surface()
    }
}

/// Document size from the measurement pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Widest line in pixels
    pub max_line_width: f32,
    /// Line count times spaced line height
    pub total_height: f32,
    pub line_count: usize,
}

/// Spaced line height in pixels
pub fn line_height(metrics: &FontMetrics, line_spacing: f32) -> f32 {
    metrics.line_height() as f32 * line_spacing
}

/// Convert a signed limit (negative = unlimited) to the layout form
pub fn limit_from_signed(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_from_signed() {
        assert_eq!(limit_from_signed(-1), None);
        assert_eq!(limit_from_signed(0), Some(0));
        assert_eq!(limit_from_signed(12), Some(12));
    }

    #[test]
    fn test_line_height_applies_spacing() {
        let metrics = FontMetrics {
            pixel_height: 20.0,
            scale: 1.0,
            ascent: 16,
            descent: -4,
            line_gap: 2,
        };
        assert_eq!(line_height(&metrics, 1.0), 22.0);
        assert_eq!(line_height(&metrics, 1.5), 33.0);
    }
}
