//! Glyph rasterization from TrueType / OpenType outlines

use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::{GlyphBitmap, Rasterizer, VerticalMetrics};
use crate::{Result, TextError};

/// Rasterizer over an owned font file, using tiny-skia for coverage.
pub struct TtfRasterizer {
    data: Vec<u8>,
    face_index: u32,
}

impl TtfRasterizer {
    /// Take ownership of font bytes, validating that they parse.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_index(data, 0)
    }

    /// Same as [`TtfRasterizer::from_bytes`] for a face inside a collection
    pub fn from_bytes_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        if let Err(err) = Face::parse(&data, face_index) {
            return Err(TextError::FontParsing(err.to_string()));
        }
        Ok(Self { data, face_index })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.face_index).ok()
    }

    /// Glyph for `ch`, or the notdef glyph when the font lacks it
    fn glyph_id(face: &Face<'_>, ch: char) -> GlyphId {
        face.glyph_index(ch).unwrap_or(GlyphId(0))
    }
}

impl std::fmt::Debug for TtfRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfRasterizer")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl Rasterizer for TtfRasterizer {
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let span = face.ascender() as f32 - face.descender() as f32;
        if span <= 0.0 {
            return pixel_height / face.units_per_em() as f32;
        }
        pixel_height / span
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        self.face()
            .map(|face| VerticalMetrics {
                ascent: face.ascender() as i32,
                descent: face.descender() as i32,
                line_gap: face.line_gap() as i32,
            })
            .unwrap_or_default()
    }

    fn rasterize_codepoint(&self, scale: f32, ch: char) -> GlyphBitmap {
        let Some(face) = self.face() else {
            return GlyphBitmap::empty();
        };
        let glyph = Self::glyph_id(&face, ch);

        let Some(bbox) = face.glyph_bounding_box(glyph) else {
            return GlyphBitmap::empty();
        };

        // Pixel bounds with y pointing down
        let x0 = (bbox.x_min as f32 * scale).floor() as i32;
        let x1 = (bbox.x_max as f32 * scale).ceil() as i32;
        let y0 = (-(bbox.y_max as f32) * scale).floor() as i32;
        let y1 = (-(bbox.y_min as f32) * scale).ceil() as i32;

        let width = (x1 - x0).max(0) as u32;
        let height = (y1 - y0).max(0) as u32;
        if width == 0 || height == 0 {
            return GlyphBitmap::empty();
        }

        let mut builder = PathBuilder::new(scale, x0 as f32, y0 as f32);
        if face.outline_glyph(glyph, &mut builder).is_none() {
            return GlyphBitmap::empty();
        }
        let Some(path) = builder.finish() else {
            return GlyphBitmap::empty();
        };
        let Some(mut pixmap) = tiny_skia::Pixmap::new(width, height) else {
            return GlyphBitmap::empty();
        };

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::WHITE);
        paint.anti_alias = true;

        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );

        tracing::trace!("Rasterized U+{:04X} at {}x{}", ch as u32, width, height);

        GlyphBitmap {
            pixels: pixmap.pixels().iter().map(|p| p.alpha()).collect(),
            width,
            height,
            offset_x: x0,
            offset_y: y0,
        }
    }

    fn advance_width(&self, ch: char) -> i32 {
        self.face()
            .and_then(|face| face.glyph_hor_advance(Self::glyph_id(&face, ch)))
            .map(i32::from)
            .unwrap_or(0)
    }
}

/// Converts font-unit outlines into a tiny-skia path in bitmap pixels
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl PathBuilder {
    fn new(scale: f32, origin_x: f32, origin_y: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale,
            origin_x,
            origin_y,
        }
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        // Flip Y: font units grow upward, bitmap rows grow downward
        (x * self.scale - self.origin_x, -y * self.scale - self.origin_y)
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
