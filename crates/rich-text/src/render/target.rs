//! Draw-call sinks

use tiny_skia::{Paint, PathBuilder, Pixmap, Transform};

use super::cache::GlyphRecord;
use super::store::{PixmapStore, SurfaceId};
use crate::color::Color;
use crate::geometry::{Rect, Vec2};

/// Receives the draw calls produced by the layout engine.
pub trait DrawTarget {
    /// Blit `glyph.atlas_rect` from `surface` with its top-left at `dest`,
    /// tinted by `tint`. Called for blank glyphs too (empty rectangle).
    fn draw_glyph(&mut self, surface: SurfaceId, glyph: &GlyphRecord, dest: Vec2, tint: Color);

    /// Fill a rectangle whose corner radius is `roundness * min(w, h) / 2`.
    /// `segments` is a tessellation hint per corner.
    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f32, segments: u32, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Glyph {
        surface: SurfaceId,
        glyph: GlyphRecord,
        dest: Vec2,
        tint: Color,
    },
    RoundedRect {
        rect: Rect,
        roundness: f32,
        segments: u32,
        color: Color,
    },
}

/// Draw target that records commands for later replay.
///
/// Glyph commands hold atlas rectangles, not pixels. If the glyph cache
/// flushes while a list is being recorded, rectangles recorded before the
/// flush may since hold other glyphs, and replay draws those. Size the
/// cache so one frame of text fits without a flush.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Glyph commands only
    pub fn glyphs(&self) -> impl Iterator<Item = (&GlyphRecord, Vec2, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Glyph { glyph, dest, tint, .. } => Some((glyph, *dest, *tint)),
            DrawCommand::RoundedRect { .. } => None,
        })
    }

    /// Rectangle commands only
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::RoundedRect { rect, color, .. } => Some((*rect, *color)),
            DrawCommand::Glyph { .. } => None,
        })
    }
}

impl DrawTarget for DrawList {
    fn draw_glyph(&mut self, surface: SurfaceId, glyph: &GlyphRecord, dest: Vec2, tint: Color) {
        self.commands.push(DrawCommand::Glyph {
            surface,
            glyph: *glyph,
            dest,
            tint,
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f32, segments: u32, color: Color) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            roundness,
            segments,
            color,
        });
    }
}

/// CPU canvas that replays a [`DrawList`] against a [`PixmapStore`] atlas
#[derive(Debug)]
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    /// Create a transparent canvas; `None` for a zero-sized canvas
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn fill(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Execute every command in order, reading the atlas as it is now
    pub fn replay(&mut self, list: &DrawList, store: &PixmapStore) {
        for cmd in list.commands() {
            match cmd {
                DrawCommand::Glyph { surface, glyph, dest, tint } => {
                    if let Some(atlas) = store.pixmap(*surface) {
                        self.blit_glyph(atlas, glyph, *dest, *tint);
                    }
                }
                DrawCommand::RoundedRect { rect, roundness, color, .. } => {
                    self.fill_rounded(*rect, *roundness, *color);
                }
            }
        }
    }

    /// Source-over blend of the tinted atlas coverage
    fn blit_glyph(&mut self, atlas: &Pixmap, glyph: &GlyphRecord, dest: Vec2, tint: Color) {
        let src = glyph.atlas_rect;
        if src.is_empty() {
            return;
        }

        let atlas_width = atlas.width() as usize;
        let atlas_data = atlas.data();
        let width = self.pixmap.width() as i64;
        let height = self.pixmap.height() as i64;
        let origin_x = dest.x.round() as i64;
        let origin_y = dest.y.round() as i64;
        let data = self.pixmap.data_mut();

        for row in 0..src.height as i64 {
            let ty = origin_y + row;
            if ty < 0 || ty >= height {
                continue;
            }
            for col in 0..src.width as i64 {
                let tx = origin_x + col;
                if tx < 0 || tx >= width {
                    continue;
                }
                let si = ((src.y as usize + row as usize) * atlas_width + src.x as usize + col as usize) * 4;
                let Some(&coverage) = atlas_data.get(si + 3) else {
                    continue;
                };
                if coverage == 0 {
                    continue;
                }

                let sa = tint.a as u32 * coverage as u32 / 255;
                let source = [
                    tint.r as u32 * sa / 255,
                    tint.g as u32 * sa / 255,
                    tint.b as u32 * sa / 255,
                    sa,
                ];
                let di = ((ty * width + tx) * 4) as usize;
                for (k, s) in source.iter().enumerate() {
                    let d = data[di + k] as u32;
                    data[di + k] = (s + d * (255 - sa) / 255).min(255) as u8;
                }
            }
        }
    }

    fn fill_rounded(&mut self, rect: Rect, roundness: f32, color: Color) {
        let Some(path) = rounded_rect_path(rect, roundness) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, tiny_skia::FillRule::Winding, Transform::identity(), None);
    }
}

fn rounded_rect_path(rect: Rect, roundness: f32) -> Option<tiny_skia::Path> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let r = (roundness.clamp(0.0, 1.0) * rect.width.min(rect.height) / 2.0).max(0.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);

    if r <= 0.0 {
        return tiny_skia::Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AtlasRect;
    use crate::render::TextureStore;

    fn glyph(rect: AtlasRect) -> GlyphRecord {
        GlyphRecord {
            codepoint: 'x',
            atlas_rect: rect,
            bearing_x: 0,
            bearing_y: 0,
            advance: 4,
            active: true,
        }
    }

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.1, 8, Color::BLACK);
        list.draw_glyph(SurfaceId(0), &glyph(AtlasRect::new(2, 2, 4, 4)), Vec2::new(1.0, 1.0), Color::RED);

        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::RoundedRect { .. }));
        assert_eq!(list.glyphs().count(), 1);
        assert_eq!(list.rects().count(), 1);
    }

    #[test]
    fn test_replay_tints_glyph_pixels() {
        let mut store = PixmapStore::new();
        let atlas = store.create_blank_surface(16, 16).unwrap();
        store.upload_region(atlas, AtlasRect::new(2, 2, 2, 2), &[255; 16]);

        let mut list = DrawList::new();
        list.draw_glyph(atlas, &glyph(AtlasRect::new(2, 2, 2, 2)), Vec2::new(5.0, 5.0), Color::RED);

        let mut canvas = PixmapCanvas::new(16, 16).unwrap();
        canvas.replay(&list, &store);

        let px = canvas.pixmap().pixel(5, 5).unwrap();
        assert_eq!((px.red(), px.green(), px.alpha()), (Color::RED.r, Color::RED.g, 255));
        assert_eq!(canvas.pixmap().pixel(7, 7).unwrap().alpha(), 0);
    }

    #[test]
    fn test_replay_fills_background() {
        let store = PixmapStore::new();
        let mut list = DrawList::new();
        list.fill_rounded_rect(Rect::new(2.0, 2.0, 12.0, 12.0), 0.2, 4, Color::BLUE);

        let mut canvas = PixmapCanvas::new(16, 16).unwrap();
        canvas.replay(&list, &store);

        assert_eq!(canvas.pixmap().pixel(8, 8).unwrap().alpha(), 255);
        assert_eq!(canvas.pixmap().pixel(0, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn test_rounded_path_rejects_empty_rect() {
        assert!(rounded_rect_path(Rect::new(0.0, 0.0, 0.0, 5.0), 0.5).is_none());
        assert!(rounded_rect_path(Rect::new(0.0, 0.0, 5.0, 5.0), 0.0).is_some());
    }
}
