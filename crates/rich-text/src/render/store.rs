//! Texture storage for the glyph atlas

use std::collections::HashMap;

use tiny_skia::{ColorU8, Pixmap};

use crate::geometry::AtlasRect;
use crate::{Result, TextError};

/// Handle to a surface owned by a [`TextureStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SurfaceId(pub u32);

/// GPU (or CPU) texture backend used by the glyph cache.
pub trait TextureStore {
    /// Create a fully transparent RGBA surface
    fn create_blank_surface(&mut self, width: u32, height: u32) -> Result<SurfaceId>;

    /// Overwrite `rect` with tightly packed RGBA bytes (straight alpha)
    fn upload_region(&mut self, surface: SurfaceId, rect: AtlasRect, rgba: &[u8]);

    /// Reset every pixel to transparent
    fn clear_surface(&mut self, surface: SurfaceId);

    fn destroy_surface(&mut self, surface: SurfaceId);
}

/// Upload counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub surfaces_created: u32,
    pub uploads: u64,
    pub clears: u64,
}

/// In-memory texture store backed by tiny-skia pixmaps.
#[derive(Debug, Default)]
pub struct PixmapStore {
    surfaces: HashMap<SurfaceId, Pixmap>,
    next_id: u32,
    stats: StoreStats,
}

impl PixmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface pixels (premultiplied RGBA)
    pub fn pixmap(&self, surface: SurfaceId) -> Option<&Pixmap> {
        self.surfaces.get(&surface)
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Number of live surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl TextureStore for PixmapStore {
    fn create_blank_surface(&mut self, width: u32, height: u32) -> Result<SurfaceId> {
        let pixmap = Pixmap::new(width, height).ok_or(TextError::SurfaceCreation { width, height })?;
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.insert(id, pixmap);
        self.stats.surfaces_created += 1;
        Ok(id)
    }

    fn upload_region(&mut self, surface: SurfaceId, rect: AtlasRect, rgba: &[u8]) {
        let Some(pixmap) = self.surfaces.get_mut(&surface) else {
            return;
        };
        let stride = pixmap.width() as usize;
        let rows = pixmap.height() as usize;
        let pixels = pixmap.pixels_mut();

        for row in 0..rect.height as usize {
            let dst_y = rect.y as usize + row;
            if dst_y >= rows {
                break;
            }
            for col in 0..rect.width as usize {
                let dst_x = rect.x as usize + col;
                let src = (row * rect.width as usize + col) * 4;
                if dst_x >= stride || src + 3 >= rgba.len() {
                    continue;
                }
                let color = ColorU8::from_rgba(rgba[src], rgba[src + 1], rgba[src + 2], rgba[src + 3]);
                pixels[dst_y * stride + dst_x] = color.premultiply();
            }
        }
        self.stats.uploads += 1;
    }

    fn clear_surface(&mut self, surface: SurfaceId) {
        if let Some(pixmap) = self.surfaces.get_mut(&surface) {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
            self.stats.clears += 1;
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }
}
