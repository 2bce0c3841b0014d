//! Glyph cache configuration

use serde::{Deserialize, Serialize};

/// Sizing of the glyph cache and its atlas surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached glyphs
    pub capacity: usize,
    /// Side length of the square atlas surface in pixels
    pub atlas_size: u32,
    /// Free pixels kept around every glyph (also the atlas border)
    pub glyph_margin: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 4096,
            atlas_size: 2048,
            glyph_margin: 2,
        }
    }
}

impl CacheConfig {
    /// Set glyph capacity
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set atlas side length
    pub fn atlas_size(mut self, size: u32) -> Self {
        self.atlas_size = size;
        self
    }

    /// Set per-glyph margin
    pub fn glyph_margin(mut self, margin: u32) -> Self {
        self.glyph_margin = margin;
        self
    }
}
