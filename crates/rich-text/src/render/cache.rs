//! Glyph cache (codepoint -> atlas rectangle + metrics)
//!
//! Fixed-capacity table: a dense slot array plus an open-addressed index
//! (`codepoint mod capacity`, linear probing) holding slot numbers. Space is
//! never reclaimed per glyph. When either the slots or the atlas run out the
//! whole cache is flushed and the lookup is retried once.

use super::atlas::{AtlasCursor, Placement, ShelfAllocator};
use super::store::{SurfaceId, TextureStore};
use crate::config::CacheConfig;
use crate::font::Rasterizer;
use crate::geometry::AtlasRect;
use crate::Result;

/// Index entry with no slot behind it
const EMPTY: u32 = u32::MAX;

/// A lookup either hits, inserts, or flushes and inserts
const MAX_ATTEMPTS: usize = 2;

/// Cached glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRecord {
    pub codepoint: char,
    /// Location in the atlas; empty for blank glyphs
    pub atlas_rect: AtlasRect,
    /// Offset from pen origin to the bitmap's left edge
    pub bearing_x: i32,
    /// Offset from baseline to the bitmap's top edge
    pub bearing_y: i32,
    /// Pen advance in whole pixels
    pub advance: i32,
    pub active: bool,
}

impl GlyphRecord {
    const VACANT: GlyphRecord = GlyphRecord {
        codepoint: '\0',
        atlas_rect: AtlasRect::EMPTY,
        bearing_x: 0,
        bearing_y: 0,
        advance: 0,
        active: false,
    };
}

/// Why the cache was flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    /// Every slot was active
    SlotsExhausted,
    /// The atlas had no room for the bitmap
    AtlasFull,
    /// Requested by the owner
    Manual,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub rasterizations: u64,
    pub flushes: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
    }
}

/// Glyph cache over a single atlas surface
#[derive(Debug)]
pub struct GlyphCache {
    slots: Vec<GlyphRecord>,
    index: Vec<u32>,
    allocator: ShelfAllocator,
    surface: SurfaceId,
    margin: u32,
    scale: f32,
    stats: CacheStats,
}

impl GlyphCache {
    /// Create the cache and its atlas surface
    pub fn create<S: TextureStore + ?Sized>(config: CacheConfig, scale: f32, store: &mut S) -> Result<Self> {
        let capacity = config.capacity.max(1);
        let surface = store.create_blank_surface(config.atlas_size, config.atlas_size)?;
        Ok(Self {
            slots: vec![GlyphRecord::VACANT; capacity],
            index: vec![EMPTY; capacity],
            allocator: ShelfAllocator::new(config.atlas_size, config.glyph_margin),
            surface,
            margin: config.glyph_margin,
            scale,
            stats: CacheStats::default(),
        })
    }

    /// Release the atlas surface
    pub fn destroy<S: TextureStore + ?Sized>(self, store: &mut S) {
        store.destroy_surface(self.surface);
    }

    /// Get the record for `ch`, rasterizing and uploading it on a miss.
    pub fn lookup<R, S>(&mut self, ch: char, rasterizer: &R, store: &mut S) -> GlyphRecord
    where
        R: Rasterizer + ?Sized,
        S: TextureStore + ?Sized,
    {
        if let Some(slot) = self.find(ch) {
            self.stats.hits += 1;
            return self.slots[slot];
        }
        self.stats.misses += 1;

        let mut advance = 0;
        for attempt in 1..=MAX_ATTEMPTS {
            let last = attempt == MAX_ATTEMPTS;
            match self.try_insert(ch, rasterizer, store, last) {
                Ok(record) => return record,
                Err((reason, adv)) => {
                    advance = adv;
                    if !last {
                        self.flush_with(reason, store);
                    }
                }
            }
        }

        // A flushed cache always has a free slot; if that ever fails the
        // glyph is drawn blank.
        tracing::warn!("Glyph cache could not store U+{:04X}", ch as u32);
        GlyphRecord {
            codepoint: ch,
            advance,
            active: false,
            ..GlyphRecord::VACANT
        }
    }

    /// Insert `ch` into a free slot. `oversize_ok` stores an empty rectangle
    /// when the bitmap cannot fit instead of asking for a flush.
    fn try_insert<R, S>(
        &mut self,
        ch: char,
        rasterizer: &R,
        store: &mut S,
        oversize_ok: bool,
    ) -> std::result::Result<GlyphRecord, (FlushReason, i32)>
    where
        R: Rasterizer + ?Sized,
        S: TextureStore + ?Sized,
    {
        let advance = (rasterizer.advance_width(ch) as f32 * self.scale) as i32;
        let Some(slot) = self.free_slot() else {
            return Err((FlushReason::SlotsExhausted, advance));
        };

        let bitmap = rasterizer.rasterize_codepoint(self.scale, ch);
        self.stats.rasterizations += 1;

        let atlas_rect = if bitmap.is_empty() {
            AtlasRect::EMPTY
        } else {
            match self.allocator.place(bitmap.width + self.margin, bitmap.height + self.margin) {
                Placement::Placed { x, y } => {
                    let rect = AtlasRect::new(x, y, bitmap.width, bitmap.height);
                    store.upload_region(self.surface, rect, &coverage_to_rgba(&bitmap.pixels));
                    rect
                }
                Placement::Full if oversize_ok => {
                    tracing::warn!(
                        "Glyph U+{:04X} ({}x{}) does not fit an empty atlas",
                        ch as u32,
                        bitmap.width,
                        bitmap.height
                    );
                    AtlasRect::EMPTY
                }
                Placement::Full => return Err((FlushReason::AtlasFull, advance)),
            }
        };

        let record = GlyphRecord {
            codepoint: ch,
            atlas_rect,
            bearing_x: bitmap.offset_x,
            bearing_y: bitmap.offset_y,
            advance,
            active: true,
        };
        self.slots[slot] = record;
        self.insert_index(ch, slot);
        Ok(record)
    }

    /// Probe the index for an active slot holding `ch`
    fn find(&self, ch: char) -> Option<usize> {
        let capacity = self.index.len();
        let mut pos = self.home(ch);
        for _ in 0..capacity {
            let slot = self.index[pos];
            if slot == EMPTY {
                return None;
            }
            let record = &self.slots[slot as usize];
            if record.active && record.codepoint == ch {
                return Some(slot as usize);
            }
            pos = (pos + 1) % capacity;
        }
        None
    }

    fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.active)
    }

    fn insert_index(&mut self, ch: char, slot: usize) {
        let capacity = self.index.len();
        let mut pos = self.home(ch);
        for _ in 0..capacity {
            if self.index[pos] == EMPTY {
                self.index[pos] = slot as u32;
                return;
            }
            pos = (pos + 1) % capacity;
        }
    }

    fn home(&self, ch: char) -> usize {
        ch as usize % self.index.len()
    }

    /// Drop every glyph and clear the atlas surface
    pub fn flush<S: TextureStore + ?Sized>(&mut self, store: &mut S) {
        self.flush_with(FlushReason::Manual, store);
    }

    fn flush_with<S: TextureStore + ?Sized>(&mut self, reason: FlushReason, store: &mut S) {
        store.clear_surface(self.surface);
        self.allocator.reset();
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.index.fill(EMPTY);
        self.stats.flushes += 1;

        tracing::info!("Glyph cache flushed ({:?}), flush #{}", reason, self.stats.flushes);
    }

    /// Whether `ch` is cached (does not count as a hit)
    pub fn contains(&self, ch: char) -> bool {
        self.find(ch).is_some()
    }

    /// Number of active glyphs
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn atlas_cursor(&self) -> AtlasCursor {
        self.allocator.cursor()
    }

    /// Cursor of a freshly created or flushed atlas
    pub fn atlas_origin(&self) -> AtlasCursor {
        self.allocator.origin()
    }

    pub fn atlas_size(&self) -> u32 {
        self.allocator.size()
    }

    /// Every active slot is reachable from exactly one index entry, and
    /// every index entry points at an active slot.
    #[cfg(test)]
    pub(crate) fn index_consistent(&self) -> bool {
        let mut seen = vec![0usize; self.slots.len()];
        for &slot in &self.index {
            if slot == EMPTY {
                continue;
            }
            if !self.slots[slot as usize].active {
                return false;
            }
            seen[slot as usize] += 1;
        }
        self.slots.iter().enumerate().all(|(i, s)| {
            let reachable = s.active && self.find(s.codepoint) == Some(i);
            if s.active { seen[i] == 1 && reachable } else { seen[i] == 0 }
        })
    }
}

/// Opaque white modulated by per-pixel coverage
fn coverage_to_rgba(coverage: &[u8]) -> Vec<u8> {
    coverage.iter().flat_map(|&a| [255, 255, 255, a]).collect()
}
