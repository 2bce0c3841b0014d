//! Glyph rendering module

mod atlas;
mod cache;
mod store;
mod target;

pub use atlas::{AtlasCursor, Placement, ShelfAllocator};
pub use cache::{CacheStats, FlushReason, GlyphCache, GlyphRecord};
pub use store::{PixmapStore, StoreStats, SurfaceId, TextureStore};
pub use target::{DrawCommand, DrawList, DrawTarget, PixmapCanvas};
