//! Rich Text - Styled Markup Text Rendering
//!
//! This crate renders markup-annotated text for real-time applications:
//! - Inline color tags (`[color=red]...[/color]`)
//! - Automatic line wrapping and alignment
//! - Drop shadows, outlines and background panels
//! - A glyph cache backed by a single shelf-packed texture atlas
//! - Progressive "typewriter" reveal
//!
//! # Example
//! ```rust,ignore
//! use rich_text::{TextContext, TextStyle, Typewriter, Vec2, render::{DrawList, PixmapStore}};
//!
//! let mut ctx = TextContext::new(PixmapStore::new());
//! ctx.init(font_bytes, 24.0)?;
//!
//! let text = "[color=orange]Hint:[/color] press space";
//! let mut tw = Typewriter::new(20.0);
//! tw.update(text, 0.016);
//!
//! let mut list = DrawList::new();
//! ctx.render_styled_text(text, Vec2::new(400.0, 100.0), tw.visible_limit(), &TextStyle::default(), &mut list);
//! ```

pub mod color;
pub mod config;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod markup;
pub mod render;
pub mod style;
pub mod typewriter;
mod context;

#[cfg(test)]
pub(crate) mod testing;

pub use color::Color;
pub use config::CacheConfig;
pub use context::TextContext;
pub use font::{FontMetrics, GlyphBitmap, Rasterizer, TtfRasterizer, VerticalMetrics};
pub use geometry::{AtlasRect, Rect, Vec2};
pub use layout::{GlyphSource, TextMetrics};
pub use markup::{Directive, MarkupScanner, Token, visible_count};
pub use render::{DrawTarget, GlyphCache, GlyphRecord, SurfaceId, TextureStore};
pub use style::{BackgroundStyle, OutlineMode, OutlineStyle, ShadowStyle, TextAlign, TextStyle};
pub use typewriter::{Typewriter, TypewriterState, advance_typewriter};

/// Text rendering error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Invalid pixel height: {0}")]
    InvalidPixelHeight(f32),

    #[error("Failed to create {width}x{height} atlas surface")]
    SurfaceCreation { width: u32, height: u32 },

    #[error("Text context is not initialized")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, TextError>;
