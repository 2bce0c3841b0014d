//! Text context: font, glyph cache and atlas with explicit init / shutdown

use crate::config::CacheConfig;
use crate::font::{FontMetrics, Rasterizer, TtfRasterizer};
use crate::geometry::Vec2;
use crate::layout::{self, CachedGlyphs, DrawSummary, TextMetrics};
use crate::render::{DrawTarget, GlyphCache, GlyphRecord, TextureStore};
use crate::style::TextStyle;
use crate::{Result, TextError};

struct Loaded<R> {
    rasterizer: R,
    metrics: FontMetrics,
    cache: GlyphCache,
}

/// Owns everything a render call needs.
///
/// Until [`init`](TextContext::init) succeeds, render calls draw nothing.
/// Calling `init` again tears the previous font and atlas down first.
pub struct TextContext<S: TextureStore, R: Rasterizer = TtfRasterizer> {
    store: S,
    config: CacheConfig,
    loaded: Option<Loaded<R>>,
}

impl<S: TextureStore> TextContext<S, TtfRasterizer> {
    /// Load a TrueType / OpenType font from memory at `pixel_height`
    pub fn init(&mut self, font_bytes: Vec<u8>, pixel_height: f32) -> Result<()> {
        self.shutdown();
        let rasterizer = TtfRasterizer::from_bytes(font_bytes).inspect_err(|err| {
            tracing::warn!("Failed to load font: {}", err);
        })?;
        self.init_with(rasterizer, pixel_height)
    }
}

impl<S: TextureStore, R: Rasterizer> TextContext<S, R> {
    /// Create an uninitialized context with the default cache configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    pub fn with_config(store: S, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            loaded: None,
        }
    }

    /// Initialize with any rasterizer
    pub fn init_with(&mut self, rasterizer: R, pixel_height: f32) -> Result<()> {
        self.shutdown();

        if !pixel_height.is_finite() || pixel_height <= 0.0 {
            tracing::warn!("Rejecting pixel height {}", pixel_height);
            return Err(TextError::InvalidPixelHeight(pixel_height));
        }

        let metrics = FontMetrics::from_rasterizer(&rasterizer, pixel_height);
        let cache = GlyphCache::create(self.config, metrics.scale, &mut self.store)?;

        tracing::info!(
            "Text context initialized: {}px, atlas {}x{}, {} glyph slots",
            pixel_height,
            self.config.atlas_size,
            self.config.atlas_size,
            cache.capacity()
        );

        self.loaded = Some(Loaded {
            rasterizer,
            metrics,
            cache,
        });
        Ok(())
    }

    /// Release the font and atlas surface. No-op when not loaded.
    pub fn shutdown(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            loaded.cache.destroy(&mut self.store);
            tracing::info!("Text context unloaded");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Draw `text` at `position`, revealing at most `visible_limit`
    /// characters (`None` for all of them).
    pub fn render_styled_text<T: DrawTarget + ?Sized>(
        &mut self,
        text: &str,
        position: Vec2,
        visible_limit: Option<usize>,
        style: &TextStyle,
        target: &mut T,
    ) -> DrawSummary {
        let Some(loaded) = self.loaded.as_mut() else {
            return DrawSummary::default();
        };
        let mut glyphs = CachedGlyphs {
            cache: &mut loaded.cache,
            rasterizer: &loaded.rasterizer,
            store: &mut self.store,
            metrics: loaded.metrics,
        };
        layout::draw(text, position, visible_limit, &style.resolved(), &mut glyphs, target)
    }

    /// Size of the whole document under `style`
    pub fn measure_text(&mut self, text: &str, style: &TextStyle) -> Result<TextMetrics> {
        let loaded = self.loaded.as_mut().ok_or(TextError::NotInitialized)?;
        let mut glyphs = CachedGlyphs {
            cache: &mut loaded.cache,
            rasterizer: &loaded.rasterizer,
            store: &mut self.store,
            metrics: loaded.metrics,
        };
        Ok(layout::measure(text, &style.resolved(), &mut glyphs))
    }

    /// Cached record for one codepoint
    pub fn glyph(&mut self, ch: char) -> Option<GlyphRecord> {
        let loaded = self.loaded.as_mut()?;
        Some(loaded.cache.lookup(ch, &loaded.rasterizer, &mut self.store))
    }

    /// Drop every cached glyph
    pub fn flush_cache(&mut self) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.cache.flush(&mut self.store);
        }
    }

    pub fn metrics(&self) -> Option<FontMetrics> {
        self.loaded.as_ref().map(|l| l.metrics)
    }

    pub fn cache(&self) -> Option<&GlyphCache> {
        self.loaded.as_ref().map(|l| &l.cache)
    }

    pub fn rasterizer(&self) -> Option<&R> {
        self.loaded.as_ref().map(|l| &l.rasterizer)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }
}

impl<S: TextureStore, R: Rasterizer> Drop for TextContext<S, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
