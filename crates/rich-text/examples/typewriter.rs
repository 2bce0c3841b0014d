//! Typewriter demo
//!
//! Reveals a colored paragraph frame by frame and writes the final frame
//! to a PNG.
//!
//! ```text
//! cargo run -p rich-text --example typewriter -- path/to/font.ttf [out.png]
//! ```

use anyhow::{Context, Result};
use rich_text::render::{DrawList, PixmapCanvas, PixmapStore};
use rich_text::{Color, TextAlign, TextContext, TextStyle, Typewriter, Vec2};
use tracing_subscriber::EnvFilter;

const TEXT: &str = "The hero stepped into the [color=yellow]ancient ruins[/color].\n\
                    The walls were covered in [color=blue]mysterious runes[/color], \
                    glowing faintly in the dark.";

const FRAME_DELTA: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let font_path = args.next().context("usage: typewriter <font.ttf> [out.png]")?;
    let out_path = args.next().unwrap_or_else(|| "typewriter.png".to_string());

    let font_bytes = std::fs::read(&font_path).with_context(|| format!("reading {font_path}"))?;
    let mut ctx: TextContext<PixmapStore> = TextContext::new(PixmapStore::new());
    ctx.init(font_bytes, 28.0)?;

    let style = TextStyle::default()
        .align(TextAlign::Center)
        .max_width(520.0)
        .line_spacing(1.2)
        .background(Color::rgba(0, 0, 0, 180), true)
        .shadow(Color::BLACK, Vec2::new(2.0, 2.0));

    let mut typewriter = Typewriter::new(30.0);
    let mut list = DrawList::new();
    let mut frames = 0;

    while !typewriter.finished {
        typewriter.update(TEXT, FRAME_DELTA);
        list.clear();
        ctx.render_styled_text(TEXT, Vec2::new(320.0, 60.0), typewriter.visible_limit(), &style, &mut list);
        frames += 1;
    }

    tracing::info!(
        "Revealed {} characters in {} frames ({} draw commands)",
        typewriter.current_visible,
        frames,
        list.len()
    );
    if let Some(cache) = ctx.cache() {
        let stats = cache.stats();
        tracing::info!("Glyph cache: {} hits, {} misses, {} flushes", stats.hits, stats.misses, stats.flushes);
    }

    let mut canvas = PixmapCanvas::new(640, 320).context("creating canvas")?;
    canvas.fill(Color::DARK_BLUE);
    canvas.replay(&list, ctx.store());
    canvas.pixmap().save_png(&out_path)?;
    tracing::info!("Wrote {}", out_path);

    Ok(())
}
