//! Draw pass

use super::{GlyphSource, TextMetrics, line_height, measure, scan_line};
use crate::color::Color;
use crate::font::FontMetrics;
use crate::geometry::{Rect, Vec2};
use crate::markup::{Directive, MarkupScanner, Token};
use crate::render::{DrawTarget, GlyphRecord, SurfaceId};
use crate::style::{TextAlign, TextStyle};

const GLOBAL_BG_ROUNDNESS: f32 = 0.1;
const GLOBAL_BG_SEGMENTS: u32 = 8;
const LINE_BG_ROUNDNESS: f32 = 0.2;
const LINE_BG_SEGMENTS: u32 = 4;

/// What a draw pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawSummary {
    /// Visible characters drawn
    pub glyphs_drawn: usize,
    /// Lines started (including a line cut short by the limit)
    pub lines_drawn: usize,
    /// Document size, when the global background needed it
    pub document: Option<TextMetrics>,
}

/// Panel around the whole document, anchored like the text
pub fn global_background_rect(metrics: &TextMetrics, origin: Vec2, style: &TextStyle) -> Rect {
    let bg = &style.background;
    let width = metrics.max_line_width + bg.padding_x * 2.0;
    let height = metrics.total_height + bg.padding_y * 2.0;
    let x = match style.align {
        TextAlign::Left => origin.x - bg.padding_x,
        TextAlign::Center => origin.x - width / 2.0,
        TextAlign::Right => origin.x - width + bg.padding_x,
    };
    Rect::new(x, origin.y - bg.padding_y, width, height)
}

/// Render `text` at `origin`, stopping after `limit` visible characters.
pub fn draw<G, T>(
    text: &str,
    origin: Vec2,
    limit: Option<usize>,
    style: &TextStyle,
    glyphs: &mut G,
    target: &mut T,
) -> DrawSummary
where
    G: GlyphSource + ?Sized,
    T: DrawTarget + ?Sized,
{
    let font = glyphs.metrics();
    let line_height = line_height(&font, style.line_spacing);
    let bg = style.background;
    let mut summary = DrawSummary::default();

    if bg.enabled && bg.global {
        let document = measure(text, style, glyphs);
        if document.max_line_width > 0.0 {
            let rect = global_background_rect(&document, origin, style);
            target.fill_rounded_rect(rect, GLOBAL_BG_ROUNDNESS, GLOBAL_BG_SEGMENTS, bg.color);
        }
        summary.document = Some(document);
    }

    let reached = |drawn: usize| limit.is_some_and(|l| drawn >= l);
    let mut scanner = MarkupScanner::new(text);
    let mut pen_y = origin.y;
    let mut color = style.base_color;

    while !scanner.is_finished() && !reached(summary.glyphs_drawn) {
        let (span, next) = scan_line(&scanner, style.max_width, glyphs);
        let start_x = origin.x + style.align.offset(span.width);

        if bg.enabled && !bg.global {
            let rect = Rect::new(
                start_x - bg.padding_x,
                pen_y - bg.padding_y,
                span.width + bg.padding_x * 2.0,
                line_height + bg.padding_y * 2.0,
            );
            target.fill_rounded_rect(rect, LINE_BG_ROUNDNESS, LINE_BG_SEGMENTS, bg.color);
        }

        let mut pen_x = start_x;
        let mut walker = scanner;
        while walker.offset() < span.end && !reached(summary.glyphs_drawn) {
            match walker.next() {
                Some(Token::Directive(Directive::OpenColor(c))) => color = c,
                Some(Token::Directive(Directive::CloseColor)) => color = style.base_color,
                Some(Token::Codepoint { ch, .. }) => {
                    let glyph = glyphs.glyph(ch);
                    let pen = Vec2::new(pen_x, pen_y);
                    draw_glyph_layers(target, glyphs.surface(), &glyph, pen, &font, style, color);
                    pen_x += glyph.advance as f32;
                    summary.glyphs_drawn += 1;
                }
                Some(Token::LineBreak) | None => break,
            }
        }

        summary.lines_drawn += 1;
        scanner = next;
        pen_y += line_height;
    }

    summary
}

/// Shadow, then outline copies, then the glyph body
fn draw_glyph_layers<T: DrawTarget + ?Sized>(
    target: &mut T,
    surface: SurfaceId,
    glyph: &GlyphRecord,
    pen: Vec2,
    font: &FontMetrics,
    style: &TextStyle,
    color: Color,
) {
    let pos = Vec2::new(
        pen.x + glyph.bearing_x as f32,
        pen.y + font.ascent as f32 + glyph.bearing_y as f32,
    );

    if style.shadow.enabled {
        let offset = style.shadow.offset;
        target.draw_glyph(surface, glyph, pos.offset(offset.x, offset.y), style.shadow.color);
    }

    if style.outline.enabled {
        let t = style.outline.thickness;
        for &(dx, dy) in style.outline.mode.directions() {
            target.draw_glyph(surface, glyph, pos.offset(dx * t, dy * t), style.outline.color);
        }
    }

    target.draw_glyph(surface, glyph, pos, color);
}
