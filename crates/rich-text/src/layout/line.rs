//! Line scanning and the measurement pass

use super::{GlyphSource, TextMetrics, line_height};
use crate::markup::{MarkupScanner, Token};
use crate::style::TextStyle;

/// One line as found by [`scan_line`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpan {
    /// Byte offset the line starts at
    pub start: usize,
    /// Byte offset the next line starts at
    pub end: usize,
    /// Sum of glyph advances
    pub width: f32,
    pub glyph_count: usize,
    /// Ended by a line break rather than wrapping or end of text
    pub hard_break: bool,
}

/// Scan one line starting at `from`.
///
/// Returns the span and a scanner positioned at the next line. Directives
/// are skipped without effect. A line always takes at least one glyph, so
/// a glyph wider than `max_width` gets a line of its own.
pub fn scan_line<'a, G>(from: &MarkupScanner<'a>, max_width: f32, glyphs: &mut G) -> (LineSpan, MarkupScanner<'a>)
where
    G: GlyphSource + ?Sized,
{
    let start = from.offset();
    let mut scanner = from.clone();
    let mut width = 0i32;
    let mut glyph_count = 0;
    let mut hard_break = false;

    loop {
        let before = scanner.clone();
        match scanner.next() {
            None => break,
            Some(Token::LineBreak) => {
                hard_break = true;
                break;
            }
            Some(Token::Directive(_)) => {}
            Some(Token::Codepoint { ch, .. }) => {
                let advance = glyphs.glyph(ch).advance;
                if max_width > 0.0 && glyph_count > 0 && (width + advance) as f32 > max_width {
                    scanner = before;
                    break;
                }
                width += advance;
                glyph_count += 1;
            }
        }
    }

    let span = LineSpan {
        start,
        end: scanner.offset(),
        width: width as f32,
        glyph_count,
        hard_break,
    };
    (span, scanner)
}

/// Measure the whole document, ignoring any visible-character limit
pub fn measure<G>(text: &str, style: &TextStyle, glyphs: &mut G) -> TextMetrics
where
    G: GlyphSource + ?Sized,
{
    let line_height = line_height(&glyphs.metrics(), style.line_spacing);
    let mut metrics = TextMetrics::default();
    let mut scanner = MarkupScanner::new(text);

    while !scanner.is_finished() {
        let (span, next) = scan_line(&scanner, style.max_width, glyphs);
        metrics.max_line_width = metrics.max_line_width.max(span.width);
        metrics.total_height += line_height;
        metrics.line_count += 1;
        scanner = next;
    }
    metrics
}
