//! Markup tokenizer
//!
//! Splits text into visible codepoints, line breaks and color directives.
//! Measurement, drawing and the typewriter all walk text through this
//! scanner, so they agree on what a visible character is.

use std::iter::FusedIterator;

use crate::color::Color;

const OPEN_COLOR: &str = "[color=";
const CLOSE_COLOR: &str = "[/color]";

/// Inline style change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `[color=NAME]`, already resolved (unknown names use the default)
    OpenColor(Color),
    /// `[/color]`
    CloseColor,
}

/// Scanner output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Directive(Directive),
    /// A visible character and its UTF-8 length
    Codepoint { ch: char, byte_len: usize },
    /// `\n` or `\r\n`
    LineBreak,
}

impl Token {
    pub fn is_visible(&self) -> bool {
        matches!(self, Token::Codepoint { .. })
    }
}

/// Forward-only, allocation-free tokenizer over a `&str`.
///
/// Cloning a scanner snapshots its position, which is how the layout
/// engine measures a line and then re-walks it.
#[derive(Debug, Clone)]
pub struct MarkupScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> MarkupScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the next token
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_finished(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Remaining unscanned text
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn directive(rest: &str) -> Option<(Directive, usize)> {
        if rest.starts_with(CLOSE_COLOR) {
            return Some((Directive::CloseColor, CLOSE_COLOR.len()));
        }
        let body = rest.strip_prefix(OPEN_COLOR)?;
        let end = body.find(']')?;
        let color = Color::from_name_or_default(&body[..end]);
        Some((Directive::OpenColor(color), OPEN_COLOR.len() + end + 1))
    }
}

impl Iterator for MarkupScanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = self.rest();
        let ch = rest.chars().next()?;

        if ch == '[' {
            if let Some((directive, len)) = Self::directive(rest) {
                self.pos += len;
                return Some(Token::Directive(directive));
            }
        }

        match ch {
            '\n' => {
                self.pos += 1;
                Some(Token::LineBreak)
            }
            '\r' if rest[1..].starts_with('\n') => {
                self.pos += 2;
                Some(Token::LineBreak)
            }
            _ => {
                let byte_len = ch.len_utf8();
                self.pos += byte_len;
                Some(Token::Codepoint { ch, byte_len })
            }
        }
    }
}

impl FusedIterator for MarkupScanner<'_> {}

/// Number of visible characters (directives and line breaks excluded)
pub fn visible_count(text: &str) -> usize {
    MarkupScanner::new(text).filter(Token::is_visible).count()
}
