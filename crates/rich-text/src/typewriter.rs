//! Typewriter reveal
//!
//! Tracks how many visible characters should be shown after a given amount
//! of time. Rendering reads [`Typewriter::visible_limit`]; nothing here
//! touches the glyph cache.

use serde::{Deserialize, Serialize};

use crate::markup::visible_count;

/// Reveal progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterState {
    Running,
    Finished,
}

/// Typewriter progress for one text.
///
/// Fields are public so callers can restart a reveal by zeroing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typewriter {
    /// Characters per second
    pub speed: f32,
    /// Accumulated seconds
    pub elapsed: f32,
    /// Visible characters revealed so far
    pub current_visible: usize,
    pub finished: bool,
}

impl Typewriter {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            elapsed: 0.0,
            current_visible: 0,
            finished: false,
        }
    }

    /// Advance by `delta` seconds; negative deltas count as zero.
    pub fn update(&mut self, text: &str, delta: f32) {
        if self.finished {
            return;
        }

        self.elapsed += delta.max(0.0);
        // TODO: cache the total per text if documents get long enough to show up in profiles
        let total = visible_count(text);
        let target = if self.speed > 0.0 && self.elapsed >= total as f32 / self.speed {
            total
        } else {
            (self.elapsed as f64 * self.speed as f64).floor().max(0.0) as usize
        };

        self.current_visible = target.min(total);
        self.finished = self.current_visible >= total;
    }

    pub fn state(&self) -> TypewriterState {
        if self.finished {
            TypewriterState::Finished
        } else {
            TypewriterState::Running
        }
    }

    /// Limit to pass to the draw pass
    pub fn visible_limit(&self) -> Option<usize> {
        Some(self.current_visible)
    }
}

/// Free-function form of [`Typewriter::update`]
pub fn advance_typewriter(state: &mut Typewriter, text: &str, delta: f32) {
    state.update(text, delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "[color=red]Hi[/color] there";

    #[test]
    fn test_reveals_at_speed() {
        let mut tw = Typewriter::new(10.0);
        tw.update(TEXT, 0.25);
        assert_eq!(tw.current_visible, 2);
        assert_eq!(tw.state(), TypewriterState::Running);

        tw.update(TEXT, 0.3);
        assert_eq!(tw.current_visible, 5);
    }

    #[test]
    fn test_finishes_at_total() {
        let mut tw = Typewriter::new(10.0);
        tw.update(TEXT, 0.8);
        assert_eq!(tw.current_visible, 8);
        assert!(tw.finished);
        assert_eq!(tw.state(), TypewriterState::Finished);
    }

    #[test]
    fn test_finishes_exactly_at_total_over_speed() {
        for speed in [0.7, 13.3, 18.9, 25.9, 139.3] {
            for len in 1..=40 {
                let text = "x".repeat(len);
                let mut tw = Typewriter::new(speed);
                tw.elapsed = len as f32 / speed;
                tw.update(&text, 0.0);
                assert_eq!(tw.current_visible, len, "speed {speed}, {len} chars");
                assert!(tw.finished, "speed {speed}, {len} chars");
            }
        }
    }

    #[test]
    fn test_clamped_to_total() {
        let mut tw = Typewriter::new(100.0);
        tw.update(TEXT, 5.0);
        assert_eq!(tw.current_visible, visible_count(TEXT));
    }

    #[test]
    fn test_finished_is_sticky() {
        let mut tw = Typewriter::new(100.0);
        tw.update("ab", 1.0);
        let elapsed = tw.elapsed;
        tw.update("abcdef", 1.0);
        assert_eq!(tw.elapsed, elapsed);
        assert_eq!(tw.current_visible, 2);
    }

    #[test]
    fn test_monotonic_with_negative_delta() {
        let mut tw = Typewriter::new(4.0);
        let mut last = 0;
        for delta in [0.1, 0.5, -1.0, 0.0, 0.3, -0.2, 0.9] {
            tw.update(TEXT, delta);
            assert!(tw.current_visible >= last);
            last = tw.current_visible;
        }
    }

    #[test]
    fn test_empty_text_finishes_immediately() {
        let mut tw = Typewriter::new(10.0);
        tw.update("", 0.0);
        assert!(tw.finished);
        assert_eq!(tw.current_visible, 0);
    }

    #[test]
    fn test_external_reset() {
        let mut tw = Typewriter::new(100.0);
        advance_typewriter(&mut tw, TEXT, 1.0);
        assert!(tw.finished);

        tw = Typewriter { elapsed: 0.0, current_visible: 0, finished: false, ..tw };
        advance_typewriter(&mut tw, TEXT, 0.025);
        assert_eq!(tw.current_visible, 2);
    }
}
