//! Shelf packing for the glyph atlas

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Top-left corner of the reserved area
    Placed { x: u32, y: u32 },
    /// No room left; the surface must be reset before retrying
    Full,
}

/// Packing cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasCursor {
    pub x: u32,
    pub y: u32,
    /// Tallest reservation in the current row
    pub row_height: u32,
}

/// Row-based bump allocator over a square surface.
///
/// Requests are expected to include their own trailing margin; the
/// leading margin is the border the cursor starts at.
#[derive(Debug, Clone)]
pub struct ShelfAllocator {
    size: u32,
    border: u32,
    cursor: AtlasCursor,
}

impl ShelfAllocator {
    /// Create an allocator for a `size`x`size` surface
    pub fn new(size: u32, border: u32) -> Self {
        Self {
            size,
            border,
            cursor: Self::origin_cursor(border),
        }
    }

    fn origin_cursor(border: u32) -> AtlasCursor {
        AtlasCursor {
            x: border,
            y: border,
            row_height: 0,
        }
    }

    /// Reserve a `width`x`height` area
    pub fn place(&mut self, width: u32, height: u32) -> Placement {
        let row_started = self.cursor.x > self.border;
        if row_started && self.cursor.x + width > self.size {
            self.cursor.x = self.border;
            self.cursor.y += self.cursor.row_height;
            self.cursor.row_height = 0;
        }

        if self.cursor.x + width > self.size || self.cursor.y + height > self.size {
            return Placement::Full;
        }

        let placed = Placement::Placed {
            x: self.cursor.x,
            y: self.cursor.y,
        };
        self.cursor.x += width;
        self.cursor.row_height = self.cursor.row_height.max(height);
        placed
    }

    /// Forget every placement
    pub fn reset(&mut self) {
        self.cursor = Self::origin_cursor(self.border);
    }

    pub fn cursor(&self) -> AtlasCursor {
        self.cursor
    }

    /// Cursor position of an empty surface
    pub fn origin(&self) -> AtlasCursor {
        Self::origin_cursor(self.border)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Fraction of rows consumed so far
    pub fn usage(&self) -> f32 {
        if self.size == 0 {
            return 1.0;
        }
        (self.cursor.y + self.cursor.row_height) as f32 / self.size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AtlasRect;

    fn unwrap_placed(p: Placement) -> (u32, u32) {
        match p {
            Placement::Placed { x, y } => (x, y),
            Placement::Full => panic!("unexpected Full"),
        }
    }

    #[test]
    fn test_usage_counts_started_rows() {
        let mut atlas = ShelfAllocator::new(64, 2);
        assert_eq!(atlas.usage(), 2.0 / 64.0);

        unwrap_placed(atlas.place(10, 14));
        assert_eq!(atlas.usage(), 16.0 / 64.0);

        atlas.reset();
        assert_eq!(atlas.usage(), 2.0 / 64.0);
        assert_eq!(ShelfAllocator::new(0, 0).usage(), 1.0);
    }

    #[test]
    fn test_first_placement_at_border() {
        let mut atlas = ShelfAllocator::new(64, 2);
        assert_eq!(unwrap_placed(atlas.place(10, 12)), (2, 2));
        assert_eq!(atlas.cursor(), AtlasCursor { x: 12, y: 2, row_height: 12 });
    }

    #[test]
    fn test_row_wrap_uses_tallest_item() {
        let mut atlas = ShelfAllocator::new(32, 2);
        assert_eq!(unwrap_placed(atlas.place(10, 6)), (2, 2));
        assert_eq!(unwrap_placed(atlas.place(10, 14)), (12, 2));
        // 22 + 12 > 32: new row below the 14px item
        assert_eq!(unwrap_placed(atlas.place(12, 4)), (2, 16));
    }

    #[test]
    fn test_reports_full() {
        let mut atlas = ShelfAllocator::new(32, 2);
        assert!(matches!(atlas.place(30, 20), Placement::Placed { .. }));
        assert_eq!(atlas.place(30, 20), Placement::Full);
    }

    #[test]
    fn test_oversized_request_is_full_on_empty_surface() {
        let mut atlas = ShelfAllocator::new(32, 2);
        assert_eq!(atlas.place(31, 4), Placement::Full);
        assert_eq!(atlas.cursor(), atlas.origin());
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut atlas = ShelfAllocator::new(64, 2);
        atlas.place(10, 10);
        atlas.place(60, 10);
        atlas.reset();
        assert_eq!(atlas.cursor(), atlas.origin());
        assert_eq!(unwrap_placed(atlas.place(4, 4)), (2, 2));
    }

    #[test]
    fn test_placements_never_overlap() {
        let mut atlas = ShelfAllocator::new(128, 2);
        let mut rects: Vec<AtlasRect> = Vec::new();
        let mut n = 0u32;
        loop {
            let w = 3 + (n * 7) % 13;
            let h = 2 + (n * 5) % 17;
            match atlas.place(w, h) {
                Placement::Placed { x, y } => rects.push(AtlasRect::new(x, y, w, h)),
                Placement::Full => break,
            }
            n += 1;
        }
        assert!(rects.len() > 20);
        for (i, a) in rects.iter().enumerate() {
            assert!(a.right() <= 128 && a.bottom() <= 128);
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}
