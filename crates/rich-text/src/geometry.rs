//! Points and rectangles

use serde::{Deserialize, Serialize};

/// 2D point / offset in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Integer rectangle inside the atlas surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    pub const EMPTY: AtlasRect = AtlasRect { x: 0, y: 0, width: 0, height: 0 };

    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether two rectangles share any pixel
    pub fn intersects(&self, other: &AtlasRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Get UV coordinates (normalized 0-1)
    pub fn uv(&self, atlas_size: u32) -> (f32, f32, f32, f32) {
        let inv = 1.0 / atlas_size as f32;
        (
            self.x as f32 * inv,
            self.y as f32 * inv,
            self.right() as f32 * inv,
            self.bottom() as f32 * inv,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = AtlasRect::new(0, 0, 10, 10);
        assert!(a.intersects(&AtlasRect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&AtlasRect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&AtlasRect::new(2, 2, 0, 0)));
    }

    #[test]
    fn test_atlas_uv() {
        let (u0, v0, u1, v1) = AtlasRect::new(64, 64, 8, 16).uv(256);
        assert_eq!(u0, 0.25);
        assert_eq!(v0, 0.25);
        assert_eq!(u1, 72.0 / 256.0);
        assert_eq!(v1, 80.0 / 256.0);
    }
}
