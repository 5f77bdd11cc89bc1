//! Tile-space rectangles

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in tile cells.
///
/// The rectangle covers the cells `x..x + width` and `y..y + height`, so a
/// rectangle built from two corners includes both corner cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Single cell at the given position
    pub fn cell(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Normalized rectangle spanning two corner cells, regardless of their order
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        let (min_x, max_x) = (a.0.min(b.0), a.0.max(b.0));
        let (min_y, max_y) = (a.1.min(b.1), a.1.max(b.1));
        Self {
            x: min_x,
            y: min_y,
            width: max_x.abs_diff(min_x) + 1,
            height: max_y.abs_diff(min_y) + 1,
        }
    }

    /// Top-left cell
    pub fn min(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Bottom-right cell (inclusive). Meaningless for empty rectangles.
    pub fn max(&self) -> (i32, i32) {
        (
            self.x + self.width as i32 - 1,
            self.y + self.height as i32 - 1,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width as i32
            && (y - self.y) < self.height as i32
    }

    /// Same rectangle moved by the given offset
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Overlap with another rectangle, if any
    pub fn intersection(&self, other: &TileRect) -> Option<TileRect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let (ax, ay) = self.max();
        let (bx, by) = other.max();
        let min_x = self.x.max(other.x);
        let min_y = self.y.max(other.y);
        let max_x = ax.min(bx);
        let max_y = ay.min(by);
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some(Self::from_corners((min_x, min_y), (max_x, max_y)))
    }

    /// Iterate the covered cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let rect = *self;
        (0..rect.height as i32)
            .flat_map(move |dy| (0..rect.width as i32).map(move |dx| (rect.x + dx, rect.y + dy)))
    }
}
