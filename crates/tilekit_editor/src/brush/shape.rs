//! Rectangular stamp brush

use super::TileChange;
use tilekit_core::{Layer, TileRect, TileRef};

/// Stamps one tile into every cell of a `width` x `height` rectangle anchored at
/// the paint position. A `None` tile erases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeBrush {
    pub tile: Option<TileRef>,
    width: u32,
    height: u32,
}

impl ShapeBrush {
    /// Zero sizes are raised to one cell
    pub fn new(tile: Option<TileRef>, width: u32, height: u32) -> Self {
        Self {
            tile,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Single-cell eraser
    pub fn eraser() -> Self {
        Self::new(None, 1, 1)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Stamp footprint relative to the paint position
    pub fn shape(&self) -> TileRect {
        TileRect::new(0, 0, self.width, self.height)
    }

    pub(super) fn paint(&self, layer: &mut Layer, x: i32, y: i32) -> Vec<TileChange> {
        super::write_cells(
            layer,
            self.shape()
                .translated(x, y)
                .cells()
                .map(|(cx, cy)| (cx, cy, self.tile.clone())),
        )
    }
}
