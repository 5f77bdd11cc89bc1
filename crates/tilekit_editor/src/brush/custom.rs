//! Multi-tile brush built from an arbitrary arrangement of cells

use super::TileChange;
use tilekit_core::{Board, BoardError, Layer, TileRect, TileRef};

/// One tile of a custom brush, offset from the paint position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushCell {
    pub dx: i32,
    pub dy: i32,
    pub tile: TileRef,
}

/// Irregular tile arrangement, typically captured from a tileset or board region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomBrush {
    cells: Vec<BrushCell>,
}

impl CustomBrush {
    pub fn new(cells: Vec<BrushCell>) -> Self {
        Self { cells }
    }

    /// Copy the non-empty cells of a board region. Offsets are relative to the
    /// region's top-left corner; parts of the region outside the board are ignored.
    pub fn capture(board: &Board, layer: usize, region: TileRect) -> Result<Self, BoardError> {
        let cells = board
            .tiles_in_region(layer, region)?
            .into_iter()
            .filter_map(|((x, y), tile)| {
                tile.map(|tile| BrushCell {
                    dx: x - region.x,
                    dy: y - region.y,
                    tile,
                })
            })
            .collect();
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[BrushCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box of the offsets, a single cell at the origin when empty
    pub fn shape(&self) -> TileRect {
        let Some(first) = self.cells.first() else {
            return TileRect::cell(0, 0);
        };
        let (mut min, mut max) = ((first.dx, first.dy), (first.dx, first.dy));
        for cell in &self.cells[1..] {
            min = (min.0.min(cell.dx), min.1.min(cell.dy));
            max = (max.0.max(cell.dx), max.1.max(cell.dy));
        }
        TileRect::from_corners(min, max)
    }

    pub(super) fn paint(&self, layer: &mut Layer, x: i32, y: i32) -> Vec<TileChange> {
        super::write_cells(
            layer,
            self.cells
                .iter()
                .map(|cell| (x + cell.dx, y + cell.dy, Some(cell.tile.clone()))),
        )
    }
}
