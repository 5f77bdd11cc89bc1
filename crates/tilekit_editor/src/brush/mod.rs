//! Brushes - pluggable painting strategies
//!
//! A brush is bound to one board layer for the duration of a paint session:
//! `start_paint` binds it, `do_paint` stamps at tile positions, `end_paint`
//! releases it. The selection brush never touches the grid; it only tells the
//! paint controller to drag a selection rectangle instead of stamping.

mod custom;
mod shape;

pub use custom::{BrushCell, CustomBrush};
pub use shape::ShapeBrush;

use thiserror::Error;
use tilekit_core::{Board, BoardError, Layer, TileRect, TileRef};
use uuid::Uuid;

/// Errors raised by brush operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrushError {
    /// `do_paint` was called without an active paint session
    #[error("do_paint called without a prior start_paint")]
    PaintSession,
    /// `do_paint` was called with a board other than the one the session is bound to
    #[error("paint session is bound to board {bound}, not {given}")]
    BoardMismatch { bound: Uuid, given: Uuid },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// How the paint controller treats a brush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    /// Stamps tiles into the bound layer
    Mutating,
    /// Drives the rubber-band selection, never writes tiles
    SelectionOnly,
}

/// The painting behaviour of a brush
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrushStrategy {
    Shape(ShapeBrush),
    Custom(CustomBrush),
    Selection,
}

/// Board and layer a brush is painting into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintBinding {
    pub board: Uuid,
    pub layer: usize,
}

/// A single cell whose value was changed by a stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileChange {
    pub x: i32,
    pub y: i32,
    pub old: Option<TileRef>,
    pub new: Option<TileRef>,
}

/// Write cells into a layer, dropping the ones outside its bounds.
/// Only cells whose value actually changed are reported.
fn write_cells(
    layer: &mut Layer,
    cells: impl Iterator<Item = (i32, i32, Option<TileRef>)>,
) -> Vec<TileChange> {
    let mut changes = Vec::new();
    for (x, y, tile) in cells {
        if !layer.in_bounds(x, y) || layer.tile(x, y) == tile.as_ref() {
            continue;
        }
        let old = layer.set_tile(x, y, tile.clone());
        changes.push(TileChange { x, y, old, new: tile });
    }
    changes
}

/// A brush plus its current paint session
#[derive(Debug)]
pub struct Brush {
    strategy: BrushStrategy,
    binding: Option<PaintBinding>,
}

impl Default for Brush {
    fn default() -> Self {
        Self::stamp(None, 1, 1)
    }
}

impl Brush {
    pub fn new(strategy: BrushStrategy) -> Self {
        Self {
            strategy,
            binding: None,
        }
    }

    /// Rectangular stamp of one tile (`None` erases)
    pub fn stamp(tile: Option<TileRef>, width: u32, height: u32) -> Self {
        Self::new(BrushStrategy::Shape(ShapeBrush::new(tile, width, height)))
    }

    pub fn custom(brush: CustomBrush) -> Self {
        Self::new(BrushStrategy::Custom(brush))
    }

    pub fn selection() -> Self {
        Self::new(BrushStrategy::Selection)
    }

    pub fn strategy(&self) -> &BrushStrategy {
        &self.strategy
    }

    /// Reconfigure the brush. Any open paint session is released.
    pub fn set_strategy(&mut self, strategy: BrushStrategy) {
        self.strategy = strategy;
        self.binding = None;
    }

    pub fn kind(&self) -> BrushKind {
        match self.strategy {
            BrushStrategy::Selection => BrushKind::SelectionOnly,
            BrushStrategy::Shape(_) | BrushStrategy::Custom(_) => BrushKind::Mutating,
        }
    }

    /// Footprint of one stamp relative to the paint position
    pub fn shape(&self) -> TileRect {
        match &self.strategy {
            BrushStrategy::Shape(brush) => brush.shape(),
            BrushStrategy::Custom(brush) => brush.shape(),
            BrushStrategy::Selection => TileRect::cell(0, 0),
        }
    }

    /// Whether the brush works on pixels rather than whole tile cells
    pub fn is_pixel_based(&self) -> bool {
        false
    }

    pub fn binding(&self) -> Option<PaintBinding> {
        self.binding
    }

    pub fn is_painting(&self) -> bool {
        self.binding.is_some()
    }

    /// Bind the brush to a board layer. Replaces any previous binding.
    pub fn start_paint(&mut self, board: &Board, layer: usize) -> Result<(), BrushError> {
        board.layer(layer)?;
        self.binding = Some(PaintBinding {
            board: board.id,
            layer,
        });
        Ok(())
    }

    /// Start a session released automatically when the guard drops
    pub fn begin(&mut self, board: &Board, layer: usize) -> Result<PaintGuard<'_>, BrushError> {
        self.start_paint(board, layer)?;
        Ok(PaintGuard::new(self))
    }

    /// Stamp at a tile position in the bound layer.
    ///
    /// Cells outside the board are dropped individually. Fails without touching the
    /// board when no session is open or the board is not the bound one.
    pub fn do_paint(
        &mut self,
        board: &mut Board,
        x: i32,
        y: i32,
    ) -> Result<Vec<TileChange>, BrushError> {
        let binding = self.binding.ok_or(BrushError::PaintSession)?;
        if binding.board != board.id {
            return Err(BrushError::BoardMismatch {
                bound: binding.board,
                given: board.id,
            });
        }
        let layer = board.layer_mut(binding.layer)?;
        Ok(match &self.strategy {
            BrushStrategy::Shape(brush) => brush.paint(layer, x, y),
            BrushStrategy::Custom(brush) => brush.paint(layer, x, y),
            BrushStrategy::Selection => Vec::new(),
        })
    }

    pub fn end_paint(&mut self) {
        self.binding = None;
    }
}

/// Scoped paint session: ends the brush's session on drop unless `hold` is called.
///
/// Early returns, `?` and unwinding all release the session.
pub struct PaintGuard<'a> {
    brush: &'a mut Brush,
    armed: bool,
}

impl<'a> PaintGuard<'a> {
    /// Guard an already started session
    pub fn new(brush: &'a mut Brush) -> Self {
        Self { brush, armed: true }
    }

    pub fn paint(
        &mut self,
        board: &mut Board,
        x: i32,
        y: i32,
    ) -> Result<Vec<TileChange>, BrushError> {
        self.brush.do_paint(board, x, y)
    }

    /// Leave the session open after the guard goes away
    pub fn hold(mut self) {
        self.armed = false;
    }
}

impl Drop for PaintGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.brush.end_paint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass() -> TileRef {
        TileRef::new("grass", 0)
    }

    #[test]
    fn test_stamp_constructor_and_shape() {
        let brush = Brush::stamp(Some(grass()), 3, 2);
        assert_eq!(brush.shape(), TileRect::new(0, 0, 3, 2));
        assert_eq!(Brush::default().shape(), TileRect::cell(0, 0));
        assert_eq!(Brush::selection().shape(), TileRect::cell(0, 0));
    }

    #[test]
    fn test_do_paint_without_session_fails() {
        let mut board = Board::new("Test", 10, 10).unwrap();
        let before = board.clone();
        let mut brush = Brush::stamp(Some(grass()), 2, 2);

        assert_eq!(brush.do_paint(&mut board, 1, 1), Err(BrushError::PaintSession));
        assert_eq!(board, before);
    }

    #[test]
    fn test_shape_stamp_clipped_at_edge() {
        let mut board = Board::new("Test", 10, 10).unwrap();
        let mut brush = Brush::stamp(Some(grass()), 2, 2);

        brush.start_paint(&board, 0).unwrap();
        let changes = brush.do_paint(&mut board, 9, 9).unwrap();
        brush.end_paint();

        assert_eq!(changes.len(), 1);
        assert_eq!(board.tile(0, 9, 9), Some(&grass()));
        let painted = board.layer(0).unwrap().tiles().iter().flatten().count();
        assert_eq!(painted, 1);
        assert!(!brush.is_painting());
    }

    #[test]
    fn test_shape_stamp_covers_every_in_bounds_cell() {
        let mut board = Board::new("Test", 5, 4).unwrap();
        let mut brush = Brush::stamp(Some(grass()), 3, 3);

        brush.start_paint(&board, 0).unwrap();
        brush.do_paint(&mut board, -1, 2).unwrap();

        for y in 0..4 {
            for x in 0..5 {
                let expected = (0..=1).contains(&x) && (2..=3).contains(&y);
                assert_eq!(board.tile(0, x, y).is_some(), expected, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_repaint_reports_no_changes() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let mut brush = Brush::stamp(Some(grass()), 1, 1);
        brush.start_paint(&board, 0).unwrap();

        assert_eq!(brush.do_paint(&mut board, 0, 0).unwrap().len(), 1);
        assert!(brush.do_paint(&mut board, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_eraser_clears_cells() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        board.set_tile(0, 1, 1, Some(grass())).unwrap();
        let mut brush = Brush::new(BrushStrategy::Shape(ShapeBrush::eraser()));

        brush.start_paint(&board, 0).unwrap();
        let changes = brush.do_paint(&mut board, 1, 1).unwrap();
        assert_eq!(
            changes,
            vec![TileChange {
                x: 1,
                y: 1,
                old: Some(grass()),
                new: None
            }]
        );
        assert_eq!(board.tile(0, 1, 1), None);
    }

    #[test]
    fn test_custom_brush_offsets() {
        let mut board = Board::new("Test", 6, 6).unwrap();
        let tree = CustomBrush::new(vec![
            BrushCell {
                dx: 0,
                dy: 0,
                tile: TileRef::new("tree", 0),
            },
            BrushCell {
                dx: 0,
                dy: 1,
                tile: TileRef::new("tree", 1),
            },
            BrushCell {
                dx: 1,
                dy: -1,
                tile: TileRef::new("tree", 2),
            },
        ]);
        let mut brush = Brush::custom(tree);
        assert_eq!(brush.shape(), TileRect::new(0, -1, 2, 3));

        brush.start_paint(&board, 0).unwrap();
        let changes = brush.do_paint(&mut board, 5, 0).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(board.tile(0, 5, 0), Some(&TileRef::new("tree", 0)));
        assert_eq!(board.tile(0, 5, 1), Some(&TileRef::new("tree", 1)));
    }

    #[test]
    fn test_selection_brush_never_writes() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let before = board.clone();
        let mut brush = Brush::selection();
        assert_eq!(brush.kind(), BrushKind::SelectionOnly);

        brush.start_paint(&board, 0).unwrap();
        assert!(brush.do_paint(&mut board, 2, 2).unwrap().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_start_paint_overwrites_previous_binding() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        board.add_layer();
        let mut brush = Brush::stamp(Some(grass()), 1, 1);

        brush.start_paint(&board, 1).unwrap();
        brush.end_paint();
        brush.start_paint(&board, 0).unwrap();
        brush.do_paint(&mut board, 0, 0).unwrap();

        assert_eq!(board.tile(0, 0, 0), Some(&grass()));
        assert_eq!(board.tile(1, 0, 0), None);
    }

    #[test]
    fn test_start_paint_on_missing_layer_fails() {
        let board = Board::new("Test", 4, 4).unwrap();
        let mut brush = Brush::default();
        assert!(matches!(
            brush.start_paint(&board, 2),
            Err(BrushError::Board(BoardError::InvalidIndex { index: 2, len: 1 }))
        ));
        assert!(!brush.is_painting());
    }

    #[test]
    fn test_bound_board_is_enforced() {
        let board = Board::new("A", 4, 4).unwrap();
        let mut other = Board::new("B", 4, 4).unwrap();
        let mut brush = Brush::stamp(Some(grass()), 1, 1);

        brush.start_paint(&board, 0).unwrap();
        assert!(matches!(
            brush.do_paint(&mut other, 0, 0),
            Err(BrushError::BoardMismatch { .. })
        ));
        assert_eq!(other.tile(0, 0, 0), None);
    }

    #[test]
    fn test_guard_releases_session_on_drop() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let mut brush = Brush::stamp(Some(grass()), 1, 1);

        {
            let mut guard = brush.begin(&board, 0).unwrap();
            guard.paint(&mut board, 1, 1).unwrap();
        }
        assert!(!brush.is_painting());

        brush.begin(&board, 0).unwrap().hold();
        assert!(brush.is_painting());
    }
}
