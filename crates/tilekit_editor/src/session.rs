//! Editor session: the state shared by the palette and the board canvas

use crate::brush::{Brush, BrushStrategy, CustomBrush, ShapeBrush};
use crate::commands::{CommandHistory, HistoryError};
use crate::preferences::EditorPreferences;
use crate::project::BoardDocument;
use bevy::prelude::Resource;
use tilekit_core::{Board, BoardError, TileRect, TileRef};

/// The single active brush, the rubber-band selection and the undo history.
///
/// Palette code writes the brush through this session and the paint controller
/// reads it, so there is exactly one current brush without any global.
#[derive(Resource, Debug, Default)]
pub struct EditorSession {
    brush: Brush,
    selection: Option<TileRect>,
    cursor: (i32, i32),
    pub history: CommandHistory,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session configured from saved preferences
    pub fn with_preferences(preferences: &EditorPreferences) -> Self {
        Self {
            brush: Brush::stamp(
                None,
                preferences.default_brush_width,
                preferences.default_brush_height,
            ),
            history: CommandHistory::with_limit(preferences.history_limit),
            ..Default::default()
        }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    /// Replace the current brush. The previous brush's paint session is dropped with it.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Palette pick: paint `tile` with a shape brush, keeping the current stamp size
    pub fn select_tile(&mut self, tile: Option<TileRef>) {
        let shape = match self.brush.strategy() {
            BrushStrategy::Shape(current) => ShapeBrush::new(tile, current.width(), current.height()),
            _ => ShapeBrush::new(tile, 1, 1),
        };
        self.brush.set_strategy(BrushStrategy::Shape(shape));
    }

    /// Turn the current selection into a custom brush.
    ///
    /// Returns false when nothing is selected.
    pub fn capture_selection(&mut self, board: &Board, layer: usize) -> Result<bool, BoardError> {
        let Some(selection) = self.selection else {
            return Ok(false);
        };
        let captured = CustomBrush::capture(board, layer, selection)?;
        self.brush.set_strategy(BrushStrategy::Custom(captured));
        Ok(true)
    }

    pub fn selection(&self) -> Option<TileRect> {
        self.selection
    }

    /// Returns true when the selection actually changed
    pub fn set_selection(&mut self, selection: Option<TileRect>) -> bool {
        if self.selection == selection {
            return false;
        }
        self.selection = selection;
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        self.set_selection(None)
    }

    /// Tile under the pointer
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Returns true when the cursor moved to another tile
    pub fn set_cursor(&mut self, x: i32, y: i32) -> bool {
        let changed = self.cursor != (x, y);
        self.cursor = (x, y);
        changed
    }

    /// Forget everything tied to the previous board: history, selection and the
    /// brush's paint session. Call when the open document is replaced.
    pub fn reset_for_new_board(&mut self) {
        self.history.clear();
        self.selection = None;
        self.brush.end_paint();
    }

    /// Revert the last edit and mark the document dirty when something changed
    pub fn undo(&mut self, document: &mut BoardDocument) -> Result<bool, HistoryError> {
        let undone = self.history.undo(&mut document.board)?;
        if undone {
            document.mark_dirty();
        }
        Ok(undone)
    }

    pub fn redo(&mut self, document: &mut BoardDocument) -> Result<bool, HistoryError> {
        let redone = self.history.redo(&mut document.board)?;
        if redone {
            document.mark_dirty();
        }
        Ok(redone)
    }
}
