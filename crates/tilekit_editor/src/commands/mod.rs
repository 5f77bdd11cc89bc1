//! Undo/redo history for board edits

use crate::brush::TileChange;
use std::collections::VecDeque;
use thiserror::Error;
use tilekit_core::Board;
use uuid::Uuid;

/// Default number of undoable commands kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Errors raised when replaying history against a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The command was recorded on another board
    #[error("edit belongs to board {recorded}, not {given}")]
    BoardMismatch { recorded: Uuid, given: Uuid },
    /// The painted layer has been deleted since the edit
    #[error("layer {0} no longer exists")]
    MissingLayer(Uuid),
}

/// An undoable edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Tiles written during one paint gesture
    PaintTiles {
        board: Uuid,
        layer: Uuid,
        changes: Vec<TileChange>,
    },
}

impl EditCommand {
    pub fn description(&self) -> &'static str {
        match self {
            EditCommand::PaintTiles { .. } => "Paint tiles",
        }
    }

    /// Apply the new (`forward`) or old values. Nothing is written on error.
    fn apply(&self, board: &mut Board, forward: bool) -> Result<(), HistoryError> {
        match self {
            EditCommand::PaintTiles {
                board: recorded,
                layer,
                changes,
            } => {
                if *recorded != board.id {
                    return Err(HistoryError::BoardMismatch {
                        recorded: *recorded,
                        given: board.id,
                    });
                }
                let index = board
                    .layer_index(*layer)
                    .ok_or(HistoryError::MissingLayer(*layer))?;
                let layer = board
                    .layer_mut(index)
                    .map_err(|_| HistoryError::MissingLayer(*layer))?;
                for change in changes {
                    let tile = if forward { &change.new } else { &change.old };
                    layer.set_tile(change.x, change.y, tile.clone());
                }
                Ok(())
            }
        }
    }
}

/// Bounded undo/redo stacks
#[derive(Debug, Clone)]
pub struct CommandHistory {
    undo_stack: VecDeque<EditCommand>,
    redo_stack: Vec<EditCommand>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    /// A limit of zero disables history
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        while self.undo_stack.len() > limit {
            self.undo_stack.pop_front();
        }
    }

    /// Record an already applied command. Clears the redo stack.
    pub fn push(&mut self, command: EditCommand) {
        self.redo_stack.clear();
        if self.limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(command);
    }

    /// Revert the last command. Returns false when there is nothing to undo.
    ///
    /// A command for another board stays on the stack; one whose layer was
    /// deleted can never apply again and is dropped.
    pub fn undo(&mut self, board: &mut Board) -> Result<bool, HistoryError> {
        let Some(command) = self.undo_stack.pop_back() else {
            return Ok(false);
        };
        match command.apply(board, false) {
            Ok(()) => {
                self.redo_stack.push(command);
                Ok(true)
            }
            Err(e) => {
                if let HistoryError::BoardMismatch { .. } = e {
                    self.undo_stack.push_back(command);
                }
                Err(e)
            }
        }
    }

    /// Re-apply the last undone command. Returns false when there is nothing to redo.
    pub fn redo(&mut self, board: &mut Board) -> Result<bool, HistoryError> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        match command.apply(board, true) {
            Ok(()) => {
                self.undo_stack.push_back(command);
                Ok(true)
            }
            Err(e) => {
                if let HistoryError::BoardMismatch { .. } = e {
                    self.redo_stack.push(command);
                }
                Err(e)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the command `undo` would revert
    pub fn undo_description(&self) -> Option<&'static str> {
        self.undo_stack.back().map(EditCommand::description)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilekit_core::TileRef;

    fn paint(board: &mut Board, layer: usize, x: i32, tile: &str) -> EditCommand {
        let new = Some(TileRef::new(tile, 0));
        let old = board.set_tile(layer, x, 0, new.clone()).unwrap();
        EditCommand::PaintTiles {
            board: board.id,
            layer: board.layer(layer).unwrap().id(),
            changes: vec![TileChange { x, y: 0, old, new }],
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let mut history = CommandHistory::default();

        let command = paint(&mut board, 0, 1, "grass");
        history.push(command);
        assert_eq!(history.undo_description(), Some("Paint tiles"));

        assert_eq!(history.undo(&mut board), Ok(true));
        assert_eq!(board.tile(0, 1, 0), None);
        assert!(history.can_redo());

        assert_eq!(history.redo(&mut board), Ok(true));
        assert_eq!(board.tile(0, 1, 0), Some(&TileRef::new("grass", 0)));
        assert_eq!(history.redo(&mut board), Ok(false));
    }

    #[test]
    fn test_push_clears_redo() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let mut history = CommandHistory::default();

        let first = paint(&mut board, 0, 0, "grass");
        history.push(first);
        history.undo(&mut board).unwrap();
        let second = paint(&mut board, 0, 1, "sand");
        history.push(second);

        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let mut history = CommandHistory::with_limit(2);
        for x in 0..3 {
            let command = paint(&mut board, 0, x, "grass");
            history.push(command);
        }

        assert!(history.undo(&mut board).unwrap());
        assert!(history.undo(&mut board).unwrap());
        assert!(!history.undo(&mut board).unwrap());
        assert_eq!(board.tile(0, 0, 0), Some(&TileRef::new("grass", 0)));
    }

    #[test]
    fn test_undo_follows_moved_layer() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        board.add_layer();
        board.set_tile(1, 0, 0, Some(TileRef::new("rock", 0))).unwrap();
        let mut history = CommandHistory::default();
        history.push(paint(&mut board, 0, 0, "grass"));

        board.move_layer_up(0).unwrap();
        assert_eq!(history.undo(&mut board), Ok(true));

        // The painted layer now sits at index 1; the other layer is untouched
        assert_eq!(board.tile(1, 0, 0), None);
        assert_eq!(board.tile(0, 0, 0), Some(&TileRef::new("rock", 0)));

        assert_eq!(history.redo(&mut board), Ok(true));
        assert_eq!(board.tile(1, 0, 0), Some(&TileRef::new("grass", 0)));
    }

    #[test]
    fn test_undo_after_clone_targets_source_layer() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        let mut history = CommandHistory::default();
        history.push(paint(&mut board, 0, 2, "grass"));

        board.clone_layer(0).unwrap();
        history.undo(&mut board).unwrap();

        assert_eq!(board.tile(0, 2, 0), None);
        assert_eq!(board.tile(1, 2, 0), Some(&TileRef::new("grass", 0)));
    }

    #[test]
    fn test_undo_on_another_board_is_rejected() {
        let mut painted = Board::new("A", 4, 4).unwrap();
        let mut other = Board::new("B", 4, 4).unwrap();
        other.set_tile(0, 0, 0, Some(TileRef::new("rock", 0))).unwrap();
        let mut history = CommandHistory::default();
        history.push(paint(&mut painted, 0, 0, "grass"));

        assert!(matches!(
            history.undo(&mut other),
            Err(HistoryError::BoardMismatch { .. })
        ));
        assert_eq!(other.tile(0, 0, 0), Some(&TileRef::new("rock", 0)));
        assert!(history.can_undo());

        assert_eq!(history.undo(&mut painted), Ok(true));
        assert_eq!(painted.tile(0, 0, 0), None);
    }

    #[test]
    fn test_undo_on_deleted_layer_drops_command() {
        let mut board = Board::new("Test", 4, 4).unwrap();
        board.add_layer();
        let mut history = CommandHistory::default();
        history.push(paint(&mut board, 0, 3, "sand"));
        history.push(paint(&mut board, 1, 1, "grass"));
        board.delete_layer(1).unwrap();

        assert!(matches!(
            history.undo(&mut board),
            Err(HistoryError::MissingLayer(_))
        ));
        assert_eq!(history.undo(&mut board), Ok(true));
        assert_eq!(board.tile(0, 3, 0), None);
        assert!(!history.can_undo());
    }
}
