//! Board paint controller - turns pointer gestures into brush calls
//!
//! A gesture starts on press, continues with drags and ends on release (or when
//! pointer capture is lost). Mutating brushes stamp on every press/drag event;
//! the selection brush drags a rubber-band rectangle instead.

use bevy::log::{error, warn};
use bevy::prelude::Resource;
use std::collections::HashMap;
use tilekit_core::{Board, TileRect, TileRef};
use uuid::Uuid;

use crate::brush::{BrushError, BrushKind, PaintGuard, TileChange};
use crate::commands::EditCommand;
use crate::project::BoardDocument;
use crate::session::EditorSession;
use crate::view::{BoardView, CoordinateMapper};

/// Where the controller is in the current pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A mutating brush is bound to `layer`
    Painting { layer: usize, origin: (i32, i32) },
    /// The selection rectangle is anchored at `origin`
    Selecting { origin: (i32, i32) },
}

/// Tracks tile changes during a painting stroke for undo support
#[derive(Debug)]
struct PaintStrokeTracker {
    board: Uuid,
    layer: Uuid,
    /// (x, y) -> (value before the stroke, latest value)
    changes: HashMap<(i32, i32), (Option<TileRef>, Option<TileRef>)>,
}

impl PaintStrokeTracker {
    fn new(board: Uuid, layer: Uuid) -> Self {
        Self {
            board,
            layer,
            changes: HashMap::new(),
        }
    }

    fn record(&mut self, changes: Vec<TileChange>) {
        for change in changes {
            self.changes
                .entry((change.x, change.y))
                .or_insert((change.old, None))
                .1 = change.new;
        }
    }

    /// Net changes of the stroke as an undoable command, None if nothing changed
    fn into_command(self) -> Option<EditCommand> {
        let mut changes: Vec<TileChange> = self
            .changes
            .into_iter()
            .filter(|(_, (old, new))| old != new)
            .map(|((x, y), (old, new))| TileChange { x, y, old, new })
            .collect();
        if changes.is_empty() {
            return None;
        }
        changes.sort_by_key(|c| (c.y, c.x));
        Some(EditCommand::PaintTiles {
            board: self.board,
            layer: self.layer,
            changes,
        })
    }
}

/// Pointer gesture state machine between the board view and the current brush.
///
/// Every handler returns whether the view needs repainting.
#[derive(Resource, Debug, Default)]
pub struct BoardPaintController {
    state: GestureState,
    stroke: Option<PaintStrokeTracker>,
}

impl BoardPaintController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Pointer button pressed over the board
    pub fn pointer_pressed(
        &mut self,
        view: &impl BoardView,
        document: &mut BoardDocument,
        session: &mut EditorSession,
        x: f32,
        y: f32,
    ) -> bool {
        if !self.is_idle() {
            // The release of the previous gesture never arrived
            warn!("Pointer pressed during an open gesture; ending it first");
            self.finish(session);
        }

        let Some(layer) = view.current_selected_layer() else {
            return false;
        };
        let tile = view.pixel_to_tile(x, y);
        session.set_cursor(tile.0, tile.1);

        match session.brush().kind() {
            BrushKind::SelectionOnly => {
                self.state = GestureState::Selecting { origin: tile };
                session.set_selection(Some(TileRect::cell(tile.0, tile.1)));
                true
            }
            BrushKind::Mutating => {
                session.clear_selection();
                match start_stroke(session, &mut document.board, layer, tile) {
                    Ok((stroke, changes)) => {
                        self.stroke = Some(stroke);
                        self.record(document, changes);
                        self.state = GestureState::Painting {
                            layer,
                            origin: tile,
                        };
                    }
                    Err(e) => self.abandon(session, &e),
                }
                true
            }
        }
    }

    /// Pointer moved with the button held. A gesture whose layer selection went
    /// away is ended.
    pub fn pointer_dragged(
        &mut self,
        view: &impl BoardView,
        document: &mut BoardDocument,
        session: &mut EditorSession,
        x: f32,
        y: f32,
    ) -> bool {
        let tile = view.pixel_to_tile(x, y);
        let cursor_moved = session.set_cursor(tile.0, tile.1);

        if !self.is_idle() && view.current_selected_layer().is_none() {
            warn!("Layer selection cleared during a gesture; ending it");
            self.finish(session);
            return true;
        }

        match self.state {
            GestureState::Idle => cursor_moved,
            GestureState::Selecting { origin } => {
                session.set_selection(Some(TileRect::from_corners(origin, tile)))
            }
            GestureState::Painting { .. } => {
                // The guard releases the brush if the stamp fails
                let result = {
                    let mut guard = PaintGuard::new(session.brush_mut());
                    let result = guard.paint(&mut document.board, tile.0, tile.1);
                    if result.is_ok() {
                        guard.hold();
                    }
                    result
                };
                match result {
                    Ok(changes) => self.record(document, changes),
                    Err(e) => self.abandon(session, &e),
                }
                true
            }
        }
    }

    /// Pointer button released. Ends the gesture; returns false if none was open.
    pub fn pointer_released(&mut self, session: &mut EditorSession) -> bool {
        if self.is_idle() {
            return false;
        }
        self.finish(session);
        true
    }

    /// Pointer capture lost; handled like a release
    pub fn pointer_cancelled(&mut self, session: &mut EditorSession) -> bool {
        self.pointer_released(session)
    }

    /// Pointer moved without a button held: only the cursor tile changes
    pub fn pointer_moved(
        &mut self,
        view: &impl CoordinateMapper,
        session: &mut EditorSession,
        x: f32,
        y: f32,
    ) -> bool {
        let (tx, ty) = view.pixel_to_tile(x, y);
        session.set_cursor(tx, ty)
    }

    fn record(&mut self, document: &mut BoardDocument, changes: Vec<TileChange>) {
        if changes.is_empty() {
            return;
        }
        document.mark_dirty();
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.record(changes);
        }
    }

    /// End the gesture: release the brush and commit the stroke to the history
    fn finish(&mut self, session: &mut EditorSession) {
        if let GestureState::Painting { .. } = self.state {
            session.brush_mut().end_paint();
        }
        self.commit(session);
    }

    /// Drop the gesture after a failed paint call. The failing call's guard has
    /// already released the brush; stamps already applied stay on the board.
    fn abandon(&mut self, session: &mut EditorSession, err: &BrushError) {
        error!("Paint gesture abandoned: {}", err);
        self.commit(session);
    }

    fn commit(&mut self, session: &mut EditorSession) {
        if let Some(command) = self.stroke.take().and_then(PaintStrokeTracker::into_command) {
            session.history.push(command);
        }
        self.state = GestureState::Idle;
    }
}

/// Bind the current brush to `layer` and stamp the first cell
fn start_stroke(
    session: &mut EditorSession,
    board: &mut Board,
    layer: usize,
    tile: (i32, i32),
) -> Result<(PaintStrokeTracker, Vec<TileChange>), BrushError> {
    let mut guard = session.brush_mut().begin(board, layer)?;
    let stroke = PaintStrokeTracker::new(board.id, board.layer(layer)?.id());
    let changes = guard.paint(board, tile.0, tile.1)?;
    guard.hold();
    Ok((stroke, changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Brush;
    use crate::commands::HistoryError;

    /// 16px tiles, no zoom or scroll
    struct FixedView {
        layer: Option<usize>,
    }

    impl CoordinateMapper for FixedView {
        fn pixel_to_tile(&self, x: f32, y: f32) -> (i32, i32) {
            ((x / 16.0).floor() as i32, (y / 16.0).floor() as i32)
        }
    }

    impl BoardView for FixedView {
        fn current_selected_layer(&self) -> Option<usize> {
            self.layer
        }
    }

    fn px(tile: i32) -> f32 {
        tile as f32 * 16.0 + 8.0
    }

    fn grass() -> TileRef {
        TileRef::new("grass", 0)
    }

    fn change(x: i32, old: Option<TileRef>, new: Option<TileRef>) -> TileChange {
        TileChange { x, y: 1, old, new }
    }

    #[test]
    fn test_stroke_tracker_keeps_first_old_and_last_new() {
        let mut stroke = PaintStrokeTracker::new(Uuid::new_v4(), Uuid::new_v4());
        stroke.record(vec![change(1, None, Some(grass()))]);
        stroke.record(vec![change(1, Some(grass()), Some(TileRef::new("sand", 0)))]);

        let Some(EditCommand::PaintTiles { changes, .. }) = stroke.into_command() else {
            panic!("Expected paint command");
        };
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old, None);
        assert_eq!(changes[0].new, Some(TileRef::new("sand", 0)));
    }

    #[test]
    fn test_stroke_that_restores_cells_is_not_recorded() {
        let mut stroke = PaintStrokeTracker::new(Uuid::new_v4(), Uuid::new_v4());
        stroke.record(vec![change(0, None, Some(grass()))]);
        stroke.record(vec![change(0, Some(grass()), None)]);
        assert!(stroke.into_command().is_none());
    }

    #[test]
    fn test_abandoned_gesture_releases_brush() {
        let view = FixedView { layer: Some(1) };
        let mut board = Board::new("Test", 4, 4).unwrap();
        board.add_layer();
        let mut document = BoardDocument::new(board);
        let mut session = EditorSession::new();
        session.set_brush(Brush::stamp(Some(grass()), 1, 1));
        let mut controller = BoardPaintController::new();

        controller.pointer_pressed(&view, &mut document, &mut session, px(0), px(0));
        assert_eq!(document.board.tile(1, 0, 0), Some(&grass()));
        document.board.delete_layer(1).unwrap();
        controller.pointer_dragged(&view, &mut document, &mut session, px(1), px(0));

        assert!(controller.is_idle());
        assert!(!session.brush().is_painting());
        // The stamp applied before the failure was recorded, but its layer is gone
        assert!(session.history.can_undo());
        assert!(matches!(
            session.undo(&mut document),
            Err(HistoryError::MissingLayer(_))
        ));
        assert!(!session.history.can_undo());

        // A fresh gesture binds the brush again
        let view = FixedView { layer: Some(0) };
        controller.pointer_pressed(&view, &mut document, &mut session, px(2), px(2));
        assert!(session.brush().is_painting());
        assert_eq!(document.board.tile(0, 2, 2), Some(&grass()));
    }

    #[test]
    fn test_drag_without_selected_layer_ends_gesture() {
        let mut document = BoardDocument::new(Board::new("Test", 4, 4).unwrap());
        let mut session = EditorSession::new();
        session.set_brush(Brush::stamp(Some(grass()), 1, 1));
        let mut controller = BoardPaintController::new();

        let view = FixedView { layer: Some(0) };
        controller.pointer_pressed(&view, &mut document, &mut session, px(0), px(0));
        let view = FixedView { layer: None };
        assert!(controller.pointer_dragged(&view, &mut document, &mut session, px(1), px(0)));

        assert!(controller.is_idle());
        assert!(!session.brush().is_painting());
        assert_eq!(document.board.tile(0, 1, 0), None);
        assert!(session.history.can_undo());
    }

    #[test]
    fn test_painting_marks_document_dirty() {
        let view = FixedView { layer: Some(0) };
        let mut document = BoardDocument::new(Board::new("Test", 4, 4).unwrap());
        let mut session = EditorSession::new();
        let mut controller = BoardPaintController::new();

        // Erasing an empty cell changes nothing
        session.set_brush(Brush::stamp(None, 1, 1));
        controller.pointer_pressed(&view, &mut document, &mut session, px(1), px(1));
        controller.pointer_released(&mut session);
        assert!(!document.is_dirty());

        session.set_brush(Brush::stamp(Some(grass()), 1, 1));
        controller.pointer_pressed(&view, &mut document, &mut session, px(1), px(1));
        controller.pointer_released(&mut session);
        assert!(document.is_dirty());
    }
}
