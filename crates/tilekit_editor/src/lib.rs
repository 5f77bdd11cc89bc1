//! tilekit_editor - board painting engine for the tilekit editor
//!
//! This crate provides the editing core behind the board canvas:
//! - Brushes (shape, custom multi-tile and selection) bound to one layer per paint session
//! - A pointer gesture controller that drives the current brush or the selection rectangle
//! - Undo/redo of paint strokes
//! - Board documents (save/load), recent boards and editor preferences
//!
//! Windowing, rendering and pixel-to-tile mapping belong to the host, which
//! implements [`BoardView`] and forwards pointer events.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tilekit_editor::BoardEditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(MinimalPlugins)
//!         .add_plugins(BoardEditorPlugin::default())
//!         .run();
//! }
//! ```

pub mod brush;
pub mod commands;
pub mod preferences;
pub mod project;
pub mod session;
pub mod tools;
pub mod view;

// Re-export the data model
pub use tilekit_core;

pub use brush::{Brush, BrushError, BrushKind, BrushStrategy, CustomBrush, ShapeBrush};
pub use commands::{CommandHistory, EditCommand, HistoryError};
pub use preferences::EditorPreferences;
pub use project::{BoardDocument, DocumentError};
pub use session::EditorSession;
pub use tools::{BoardPaintController, GestureState};
pub use view::{BoardView, CoordinateMapper};

use bevy::log::{error, info};
use bevy::prelude::*;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Installs the editor resources: preferences, session, paint controller and the open board.
///
/// All editing goes through `ResMut` access to these resources, which keeps brush
/// and selection state confined to one system at a time.
#[derive(Debug, Default)]
pub struct BoardEditorPlugin {
    board_path: Option<PathBuf>,
    preferences_path: Option<PathBuf>,
}

impl BoardEditorPlugin {
    /// Open a board file at startup instead of an untitled board
    pub fn with_board(path: impl Into<PathBuf>) -> Self {
        Self {
            board_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Read and write preferences at `path` instead of the user config directory
    pub fn with_preferences_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    fn load_preferences(&self) -> EditorPreferences {
        match &self.preferences_path {
            Some(path) => EditorPreferences::load_or_default(path),
            None => EditorPreferences::load(),
        }
    }

    fn open_document(&self, preferences: &mut EditorPreferences) -> BoardDocument {
        if let Some(path) = &self.board_path {
            match load_recent(path, preferences) {
                Ok(document) => {
                    info!("Opened board {:?}", path);
                    return document;
                }
                Err(e) => error!("Failed to load board {:?}: {}", path, e),
            }
        }
        let width = NonZeroU32::new(preferences.new_board_width).unwrap_or(NonZeroU32::MIN);
        let height = NonZeroU32::new(preferences.new_board_height).unwrap_or(NonZeroU32::MIN);
        BoardDocument::untitled(width, height)
    }
}

impl Plugin for BoardEditorPlugin {
    fn build(&self, app: &mut App) {
        // Load user preferences
        let mut preferences = self.load_preferences();
        info!("Loaded editor preferences");

        let document = self.open_document(&mut preferences);

        app.insert_resource(EditorSession::with_preferences(&preferences))
            .insert_resource(document)
            .insert_resource(preferences)
            .init_resource::<BoardPaintController>();
    }
}

/// Replace the open board with a board file.
///
/// The session's history, selection and paint session belong to the previous
/// board and are reset. The file goes to the front of the recent boards list,
/// or is dropped from it when it cannot be loaded.
pub fn open_board(
    path: &Path,
    document: &mut BoardDocument,
    session: &mut EditorSession,
    preferences: &mut EditorPreferences,
) -> Result<(), DocumentError> {
    *document = load_recent(path, preferences)?;
    session.reset_for_new_board();
    info!("Opened board '{}' from {:?}", document.name(), path);
    Ok(())
}

/// Save the open board under a new path and remember it in the recent boards list
pub fn save_board_as(
    path: &Path,
    document: &mut BoardDocument,
    preferences: &mut EditorPreferences,
) -> Result<(), DocumentError> {
    document.save(path)?;
    preferences.add_recent_board(path.to_path_buf(), document.name().to_string());
    save_preferences(preferences);
    Ok(())
}

fn load_recent(
    path: &Path,
    preferences: &mut EditorPreferences,
) -> Result<BoardDocument, DocumentError> {
    match BoardDocument::load(path) {
        Ok(document) => {
            preferences.add_recent_board(path.to_path_buf(), document.name().to_string());
            save_preferences(preferences);
            Ok(document)
        }
        Err(e) => {
            // Remove from recent if the file is gone or broken
            if preferences.recent_boards.iter().any(|recent| recent.path == path) {
                preferences.remove_recent_board(path);
                save_preferences(preferences);
            }
            Err(e)
        }
    }
}

fn save_preferences(preferences: &EditorPreferences) {
    if let Err(e) = preferences.save() {
        error!("Failed to save preferences: {}", e);
    }
}
