//! Editor preferences persisted between sessions

mod file;

pub use file::*;

use crate::commands::DEFAULT_HISTORY_LIMIT;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of entries in the recent boards list
pub const MAX_RECENT_BOARDS: usize = 10;

/// A recently opened board file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentBoard {
    pub path: PathBuf,
    pub name: String,
}

/// User preferences for the board editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorPreferences {
    /// Show the tile coordinate under the cursor
    pub show_coordinates: bool,
    /// Size of newly created boards, in tiles
    pub new_board_width: u32,
    pub new_board_height: u32,
    /// Stamp size of the shape brush at startup
    pub default_brush_width: u32,
    pub default_brush_height: u32,
    /// Number of undoable edits kept
    pub history_limit: usize,
    /// Most recent first
    pub recent_boards: Vec<RecentBoard>,
    /// File these preferences were loaded from, where `save` writes them back
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            show_coordinates: true,
            new_board_width: 20,
            new_board_height: 15,
            default_brush_width: 1,
            default_brush_height: 1,
            history_limit: DEFAULT_HISTORY_LIMIT,
            recent_boards: Vec::new(),
            source: None,
        }
    }
}

impl EditorPreferences {
    /// Move or insert a board at the front of the recent list
    pub fn add_recent_board(&mut self, path: PathBuf, name: String) {
        self.recent_boards.retain(|recent| recent.path != path);
        self.recent_boards.insert(0, RecentBoard { path, name });
        self.recent_boards.truncate(MAX_RECENT_BOARDS);
    }

    pub fn remove_recent_board(&mut self, path: &std::path::Path) {
        self.recent_boards.retain(|recent| recent.path != path);
    }

    pub fn clear_recent_boards(&mut self) {
        self.recent_boards.clear();
    }
}
