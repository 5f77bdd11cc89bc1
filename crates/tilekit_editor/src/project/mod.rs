//! Board documents: a board plus where it lives on disk

mod file;

pub use file::*;

use bevy::prelude::Resource;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use tilekit_core::Board;

/// The board open in the editor
#[derive(Debug, Clone, Resource)]
pub struct BoardDocument {
    pub board: Board,
    path: Option<PathBuf>,
    dirty: bool,
}

impl BoardDocument {
    /// Wrap an unsaved board
    pub fn new(board: Board) -> Self {
        Self {
            board,
            path: None,
            dirty: false,
        }
    }

    /// New untitled board with a single layer
    pub fn untitled(width: NonZeroU32, height: NonZeroU32) -> Self {
        Self::new(Board::with_size("Untitled", width, height))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.board.name
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
