//! Board file save/load operations

use super::BoardDocument;
use std::path::Path;
use thiserror::Error;
use tilekit_core::{Board, BoardError};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
    #[error("No file path set")]
    NoPath,
}

impl BoardDocument {
    /// Load a board file, checking the grid invariants
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let mut board: Board = serde_json::from_str(&content)?;
        board.validate()?;
        // Ordinals are derived from storage order
        board.renumber_layers();

        Ok(Self {
            board,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Save the board to a file and remember the path
    pub fn save(&mut self, path: &Path) -> Result<(), DocumentError> {
        let content = serde_json::to_string_pretty(&self.board)?;
        std::fs::write(path, content)?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;
        bevy::log::info!("Saved board '{}' to {:?}", self.board.name, path);

        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), DocumentError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(DocumentError::NoPath)
        }
    }
}
