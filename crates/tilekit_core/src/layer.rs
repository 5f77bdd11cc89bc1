//! Board layers: a tile grid plus vector shapes

use crate::BoardVector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a graphical tile: a tileset and the tile's index inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub tileset: String,
    pub index: u32,
}

impl TileRef {
    pub fn new(tileset: impl Into<String>, index: u32) -> Self {
        Self {
            tileset: tileset.into(),
            index,
        }
    }
}

impl std::fmt::Display for TileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tileset, self.index)
    }
}

fn default_opacity() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// One grid plane of a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Stable identity, unchanged by reordering. Files without one get a fresh id.
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: Uuid,
    pub name: String,
    /// Ordinal within the board, 0 = bottom. Maintained by the board.
    pub(crate) number: usize,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    opacity: f32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Row-major tile grid, None = empty cell
    tiles: Vec<Option<TileRef>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) vectors: Vec<BoardVector>,
}

impl Layer {
    /// Create an empty, fully opaque, visible layer
    pub(crate) fn new(name: String, number: usize, width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            id: Uuid::new_v4(),
            name,
            number,
            visible: true,
            opacity: 1.0,
            width,
            height,
            tiles: vec![None; size],
            vectors: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the opacity, clamped to [0, 1]. NaN leaves the opacity unchanged.
    pub fn set_opacity(&mut self, value: f32) {
        if !value.is_nan() {
            self.opacity = value.clamp(0.0, 1.0);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Tile at position, None if empty or out of bounds
    pub fn tile(&self, x: i32, y: i32) -> Option<&TileRef> {
        self.cell_index(x, y)
            .and_then(|idx| self.tiles.get(idx))
            .and_then(|t| t.as_ref())
    }

    /// Write a cell and return its previous value.
    ///
    /// Out-of-bounds writes are dropped and return None.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Option<TileRef>) -> Option<TileRef> {
        let idx = self.cell_index(x, y)?;
        std::mem::replace(&mut self.tiles[idx], tile)
    }

    /// Row-major view of the grid
    pub fn tiles(&self) -> &[Option<TileRef>] {
        &self.tiles
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn vectors(&self) -> &[BoardVector] {
        &self.vectors
    }

    /// Mutable access to a vector's geometry. The owning layer cannot be changed
    /// through it; use `Board::move_vector`.
    pub fn vector_mut(&mut self, index: usize) -> Option<&mut BoardVector> {
        self.vectors.get_mut(index)
    }

    pub(crate) fn renumber(&mut self, number: usize) {
        self.number = number;
        for vector in &mut self.vectors {
            vector.layer = number;
        }
    }
}
