//! Boards: ordered tile layers plus board-level metadata

use crate::{BoardError, BoardLinks, BoardVector, Layer, TileRect, TileRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroU32;
use uuid::Uuid;

/// A board (map) made of layers stacked bottom-to-top.
///
/// Every layer grid has exactly `width * height` cells, and layer ordinals are
/// always `0..layers.len()` in storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music: Option<String>,
    /// Program run when the player enters the board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_program: Option<String>,
    #[serde(default)]
    pub links: BoardLinks,
}

impl Board {
    /// Create a board with a single empty layer
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Result<Self, BoardError> {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Ok(Self::with_size(name, width, height)),
            _ => Err(BoardError::InvalidDimensions { width, height }),
        }
    }

    /// Create a board with a single empty layer from dimensions known to be positive
    pub fn with_size(name: impl Into<String>, width: NonZeroU32, height: NonZeroU32) -> Self {
        let mut board = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width: width.get(),
            height: height.get(),
            layers: Vec::new(),
            background_music: None,
            entry_program: None,
            links: BoardLinks::default(),
        };
        board.add_layer();
        board
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole board as a tile rectangle
    pub fn bounds(&self) -> TileRect {
        TileRect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }

    /// Layers in storage order (0 = bottom)
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Result<&Layer, BoardError> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or(BoardError::InvalidIndex { index, len })
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, BoardError> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(BoardError::InvalidIndex { index, len })
    }

    /// Current index of the layer with the given id
    pub fn layer_index(&self, id: Uuid) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    /// Append an empty layer on top and return its index
    pub fn add_layer(&mut self) -> usize {
        let number = self.layers.len();
        self.layers.push(Layer::new(
            format!("Layer {}", number + 1),
            number,
            self.width,
            self.height,
        ));
        number
    }

    /// Swap a layer with the one above it. Returns false when it is already on top.
    pub fn move_layer_up(&mut self, index: usize) -> Result<bool, BoardError> {
        self.layer(index)?;
        if index + 1 >= self.layers.len() {
            return Ok(false);
        }
        self.layers.swap(index, index + 1);
        self.renumber_layers();
        Ok(true)
    }

    /// Swap a layer with the one below it. Returns false when it is already at the bottom.
    pub fn move_layer_down(&mut self, index: usize) -> Result<bool, BoardError> {
        self.layer(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.layers.swap(index, index - 1);
        self.renumber_layers();
        Ok(true)
    }

    /// Insert a deep copy of a layer directly above it and return the copy's index
    pub fn clone_layer(&mut self, index: usize) -> Result<usize, BoardError> {
        let mut copy = self.layer(index)?.clone();
        copy.id = Uuid::new_v4();
        copy.name = format!("{} copy", copy.name);
        self.layers.insert(index + 1, copy);
        self.renumber_layers();
        Ok(index + 1)
    }

    /// Remove a layer together with its vectors.
    ///
    /// The last remaining layer cannot be deleted.
    pub fn delete_layer(&mut self, index: usize) -> Result<Layer, BoardError> {
        self.layer(index)?;
        if self.layers.len() == 1 {
            return Err(BoardError::InvalidIndex { index, len: 1 });
        }
        let removed = self.layers.remove(index);
        self.renumber_layers();
        Ok(removed)
    }

    /// Set a layer's opacity, clamped to [0, 1]
    pub fn set_opacity(&mut self, index: usize, value: f32) -> Result<(), BoardError> {
        self.layer_mut(index)?.set_opacity(value);
        Ok(())
    }

    pub fn set_layer_visible(&mut self, index: usize, visible: bool) -> Result<(), BoardError> {
        self.layer_mut(index)?.visible = visible;
        Ok(())
    }

    /// Toggle layer visibility, returning the new state
    pub fn toggle_layer_visibility(&mut self, index: usize) -> Result<bool, BoardError> {
        let layer = self.layer_mut(index)?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    pub fn rename_layer(&mut self, index: usize, name: impl Into<String>) -> Result<(), BoardError> {
        self.layer_mut(index)?.name = name.into();
        Ok(())
    }

    /// Get tile at position for a specific layer
    pub fn tile(&self, layer_index: usize, x: i32, y: i32) -> Option<&TileRef> {
        self.layers.get(layer_index)?.tile(x, y)
    }

    /// Set tile at position for a specific layer, returning the previous tile.
    ///
    /// Positions outside the board are ignored.
    pub fn set_tile(
        &mut self,
        layer_index: usize,
        x: i32,
        y: i32,
        tile: Option<TileRef>,
    ) -> Result<Option<TileRef>, BoardError> {
        Ok(self.layer_mut(layer_index)?.set_tile(x, y, tile))
    }

    /// Tiles of a layer inside a rectangle clipped to the board, row-major
    pub fn tiles_in_region(
        &self,
        layer_index: usize,
        region: TileRect,
    ) -> Result<Vec<((i32, i32), Option<TileRef>)>, BoardError> {
        let layer = self.layer(layer_index)?;
        let Some(clipped) = self.bounds().intersection(&region) else {
            return Ok(Vec::new());
        };
        Ok(clipped
            .cells()
            .map(|(x, y)| ((x, y), layer.tile(x, y).cloned()))
            .collect())
    }

    /// Attach a vector to a layer and return its index within that layer
    pub fn add_vector(
        &mut self,
        layer_index: usize,
        mut vector: BoardVector,
    ) -> Result<usize, BoardError> {
        let layer = self.layer_mut(layer_index)?;
        vector.layer = layer_index;
        layer.vectors.push(vector);
        Ok(layer.vectors.len() - 1)
    }

    pub fn remove_vector(
        &mut self,
        layer_index: usize,
        vector_index: usize,
    ) -> Result<BoardVector, BoardError> {
        let layer = self.layer_mut(layer_index)?;
        let len = layer.vectors.len();
        if vector_index >= len {
            return Err(BoardError::InvalidVectorIndex {
                layer: layer_index,
                index: vector_index,
                len,
            });
        }
        Ok(layer.vectors.remove(vector_index))
    }

    /// Move a vector to another layer and return its index there.
    ///
    /// Both layers are checked before anything changes, so a rejected move leaves
    /// the vector on its source layer.
    pub fn move_vector(
        &mut self,
        from: usize,
        vector_index: usize,
        to: usize,
    ) -> Result<usize, BoardError> {
        self.layer(to)?;
        let vector = self.remove_vector(from, vector_index)?;
        self.add_vector(to, vector)
    }

    /// Check the board invariants, e.g. after deserializing
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.layers.is_empty() {
            return Err(BoardError::InvalidIndex { index: 0, len: 0 });
        }
        let expected = self.width as usize * self.height as usize;
        let mut ids = HashSet::new();
        for (index, layer) in self.layers.iter().enumerate() {
            if !ids.insert(layer.id) {
                return Err(BoardError::DuplicateLayerId { layer: index });
            }
            if layer.width != self.width
                || layer.height != self.height
                || layer.cell_count() != expected
            {
                return Err(BoardError::GridMismatch {
                    layer: index,
                    expected,
                    actual: layer.cell_count(),
                });
            }
        }
        Ok(())
    }

    /// Restore ordinals after a structural change (or a load from an older file)
    pub fn renumber_layers(&mut self) {
        for (number, layer) in self.layers.iter_mut().enumerate() {
            layer.renumber(number);
        }
    }
}
