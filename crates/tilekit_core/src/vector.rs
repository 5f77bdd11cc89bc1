//! Vector shapes attached to board layers

use serde::{Deserialize, Serialize};

/// Movement/collision classification of a vector.
///
/// The codes are bit-flag shaped but the editor treats them as mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum TileType {
    #[default]
    Solid,
    Underlay,
    Stairs,
    Waypoint,
}

impl TileType {
    /// Integer code stored in board files
    pub fn code(&self) -> u32 {
        match self {
            TileType::Solid => 1,
            TileType::Underlay => 2,
            TileType::Stairs => 8,
            TileType::Waypoint => 16,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(TileType::Solid),
            2 => Some(TileType::Underlay),
            8 => Some(TileType::Stairs),
            16 => Some(TileType::Waypoint),
            _ => None,
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            TileType::Solid => "SOLID",
            TileType::Underlay => "UNDER",
            TileType::Stairs => "STAIRS",
            TileType::Waypoint => "WAYPOINT",
        }
    }

    /// Returns all variants for UI enumeration
    pub fn all() -> &'static [TileType] {
        &[
            TileType::Solid,
            TileType::Underlay,
            TileType::Stairs,
            TileType::Waypoint,
        ]
    }
}

impl From<TileType> for u32 {
    fn from(tile_type: TileType) -> Self {
        tile_type.code()
    }
}

impl TryFrom<u32> for TileType {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        TileType::from_code(code).ok_or_else(|| format!("unknown vector tile type {}", code))
    }
}

/// A named polygon on a layer.
///
/// `layer` mirrors the ordinal of the owning layer and is maintained by the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardVector {
    pub handle: String,
    pub points: Vec<[i32; 2]>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub tile_type: TileType,
    #[serde(default)]
    pub(crate) layer: usize,
}

impl BoardVector {
    /// Create an open vector with no points
    pub fn new(handle: impl Into<String>, tile_type: TileType) -> Self {
        Self {
            handle: handle.into(),
            points: Vec::new(),
            closed: false,
            tile_type,
            layer: 0,
        }
    }

    /// Builder-style point list
    pub fn with_points(mut self, points: impl IntoIterator<Item = [i32; 2]>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Ordinal of the layer that owns this vector
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn add_point(&mut self, x: i32, y: i32) {
        self.points.push([x, y]);
    }

    /// Bounding box of the points in board pixels as (min, max), None when empty
    pub fn bounds(&self) -> Option<([i32; 2], [i32; 2])> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (
                [min[0].min(p[0]), min[1].min(p[1])],
                [max[0].max(p[0]), max[1].max(p[1])],
            )
        }))
    }
}
