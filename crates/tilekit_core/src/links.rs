//! Directional links between neighbouring boards

use serde::{Deserialize, Serialize};

/// Edge of a board through which the player can walk onto a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }

    /// Get the opposite direction
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns all direction variants for UI enumeration
    pub fn all() -> &'static [Direction] {
        &[
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Neighbouring board file names, one optional slot per edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<String>,
}

impl BoardLinks {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        self.slot(direction).as_deref()
    }

    /// Set or clear the neighbour on one edge, returning the previous one
    pub fn set(&mut self, direction: Direction, board: Option<String>) -> Option<String> {
        std::mem::replace(self.slot_mut(direction), board)
    }

    /// Linked edges in North, South, East, West order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &str)> {
        Direction::all()
            .iter()
            .filter_map(move |d| self.get(*d).map(|board| (*d, board)))
    }

    fn slot(&self, direction: Direction) -> &Option<String> {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
            Direction::East => &self.east,
            Direction::West => &self.west,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<String> {
        match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        }
    }
}
