//! Core data structures for the tilekit board editor
//!
//! This crate provides the layer grid model that brushes paint into:
//! - `Board` - A map made of ordered layers plus board metadata
//! - `Layer` - One tile grid plane with opacity, visibility and vectors
//! - `BoardVector` - A polygon tagged with a movement classification
//! - `TileRect` - Rectangles in tile coordinates (stamps, selections, regions)

mod board;
mod error;
mod geometry;
mod layer;
mod links;
mod vector;

pub use board::Board;
pub use error::BoardError;
pub use geometry::TileRect;
pub use layer::{Layer, TileRef};
pub use links::{BoardLinks, Direction};
pub use vector::{BoardVector, TileType};
