//! Errors raised by structural board operations

use thiserror::Error;

/// Failure of a board or layer operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Layer index out of range, or an operation that would leave the board without layers
    #[error("invalid layer index {index} (board has {len} layers)")]
    InvalidIndex { index: usize, len: usize },

    #[error("invalid vector index {index} on layer {layer} (layer has {len} vectors)")]
    InvalidVectorIndex {
        layer: usize,
        index: usize,
        len: usize,
    },

    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A layer grid does not match the owning board's dimensions
    #[error("layer {layer} has {actual} cells, expected {expected}")]
    GridMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    /// Two layers of a loaded board share an id
    #[error("layer {layer} duplicates the id of another layer")]
    DuplicateLayerId { layer: usize },
}
