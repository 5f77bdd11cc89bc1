//! Boundary traits implemented by the board view that hosts the editor

/// Converts pointer positions into tile grid coordinates.
///
/// Pure function of the view's current zoom and scroll state.
pub trait CoordinateMapper {
    fn pixel_to_tile(&self, x: f32, y: f32) -> (i32, i32);
}

/// The on-screen board the pointer events come from
pub trait BoardView: CoordinateMapper {
    /// Storage index of the layer selected in the layer panel, if any
    fn current_selected_layer(&self) -> Option<usize>;
}
