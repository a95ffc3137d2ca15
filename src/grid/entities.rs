use bevy::prelude::*;
use hexx::Hex;

use crate::board::CoordinateTransform;

/// The single entity carrying the merged background-grid mesh.
///
/// The mesh never changes after startup; only the entity's translation
/// follows the viewport, snapped to hex centers.
#[derive(Component, Default, Debug, Reflect)]
pub struct InverseGrid {
    /// Cell the grid is centred on. `None` until the first pan.
    pub center: Option<Hex>,
}

impl InverseGrid {
    /// Snaps `middle` to the nearest hex center and records that cell.
    ///
    /// Returns the pixel position the grid origin belongs at. Calling this
    /// repeatedly with points inside the same cell always yields the same
    /// position.
    pub fn recenter(&mut self, transform: &impl CoordinateTransform, middle: Vec2) -> Vec2 {
        let hex = transform.to_axial(middle);
        self.center = Some(hex);
        transform.to_pixel(hex)
    }
}

/// One tile of the grid: where it sits relative to the grid origin and its color.
///
/// Built once from the ring layout; the mesh merger consumes these by index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileInstance {
    /// Offset of the tile center on the board plane.
    pub position: Vec2,
    /// Per-tile vertex color (alpha included).
    pub color: Color,
}
