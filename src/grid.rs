//! Background grid: a fixed window of translucent hexagons that follows the
//! viewport.
//!
//! The whole window is one merged mesh built at startup from the ring
//! spiral in [`ring_layout`]. Pan messages only move that entity, snapped to
//! the hex under the focal point, so tiles never appear to slide.

mod entities;
pub mod ring_layout;
mod systems;

pub use entities::{InverseGrid, TileInstance};
pub use ring_layout::{RingLayout, ring_hexes};
pub use systems::{build_tile_mesh, tile_instances};

use bevy::prelude::*;

use crate::error::{ColorError, ConfigError};
use crate::math;

/// Alpha applied to every grid tile.
pub const GRID_ALPHA: f32 = 0.5;

/// Configuration for the background grid.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GridConfig {
    /// Outermost ring drawn around the center cell (30 gives 2791 tiles).
    pub rings: u32,
    /// Tile color; alpha is always [`GRID_ALPHA`].
    pub color: Color,
    /// Gap between neighbouring tiles, in world units.
    pub tile_gap: f32,
    /// Height of the grid above the board plane, kept below pieces.
    pub elevation: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rings: 30,
            color: Color::srgb_u8(0x33, 0x99, 0xcc).with_alpha(GRID_ALPHA),
            tile_gap: 0.04,
            elevation: -0.01,
        }
    }
}

impl GridConfig {
    /// Default settings with the tile color parsed from a `#rrggbb` string.
    pub fn from_hex(color: &str) -> Result<Self, ConfigError> {
        let [r, g, b] = math::parse_hex_color(color)
            .map_err(|source: ColorError| ConfigError::InvalidGridColor { source })?;
        Ok(Self {
            color: Color::srgb_u8(r, g, b).with_alpha(GRID_ALPHA),
            ..default()
        })
    }
}

/// Background grid plugin.
pub struct GridPlugin(pub GridConfig);

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GridConfig>()
            .register_type::<InverseGrid>()
            .insert_resource(self.0.clone())
            .add_message::<crate::board::Pan>()
            .add_systems(Startup, systems::spawn_grid)
            .add_systems(Update, systems::follow_pan);
    }
}
