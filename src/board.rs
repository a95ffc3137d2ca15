//! Board geometry: the hex ↔ pixel relation shared by every subsystem.
//!
//! Hex math is delegated to [`hexx::HexLayout`]; everything else talks to it
//! through [`CoordinateTransform`] so the grid and piece code never depend on
//! a concrete layout.

use bevy::prelude::*;
use hexx::{Hex, HexLayout, HexOrientation};

use crate::error::ConfigError;

/// Converts between axial hex coordinates and board-plane pixel positions.
///
/// Implementations must round-trip: `to_axial(to_pixel(h)) == h`.
pub trait CoordinateTransform {
    /// Pixel position of the center of `hex`.
    fn to_pixel(&self, hex: Hex) -> Vec2;
    /// Hex cell containing `pos`.
    fn to_axial(&self, pos: Vec2) -> Hex;
}

impl CoordinateTransform for HexLayout {
    fn to_pixel(&self, hex: Hex) -> Vec2 {
        self.hex_to_world_pos(hex)
    }

    fn to_axial(&self, pos: Vec2) -> Hex {
        self.world_pos_to_hex(pos)
    }
}

/// Board-wide geometry settings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BoardConfig {
    /// Distance from a hex center to its corners, in world units.
    pub hex_size: f32,
    /// Flat-top hexes when `true`, pointy-top otherwise.
    pub flat: bool,
    /// Y coordinate of the board plane.
    pub elevation: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hex_size: 1.0,
            flat: false,
            elevation: 0.0,
        }
    }
}

/// The hex layout of the board, built once from [`BoardConfig`].
#[derive(Resource, Clone, Debug)]
pub struct HexDimensions {
    layout: HexLayout,
    size: f32,
}

impl HexDimensions {
    /// Builds the layout, rejecting non-positive sizes.
    pub fn from_config(cfg: &BoardConfig) -> Result<Self, ConfigError> {
        if !(cfg.hex_size.is_finite() && cfg.hex_size > 0.0) {
            return Err(ConfigError::InvalidHexSize(cfg.hex_size));
        }
        let orientation = if cfg.flat {
            HexOrientation::Flat
        } else {
            HexOrientation::Pointy
        };
        Ok(Self {
            layout: HexLayout {
                orientation,
                scale: Vec2::splat(cfg.hex_size),
                ..default()
            },
            size: cfg.hex_size,
        })
    }

    /// Center-to-corner distance of one cell.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Layout with the same orientation but unit scale, for building tile meshes.
    pub fn unit_layout(&self) -> HexLayout {
        HexLayout {
            orientation: self.layout.orientation,
            scale: Vec2::ONE,
            ..default()
        }
    }
}

impl CoordinateTransform for HexDimensions {
    fn to_pixel(&self, hex: Hex) -> Vec2 {
        self.layout.to_pixel(hex)
    }

    fn to_axial(&self, pos: Vec2) -> Hex {
        self.layout.to_axial(pos)
    }
}

/// The viewport moved; `middle` is the new focal point on the board plane.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct Pan {
    /// Focal point in pixel (board-plane) coordinates.
    pub middle: Vec2,
}

/// Maps a board-plane pixel position to a world translation.
pub fn board_to_world(pos: Vec2, elevation: f32) -> Vec3 {
    Vec3::new(pos.x, elevation, pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexx::shapes;

    fn dims(flat: bool) -> HexDimensions {
        HexDimensions::from_config(&BoardConfig {
            hex_size: 2.5,
            flat,
            ..default()
        })
        .unwrap()
    }

    #[test]
    fn pixel_and_back_roundtrip() {
        for flat in [false, true] {
            let d = dims(flat);
            for hex in shapes::hexagon(Hex::ZERO, 4) {
                assert_eq!(d.to_axial(d.to_pixel(hex)), hex, "roundtrip failed for {hex:?}");
            }
        }
    }

    #[test]
    fn roundtrip_holds_far_from_origin() {
        let d = dims(false);
        let hex = Hex::new(-1234, 987);
        assert_eq!(d.to_axial(d.to_pixel(hex)), hex);
    }

    #[test]
    fn origin_maps_to_zero() {
        assert_eq!(dims(false).to_pixel(Hex::ZERO), Vec2::ZERO);
    }

    #[test]
    fn unit_layout_keeps_orientation() {
        let d = dims(true);
        let unit = d.unit_layout();
        assert_eq!(unit.scale, Vec2::ONE);
        assert_eq!(unit.orientation, HexOrientation::Flat);
    }

    #[test]
    fn rejects_non_positive_size() {
        let cfg = BoardConfig {
            hex_size: 0.0,
            ..default()
        };
        assert!(matches!(
            HexDimensions::from_config(&cfg),
            Err(ConfigError::InvalidHexSize(_))
        ));
    }

    #[test]
    fn board_plane_is_xz() {
        assert_eq!(
            board_to_world(Vec2::new(1.0, 2.0), 0.5),
            Vec3::new(1.0, 0.5, 2.0)
        );
    }
}
