//! Turns board items into drawn items.

use bevy::prelude::*;

use super::entities::{BoardItem, DrawnItem, PieceMaterial, PieceShape};
use crate::error::ColorError;
use crate::math;

/// Builds the drawn item for one non-copy board item.
pub trait DrawnItemFactory: Send + Sync + 'static {
    /// Describes how `item` is drawn.
    fn drawn_item(&self, item: &BoardItem) -> Result<DrawnItem, ColorError>;
}

/// Draws every item as an upright regular prism in the item's color.
#[derive(Clone, Debug, Reflect)]
pub struct RegularPolygonFactory {
    /// Prism height shared by all tokens.
    pub height: f32,
}

impl Default for RegularPolygonFactory {
    fn default() -> Self {
        Self { height: 0.2 }
    }
}

impl DrawnItemFactory for RegularPolygonFactory {
    fn drawn_item(&self, item: &BoardItem) -> Result<DrawnItem, ColorError> {
        let [r, g, b] = math::parse_hex_color(&item.color)?;
        Ok(DrawnItem {
            id: item.id.clone(),
            shape: PieceShape {
                radius: item.radius,
                sides: item.sides.max(3),
                height: self.height,
            },
            material: PieceMaterial {
                color: Color::srgb_u8(r, g, b),
                alpha: 1.0,
            },
            scale: Vec3::ONE,
            item: item.clone(),
            is_cell_item: true,
        })
    }
}
