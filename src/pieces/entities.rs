use std::fmt;

use bevy::ecs::system::SystemParam;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;

/// Stable identity of a board item, assigned by the game state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token as the game state describes it.
///
/// Items with `clones_id` set are not drawn from their own fields; they
/// become a copy of the drawn item registered under that id.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardItem {
    /// Unique id.
    pub id: ItemId,
    /// Cell the item sits on.
    pub cell: Hex,
    /// Fill color as `#rrggbb`.
    pub color: String,
    /// Circumradius of the token, in world units.
    pub radius: f32,
    /// Number of sides of the token's prism.
    pub sides: u32,
    /// Id of the item this one is a derived copy of.
    pub clones_id: Option<ItemId>,
    /// Uniform scale applied to the copy.
    pub clone_scale: Option<f32>,
    /// Opacity applied to the copy's material.
    pub clone_alpha: Option<f32>,
}

impl BoardItem {
    /// A plain hexagonal token.
    pub fn piece(id: impl Into<ItemId>, cell: Hex, color: &str) -> Self {
        Self {
            id: id.into(),
            cell,
            color: color.to_string(),
            radius: 0.6,
            sides: 6,
            clones_id: None,
            clone_scale: None,
            clone_alpha: None,
        }
    }

    /// A copy of `source` drawn at `cell`.
    pub fn clone_of(id: impl Into<ItemId>, source: impl Into<ItemId>, cell: Hex) -> Self {
        Self {
            clones_id: Some(source.into()),
            ..Self::piece(id, cell, "")
        }
    }

    /// Sets the radius and side count.
    pub fn with_shape(mut self, radius: f32, sides: u32) -> Self {
        self.radius = radius;
        self.sides = sides;
        self
    }

    /// Sets the uniform scale of a copy.
    pub fn with_clone_scale(mut self, scale: f32) -> Self {
        self.clone_scale = Some(scale);
        self
    }

    /// Sets the opacity of a copy.
    pub fn with_clone_alpha(mut self, alpha: f32) -> Self {
        self.clone_alpha = Some(alpha);
        self
    }
}

/// Geometry of a drawn token: a regular prism standing on the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceShape {
    /// Circumradius.
    pub radius: f32,
    /// Side count (at least 3).
    pub sides: u32,
    /// Prism height.
    pub height: f32,
}

/// Surface of a drawn token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceMaterial {
    /// Diffuse color.
    pub color: Color,
    /// Opacity; below 1 the token is alpha blended.
    pub alpha: f32,
}

/// The renderable counterpart of a [`BoardItem`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawnItem {
    /// Identity of the drawn token (the id of the item that produced it).
    pub id: ItemId,
    /// Geometry, shared verbatim between a source and its copies.
    pub shape: PieceShape,
    /// Surface; copies may override the alpha.
    pub material: PieceMaterial,
    /// Per-axis scale.
    pub scale: Vec3,
    /// The item this was drawn for.
    pub item: BoardItem,
    /// Whether the token is anchored to a cell.
    pub is_cell_item: bool,
}

/// Batch of game-state changes.
#[derive(Message, Clone, Debug, Default, PartialEq)]
pub struct ItemsChanged {
    /// Items that appeared, in order.
    pub added: Vec<BoardItem>,
    /// Items that went away.
    pub removed: Vec<BoardItem>,
    /// Items whose fields changed.
    pub updated: Vec<BoardItem>,
}

/// [`ItemsChanged`] with every added item resolved to a [`DrawnItem`].
#[derive(Message, Clone, Debug, Default, PartialEq)]
pub struct DrawnItemsChanged {
    /// Drawn items, in the order their items were added.
    pub added: Vec<DrawnItem>,
    /// Passed through from the source batch.
    pub removed: Vec<BoardItem>,
    /// Passed through from the source batch.
    pub updated: Vec<BoardItem>,
}

/// Marker on a spawned token entity.
#[derive(Component, Debug, Reflect)]
pub struct Piece {
    /// Item the entity was spawned for.
    pub id: ItemId,
}

/// Spawned token entity per item id.
#[derive(Resource, Default)]
pub struct SpawnedPieces {
    /// Lookup from item id to entity.
    pub map: HashMap<ItemId, Entity>,
}

/// Mesh handles shared between tokens of identical shape.
#[derive(Resource, Default)]
pub struct PieceMeshes {
    cache: HashMap<(u32, u32, u32), Handle<Mesh>>,
}

impl PieceMeshes {
    /// Returns the cached mesh for `shape`, building it on first use.
    pub fn get_or_build(&mut self, shape: &PieceShape, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        let key = (shape.sides, shape.radius.to_bits(), shape.height.to_bits());
        self.cache
            .entry(key)
            .or_insert_with(|| {
                meshes.add(
                    Cylinder::new(shape.radius, shape.height)
                        .mesh()
                        .resolution(shape.sides),
                )
            })
            .clone()
    }

    /// Number of distinct shapes built so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// `true` before the first token is spawned.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Asset access bundled for the token spawner.
#[derive(SystemParam)]
pub struct PieceAssets<'w> {
    /// Mesh storage.
    pub meshes: ResMut<'w, Assets<Mesh>>,
    /// Material storage.
    pub materials: ResMut<'w, Assets<StandardMaterial>>,
    /// Shape → mesh cache.
    pub cache: ResMut<'w, PieceMeshes>,
}
