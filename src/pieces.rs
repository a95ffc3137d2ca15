//! Board tokens: game-state items in, spawned token entities out.
//!
//! [`ItemsChanged`] batches run through the [`CloningDataLink`], which turns
//! them into [`DrawnItemsChanged`] batches (resolving ghost copies on the
//! way); the spawner then creates, removes and moves the token entities.

mod data_link;
mod entities;
mod factory;
mod systems;

pub use data_link::{CloningDataLink, LinkOutput};
pub use entities::{
    BoardItem, DrawnItem, DrawnItemsChanged, ItemId, ItemsChanged, Piece, PieceMaterial,
    PieceMeshes, PieceShape, SpawnedPieces,
};
pub use factory::{DrawnItemFactory, RegularPolygonFactory};
pub use systems::{link_items, piece_alpha, piece_transform, spawn_drawn_items};

use bevy::prelude::*;

/// Configuration for token drawing.
#[derive(Resource, Clone, Debug, Default, Reflect)]
pub struct PiecesConfig {
    /// Token factory settings.
    pub factory: RegularPolygonFactory,
}

/// Token plugin: data link plus entity spawner.
pub struct PiecesPlugin(pub PiecesConfig);

impl Plugin for PiecesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PiecesConfig>()
            .register_type::<Piece>()
            .insert_resource(self.0.clone())
            .insert_resource(CloningDataLink::new(self.0.factory.clone()))
            .init_resource::<SpawnedPieces>()
            .init_resource::<PieceMeshes>()
            .add_message::<ItemsChanged>()
            .add_message::<DrawnItemsChanged>()
            .add_systems(
                Update,
                (link_items::<RegularPolygonFactory>, spawn_drawn_items).chain(),
            );
    }
}
