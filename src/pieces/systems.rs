use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::data_link::{CloningDataLink, LinkOutput};
use super::entities::{
    DrawnItem, DrawnItemsChanged, ItemsChanged, Piece, PieceAssets, SpawnedPieces,
};
use super::factory::DrawnItemFactory;
use crate::board::{BoardConfig, CoordinateTransform, HexDimensions, board_to_world};

/// Forwards every game-state batch through the data link, one output batch
/// per input batch. Dropped items are logged.
pub fn link_items<F: DrawnItemFactory>(
    mut link: ResMut<CloningDataLink<F>>,
    mut input: MessageReader<ItemsChanged>,
    mut output: MessageWriter<DrawnItemsChanged>,
) {
    for event in input.read() {
        let LinkOutput { changed, errors } = link.on_data_changed(event);
        for err in &errors {
            warn!("dropped board item: {err}");
        }
        debug!(
            added = changed.added.len(),
            removed = changed.removed.len(),
            updated = changed.updated.len(),
            registered = link.len(),
            "items linked"
        );
        output.write(changed);
    }
}

/// World transform of a drawn item standing on its cell.
pub fn piece_transform(drawn: &DrawnItem, dims: &HexDimensions, elevation: f32) -> Transform {
    let lift = elevation + drawn.shape.height * drawn.scale.y / 2.0;
    Transform::from_translation(board_to_world(dims.to_pixel(drawn.item.cell), lift))
        .with_scale(drawn.scale)
}

/// Opacity actually used for a token's material. Non-finite values draw
/// opaque.
pub fn piece_alpha(alpha: f32) -> f32 {
    if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Spawns, despawns and moves token entities from drawn-item batches.
///
/// Entities spawned during this run only exist once commands are applied,
/// so updates to them are written as a replacement `Transform` command.
pub fn spawn_drawn_items(
    mut commands: Commands,
    mut changes: MessageReader<DrawnItemsChanged>,
    mut assets: PieceAssets,
    mut spawned: ResMut<SpawnedPieces>,
    mut transforms: Query<&mut Transform, With<Piece>>,
    dims: Res<HexDimensions>,
    board: Res<BoardConfig>,
) {
    let mut fresh: HashMap<Entity, DrawnItem> = HashMap::new();

    for change in changes.read() {
        for item in &change.removed {
            if let Some(entity) = spawned.map.remove(&item.id) {
                fresh.remove(&entity);
                if let Ok(mut entity_commands) = commands.get_entity(entity) {
                    entity_commands.despawn();
                }
            }
        }

        for drawn in &change.added {
            if let Some(previous) = spawned.map.remove(&drawn.id) {
                fresh.remove(&previous);
                if let Ok(mut entity_commands) = commands.get_entity(previous) {
                    entity_commands.despawn();
                }
            }

            let mesh = assets.cache.get_or_build(&drawn.shape, &mut assets.meshes);
            let alpha = piece_alpha(drawn.material.alpha);
            let material = assets.materials.add(StandardMaterial {
                base_color: drawn.material.color.with_alpha(alpha),
                alpha_mode: if alpha < 1.0 {
                    AlphaMode::Blend
                } else {
                    AlphaMode::Opaque
                },
                ..default()
            });

            let entity = commands
                .spawn((
                    Piece {
                        id: drawn.id.clone(),
                    },
                    Name::new(format!("Piece({})", drawn.id)),
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    piece_transform(drawn, &dims, board.elevation),
                    Visibility::default(),
                ))
                .id();
            spawned.map.insert(drawn.id.clone(), entity);
            fresh.insert(entity, drawn.clone());
        }

        for item in &change.updated {
            let Some(&entity) = spawned.map.get(&item.id) else {
                debug!(id = %item.id, "update for a token that is not on the board");
                continue;
            };
            if let Some(drawn) = fresh.get_mut(&entity) {
                drawn.item.cell = item.cell;
                commands
                    .entity(entity)
                    .insert(piece_transform(drawn, &dims, board.elevation));
            } else if let Ok(mut tf) = transforms.get_mut(entity) {
                let pos = dims.to_pixel(item.cell);
                tf.translation.x = pos.x;
                tf.translation.z = pos.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::entities::{BoardItem, ItemId, PieceMeshes};
    use crate::pieces::factory::RegularPolygonFactory;
    use hexx::Hex;

    #[derive(Resource, Default)]
    struct Collected(Vec<DrawnItemsChanged>);

    fn collect(mut reader: MessageReader<DrawnItemsChanged>, mut out: ResMut<Collected>) {
        out.0.extend(reader.read().cloned());
    }

    fn dims() -> HexDimensions {
        HexDimensions::from_config(&BoardConfig::default()).unwrap()
    }

    fn link_app() -> App {
        let mut app = App::new();
        app.add_message::<ItemsChanged>()
            .add_message::<DrawnItemsChanged>()
            .insert_resource(CloningDataLink::new(RegularPolygonFactory::default()))
            .init_resource::<Collected>()
            .add_systems(
                Update,
                (link_items::<RegularPolygonFactory>, collect).chain(),
            );
        app
    }

    fn render_app() -> App {
        let mut app = App::new();
        app.add_message::<DrawnItemsChanged>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<PieceMeshes>()
            .init_resource::<SpawnedPieces>()
            .insert_resource(dims())
            .insert_resource(BoardConfig::default())
            .add_systems(Update, spawn_drawn_items);
        app
    }

    fn drawn(item: BoardItem) -> DrawnItem {
        RegularPolygonFactory::default().drawn_item(&item).unwrap()
    }

    fn piece_count(app: &mut App) -> usize {
        let mut q = app.world_mut().query::<&Piece>();
        q.iter(app.world()).count()
    }

    #[test]
    fn one_output_batch_per_input_batch() {
        let mut app = link_app();
        app.world_mut().write_message(ItemsChanged {
            added: vec![BoardItem::piece("x", Hex::ZERO, "#ffffff")],
            ..default()
        });
        app.world_mut().write_message(ItemsChanged {
            added: vec![BoardItem::clone_of("y", "x", Hex::ZERO).with_clone_scale(0.5)],
            ..default()
        });
        app.update();

        let collected = &app.world().resource::<Collected>().0;
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].added[0].id.0, "x");
        assert_eq!(collected[1].added[0].id.0, "y");
        assert_eq!(collected[1].added[0].scale, Vec3::splat(0.5));
    }

    #[test]
    fn unresolved_copy_still_emits_a_batch() {
        let mut app = link_app();
        app.world_mut().write_message(ItemsChanged {
            added: vec![BoardItem::clone_of("y", "nobody", Hex::ZERO)],
            ..default()
        });
        app.update();

        let collected = &app.world().resource::<Collected>().0;
        assert_eq!(collected.len(), 1);
        assert!(collected[0].added.is_empty());
    }

    #[test]
    fn piece_stands_on_its_cell() {
        let d = dims();
        let item = BoardItem::piece("a", Hex::new(2, -1), "#ffffff");
        let tf = piece_transform(&drawn(item), &d, 0.0);
        let pos = d.to_pixel(Hex::new(2, -1));
        assert!((tf.translation.x - pos.x).abs() < 1e-5);
        assert!((tf.translation.z - pos.y).abs() < 1e-5);
        assert!(tf.translation.y > 0.0);
        assert_eq!(tf.scale, Vec3::ONE);
    }

    #[test]
    fn added_items_spawn_and_removed_items_despawn() {
        let mut app = render_app();
        let a = drawn(BoardItem::piece("a", Hex::ZERO, "#ff0000"));
        let b = drawn(BoardItem::piece("b", Hex::new(1, 0), "#00ff00"));
        app.world_mut().write_message(DrawnItemsChanged {
            added: vec![a.clone(), b],
            ..default()
        });
        app.update();
        assert_eq!(piece_count(&mut app), 2);
        assert_eq!(app.world().resource::<PieceMeshes>().len(), 1);

        app.world_mut().write_message(DrawnItemsChanged {
            removed: vec![a.item],
            ..default()
        });
        app.update();
        assert_eq!(piece_count(&mut app), 1);
        assert!(
            !app.world()
                .resource::<SpawnedPieces>()
                .map
                .contains_key(&ItemId::from("a"))
        );
    }

    #[test]
    fn re_adding_an_id_replaces_its_entity() {
        let mut app = render_app();
        let a = drawn(BoardItem::piece("a", Hex::ZERO, "#ff0000"));
        for _ in 0..2 {
            app.world_mut().write_message(DrawnItemsChanged {
                added: vec![a.clone()],
                ..default()
            });
            app.update();
        }
        assert_eq!(piece_count(&mut app), 1);
    }

    #[test]
    fn translucent_copies_get_blended_materials() {
        let mut app = render_app();
        let mut ghost = drawn(BoardItem::piece("g", Hex::ZERO, "#ff0000"));
        ghost.material.alpha = 0.3;
        app.world_mut().write_message(DrawnItemsChanged {
            added: vec![ghost],
            ..default()
        });
        app.update();

        let mut q = app
            .world_mut()
            .query::<&MeshMaterial3d<StandardMaterial>>();
        let handle = q.single(app.world()).unwrap().0.clone();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let material = materials.get(&handle).unwrap();
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
        assert!((material.base_color.alpha() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn non_finite_alpha_draws_opaque() {
        assert_eq!(piece_alpha(f32::NAN), 1.0);
        assert_eq!(piece_alpha(f32::INFINITY), 1.0);
        assert_eq!(piece_alpha(1.5), 1.0);
        assert_eq!(piece_alpha(-0.5), 0.0);

        let mut app = render_app();
        let mut broken = drawn(BoardItem::piece("n", Hex::ZERO, "#ff0000"));
        broken.material.alpha = f32::NAN;
        app.world_mut().write_message(DrawnItemsChanged {
            added: vec![broken],
            ..default()
        });
        app.update();

        let mut q = app
            .world_mut()
            .query::<&MeshMaterial3d<StandardMaterial>>();
        let handle = q.single(app.world()).unwrap().0.clone();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let material = materials.get(&handle).unwrap();
        assert!(matches!(material.alpha_mode, AlphaMode::Opaque));
        assert_eq!(material.base_color.alpha(), 1.0);
    }

    #[test]
    fn update_in_the_spawning_frame_moves_the_new_token() {
        let mut app = render_app();
        let a = drawn(BoardItem::piece("a", Hex::ZERO, "#ff0000"));
        let mut moved = a.item.clone();
        moved.cell = Hex::new(3, 3);
        app.world_mut().write_message(DrawnItemsChanged {
            added: vec![a],
            ..default()
        });
        app.world_mut().write_message(DrawnItemsChanged {
            updated: vec![moved],
            ..default()
        });
        app.update();

        let target = dims().to_pixel(Hex::new(3, 3));
        let mut q = app.world_mut().query::<(&Piece, &Transform)>();
        let (_, tf) = q.single(app.world()).unwrap();
        assert!((Vec2::new(tf.translation.x, tf.translation.z) - target).length() < 1e-5);
        assert!(tf.translation.y > 0.0, "token must still stand on the board");
    }

    #[test]
    fn add_and_update_in_one_batch_lands_on_the_new_cell() {
        let mut app = render_app();
        let a = drawn(BoardItem::piece("a", Hex::ZERO, "#ff0000"));
        let mut moved = a.item.clone();
        moved.cell = Hex::new(-2, 1);
        app.world_mut().write_message(DrawnItemsChanged {
            added: vec![a],
            removed: vec![],
            updated: vec![moved],
        });
        app.update();

        let target = dims().to_pixel(Hex::new(-2, 1));
        let mut q = app.world_mut().query::<(&Piece, &Transform)>();
        let (_, tf) = q.single(app.world()).unwrap();
        assert!((Vec2::new(tf.translation.x, tf.translation.z) - target).length() < 1e-5);
    }

    #[test]
    fn updated_items_move_to_their_new_cell() {
        let mut app = render_app();
        let a = drawn(BoardItem::piece("a", Hex::ZERO, "#ff0000"));
        app.world_mut().write_message(DrawnItemsChanged {
            added: vec![a.clone()],
            ..default()
        });
        app.update();

        let mut moved = a.item.clone();
        moved.cell = Hex::new(3, 3);
        app.world_mut().write_message(DrawnItemsChanged {
            updated: vec![moved],
            ..default()
        });
        app.update();

        let d = dims();
        let target = d.to_pixel(Hex::new(3, 3));
        let mut q = app.world_mut().query::<(&Piece, &Transform)>();
        let (_, tf) = q.single(app.world()).unwrap();
        assert!((Vec2::new(tf.translation.x, tf.translation.z) - target).length() < 1e-5);
    }
}
