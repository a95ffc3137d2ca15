use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::{MeshInfo, PlaneMeshBuilder};

use super::GridConfig;
use super::entities::{InverseGrid, TileInstance};
use super::ring_layout::RingLayout;
use crate::board::{HexDimensions, Pan};

/// Pairs every ring position with the grid color, in instance order.
pub fn tile_instances(layout: &RingLayout, color: Color) -> Vec<TileInstance> {
    layout
        .positions()
        .iter()
        .map(|&position| TileInstance { position, color })
        .collect()
}

/// Merges one copy of `tile` per instance into a single mesh.
///
/// `tile` is a unit-radius hexagon on the XZ plane; each copy is scaled by
/// `tile_radius`, moved to its instance position and painted with its
/// instance color through the vertex color attribute.
pub fn build_tile_mesh(tile: &MeshInfo, tile_radius: f32, instances: &[TileInstance]) -> Mesh {
    let per_tile = tile.vertices.len();
    let total = per_tile * instances.len();

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(total);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(total);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(total);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(total);
    let mut indices: Vec<u32> = Vec::with_capacity(tile.indices.len() * instances.len());

    for (i, instance) in instances.iter().enumerate() {
        let base = (i * per_tile) as u32;
        let offset = Vec3::new(instance.position.x, 0.0, instance.position.y);
        let c = instance.color.to_linear();
        let rgba = [c.red, c.green, c.blue, c.alpha];

        for ((v, n), uv) in tile.vertices.iter().zip(&tile.normals).zip(&tile.uvs) {
            positions.push((*v * tile_radius + offset).to_array());
            normals.push(n.to_array());
            uvs.push(uv.to_array());
            colors.push(rgba);
        }
        indices.extend(tile.indices.iter().map(|&idx| base + u32::from(idx)));
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}

/// Builds the background grid once: ring layout, per-tile colors, one
/// merged mesh, one translucent material.
pub fn spawn_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    dims: Res<HexDimensions>,
    cfg: Res<GridConfig>,
) {
    let ring = RingLayout::generate(&*dims, cfg.rings);
    let instances = tile_instances(&ring, cfg.color);

    let tile = PlaneMeshBuilder::new(&dims.unit_layout()).build();
    let tile_radius = (dims.size() - cfg.tile_gap).max(dims.size() * 0.5);
    let mesh = build_tile_mesh(&tile, tile_radius, &instances);

    // Vertex colors carry the tint; the material only enables blending.
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Name::new("InverseGrid"),
        InverseGrid::default(),
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, cfg.elevation, 0.0),
        Visibility::default(),
    ));

    info!(tiles = instances.len(), rings = cfg.rings, "background grid built");
}

/// Moves the grid to the hex under the latest pan focal point.
///
/// Only the translation changes; a pan that lands in the current cell
/// leaves the transform untouched.
pub fn follow_pan(
    mut pans: MessageReader<Pan>,
    dims: Res<HexDimensions>,
    mut grid_q: Query<(&mut InverseGrid, &mut Transform)>,
) {
    let Some(pan) = pans.read().last().copied() else {
        return;
    };

    for (mut grid, mut transform) in &mut grid_q {
        let previous = grid.center;
        let origin = grid.recenter(&*dims, pan.middle);
        if previous == grid.center {
            continue;
        }
        transform.translation.x = origin.x;
        transform.translation.z = origin.y;
        debug!(center = ?grid.center, "grid recentred");
    }
}
