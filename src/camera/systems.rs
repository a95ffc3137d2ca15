use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::MouseScrollUnit;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::CameraConfig;
use super::entities::{BoardCamera, CameraInput};
use crate::board::{Pan, board_to_world};
use crate::math;

/// Camera transform for `cam`, tilted by `tilt` radians from straight down.
///
/// Screen-up maps to board -Y, which is also the direction W pans.
pub fn camera_transform(cam: &BoardCamera, tilt: f32) -> Transform {
    Transform::from_translation(math::camera_eye(cam.focus, cam.height, tilt))
        .looking_at(board_to_world(cam.focus, 0.0), Vec3::NEG_Z)
}

/// Unit pan direction on the board plane from WASD and the arrow keys.
pub fn pan_direction(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    direction.normalize_or_zero()
}

/// Spawns the HDR camera with bloom plus a key light, and announces the
/// starting focus so the grid is centered before the first pan.
pub fn spawn_camera(
    mut commands: Commands,
    cfg: Res<CameraConfig>,
    mut pans: MessageWriter<Pan>,
) {
    let cam = BoardCamera {
        focus: Vec2::ZERO,
        height: cfg.height,
    };
    commands.spawn((
        Name::new("BoardCamera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        camera_transform(&cam, cfg.tilt),
        cam,
    ));
    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    pans.write(Pan { middle: Vec2::ZERO });
}

/// Pans with WASD/arrows and zooms with the scroll wheel. Writes a [`Pan`]
/// whenever the focus moves.
pub fn pan_camera(
    mut input: CameraInput,
    mut pans: MessageWriter<Pan>,
    mut query: Query<(&mut BoardCamera, &mut Transform)>,
) {
    let Ok((mut cam, mut transform)) = query.single_mut() else {
        return;
    };

    let mut zoom = 0.0;
    for ev in input.scroll.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        };
        zoom -= lines * input.cfg.scroll_sensitivity;
    }
    let zoomed = zoom != 0.0;
    if zoomed {
        cam.height = math::clamp_zoom(cam.height, zoom, input.cfg.min_height, input.cfg.max_height);
    }

    // Pan faster when zoomed out so the screen-space speed stays constant.
    let direction = pan_direction(&input.keys);
    let step = input.cfg.pan_speed * cam.height / input.cfg.height * input.time.delta_secs();
    let moved = direction != Vec2::ZERO && step > 0.0;
    if moved {
        cam.focus += direction * step;
        pans.write(Pan { middle: cam.focus });
    }

    if moved || zoomed {
        *transform = camera_transform(&cam, input.cfg.tilt);
    }
}
