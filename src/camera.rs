//! Top-down board camera.
//!
//! WASD/arrows pan the focus across the board, scroll zooms. Every focus
//! move is published as a [`Pan`](crate::board::Pan) message so the grid can
//! follow the viewport.

mod entities;
mod systems;

pub use entities::BoardCamera;
pub use systems::{camera_transform, pan_direction};

use bevy::prelude::*;

use crate::GameState;
use crate::board::Pan;

/// Per-plugin configuration for the board camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Pan speed in world units per second at the starting height.
    pub pan_speed: f32,
    /// Starting height above the board.
    pub height: f32,
    /// Lowest zoom height.
    pub min_height: f32,
    /// Highest zoom height.
    pub max_height: f32,
    /// Angle from straight down, in radians.
    pub tilt: f32,
    /// Height change per scroll line.
    pub scroll_sensitivity: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_speed: 12.0,
            height: 18.0,
            min_height: 4.0,
            max_height: 60.0,
            tilt: 0.5,
            scroll_sensitivity: 2.0,
            bloom_intensity: 0.15,
        }
    }
}

/// Board camera plugin.
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BoardCamera>()
            .register_type::<CameraConfig>()
            .insert_resource(self.0.clone())
            .add_message::<Pan>()
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                systems::pan_camera.run_if(in_state(GameState::Running)),
            );
    }
}
