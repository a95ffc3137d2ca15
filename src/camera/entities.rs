use bevy::ecs::system::SystemParam;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use super::CameraConfig;

/// The viewport camera. `focus` is the board-plane point under the center
/// of the screen.
#[derive(Component, Debug, Reflect)]
pub struct BoardCamera {
    /// Focal point in board pixel coordinates.
    pub focus: Vec2,
    /// Height above the board.
    pub height: f32,
}

/// Inputs read by [`super::systems::pan_camera`].
#[derive(SystemParam)]
pub struct CameraInput<'w, 's> {
    /// Keyboard state.
    pub keys: Res<'w, ButtonInput<KeyCode>>,
    /// Frame timing.
    pub time: Res<'w, Time>,
    /// Scroll wheel messages.
    pub scroll: MessageReader<'w, 's, MouseWheel>,
    /// Camera settings.
    pub cfg: Res<'w, CameraConfig>,
}
