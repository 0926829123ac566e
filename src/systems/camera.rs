use bevy_ecs::{
    query::With,
    system::{Query, ResMut},
};

use crate::constants::{mechanics, SCREEN_SIZE};
use crate::systems::components::{Camera, PlayerControlled, Position};

/// Eases the camera toward a point that keeps the player a third of the way
/// across the screen. The camera only ever converges, never snaps, so fast
/// movement leaves a visible lag.
pub fn camera_follow(
    mut camera: ResMut<Camera>,
    player: Query<&Position, With<PlayerControlled>>,
) {
    let Ok(position) = player.single() else {
        return;
    };

    let target = position.0.x - SCREEN_SIZE.x as f32 / 3.0;
    camera.x += (target - camera.x) * mechanics::CAMERA_EASING;
}
