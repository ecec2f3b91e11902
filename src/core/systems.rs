//! Core domain: camera and pause systems.

use bevy::prelude::*;

use crate::core::resources::{CAMERA_SCALE, CameraFollow, GameplayPaused};
use crate::movement::Player;

const PAUSE_SOURCE: &str = "pause_menu";

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_scale(Vec3::splat(CAMERA_SCALE))));
}

/// Escape pauses both gameplay systems and virtual time, so fixed steps stop too.
pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
    mut time: ResMut<Time<Virtual>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    if paused.toggle(PAUSE_SOURCE) {
        time.pause();
        info!("Gameplay paused");
    } else if !paused.is_paused() {
        time.unpause();
        info!("Gameplay resumed");
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    follow: Res<CameraFollow>,
    player: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let (Some(player), Ok(mut camera)) = (player.iter().next(), camera.single_mut()) else {
        return;
    };

    let target = player.translation.truncate() + follow.offset;
    let current = camera.translation.truncate();
    let t = (follow.stiffness * time.delta_secs()).min(1.0);
    let next = current.lerp(target, t);

    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
