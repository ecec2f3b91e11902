//! Core domain: fixed timestep, gravity, pausing and the camera.

mod resources;
mod systems;


pub use resources::{
    CAMERA_SCALE, CameraFollow, FIXED_HZ, GRAVITY, GameplayPaused, gameplay_active,
};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::systems::{follow_player, setup_camera, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .insert_resource(Gravity(Vec2::NEG_Y * GRAVITY))
            .init_resource::<GameplayPaused>()
            .init_resource::<CameraFollow>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (toggle_pause, follow_player));
    }
}
