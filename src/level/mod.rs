//! Level domain: test room geometry, springs and respawn points.

mod room;
mod springs;


pub use room::{BLOCKS, Block, RESPAWN_POINTS};
pub use springs::Spring;

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::level::room::spawn_test_room;
use crate::level::springs::launch_from_springs;
use crate::movement::MovementSystems;
use crate::respawn::RespawnPoints;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RespawnPoints::new(RESPAWN_POINTS))
            .add_systems(Startup, spawn_test_room)
            .add_systems(
                FixedUpdate,
                launch_from_springs
                    .before(MovementSystems::Controller)
                    .run_if(gameplay_active),
            );
    }
}
