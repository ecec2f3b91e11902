//! Respawn domain: death, respawn and revival of the player.

mod state;
mod systems;


pub use state::{DeathState, DeathStep, REVIVE_TICK, RESPAWN_TICK, RespawnPoints};

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::MovementSystems;
use crate::respawn::systems::{advance_death, handle_crushed};

pub struct RespawnPlugin;

impl Plugin for RespawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RespawnPoints>()
            .register_type::<DeathState>()
            .add_systems(
                FixedUpdate,
                (handle_crushed, advance_death)
                    .chain()
                    .after(MovementSystems::Controller)
                    .run_if(gameplay_active),
            );
    }
}
