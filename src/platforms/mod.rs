//! Platforms domain: rail platforms that carry and launch the player.

mod motion;
mod systems;


pub use motion::{
    EJECT_BOOST_TICKS, HOLD_TICKS, MovingPlatform, PlatformPhase, START_DELAY_TICKS,
    holds_player,
};

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::MovementSystems;
use crate::platforms::systems::drive_platforms;

pub struct PlatformsPlugin;

impl Plugin for PlatformsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlatformPhase>().add_systems(
            FixedUpdate,
            drive_platforms
                .after(MovementSystems::Controller)
                .run_if(gameplay_active),
        );
    }
}
