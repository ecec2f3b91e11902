//! Movement domain: character controller plugin wiring and public exports.

mod bootstrap;
mod buttons;
mod components;
mod controller;
mod events;
mod probe;
mod resources;
mod squish;
mod stamina;
mod systems;

#[cfg(test)]
mod tests;

pub use bootstrap::spawn_player;
pub use buttons::{ButtonState, ControlButton, InputSampler, TickInput};
pub use components::{
    Facing, GameLayer, Hitbox, KinematicBody, Player, Riding, Solid, WallContact,
};
pub use controller::{
    AFTER_IMAGE_INTERVAL, Action, Boost, Dash, GRAB_COOLDOWN_TICKS, MovementMode, PlatformLink,
    PlayerController, TickReport, wave_dash_efficiency,
};
pub use events::{DashAfterImage, PlayerCrushed};
pub use probe::{Axis, CollisionProbe, ProbeLayer, SKIN};
pub use resources::MovementTuning;
pub use squish::{SQUISH_QUANTUM, SquishDetector};
pub use stamina::Stamina;

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::systems::{run_controller, sample_input};

/// Ordering handle for systems that react to the controller within a fixed step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSystems {
    /// Resolve input and tick every controller.
    Controller,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MovementTuning>()
            .register_type::<MovementMode>()
            .add_message::<DashAfterImage>()
            .add_message::<PlayerCrushed>()
            .add_systems(Startup, spawn_player)
            // Sampling runs every frame; the controller only ever sees
            // what was latched since its previous tick.
            .add_systems(Update, sample_input.run_if(gameplay_active))
            .add_systems(
                FixedUpdate,
                run_controller
                    .in_set(MovementSystems::Controller)
                    .run_if(gameplay_active),
            );
    }
}
