//! Debug tooling for tuning the controller, enabled by the `dev-tools` feature.
//!
//! Features:
//! - Live overlay of the controller's mode, velocity, stamina and timers
//! - Infinite stamina and dash refills
//! - Kill the player to exercise respawn
//! - Hot reload of `assets/data/movement.ron`
//! - F2 logs a JSON snapshot of the controller

mod snapshot;
mod state;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

pub use snapshot::ControllerSnapshot;
pub use state::{DebugAction, DebugState};

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::debug::systems::{
    apply_debug_actions, apply_infinite_stamina, handle_debug_buttons, handle_debug_hotkeys,
    toggle_debug_ui, update_debug_info_overlay, update_status_message,
};
use crate::movement::MovementSystems;

/// A debug action picked from the panel or a hotkey.
#[derive(Debug, Clone, Copy)]
pub struct DebugActionRequested(pub DebugAction);

impl Message for DebugActionRequested {}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_message::<DebugActionRequested>()
            .add_systems(
                Update,
                (
                    toggle_debug_ui,
                    handle_debug_hotkeys,
                    handle_debug_buttons,
                    apply_debug_actions,
                    update_status_message,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                update_debug_info_overlay.run_if(|state: Res<DebugState>| state.show_info),
            )
            .add_systems(
                FixedUpdate,
                apply_infinite_stamina.before(MovementSystems::Controller),
            );
    }
}
