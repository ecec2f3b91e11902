//! Debug domain: debug systems for input and runtime tweaks.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::Path;

use crate::content::{DATA_DIR, load_tuning_or_default};
use crate::debug::DebugActionRequested;
use crate::debug::snapshot::ControllerSnapshot;
use crate::debug::state::{DebugAction, DebugState};
use crate::debug::ui::{
    DebugButton, DebugInfoOverlay, DebugStatusMessage, DebugUI, refresh_debug_ui,
    spawn_debug_info_overlay, spawn_debug_ui,
};
use crate::movement::{MovementTuning, Player, PlayerController, PlayerCrushed};
use crate::respawn::DeathState;

/// Toggle debug UI with F1 or backtick key
pub(crate) fn toggle_debug_ui(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);

    if toggle {
        debug_state.ui_visible = !debug_state.ui_visible;

        if debug_state.ui_visible {
            spawn_debug_ui(&mut commands, &debug_state);
        } else {
            for entity in &existing_ui {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Translate keyboard shortcuts into debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    debug_state: Res<DebugState>,
    mut requests: MessageWriter<DebugActionRequested>,
) {
    // F2 snapshots work with the panel closed
    if keyboard.just_pressed(KeyCode::F2) {
        requests.write(DebugActionRequested(DebugAction::Snapshot));
    }

    // Only process Ctrl hotkeys when debug UI is open or Ctrl is held
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !debug_state.ui_visible && !ctrl {
        return;
    }

    let bindings = [
        (KeyCode::KeyD, DebugAction::ToggleInfo),
        (KeyCode::KeyI, DebugAction::ToggleInfiniteStamina),
        (KeyCode::KeyR, DebugAction::RefillDashes),
        (KeyCode::KeyK, DebugAction::Kill),
        (KeyCode::KeyL, DebugAction::ReloadTuning),
    ];

    for (key, action) in bindings {
        if ctrl && keyboard.just_pressed(key) {
            requests.write(DebugActionRequested(action));
        }
    }
}

/// Translate button clicks in debug UI into debug actions
pub(crate) fn handle_debug_buttons(
    button_query: Query<(&DebugButton, &Interaction), Changed<Interaction>>,
    mut requests: MessageWriter<DebugActionRequested>,
) {
    for (button, interaction) in &button_query {
        if *interaction == Interaction::Pressed {
            requests.write(DebugActionRequested(button.action));
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_debug_actions(
    mut commands: Commands,
    mut requests: MessageReader<DebugActionRequested>,
    mut debug_state: ResMut<DebugState>,
    mut tuning: ResMut<MovementTuning>,
    mut players: Query<
        (
            Entity,
            &mut PlayerController,
            &Position,
            &LinearVelocity,
            &GravityScale,
            &DeathState,
        ),
        With<Player>,
    >,
    mut crushed: MessageWriter<PlayerCrushed>,
    existing_ui: Query<Entity, With<DebugUI>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    for DebugActionRequested(action) in requests.read() {
        match action {
            DebugAction::ToggleInfo => {
                debug_state.show_info = !debug_state.show_info;
                if debug_state.show_info {
                    spawn_debug_info_overlay(&mut commands);
                } else {
                    for entity in &existing_overlay {
                        commands.entity(entity).despawn();
                    }
                }
                let msg = if debug_state.show_info {
                    "Controller info ON"
                } else {
                    "Controller info OFF"
                };
                debug_state.set_message(msg, 2.0);
                refresh_debug_ui(&mut commands, &debug_state, &existing_ui);
            }
            DebugAction::ToggleInfiniteStamina => {
                debug_state.infinite_stamina = !debug_state.infinite_stamina;
                let msg = if debug_state.infinite_stamina {
                    "Infinite stamina ON"
                } else {
                    "Infinite stamina OFF"
                };
                debug_state.set_message(msg, 2.0);
                info!("[DEBUG] {}", msg);
                refresh_debug_ui(&mut commands, &debug_state, &existing_ui);
            }
            DebugAction::RefillDashes => {
                for (_, mut controller, ..) in &mut players {
                    controller.reset_dash_and_grab();
                }
                debug_state.set_message("Dashes and stamina refilled", 2.0);
            }
            DebugAction::Kill => {
                for (player, ..) in &players {
                    crushed.write(PlayerCrushed { player });
                }
                debug_state.set_message("Killed player", 2.0);
                info!("[DEBUG] Killed player");
            }
            DebugAction::ReloadTuning => {
                *tuning = load_tuning_or_default(Path::new(DATA_DIR));
                for (_, mut controller, ..) in &mut players {
                    let facing = controller.facing();
                    *controller = PlayerController::new(tuning.clone());
                    controller.set_facing(facing);
                }
                debug_state.set_message("Tuning reloaded", 2.0);
                info!("[DEBUG] Movement tuning reloaded");
            }
            DebugAction::Snapshot => {
                for (player, controller, position, velocity, gravity, death) in &players {
                    let snapshot =
                        ControllerSnapshot::capture(&controller, position, velocity, gravity, death);
                    match snapshot.to_json() {
                        Ok(json) => info!("[DEBUG] Snapshot of {:?}:\n{}", player, json),
                        Err(e) => error!("[DEBUG] Snapshot failed: {}", e),
                    }
                }
                debug_state.set_message("Snapshot logged", 2.0);
            }
        }
    }
}

/// Keep dashes and stamina full while the cheat is on
pub(crate) fn apply_infinite_stamina(
    debug_state: Res<DebugState>,
    mut players: Query<&mut PlayerController, With<Player>>,
) {
    if !debug_state.infinite_stamina {
        return;
    }

    for mut controller in &mut players {
        controller.refill();
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut status_text: Query<&mut Text, With<DebugStatusMessage>>,
) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }

    let message = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.clone())
        .unwrap_or_default();
    for mut text in &mut status_text {
        if **text != message {
            **text = message.clone();
        }
    }
}

/// Update the debug info overlay with current controller state
pub(crate) fn update_debug_info_overlay(
    players: Query<
        (
            &PlayerController,
            &Position,
            &LinearVelocity,
            &GravityScale,
            &DeathState,
        ),
        With<Player>,
    >,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    let (Some((controller, position, velocity, gravity, death)), Ok(mut text)) =
        (players.iter().next(), overlay_query.single_mut())
    else {
        return;
    };

    **text = ControllerSnapshot::capture(controller, position, velocity, gravity, death)
        .overlay_text();
}
