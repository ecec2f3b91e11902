//! Debug domain: the tuning panel and controller overlay.

use bevy::prelude::*;

use crate::debug::state::{DebugAction, DebugState};

/// Order of the panel's buttons, top to bottom.
pub const PANEL_ACTIONS: [DebugAction; 6] = [
    DebugAction::ToggleInfo,
    DebugAction::ToggleInfiniteStamina,
    DebugAction::RefillDashes,
    DebugAction::Kill,
    DebugAction::ReloadTuning,
    DebugAction::Snapshot,
];

const PANEL_FONT_SIZE: f32 = 12.0;

/// Marker for the debug panel root
#[derive(Component, Debug)]
pub struct DebugUI;

/// Marker for the controller info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

/// Marker for the panel's status line
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

#[derive(Component, Debug)]
pub struct DebugButton {
    pub action: DebugAction,
}

/// Button text for `action`, with its hotkey and any toggle state.
pub fn button_label(action: DebugAction, debug_state: &DebugState) -> String {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    match action {
        DebugAction::ToggleInfo => format!("Overlay: {} [Ctrl+D]", on_off(debug_state.show_info)),
        DebugAction::ToggleInfiniteStamina => format!(
            "Infinite stamina: {} [Ctrl+I]",
            on_off(debug_state.infinite_stamina)
        ),
        DebugAction::RefillDashes => "Refill dashes [Ctrl+R]".to_string(),
        DebugAction::Kill => "Kill [Ctrl+K]".to_string(),
        DebugAction::ReloadTuning => "Reload movement.ron [Ctrl+L]".to_string(),
        DebugAction::Snapshot => "Log snapshot [F2]".to_string(),
    }
}

/// Status line first, then one button per action. F1 closes it.
pub(crate) fn spawn_debug_ui(commands: &mut Commands, debug_state: &DebugState) {
    commands
        .spawn((
            DebugUI,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.15, 0.9)),
            ZIndex(500),
        ))
        .with_children(|panel| {
            panel.spawn((
                DebugStatusMessage,
                Text::new(""),
                TextFont {
                    font_size: PANEL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.9, 0.5)),
            ));

            for action in PANEL_ACTIONS {
                panel
                    .spawn((
                        DebugButton { action },
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.2, 0.2, 0.28)),
                    ))
                    .with_child((
                        Text::new(button_label(action, debug_state)),
                        TextFont {
                            font_size: PANEL_FONT_SIZE,
                            ..default()
                        },
                    ));
            }
        });
}

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("No player"),
        TextFont {
            font_size: PANEL_FONT_SIZE,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
    ));
}

/// Rebuild the panel so toggle labels pick up the new state.
pub(crate) fn refresh_debug_ui(
    commands: &mut Commands,
    debug_state: &DebugState,
    existing_ui: &Query<Entity, With<DebugUI>>,
) {
    for entity in existing_ui {
        commands.entity(entity).despawn();
    }
    if debug_state.ui_visible {
        spawn_debug_ui(commands, debug_state);
    }
}
