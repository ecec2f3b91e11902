use avian2d::prelude::*;
use bevy::prelude::*;

use crate::debug::ui::{PANEL_ACTIONS, button_label};
use crate::debug::{ControllerSnapshot, DebugAction, DebugState};
use crate::movement::{MovementTuning, PlayerController};
use crate::respawn::DeathState;

fn snapshot() -> ControllerSnapshot {
    let controller = PlayerController::new(MovementTuning::default());
    ControllerSnapshot::capture(
        &controller,
        &Position(Vec2::new(1.5, -2.0)),
        &LinearVelocity(Vec2::new(7.0, 0.0)),
        &GravityScale(3.0),
        &DeathState::default(),
    )
}

#[test]
fn test_snapshot_serialises_to_json() {
    let json = snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["mode"], "Grounded");
    assert_eq!(value["action"], "Free");
    assert_eq!(value["position"][0], 1.5);
    assert_eq!(value["dash_left"], 1);
    assert_eq!(value["stamina"], 180.0);
    assert_eq!(value["dead"], false);
}

#[test]
fn test_overlay_text_lists_the_mode_first() {
    let text = snapshot().overlay_text();
    assert!(text.starts_with("Mode: Grounded\n"));
    assert!(text.contains("Vel: (7.00, 0.00)"));
}

#[test]
fn test_toggle_labels_follow_the_state() {
    let mut state = DebugState::default();
    assert_eq!(
        button_label(DebugAction::ToggleInfiniteStamina, &state),
        "Infinite stamina: off [Ctrl+I]"
    );

    state.infinite_stamina = true;
    state.show_info = true;
    assert_eq!(
        button_label(DebugAction::ToggleInfiniteStamina, &state),
        "Infinite stamina: on [Ctrl+I]"
    );
    assert_eq!(button_label(DebugAction::ToggleInfo, &state), "Overlay: on [Ctrl+D]");
}

#[test]
fn test_every_panel_button_names_its_hotkey() {
    let state = DebugState::default();
    for action in PANEL_ACTIONS {
        let label = button_label(action, &state);
        assert!(label.ends_with(']'), "{label}");
    }
}
