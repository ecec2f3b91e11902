//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::{ControlButton, InputSampler, Player};

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::KeyC, KeyCode::Space];
const DASH_KEYS: [KeyCode; 2] = [KeyCode::KeyX, KeyCode::ShiftLeft];
const GRAB_KEYS: [KeyCode; 2] = [KeyCode::KeyZ, KeyCode::KeyV];

/// Variable-rate phase: record raw button and axis state. Never touches the simulation.
pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut InputSampler, With<Player>>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (climbing, dash aim)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    for mut sampler in &mut query {
        sampler.poll_axis(Vec2::new(x, y));
        sampler.poll(ControlButton::Jump, keyboard.any_pressed(JUMP_KEYS));
        sampler.poll(ControlButton::Dash, keyboard.any_pressed(DASH_KEYS));
        sampler.poll(ControlButton::Grab, keyboard.any_pressed(GRAB_KEYS));
    }
}
