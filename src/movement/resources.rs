//! Movement domain: tuning for the character controller.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Flat set of controller tunables, supplied at construction.
///
/// Speeds are in world units per second, durations in fixed ticks.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub jump_force: f32,
    pub max_vertical_speed: f32,
    /// Gravity scale used outside of dashes, grabs and slides.
    pub gravity_scale: f32,
    /// Dash charges restored on landing.
    pub dash_number: u32,
    pub dash_duration: u32,
    pub dash_speed: f32,
    pub wave_dash_factor: f32,
    pub max_stamina: f32,
    pub climb_speed: f32,
    /// Ticks after leaving a wall during which a neutral jump still fires.
    pub can_neutral_jump_duration: u32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            jump_force: 14.0,
            max_vertical_speed: 20.0,
            gravity_scale: 3.0,
            dash_number: 1,
            dash_duration: 8,
            dash_speed: 18.0,
            wave_dash_factor: 2.0,
            max_stamina: 180.0,
            climb_speed: 4.0,
            can_neutral_jump_duration: 10,
            hitbox_width: 0.5,
            hitbox_height: 0.75,
        }
    }
}

impl MovementTuning {
    pub fn hitbox_size(&self) -> Vec2 {
        Vec2::new(self.hitbox_width, self.hitbox_height)
    }
}
