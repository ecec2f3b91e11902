//! Sprites module for the player's look and dash after-images.
//!
//! This module handles:
//! - Tinting and flipping the player sprite from controller state
//! - Hiding the body during the death animation
//! - Spawning and fading dash after-images

pub mod after_image;
pub mod palette;
pub mod player;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use after_image::{AFTER_IMAGE_LIFETIME, AfterImage};
pub use palette::dash_color;

use crate::core::gameplay_active;
use crate::movement::MovementSystems;
use after_image::{fade_after_images, spawn_after_images};
use player::sync_player_sprite;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (spawn_after_images, fade_after_images)
                .chain()
                .after(MovementSystems::Controller)
                .run_if(gameplay_active),
        )
        .add_systems(Update, sync_player_sprite);
    }
}
