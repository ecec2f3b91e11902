//! Dash after-images.

use bevy::prelude::*;

use crate::movement::{DashAfterImage, Facing, MovementTuning};
use crate::sprites::palette::{ALPHA, dash_color};

/// Fixed ticks an after-image stays on screen.
pub const AFTER_IMAGE_LIFETIME: u32 = 20;

/// Translucent copy of the player left behind by a dash.
#[derive(Component, Debug, Clone, Copy)]
pub struct AfterImage {
    pub remaining: u32,
}

impl AfterImage {
    pub fn new() -> Self {
        Self {
            remaining: AFTER_IMAGE_LIFETIME,
        }
    }

    /// Opacity for the current tick, easing out quadratically.
    pub fn alpha(&self) -> f32 {
        let t = self.remaining as f32 / AFTER_IMAGE_LIFETIME as f32;
        ALPHA * t * t
    }
}

impl Default for AfterImage {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn spawn_after_images(
    mut commands: Commands,
    mut messages: MessageReader<DashAfterImage>,
    tuning: Res<MovementTuning>,
) {
    for message in messages.read() {
        let image = AfterImage::new();
        commands.spawn((
            image,
            Sprite {
                color: dash_color(0).with_alpha(image.alpha()),
                custom_size: Some(tuning.hitbox_size()),
                flip_x: message.facing == Facing::Left,
                ..default()
            },
            Transform::from_translation(message.position.extend(0.5)),
        ));
    }
}

pub(crate) fn fade_after_images(
    mut commands: Commands,
    mut images: Query<(Entity, &mut AfterImage, &mut Sprite)>,
) {
    for (entity, mut image, mut sprite) in &mut images {
        if image.remaining == 0 {
            commands.entity(entity).despawn();
            continue;
        }

        sprite.color.set_alpha(image.alpha());
        image.remaining -= 1;
    }
}
