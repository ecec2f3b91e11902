//! Movement domain: messages emitted by the controller.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::Facing;

/// A dash asked for an after-image at this spot.
#[derive(Debug)]
pub struct DashAfterImage {
    pub position: Vec2,
    pub facing: Facing,
}

impl Message for DashAfterImage {}

/// The squish detector found the player crushed.
#[derive(Debug)]
pub struct PlayerCrushed {
    pub player: Entity,
}

impl Message for PlayerCrushed {}
