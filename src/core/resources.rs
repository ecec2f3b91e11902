//! Core domain: shared resources for simulation timing and pausing.

use bevy::prelude::*;
use std::collections::HashSet;

/// Fixed simulation rate. Every tick-based duration in the game counts these.
pub const FIXED_HZ: f64 = 50.0;

/// World units per screen pixel at the default zoom.
pub const CAMERA_SCALE: f32 = 1.0 / 32.0;

/// Downward acceleration before a body's gravity scale is applied.
pub const GRAVITY: f32 = 9.81;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    /// Flip `source` on or off. Returns whether it is now pausing.
    pub fn toggle(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.sources.remove(&source) {
            false
        } else {
            self.sources.insert(source);
            true
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// How the camera trails the player.
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
    /// Fraction of the remaining distance closed per second.
    pub stiffness: f32,
    /// Offset from the player's position to the view centre.
    pub offset: Vec2,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            stiffness: 6.0,
            offset: Vec2::new(0.0, 1.5),
        }
    }
}
