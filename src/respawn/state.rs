//! Respawn domain: death timer and respawn point lookup.

use bevy::prelude::*;

/// Per-tick velocity multiplier while dead.
pub const DEATH_VELOCITY_DECAY: f32 = 0.9;
/// Death tick on which the player is moved to a respawn point.
pub const RESPAWN_TICK: u32 = 30;
/// Death tick on which control is handed back.
pub const REVIVE_TICK: u32 = 50;

/// What a death tick asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathStep {
    /// Drifting to a halt.
    Dying,
    Respawn,
    Revive,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct DeathState {
    dead: bool,
    timer: u32,
}

impl DeathState {
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Start dying. Returns `false` if already dead.
    pub fn kill(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.timer = 0;
        true
    }

    /// Advance the death timer one tick. `None` while alive.
    pub fn advance(&mut self) -> Option<DeathStep> {
        if !self.dead {
            return None;
        }

        let step = if self.timer == RESPAWN_TICK {
            DeathStep::Respawn
        } else if self.timer >= REVIVE_TICK {
            DeathStep::Revive
        } else {
            DeathStep::Dying
        };

        if self.timer < REVIVE_TICK {
            self.timer += 1;
        } else {
            self.dead = false;
            self.timer = 0;
        }

        Some(step)
    }
}

/// Places the player can come back at.
#[derive(Resource, Debug, Clone, Default)]
pub struct RespawnPoints {
    points: Vec<Vec2>,
}

impl RespawnPoints {
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Closest point to `from`; the earliest wins a tie.
    pub fn nearest(&self, from: Vec2) -> Option<Vec2> {
        self.points.iter().copied().fold(None, |best, point| match best {
            Some(best) if best.distance_squared(from) <= point.distance_squared(from) => Some(best),
            _ => Some(point),
        })
    }
}
