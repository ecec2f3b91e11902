//! Platforms domain: rail motion, attachment and eject rules.

use bevy::prelude::*;

use crate::movement::{Facing, Hitbox, PlatformLink, SKIN};

/// Ticks between attachment and the platform starting to move.
pub const START_DELAY_TICKS: u32 = 5;
/// Ticks spent at the end of the rail before returning.
pub const HOLD_TICKS: u32 = 15;
/// The platform ejects instead of letting the player jump once it is this far out.
pub const EJECT_MIN_DISTANCE: f32 = 0.25;
/// Holding ticks that must remain for an eject to still happen.
pub const EJECT_HOLD_THRESHOLD: u32 = 10;
pub const EJECT_BOOST_TICKS: u32 = 10;
/// Upward component added to every eject.
pub const EJECT_LIFT: f32 = 5.0;

const ARRIVE_DISTANCE: f32 = 0.1;
const RETURN_SPEED_DIVISOR: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PlatformPhase {
    #[default]
    Idle,
    /// Moving toward the end of the rail once `delay` reaches zero.
    Outbound { delay: u32 },
    Holding { timer: u32 },
    Returning,
}

/// A platform that runs along a rail once the player gets on.
#[derive(Component, Debug, Clone)]
pub struct MovingPlatform {
    start: Vec2,
    end: Vec2,
    size: Vec2,
    /// Outbound speed in world units per second.
    speed: f32,
    boost_factor: f32,
    position: Vec2,
    phase: PlatformPhase,
    player_jumped: bool,
}

impl MovingPlatform {
    pub fn new(start: Vec2, end: Vec2, size: Vec2, speed: f32, boost_factor: f32) -> Self {
        Self {
            start,
            end,
            size,
            speed,
            boost_factor,
            position: start,
            phase: PlatformPhase::Idle,
            player_jumped: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn phase(&self) -> PlatformPhase {
        self.phase
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::from_size(self.position, self.size)
    }

    /// Unit vector from the start of the rail to its end.
    pub fn rail_direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }

    pub fn player_jumped(&self) -> bool {
        self.player_jumped
    }

    /// Start the cycle if the platform is resting.
    pub fn activate(&mut self) {
        if self.phase == PlatformPhase::Idle {
            self.phase = PlatformPhase::Outbound {
                delay: START_DELAY_TICKS,
            };
            debug!("Platform activated at {:?}", self.position);
        }
    }

    /// The player left; any pending eject is dropped.
    pub fn detach(&mut self) {
        self.player_jumped = false;
    }

    /// Consume a pending eject if the platform still wants to perform it.
    pub fn take_eject(&mut self) -> bool {
        if self.player_jumped && self.eject_player() {
            self.player_jumped = false;
            true
        } else {
            false
        }
    }

    /// Launch velocity for a player leaving with `player_velocity`.
    pub fn eject_velocity(&self, player_velocity: Vec2) -> Vec2 {
        self.boost_factor * self.speed * self.rail_direction()
            + EJECT_LIFT * Vec2::Y
            + Vec2::new(player_velocity.x, 0.0)
    }

    /// Advance one tick of `dt` seconds and return the displacement.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        let before = self.position;

        match self.phase {
            PlatformPhase::Idle => {}
            PlatformPhase::Outbound { delay } if delay > 0 => {
                self.phase = PlatformPhase::Outbound { delay: delay - 1 };
            }
            PlatformPhase::Outbound { .. } => {
                self.position = move_towards(self.position, self.end, self.speed * dt);
                if self.position.distance(self.end) < ARRIVE_DISTANCE {
                    self.position = self.end;
                    self.phase = PlatformPhase::Holding { timer: HOLD_TICKS };
                }
            }
            PlatformPhase::Holding { timer } if timer > 0 => {
                self.phase = PlatformPhase::Holding { timer: timer - 1 };
            }
            PlatformPhase::Holding { .. } => {
                self.phase = PlatformPhase::Returning;
                self.step_return(dt);
            }
            PlatformPhase::Returning => self.step_return(dt),
        }

        self.position - before
    }

    fn step_return(&mut self, dt: f32) {
        let speed = self.speed / RETURN_SPEED_DIVISOR;
        self.position = move_towards(self.position, self.start, speed * dt);
        if self.position.distance(self.start) < ARRIVE_DISTANCE {
            self.position = self.start;
            self.phase = PlatformPhase::Idle;
        }
    }
}

impl PlatformLink for MovingPlatform {
    fn eject_player(&self) -> bool {
        self.start.distance(self.position) > EJECT_MIN_DISTANCE
            && match self.phase {
                PlatformPhase::Outbound { .. } => true,
                PlatformPhase::Holding { timer } => timer > EJECT_HOLD_THRESHOLD,
                _ => false,
            }
    }

    fn request_eject(&mut self) {
        self.player_jumped = true;
    }
}

/// Whether a player with the given state is held by a platform occupying `platform`.
///
/// A grabbing player must be clinging to the side they face; anyone else
/// must be grounded on top.
pub fn holds_player(
    platform: Hitbox,
    player: Hitbox,
    wall_grabbed: bool,
    facing: Facing,
    grounded: bool,
) -> bool {
    if wall_grabbed {
        platform.touches(&player, facing.flipped().unit(), SKIN)
    } else {
        grounded && platform.touches(&player, Vec2::Y, SKIN)
    }
}

fn move_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_step || distance == 0.0 {
        to
    } else {
        from + offset / distance * max_step
    }
}
