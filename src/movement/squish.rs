//! Movement domain: crush detection.
//!
//! Geometry pressing on opposite faces of the player compresses the hitbox a
//! sixteenth of a unit per tick. Compression that reaches the limit on either
//! axis while still being pressed is fatal.

use bevy::math::BVec2;
use bevy::prelude::*;

use crate::movement::probe::{Axis, CollisionProbe, SKIN};
use crate::movement::Hitbox;

/// Compression applied or recovered per tick.
pub const SQUISH_QUANTUM: f32 = SKIN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquishDetector {
    offset: Vec2,
    limit: Vec2,
    /// Set once the fatal signal fired for an axis; cleared when that axis is released.
    fired: BVec2,
}

impl SquishDetector {
    pub fn new(hitbox_size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            limit: (hitbox_size - Vec2::splat(2.0 * SQUISH_QUANTUM)).max(Vec2::ZERO),
            fired: BVec2::FALSE,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn limit(&self) -> Vec2 {
        self.limit
    }

    /// Probe both axes and step the offsets. Returns `true` on the tick the
    /// body gets crushed.
    pub fn update(&mut self, probe: &impl CollisionProbe, hitbox: Hitbox) -> bool {
        // Both axes are probed with the offset from the start of the tick.
        let horizontal = probe.squished(hitbox, self.offset, Axis::Horizontal);
        let vertical = probe.squished(hitbox, self.offset, Axis::Vertical);
        self.step(BVec2::new(horizontal, vertical))
    }

    /// Step the offsets given which axes are currently compressed.
    pub fn step(&mut self, compressed: BVec2) -> bool {
        let x = step_axis(
            &mut self.offset.x,
            self.limit.x,
            compressed.x,
            &mut self.fired.x,
        );
        let y = step_axis(
            &mut self.offset.y,
            self.limit.y,
            compressed.y,
            &mut self.fired.y,
        );
        x || y
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.fired = BVec2::FALSE;
    }
}

fn step_axis(offset: &mut f32, limit: f32, compressed: bool, fired: &mut bool) -> bool {
    if !compressed {
        *offset = (*offset - SQUISH_QUANTUM).max(0.0);
        *fired = false;
        return false;
    }

    if *offset < limit {
        *offset = (*offset + SQUISH_QUANTUM).min(limit);
        false
    } else if !*fired {
        *fired = true;
        true
    } else {
        false
    }
}
