//! Movement domain: box queries against level geometry.
//!
//! The controller never talks to the physics engine directly. Every contact
//! question it asks goes through [`CollisionProbe`], which the game
//! implements on top of avian's spatial query pipeline and tests implement
//! with a plain list of boxes.

use bevy::math::BVec2;
use bevy::prelude::*;

use crate::movement::{Facing, Hitbox};

/// Skin distance used by the grounded, wall and squish probes.
pub const SKIN: f32 = 1.0 / 16.0;

/// How far ahead a dash looks for a surface blocking one of its axes.
pub const DASH_CONTACT_DISTANCE: f32 = 0.1;

/// How far an upward dash reaches for a wall to bounce off.
pub const WALL_BOUNCE_REACH: f32 = 0.5;

/// Which kind of geometry a query is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeLayer {
    Solid,
    Spring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Read-only geometry queries used by the controller.
///
/// Implementors provide the two primitive queries; the named questions the
/// state machine asks are built on top of them.
pub trait CollisionProbe {
    /// Whether sweeping `hitbox` along `direction` for up to `distance` touches
    /// geometry on `layer`. Geometry already overlapping the box counts as a hit.
    fn cast(&self, hitbox: Hitbox, direction: Vec2, distance: f32, layer: ProbeLayer) -> bool;

    /// Whether `hitbox` overlaps geometry on `layer` where it stands.
    fn overlaps(&self, hitbox: Hitbox, layer: ProbeLayer) -> bool;

    /// Standing on something, and not stuck inside it.
    fn grounded(&self, hitbox: Hitbox) -> bool {
        self.cast(hitbox, Vec2::NEG_Y, SKIN, ProbeLayer::Solid)
            && !self.overlaps(hitbox, ProbeLayer::Solid)
    }

    /// A wall within skin distance of the lower half of the box on `side`.
    /// The bottom skin of that half is left out, so a floor the box has sunk
    /// into never reads as a wall.
    fn wall_adjacent(&self, hitbox: Hitbox, side: Facing) -> bool {
        self.wall_within(hitbox, side, SKIN)
    }

    fn wall_within(&self, hitbox: Hitbox, side: Facing, reach: f32) -> bool {
        self.cast(
            hitbox.lower_half().raised_bottom(SKIN),
            side.unit(),
            reach,
            ProbeLayer::Solid,
        )
    }

    /// Geometry pressing on both opposing faces of the box along `axis`.
    /// `offset` is the compression already absorbed on each axis.
    fn squished(&self, hitbox: Hitbox, offset: Vec2, axis: Axis) -> bool {
        let reduced = hitbox.shrunk(offset);
        let (a, b) = match axis {
            Axis::Horizontal => (Vec2::NEG_X, Vec2::X),
            Axis::Vertical => (Vec2::NEG_Y, Vec2::Y),
        };
        self.cast(reduced, a, SKIN, ProbeLayer::Solid) && self.cast(reduced, b, SKIN, ProbeLayer::Solid)
    }

    /// Solid geometry right next to the box in the direction of travel,
    /// checked per axis. A zero component never reports contact.
    fn dash_blocked(&self, hitbox: Hitbox, direction: Vec2) -> BVec2 {
        let x = direction.x != 0.0
            && self.cast(
                hitbox,
                Vec2::new(direction.x.signum(), 0.0),
                DASH_CONTACT_DISTANCE,
                ProbeLayer::Solid,
            );
        let y = direction.y != 0.0
            && self.cast(
                hitbox,
                Vec2::new(0.0, direction.y.signum()),
                DASH_CONTACT_DISTANCE,
                ProbeLayer::Solid,
            );
        BVec2::new(x, y)
    }

    fn spring_below(&self, hitbox: Hitbox) -> bool {
        self.cast(hitbox, Vec2::NEG_Y, DASH_CONTACT_DISTANCE, ProbeLayer::Spring)
    }
}
