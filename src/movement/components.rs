//! Movement domain: components, body data and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Static and moving geometry the player collides with
    Solid,
    /// Spring launchers (sensors)
    Spring,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for solid level geometry
#[derive(Component, Debug)]
pub struct Solid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    pub fn is_left(self) -> bool {
        self == Facing::Left
    }

    pub fn unit(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
}

impl WallContact {
    pub fn is_some(self) -> bool {
        self != WallContact::None
    }
}

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Hitbox {
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Same width, half the height, sitting in the bottom half of the box.
    pub fn lower_half(&self) -> Hitbox {
        Hitbox {
            center: self.center - Vec2::new(0.0, self.half_extents.y * 0.5),
            half_extents: Vec2::new(self.half_extents.x, self.half_extents.y * 0.5),
        }
    }

    /// The box with its full size reduced by `amount` per axis.
    pub fn shrunk(&self, amount: Vec2) -> Hitbox {
        Hitbox {
            center: self.center,
            half_extents: (self.half_extents - amount * 0.5).max(Vec2::ZERO),
        }
    }

    /// The box with `amount` cut off its bottom edge; the top edge stays put.
    pub fn raised_bottom(&self, amount: f32) -> Hitbox {
        let cut = amount.min(self.half_extents.y * 2.0);
        Hitbox {
            center: self.center + Vec2::new(0.0, cut * 0.5),
            half_extents: Vec2::new(self.half_extents.x, self.half_extents.y - cut * 0.5),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Open-interval overlap; boxes sharing an edge do not overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Whether `other` is within `reach` of this box along `direction`,
    /// overlap included.
    pub fn touches(&self, other: &Hitbox, direction: Vec2, reach: f32) -> bool {
        let swept = Hitbox {
            center: self.center + direction * reach * 0.5,
            half_extents: self.half_extents + direction.abs() * reach * 0.5,
        };
        swept.overlaps(other)
    }
}

/// Position and velocity the controller works on during one tick.
///
/// In the running game these mirror avian's `Position`, `LinearVelocity` and
/// `GravityScale`; they are copied in before the tick and written back after.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

/// Moving platform the player is currently riding or clinging to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Riding(pub Entity);
