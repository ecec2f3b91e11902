//! Level domain: the hand-built test room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::level::springs::Spring;
use crate::movement::{GameLayer, Hitbox, Solid};
use crate::platforms::MovingPlatform;

/// A static block, centre and size in world units.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub center: Vec2,
    pub size: Vec2,
}

const fn block(x: f32, y: f32, w: f32, h: f32) -> Block {
    Block {
        center: Vec2::new(x, y),
        size: Vec2::new(w, h),
    }
}

pub const BLOCKS: [Block; 7] = [
    // Floor
    block(0.0, -5.0, 32.0, 2.0),
    // Left wall
    block(-15.5, 3.0, 1.0, 16.0),
    // Right wall
    block(15.5, 3.0, 1.0, 16.0),
    // Ceiling ledge
    block(9.0, 6.5, 8.0, 1.0),
    // Pillar for climbing practice
    block(-3.0, -1.5, 1.0, 5.0),
    // Low step
    block(4.0, -3.5, 3.0, 1.0),
    // Shelf above the end of the platform rail, leaving a gap too low to stand in
    block(-10.0, 7.75, 6.0, 1.0),
];

pub const RESPAWN_POINTS: [Vec2; 3] = [
    Vec2::new(0.0, -3.5),
    Vec2::new(9.0, 7.5),
    Vec2::new(-12.0, -3.5),
];

pub const PLATFORM_START: Vec2 = Vec2::new(-10.0, -2.0);
pub const PLATFORM_END: Vec2 = Vec2::new(-10.0, 6.5);
pub const PLATFORM_SIZE: Vec2 = Vec2::new(3.0, 0.5);
pub const PLATFORM_SPEED: f32 = 12.0;
pub const PLATFORM_BOOST_FACTOR: f32 = 1.2;

pub const SPRING_POSITION: Vec2 = Vec2::new(12.0, -3.75);
pub const SPRING_SIZE: Vec2 = Vec2::new(1.0, 0.5);
pub const SPRING_BOUNCE_SPEED: f32 = 22.0;

impl Block {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::from_size(self.center, self.size)
    }
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let solid_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let spring_color = Color::srgb(0.9, 0.75, 0.2);

    let solid_layers = CollisionLayers::new(GameLayer::Solid, [GameLayer::Player]);

    for block in BLOCKS {
        commands.spawn((
            Solid,
            Sprite {
                color: solid_color,
                custom_size: Some(block.size),
                ..default()
            },
            Transform::from_translation(block.center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
            solid_layers,
        ));
    }

    commands.spawn((
        Solid,
        MovingPlatform::new(
            PLATFORM_START,
            PLATFORM_END,
            PLATFORM_SIZE,
            PLATFORM_SPEED,
            PLATFORM_BOOST_FACTOR,
        ),
        Sprite {
            color: platform_color,
            custom_size: Some(PLATFORM_SIZE),
            ..default()
        },
        Transform::from_translation(PLATFORM_START.extend(0.0)),
        RigidBody::Kinematic,
        Collider::rectangle(PLATFORM_SIZE.x, PLATFORM_SIZE.y),
        solid_layers,
    ));

    commands.spawn((
        Spring {
            bounce_speed: SPRING_BOUNCE_SPEED,
        },
        Sprite {
            color: spring_color,
            custom_size: Some(SPRING_SIZE),
            ..default()
        },
        Transform::from_translation(SPRING_POSITION.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(SPRING_SIZE.x, SPRING_SIZE.y),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Spring, [GameLayer::Player]),
    ));

    info!(
        "Spawned test room: {} blocks, 1 moving platform, 1 spring",
        BLOCKS.len()
    );
}
