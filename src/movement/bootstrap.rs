//! Movement domain: player bootstrap from loaded tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, InputSampler, MovementTuning, Player, PlayerController};
use crate::respawn::{DeathState, RespawnPoints};

/// Spawn the player at the first respawn point with a controller built from
/// the current tuning.
pub fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    respawn_points: Res<RespawnPoints>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn = respawn_points.first().unwrap_or(Vec2::ZERO);
    let size = tuning.hitbox_size();

    info!(
        "Spawning player at {:?}: hitbox={:?}, dashes={}, stamina={}",
        spawn, size, tuning.dash_number, tuning.max_stamina
    );

    commands.spawn((
        // Identity & controller
        (
            Player,
            PlayerController::new(tuning.clone()),
            InputSampler::default(),
            DeathState::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.85, 0.3, 0.35),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(spawn.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(tuning.gravity_scale),
            Friction::new(0.0),
            Restitution::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Solid, GameLayer::Spring]),
        ),
    ));
}
