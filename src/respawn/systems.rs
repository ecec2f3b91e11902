//! Respawn domain: death handling systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Player, PlayerController, PlayerCrushed};
use crate::respawn::state::{DEATH_VELOCITY_DECAY, DeathState, DeathStep, RespawnPoints};

pub(crate) fn handle_crushed(
    mut crushed: MessageReader<PlayerCrushed>,
    mut players: Query<&mut DeathState, With<Player>>,
) {
    for message in crushed.read() {
        if let Ok(mut death) = players.get_mut(message.player)
            && death.kill()
        {
            info!("Player {:?} died", message.player);
        }
    }
}

pub(crate) fn advance_death(
    respawn_points: Res<RespawnPoints>,
    mut players: Query<
        (
            &mut DeathState,
            &mut PlayerController,
            &mut Position,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    for (mut death, mut controller, mut position, mut velocity) in &mut players {
        let Some(step) = death.advance() else {
            continue;
        };

        velocity.0 *= DEATH_VELOCITY_DECAY;

        match step {
            DeathStep::Dying => {}
            DeathStep::Respawn => {
                match respawn_points.nearest(position.0) {
                    Some(point) => position.0 = point,
                    None => warn!("No respawn point registered, respawning in place"),
                }
                velocity.0 = Vec2::ZERO;
                controller.reset_dash_and_grab();
                controller.reset_squish();
                info!("Player respawned at {:?}", position.0);
            }
            DeathStep::Revive => {
                controller.reset_dash_and_grab();
                info!("Player revived");
            }
        }
    }
}
