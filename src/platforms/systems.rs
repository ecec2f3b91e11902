//! Platforms domain: attachment, eject and carry systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Facing, GRAB_COOLDOWN_TICKS, KinematicBody, Player, PlayerController, Riding,
};
use crate::platforms::motion::{EJECT_BOOST_TICKS, MovingPlatform, holds_player};
use crate::respawn::DeathState;

/// Attach or detach the player, perform pending ejects, then move each
/// platform along its rail and carry whoever is still attached.
#[allow(clippy::type_complexity)]
pub(crate) fn drive_platforms(
    time: Res<Time>,
    mut commands: Commands,
    mut platforms: Query<(Entity, &mut MovingPlatform, &mut Position), Without<Player>>,
    mut players: Query<
        (
            Entity,
            &mut PlayerController,
            &mut Position,
            &mut LinearVelocity,
            &DeathState,
            Option<&Riding>,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (platform_entity, mut platform, mut platform_position) in &mut platforms {
        let mut carried = Vec::new();

        for (player, mut controller, position, mut velocity, death, riding) in &mut players {
            let riding_this = riding.is_some_and(|r| r.0 == platform_entity);
            let attached = !death.is_dead()
                && holds_player(
                    platform.hitbox(),
                    controller.hitbox(position.0),
                    controller.wall_grabbed(),
                    controller.facing(),
                    !controller.is_airborne(),
                );

            if !attached {
                platform.detach();
                if riding_this {
                    commands.entity(player).remove::<Riding>();
                }
                continue;
            }

            platform.activate();

            if platform.take_eject() {
                eject(&platform, &mut controller, position.0, &mut velocity);
                commands.entity(player).remove::<Riding>();
                continue;
            }

            if !riding_this {
                commands.entity(player).insert(Riding(platform_entity));
            }
            carried.push(player);
        }

        let delta = platform.step(dt);
        platform_position.0 = platform.position();

        if delta != Vec2::ZERO {
            for player in carried {
                if let Ok((_, _, mut position, ..)) = players.get_mut(player) {
                    position.0 += delta;
                }
            }
        }
    }
}

fn eject(
    platform: &MovingPlatform,
    controller: &mut PlayerController,
    position: Vec2,
    velocity: &mut LinearVelocity,
) {
    let mut body = KinematicBody {
        position,
        velocity: velocity.0,
        gravity_scale: controller.gravity_scale(),
    };

    if controller.wall_grabbed() {
        controller.release_grab(GRAB_COOLDOWN_TICKS);
        body.velocity.x = 0.0;
    }

    let launch = platform.eject_velocity(body.velocity);
    controller.apply_boost(&mut body, EJECT_BOOST_TICKS, launch, true);

    if body.velocity.x > 0.0 {
        controller.set_facing(Facing::Right);
    } else if body.velocity.x < 0.0 {
        controller.set_facing(Facing::Left);
    }

    velocity.0 = body.velocity;
    debug!("Platform ejected player: launch={:?}", launch);
}
