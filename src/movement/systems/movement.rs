//! Movement domain: the fixed-step controller system.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::systems::collisions::AvianProbe;
use crate::movement::{
    DashAfterImage, InputSampler, KinematicBody, PlatformLink, Player, PlayerController,
    PlayerCrushed, Riding,
};
use crate::platforms::MovingPlatform;
use crate::respawn::DeathState;

/// Fixed-rate phase: resolve buffered input and advance each controller one tick.
#[allow(clippy::type_complexity)]
pub(crate) fn run_controller(
    spatial_query: SpatialQuery,
    mut players: Query<
        (
            Entity,
            &mut PlayerController,
            &mut InputSampler,
            &Position,
            &mut LinearVelocity,
            &mut GravityScale,
            &DeathState,
            Option<&Riding>,
        ),
        With<Player>,
    >,
    mut platforms: Query<&mut MovingPlatform>,
    mut after_images: MessageWriter<DashAfterImage>,
    mut crushed: MessageWriter<PlayerCrushed>,
) {
    let probe = AvianProbe::new(&spatial_query);

    for (entity, mut controller, mut sampler, position, mut velocity, mut gravity, death, riding) in
        &mut players
    {
        let input = sampler.resolve();
        let mut body = KinematicBody {
            position: position.0,
            velocity: velocity.0,
            gravity_scale: gravity.0,
        };

        let mut platform = riding.and_then(|riding| platforms.get_mut(riding.0).ok());
        let link = platform
            .as_mut()
            .map(|platform| &mut **platform as &mut dyn PlatformLink);

        let report = controller.tick(&mut body, input, &probe, link, death.is_dead());

        velocity.0 = body.velocity;
        gravity.0 = body.gravity_scale;

        if let Some(position) = report.after_image {
            after_images.write(DashAfterImage {
                position,
                facing: controller.facing(),
            });
        }

        if report.crushed {
            crushed.write(PlayerCrushed { player: entity });
        }
    }
}
