//! Level domain: spring launchers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Player, PlayerController};

/// Sensor that throws the player straight up on contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spring {
    pub bounce_speed: f32,
}

pub(crate) fn launch_from_springs(
    mut collision_start_events: MessageReader<CollisionStart>,
    springs: Query<&Spring>,
    mut players: Query<(&mut LinearVelocity, &mut PlayerController), With<Player>>,
) {
    for event in collision_start_events.read() {
        let (spring, other) = if let Ok(spring) = springs.get(event.collider1) {
            (spring, event.collider2)
        } else if let Ok(spring) = springs.get(event.collider2) {
            (spring, event.collider1)
        } else {
            continue;
        };

        let Ok((mut velocity, mut controller)) = players.get_mut(other) else {
            continue;
        };

        velocity.0 = Vec2::new(0.0, spring.bounce_speed);
        controller.reset_dash_and_grab();
        debug!("Spring launch: bounce_speed={}", spring.bounce_speed);
    }
}
