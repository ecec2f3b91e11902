//! Player sprite state: facing, dash colour and visibility while dead.

use bevy::prelude::*;

use crate::movement::{Player, PlayerController};
use crate::respawn::DeathState;
use crate::sprites::palette::dash_color;

/// Death tick after which the body is hidden until respawn.
const HIDE_AFTER_DEATH_TICK: u32 = 15;

pub(crate) fn sync_player_sprite(
    mut players: Query<(&PlayerController, &DeathState, &mut Sprite, &mut Visibility), With<Player>>,
) {
    for (controller, death, mut sprite, mut visibility) in &mut players {
        sprite.flip_x = controller.facing().is_left();
        sprite.color = dash_color(controller.dash_left());

        *visibility = if death.is_dead() && death.timer() > HIDE_AFTER_DEATH_TICK {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }
}
