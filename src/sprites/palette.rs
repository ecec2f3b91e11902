//! Player colours keyed on dash charges.

use bevy::prelude::*;

/// Starting opacity of an after-image.
pub const ALPHA: f32 = 0.6;

pub fn dash_color(dash_left: u32) -> Color {
    match dash_left {
        0 => Color::srgb(67.0 / 255.0, 163.0 / 255.0, 245.0 / 255.0),
        1 => Color::srgb(172.0 / 255.0, 32.0 / 255.0, 32.0 / 255.0),
        _ => Color::srgb(0.2, 0.8, 0.3),
    }
}
