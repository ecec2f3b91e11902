//! Debug domain: serialisable snapshot of a controller for bug reports.

use avian2d::prelude::*;
use serde::Serialize;

use crate::movement::PlayerController;
use crate::respawn::DeathState;

#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub mode: String,
    pub action: String,
    pub facing: String,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub gravity_scale: f32,
    pub dash_left: u32,
    pub stamina: f32,
    pub grab_cooldown: u32,
    pub neutral_jump_timer: u32,
    pub squish_offset: [f32; 2],
    pub dead: bool,
}

impl ControllerSnapshot {
    pub fn capture(
        controller: &PlayerController,
        position: &Position,
        velocity: &LinearVelocity,
        gravity: &GravityScale,
        death: &DeathState,
    ) -> Self {
        let squish = controller.squish().offset();
        Self {
            mode: format!("{:?}", controller.mode()),
            action: format!("{:?}", controller.action()),
            facing: format!("{:?}", controller.facing()),
            position: position.0.to_array(),
            velocity: velocity.0.to_array(),
            gravity_scale: gravity.0,
            dash_left: controller.dash_left(),
            stamina: controller.stamina_left(),
            grab_cooldown: controller.grab_cooldown(),
            neutral_jump_timer: controller.neutral_jump_timer(),
            squish_offset: squish.to_array(),
            dead: death.is_dead(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Multi-line text for the on-screen overlay.
    pub fn overlay_text(&self) -> String {
        format!(
            "Mode: {}\nAction: {}\nFacing: {}\nPos: ({:.2}, {:.2})\nVel: ({:.2}, {:.2})\nGravity: {:.1}\nDashes: {}\nStamina: {:.0}\nGrab cooldown: {}\nNeutral jump: {}\nSquish: ({:.3}, {:.3})\nDead: {}",
            self.mode,
            self.action,
            self.facing,
            self.position[0],
            self.position[1],
            self.velocity[0],
            self.velocity[1],
            self.gravity_scale,
            self.dash_left,
            self.stamina,
            self.grab_cooldown,
            self.neutral_jump_timer,
            self.squish_offset[0],
            self.squish_offset[1],
            self.dead
        )
    }
}
