//! Movement domain: the character controller state machine.
//!
//! One call to [`PlayerController::tick`] is one fixed step. The tick reads
//! resolved input and collision queries, then rewrites the body's velocity
//! and gravity scale; moving the body is left to the physics step.

use bevy::prelude::*;

use crate::movement::buttons::TickInput;
use crate::movement::probe::{CollisionProbe, WALL_BOUNCE_REACH};
use crate::movement::squish::SquishDetector;
use crate::movement::stamina::{CLIMB_COST, Stamina, WALL_JUMP_COST};
use crate::movement::{Facing, Hitbox, KinematicBody, MovementTuning, WallContact};

pub const NEUTRAL_JUMP_BOOST_TICKS: u32 = 10;
pub const WAVE_DASH_BOOST_TICKS: u32 = 12;
pub const WALL_BOUNCE_BOOST_TICKS: u32 = 8;
/// Ticks before a wall can be grabbed again after jumping off it.
pub const GRAB_COOLDOWN_TICKS: u32 = 10;
/// A dash leaves an after-image every this many ticks.
pub const AFTER_IMAGE_INTERVAL: u32 = 4;

const INPUT_DEADZONE: f32 = 0.1;
const BOOST_DECAY: f32 = 0.95;
const BOOST_SNAP_SPEED: f32 = 1.0 / 16.0;
const NEUTRAL_JUMP_SPEED: Vec2 = Vec2::new(1.6, 0.9);
const WALL_BOUNCE_SPEED: Vec2 = Vec2::new(0.53, 1.2);
const GRAB_JUMP_FACTOR: f32 = 0.85;

/// What the controller is doing. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Action {
    #[default]
    Free,
    /// Grab button held; `on_wall` once a wall on the facing side is caught.
    Grabbing { on_wall: bool },
    Dashing(Dash),
    /// Dash cancelled into a jump on the ground, riding its boost.
    WaveDashing,
    /// Upward dash cancelled off a wall; `direction` is the sign of the launch.
    WallBouncing { direction: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    /// Raw input direction captured at the start of the dash.
    pub direction: Vec2,
    /// Ticks left. Natural expiry ends the dash with zero velocity.
    pub remaining: u32,
}

/// Temporary velocity override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boost {
    /// Ticks of suppressed horizontal control left.
    pub timer: u32,
    /// Keep the boosted velocity once the timer runs out.
    pub keep: bool,
    /// Air control ceiling while the kept boost lasts.
    pub max_horizontal_speed: f32,
}

/// The mode collaborators see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MovementMode {
    Grounded,
    Airborne,
    WallSliding,
    WallGrabbing,
    Dashing,
    WaveDashing,
    WallBouncing,
    Boosted,
}

/// Moving platform the player is attached to.
pub trait PlatformLink {
    /// Whether the platform wants to launch the player instead of letting them jump.
    fn eject_player(&self) -> bool;

    /// Ask the platform to perform the launch on its next step.
    fn request_eject(&mut self);
}

/// Things the tick wants the outside world to know about.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Where a dash after-image should appear.
    pub after_image: Option<Vec2>,
    /// The squish detector fired this tick.
    pub crushed: bool,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    tuning: MovementTuning,
    facing: Facing,
    dir: Vec2,
    action: Action,
    boost: Option<Boost>,
    dash_left: u32,
    stamina: Stamina,
    squish: SquishDetector,
    /// Counts down while grab is held. Set by a grab jump; zeroed on the
    /// ground, on grab release and by `reset_dash_and_grab`.
    grab_cooldown: u32,
    /// Full while next to a wall, counts down in the air, zeroed on the
    /// ground, when grabbing and when consumed by a neutral jump.
    neutral_jump_timer: u32,
    neutral_jump_facing: Facing,
    wall: WallContact,
    sliding: bool,
    airborne: bool,
}

impl PlayerController {
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            facing: Facing::Right,
            dir: Vec2::ZERO,
            action: Action::Free,
            boost: None,
            dash_left: tuning.dash_number,
            stamina: Stamina::new(tuning.max_stamina),
            squish: SquishDetector::new(tuning.hitbox_size()),
            grab_cooldown: 0,
            neutral_jump_timer: 0,
            neutral_jump_facing: Facing::Right,
            wall: WallContact::None,
            sliding: false,
            airborne: false,
            tuning,
        }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn hitbox(&self, position: Vec2) -> Hitbox {
        Hitbox::from_size(position, self.tuning.hitbox_size())
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn boost(&self) -> Option<Boost> {
        self.boost
    }

    /// True for a dash and for the wave-dash that cancels it.
    pub fn is_dashing(&self) -> bool {
        matches!(self.action, Action::Dashing(_) | Action::WaveDashing)
    }

    pub fn is_wave_dashing(&self) -> bool {
        self.action == Action::WaveDashing
    }

    pub fn is_wall_bouncing(&self) -> bool {
        matches!(self.action, Action::WallBouncing { .. })
    }

    pub fn is_grabbing(&self) -> bool {
        matches!(self.action, Action::Grabbing { .. })
    }

    pub fn wall_grabbed(&self) -> bool {
        self.action == Action::Grabbing { on_wall: true }
    }

    pub fn sliding_on_wall(&self) -> bool {
        self.sliding
    }

    pub fn next_to_wall(&self) -> WallContact {
        self.wall
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn dash_left(&self) -> u32 {
        self.dash_left
    }

    pub fn dash_number(&self) -> u32 {
        self.tuning.dash_number
    }

    pub fn stamina_left(&self) -> f32 {
        self.stamina.current()
    }

    pub fn max_stamina(&self) -> f32 {
        self.stamina.max()
    }

    /// Gravity scale used in free movement.
    pub fn gravity_scale(&self) -> f32 {
        self.tuning.gravity_scale
    }

    pub fn grab_cooldown(&self) -> u32 {
        self.grab_cooldown
    }

    pub fn neutral_jump_timer(&self) -> u32 {
        self.neutral_jump_timer
    }

    pub fn squish(&self) -> &SquishDetector {
        &self.squish
    }

    pub fn mode(&self) -> MovementMode {
        match self.action {
            Action::Dashing(_) => MovementMode::Dashing,
            Action::WaveDashing => MovementMode::WaveDashing,
            Action::WallBouncing { .. } => MovementMode::WallBouncing,
            Action::Grabbing { on_wall: true } => MovementMode::WallGrabbing,
            _ if self.sliding => MovementMode::WallSliding,
            _ if self.boost.is_some() => MovementMode::Boosted,
            _ if self.airborne => MovementMode::Airborne,
            _ => MovementMode::Grounded,
        }
    }

    /// Replace the velocity and suppress horizontal control for `duration` ticks.
    pub fn apply_boost(&mut self, body: &mut KinematicBody, duration: u32, velocity: Vec2, keep: bool) {
        body.velocity = velocity;
        self.boost = Some(Boost {
            timer: duration,
            keep,
            max_horizontal_speed: velocity.x.abs(),
        });
    }

    /// Let go of the wall and block re-grabbing for `cooldown` ticks.
    pub fn release_grab(&mut self, cooldown: u32) {
        if self.is_grabbing() {
            self.action = Action::Free;
        }
        self.grab_cooldown = cooldown;
    }

    /// Restore dashes and stamina, cancel any dash or grab.
    ///
    /// Wave-dash and wall-bounce momentum is left alone; it ends with its boost.
    pub fn reset_dash_and_grab(&mut self) {
        self.dash_left = self.tuning.dash_number;
        if matches!(self.action, Action::Dashing(_) | Action::Grabbing { .. }) {
            self.action = Action::Free;
        }
        self.stamina.refill();
        self.grab_cooldown = 0;
    }

    /// Top up dashes and stamina without touching the current action.
    pub fn refill(&mut self) {
        self.dash_left = self.tuning.dash_number;
        self.stamina.refill();
    }

    pub fn reset_squish(&mut self) {
        self.squish.reset();
    }

    /// Advance one fixed step.
    ///
    /// While `dead` nothing but the airborne flag is updated.
    pub fn tick(
        &mut self,
        body: &mut KinematicBody,
        input: TickInput,
        probe: &impl CollisionProbe,
        platform: Option<&mut dyn PlatformLink>,
        dead: bool,
    ) -> TickReport {
        self.dir = input.axis;
        let hitbox = self.hitbox(body.position);
        let grounded = probe.grounded(hitbox);
        let mut report = TickReport::default();

        if !dead {
            let eject_due = platform.as_ref().is_some_and(|p| p.eject_player());
            let mut eject_requested = false;

            self.update_facing();
            self.update_sliding(body, &input, probe, hitbox, grounded);
            self.grab_check(body, &input, probe, hitbox, grounded, eject_due, &mut eject_requested);
            self.dash_check(body, &input, probe, hitbox, grounded, &mut report);
            self.update_wave_dash();
            self.update_boost();
            self.update_gravity(body);
            self.update_velocity(body, &input, grounded, eject_due, &mut eject_requested);

            if self.squish.update(probe, hitbox) {
                body.velocity = Vec2::ZERO;
                body.gravity_scale = 0.0;
                report.crushed = true;
                info!("Player crushed: squish offset {:?}", self.squish.offset());
            }

            if eject_requested && let Some(platform) = platform {
                platform.request_eject();
                debug!("Jump deferred to platform eject");
            }
        }

        self.airborne = !grounded;
        report
    }

    fn update_facing(&mut self) {
        if self.is_dashing() || self.wall_grabbed() {
            return;
        }

        if self.dir.x > 0.0 {
            self.facing = Facing::Right;
        } else if self.dir.x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    fn update_sliding(
        &mut self,
        body: &mut KinematicBody,
        input: &TickInput,
        probe: &impl CollisionProbe,
        hitbox: Hitbox,
        grounded: bool,
    ) {
        let facing = self.facing;
        self.sliding = self.dir.x * facing.sign() > 0.0
            && !grounded
            && body.velocity.y < 0.0
            && probe.wall_adjacent(hitbox, facing);

        self.wall = if grounded || self.wall_grabbed() {
            WallContact::None
        } else if probe.wall_adjacent(hitbox, Facing::Left) {
            WallContact::Left
        } else if probe.wall_adjacent(hitbox, Facing::Right) {
            WallContact::Right
        } else {
            WallContact::None
        };

        if self.sliding {
            self.neutral_jump_facing = facing;
            // A neutral jump this tick overrides the clamp.
            if !input.jump.just_pressed() || self.neutral_jump_timer == 0 {
                body.velocity.y = body.velocity.y.max(-self.tuning.max_vertical_speed / 2.0);
            }
        }

        if self.wall.is_some() {
            self.neutral_jump_facing = facing;
            self.neutral_jump_timer = self.tuning.can_neutral_jump_duration;
        } else if grounded {
            self.neutral_jump_timer = 0;
        } else {
            self.neutral_jump_timer = self.neutral_jump_timer.saturating_sub(1);
        }

        if input.jump.just_pressed() && self.neutral_jump_timer > 0 {
            self.neutral_jump_timer = 0;

            let away = if self.sliding {
                Some(self.neutral_jump_facing.flipped())
            } else {
                match self.wall {
                    WallContact::Left => Some(Facing::Right),
                    WallContact::Right => Some(Facing::Left),
                    WallContact::None => None,
                }
            };

            if let Some(away) = away {
                self.facing = away;
                let launch = Vec2::new(
                    away.sign() * NEUTRAL_JUMP_SPEED.x * self.tuning.move_speed,
                    NEUTRAL_JUMP_SPEED.y * self.tuning.jump_force,
                );
                self.apply_boost(body, NEUTRAL_JUMP_BOOST_TICKS, launch, false);
                debug!("Neutral jump off wall: launch={:?}", launch);
            }

            self.sliding = false;
            self.wall = WallContact::None;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn grab_check(
        &mut self,
        body: &mut KinematicBody,
        input: &TickInput,
        probe: &impl CollisionProbe,
        hitbox: Hitbox,
        grounded: bool,
        eject_due: bool,
        eject_requested: &mut bool,
    ) {
        if !self.is_dashing() {
            if input.grab.is_pressed() {
                if self.grab_cooldown > 0 {
                    self.grab_cooldown -= 1;
                } else if !self.stamina.is_empty() {
                    if !self.is_grabbing() {
                        self.action = Action::Grabbing { on_wall: false };
                    }
                    self.sliding = false;
                    self.wall = WallContact::None;
                    self.neutral_jump_timer = 0;
                }
            } else if input.grab.just_released() {
                if self.is_grabbing() {
                    self.action = Action::Free;
                }
                self.grab_cooldown = 0;
            }
        }

        if self.is_grabbing() {
            if probe.wall_adjacent(hitbox, self.facing) {
                let mut released = false;
                let climbing = self.dir.y.abs() > INPUT_DEADZONE;

                if climbing {
                    self.stamina.drain(CLIMB_COST);
                }

                // Residual momentum is dropped so the climb speed applies exactly.
                body.velocity = Vec2::ZERO;

                if input.jump.just_pressed() {
                    if eject_due {
                        *eject_requested = true;
                    } else {
                        body.velocity.y = GRAB_JUMP_FACTOR * self.tuning.jump_force;
                        self.grab_cooldown = GRAB_COOLDOWN_TICKS;
                        self.stamina.drain(WALL_JUMP_COST);
                        released = true;
                        debug!("Jumped off grabbed wall: stamina={}", self.stamina.current());
                    }
                } else if climbing {
                    body.velocity.y = self.dir.y.signum() * self.tuning.climb_speed;
                }

                if self.stamina.is_empty() {
                    released = true;
                    debug!("Stamina exhausted, releasing wall");
                }

                self.action = if released {
                    Action::Free
                } else {
                    Action::Grabbing { on_wall: true }
                };
            } else {
                self.action = Action::Grabbing { on_wall: false };
            }
        }

        if grounded {
            self.stamina.refill();
            self.grab_cooldown = 0;
        }
    }

    fn dash_check(
        &mut self,
        body: &mut KinematicBody,
        input: &TickInput,
        probe: &impl CollisionProbe,
        hitbox: Hitbox,
        grounded: bool,
        report: &mut TickReport,
    ) {
        if input.dash.just_pressed()
            && self.dash_left > 0
            && !self.is_dashing()
            && !probe.spring_below(hitbox)
        {
            self.start_dash(body, grounded);
        }

        match self.action {
            Action::Dashing(mut dash) if dash.remaining > 0 => {
                let jump = input.jump.just_pressed();
                let straight_up = dash.direction.x == 0.0 && dash.direction.y > 0.0;
                let bounce_wall = if straight_up && jump {
                    if probe.wall_within(hitbox, Facing::Left, WALL_BOUNCE_REACH) {
                        Some(Facing::Left)
                    } else if probe.wall_within(hitbox, Facing::Right, WALL_BOUNCE_REACH) {
                        Some(Facing::Right)
                    } else {
                        None
                    }
                } else {
                    None
                };

                if grounded && jump && dash.direction.x != 0.0 {
                    self.wave_dash(body, dash);
                } else if let Some(wall) = bounce_wall {
                    self.wall_bounce(body, wall);
                } else {
                    body.velocity = dash.direction.normalize_or_zero() * self.tuning.dash_speed;
                    let blocked = probe.dash_blocked(hitbox, dash.direction);
                    if blocked.x {
                        body.velocity.x = 0.0;
                    }
                    if blocked.y {
                        body.velocity.y = 0.0;
                    }

                    let elapsed = self.tuning.dash_duration.saturating_sub(dash.remaining);
                    if elapsed % AFTER_IMAGE_INTERVAL == 0 {
                        report.after_image = Some(body.position);
                    }

                    dash.remaining -= 1;
                    self.action = Action::Dashing(dash);
                }
            }
            Action::Dashing(_) => {
                self.action = Action::Free;
                body.velocity = Vec2::ZERO;
                debug!("Dash ended");
            }
            Action::WaveDashing => {}
            _ => {
                if grounded {
                    self.dash_left = self.tuning.dash_number;
                }
            }
        }

        if let Action::WallBouncing { direction } = self.action {
            let blocked = probe.dash_blocked(hitbox, direction);
            if blocked.x {
                body.velocity.x = 0.0;
            }
            if blocked.y {
                body.velocity.y = 0.0;
            }
        }

        // Residual momentum of a wave-dash or wall-bounce bleeds off once the
        // boost timer has run out.
        let momentum = matches!(self.action, Action::WaveDashing | Action::WallBouncing { .. });
        if momentum && self.boost_timer() == 0 {
            if self.boost.is_some() {
                body.velocity.x *= BOOST_DECAY;
                if body.velocity.x.abs() < BOOST_SNAP_SPEED {
                    body.velocity.x = 0.0;
                    self.boost = None;
                }
            } else {
                self.action = Action::Free;
            }
        }
    }

    fn start_dash(&mut self, body: &mut KinematicBody, grounded: bool) {
        self.dash_left -= 1;
        let mut direction = self.dir;

        if self.is_grabbing() {
            if self.dir.x > INPUT_DEADZONE {
                self.facing = Facing::Right;
            } else if self.dir.x < -INPUT_DEADZONE {
                self.facing = Facing::Left;
            }
            self.stamina.refill();
            self.neutral_jump_timer = 0;
        }

        // Dashing into the floor becomes a ground dash.
        if grounded && direction.x != 0.0 && direction.y == -1.0 {
            direction.y = 0.0;
        }

        if direction == Vec2::ZERO {
            direction = self.facing.unit();
        }

        body.velocity = direction.normalize_or_zero() * self.tuning.dash_speed;
        self.action = Action::Dashing(Dash {
            direction,
            remaining: self.tuning.dash_duration,
        });
        debug!(
            "Dash started: direction={:?}, dash_left={}",
            direction, self.dash_left
        );
    }

    fn wave_dash(&mut self, body: &mut KinematicBody, dash: Dash) {
        let tuning = &self.tuning;
        let mid = (tuning.dash_duration / 2) as f32;
        let from_mid = (dash.remaining as f32 - mid).abs();
        let elapsed = tuning.dash_duration.saturating_sub(dash.remaining);
        let horizontal = dash.direction.y == 0.0;

        let refund = if horizontal {
            elapsed > 5
        } else {
            from_mid <= 2.0
        };

        let mut speed_x = self.facing.sign() * tuning.wave_dash_factor * tuning.move_speed;
        if horizontal && dash.remaining + 2 < tuning.dash_duration {
            speed_x *= wave_dash_efficiency(from_mid);
        }
        let launch = Vec2::new(speed_x, tuning.jump_force);

        if refund {
            self.dash_left = tuning.dash_number;
        }
        self.action = Action::WaveDashing;
        self.apply_boost(body, WAVE_DASH_BOOST_TICKS, launch, true);
        debug!(
            "Wave-dash: remaining={}, launch={:?}, refund={}",
            dash.remaining, launch, refund
        );
    }

    fn wall_bounce(&mut self, body: &mut KinematicBody, wall: Facing) {
        let away = wall.flipped();
        let launch = self.tuning.dash_speed
            * Vec2::new(away.sign() * WALL_BOUNCE_SPEED.x, WALL_BOUNCE_SPEED.y);

        self.facing = away;
        self.action = Action::WallBouncing {
            direction: launch.signum(),
        };
        self.apply_boost(body, WALL_BOUNCE_BOOST_TICKS, launch, true);
        debug!("Wall-bounce off {:?} wall: launch={:?}", wall, launch);
    }

    fn update_wave_dash(&mut self) {
        if self.action == Action::WaveDashing && self.boost_timer() == 0 {
            self.action = Action::Free;
        }
    }

    fn update_boost(&mut self) {
        match self.boost {
            Some(mut boost) if boost.timer > 0 => {
                boost.timer -= 1;
                self.boost = Some(boost);
            }
            Some(boost) if !boost.keep => self.boost = None,
            _ => {}
        }
    }

    fn update_gravity(&self, body: &mut KinematicBody) {
        body.gravity_scale = if matches!(self.action, Action::Dashing(_)) || self.wall_grabbed() {
            0.0
        } else if self.sliding {
            1.0
        } else {
            self.tuning.gravity_scale
        };
    }

    fn update_velocity(
        &mut self,
        body: &mut KinematicBody,
        input: &TickInput,
        grounded: bool,
        eject_due: bool,
        eject_requested: &mut bool,
    ) {
        let move_speed = self.tuning.move_speed;
        let dir_x = self.dir.x;
        let controlled = !self.is_dashing() && !self.wall_grabbed() && !self.sliding;

        if controlled {
            match self.boost {
                None => {
                    let vx = body.velocity.x;
                    body.velocity.x = if grounded {
                        dir_x * move_speed
                    } else if vx.abs() < move_speed && dir_x != 0.0 {
                        // Air drift toward full speed.
                        let drift = vx + dir_x * move_speed / 8.0;
                        if drift.abs() > move_speed {
                            dir_x * move_speed
                        } else {
                            drift
                        }
                    } else {
                        dir_x * move_speed
                    };
                }
                Some(boost) if boost.timer == 0 => {
                    if grounded {
                        self.boost = None;
                        body.velocity.x = dir_x * move_speed;
                    } else if dir_x != 0.0 {
                        let mut vx = body.velocity.x + dir_x * move_speed / 10.0;
                        if vx.abs() > boost.max_horizontal_speed {
                            vx = dir_x * boost.max_horizontal_speed;
                        }
                        body.velocity.x = vx;

                        if vx.abs() <= move_speed {
                            self.boost = None;
                            body.velocity.x = dir_x * move_speed;
                        }
                    }
                }
                Some(_) => {}
            }
        }

        if input.jump.just_pressed()
            && grounded
            && !self.is_dashing()
            && !self.wall_grabbed()
            && !self.sliding
        {
            if eject_due {
                *eject_requested = true;
            } else {
                body.velocity.y = self.tuning.jump_force;
                self.dash_left = self.tuning.dash_number;
            }
        }

        body.velocity.y = body.velocity.y.max(-self.tuning.max_vertical_speed);
    }

    fn boost_timer(&self) -> u32 {
        self.boost.map_or(0, |b| b.timer)
    }
}

/// Horizontal speed kept by a ground wave-dash cancelled `from_mid` ticks
/// away from the middle of the dash.
pub fn wave_dash_efficiency(from_mid: f32) -> f32 {
    (0.6 + 0.4 / 3.0 * (5.0 - from_mid).max(0.0)).min(1.0)
}
