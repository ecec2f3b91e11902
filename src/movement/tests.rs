use bevy::math::BVec2;
use bevy::prelude::*;

use crate::movement::{
    Action, ButtonState, CollisionProbe, ControlButton, Facing, Hitbox, InputSampler,
    KinematicBody, MovementMode, MovementTuning, PlatformLink, PlayerController, ProbeLayer,
    SquishDetector, TickInput, TickReport, WallContact, wave_dash_efficiency,
};

const DT: f32 = 1.0 / 50.0;
const GRAVITY: f32 = 9.81;

/// Center of a default-sized player resting on a floor whose top is at y = 0.
const STAND: Vec2 = Vec2::new(0.0, 0.375);
/// Far from any floor in the test worlds.
const AIR: Vec2 = Vec2::new(0.0, 5.0);

/// Level geometry as a flat list of boxes.
#[derive(Default)]
struct BoxWorld {
    solids: Vec<Hitbox>,
    springs: Vec<Hitbox>,
}

impl BoxWorld {
    fn with_floor() -> Self {
        BoxWorld::default().solid(Vec2::new(0.0, -1.0), Vec2::new(64.0, 2.0))
    }

    fn solid(mut self, center: Vec2, size: Vec2) -> Self {
        self.solids.push(Hitbox::from_size(center, size));
        self
    }

    fn spring(mut self, center: Vec2, size: Vec2) -> Self {
        self.springs.push(Hitbox::from_size(center, size));
        self
    }

    fn boxes(&self, layer: ProbeLayer) -> &[Hitbox] {
        match layer {
            ProbeLayer::Solid => &self.solids,
            ProbeLayer::Spring => &self.springs,
        }
    }
}

impl CollisionProbe for BoxWorld {
    fn cast(&self, hitbox: Hitbox, direction: Vec2, distance: f32, layer: ProbeLayer) -> bool {
        let direction = direction.normalize_or_zero();
        self.boxes(layer)
            .iter()
            .any(|other| hitbox.touches(other, direction, distance))
    }

    fn overlaps(&self, hitbox: Hitbox, layer: ProbeLayer) -> bool {
        self.boxes(layer).iter().any(|other| hitbox.overlaps(other))
    }
}

/// Records what the controller asked of the platform.
#[derive(Default)]
struct FakePlatform {
    eject: bool,
    requested: bool,
}

impl PlatformLink for FakePlatform {
    fn eject_player(&self) -> bool {
        self.eject
    }

    fn request_eject(&mut self) {
        self.requested = true;
    }
}

fn controller() -> PlayerController {
    PlayerController::new(MovementTuning::default())
}

fn body_at(position: Vec2) -> KinematicBody {
    KinematicBody {
        position,
        velocity: Vec2::ZERO,
        gravity_scale: 3.0,
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

fn held(axis: Vec2) -> TickInput {
    TickInput {
        axis,
        ..default()
    }
}

fn jump() -> TickInput {
    TickInput {
        jump: ButtonState::Down,
        ..default()
    }
}

fn dash(axis: Vec2) -> TickInput {
    TickInput {
        axis,
        dash: ButtonState::Down,
        ..default()
    }
}

fn grab(state: ButtonState, axis: Vec2) -> TickInput {
    TickInput {
        axis,
        grab: state,
        ..default()
    }
}

fn step(
    controller: &mut PlayerController,
    body: &mut KinematicBody,
    input: TickInput,
    world: &BoxWorld,
) -> TickReport {
    controller.tick(body, input, world, None, false)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

/// Apply gravity and move the body one axis at a time, stopping at solids.
fn integrate(body: &mut KinematicBody, size: Vec2, world: &BoxWorld) {
    body.velocity.y -= GRAVITY * body.gravity_scale * DT;
    let half = size * 0.5;

    body.position.x += body.velocity.x * DT;
    for solid in &world.solids {
        if Hitbox::from_size(body.position, size).overlaps(solid) {
            body.position.x = if body.velocity.x > 0.0 {
                solid.min().x - half.x
            } else {
                solid.max().x + half.x
            };
            body.velocity.x = 0.0;
        }
    }

    body.position.y += body.velocity.y * DT;
    for solid in &world.solids {
        if Hitbox::from_size(body.position, size).overlaps(solid) {
            body.position.y = if body.velocity.y > 0.0 {
                solid.min().y - half.y
            } else {
                solid.max().y + half.y
            };
            body.velocity.y = 0.0;
        }
    }
}

// ============================================================================
// Ground movement and probes
// ============================================================================

#[test]
fn test_walk_sets_horizontal_speed_and_keeps_vertical() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);
    body.velocity.y = -0.25;

    step(&mut controller, &mut body, held(Vec2::X), &world);

    assert_eq!(body.velocity, Vec2::new(7.0, -0.25));
    assert_eq!(controller.facing(), Facing::Right);
    assert_eq!(controller.mode(), MovementMode::Grounded);
    assert_eq!(body.gravity_scale, 3.0);
}

#[test]
fn test_ground_jump_uses_jump_force() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);

    step(&mut controller, &mut body, jump(), &world);

    assert_eq!(body.velocity.y, 14.0);
}

#[test]
fn test_grounded_requires_contact_without_overlap() {
    let world = BoxWorld::with_floor();
    let size = MovementTuning::default().hitbox_size();
    let at = |y: f32| Hitbox::from_size(Vec2::new(0.0, y), size);

    assert!(world.grounded(at(0.375)));
    assert!(world.grounded(at(0.375 + 0.03125)));
    assert!(!world.grounded(at(0.375 + 0.125)));
    // Embedded in the floor.
    assert!(!world.grounded(at(0.25)));
}

#[test]
fn test_floor_sunk_into_is_not_a_wall() {
    let world = BoxWorld::with_floor();
    let size = MovementTuning::default().hitbox_size();
    let sunk = Hitbox::from_size(STAND - Vec2::new(0.0, 0.05), size);

    assert!(world.overlaps(sunk, ProbeLayer::Solid));
    assert!(!world.grounded(sunk));
    assert!(!world.wall_adjacent(sunk, Facing::Left));
    assert!(!world.wall_adjacent(sunk, Facing::Right));
}

#[test]
fn test_jump_while_sunk_into_the_floor_does_not_launch_sideways() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND - Vec2::new(0.0, 0.05));

    step(&mut controller, &mut body, idle(), &world);
    assert_eq!(controller.next_to_wall(), WallContact::None);
    assert_eq!(controller.neutral_jump_timer(), 0);

    step(&mut controller, &mut body, jump(), &world);

    assert_eq!(body.velocity.x, 0.0);
    assert!(controller.boost().is_none());
    assert_eq!(controller.neutral_jump_timer(), 0);
}

#[test]
fn test_airborne_flag_follows_ground_contact() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(AIR);

    step(&mut controller, &mut body, idle(), &world);
    assert!(controller.is_airborne());
    assert_eq!(controller.mode(), MovementMode::Airborne);

    body.position = STAND;
    step(&mut controller, &mut body, idle(), &world);
    assert!(!controller.is_airborne());
}

#[test]
fn test_fall_speed_is_capped() {
    let world = BoxWorld::default();
    let mut controller = controller();
    let mut body = body_at(AIR);
    body.velocity.y = -35.0;

    step(&mut controller, &mut body, idle(), &world);

    assert_eq!(body.velocity.y, -20.0);
}

// ============================================================================
// Walls
// ============================================================================

/// Wall whose right face is at x = -0.5, spanning well above and below `AIR`.
fn left_wall() -> BoxWorld {
    BoxWorld::default().solid(Vec2::new(-1.0, 5.0), Vec2::new(1.0, 20.0))
}

/// Wall whose left face is at x = 0.5.
fn right_wall() -> BoxWorld {
    BoxWorld::default().solid(Vec2::new(1.0, 5.0), Vec2::new(1.0, 20.0))
}

/// Touching the left wall: left face of the player at x = -0.5.
const HUG_LEFT: Vec2 = Vec2::new(-0.25, 5.0);
/// Touching the right wall.
const HUG_RIGHT: Vec2 = Vec2::new(0.25, 5.0);

#[test]
fn test_wall_slide_clamps_fall_speed() {
    let world = left_wall();
    let mut controller = controller();
    controller.set_facing(Facing::Left);
    let mut body = body_at(HUG_LEFT);
    body.velocity.y = -15.0;

    step(&mut controller, &mut body, held(Vec2::NEG_X), &world);

    assert!(controller.sliding_on_wall());
    assert_eq!(body.velocity.y, -10.0);
    assert_eq!(body.gravity_scale, 1.0);
    assert_eq!(controller.mode(), MovementMode::WallSliding);
}

#[test]
fn test_slow_slide_keeps_its_speed() {
    let world = left_wall();
    let mut controller = controller();
    controller.set_facing(Facing::Left);
    let mut body = body_at(HUG_LEFT);
    body.velocity.y = -3.0;

    step(&mut controller, &mut body, held(Vec2::NEG_X), &world);

    assert!(controller.sliding_on_wall());
    assert_eq!(body.velocity.y, -3.0);
}

#[test]
fn test_no_slide_without_pushing_into_wall() {
    let world = left_wall();
    let mut controller = controller();
    controller.set_facing(Facing::Left);
    let mut body = body_at(HUG_LEFT);
    body.velocity.y = -3.0;

    step(&mut controller, &mut body, idle(), &world);

    assert!(!controller.sliding_on_wall());
    assert_eq!(controller.next_to_wall(), WallContact::Left);
    assert_eq!(controller.neutral_jump_timer(), 10);
    assert_eq!(controller.mode(), MovementMode::Airborne);
}

#[test]
fn test_neutral_jump_from_slide_launches_away() {
    let world = left_wall();
    let mut controller = controller();
    controller.set_facing(Facing::Left);
    let mut body = body_at(HUG_LEFT);
    body.velocity.y = -3.0;

    let input = TickInput {
        axis: Vec2::NEG_X,
        jump: ButtonState::Down,
        ..default()
    };
    step(&mut controller, &mut body, input, &world);

    assert_eq!(controller.facing(), Facing::Right);
    assert_close(body.velocity.x, 1.6 * 7.0);
    assert_close(body.velocity.y, 0.9 * 14.0);
    assert!(!controller.sliding_on_wall());
    assert_eq!(controller.neutral_jump_timer(), 0);
    assert_eq!(controller.boost().map(|b| b.timer), Some(9));
    assert_eq!(controller.mode(), MovementMode::Boosted);
}

#[test]
fn test_neutral_jump_window_counts_down_off_the_wall() {
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, idle(), &right_wall());
    assert_eq!(controller.neutral_jump_timer(), 10);

    let open = BoxWorld::default();
    for _ in 0..3 {
        step(&mut controller, &mut body, idle(), &open);
    }
    assert_eq!(controller.neutral_jump_timer(), 7);

    // Landing clears it.
    body.position = STAND;
    step(&mut controller, &mut body, idle(), &BoxWorld::with_floor());
    assert_eq!(controller.neutral_jump_timer(), 0);
}

#[test]
fn test_neutral_jump_boost_expires() {
    let world = left_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_LEFT);

    step(&mut controller, &mut body, jump(), &world);
    assert!(controller.boost().is_some());

    let open = BoxWorld::default();
    for _ in 0..10 {
        step(&mut controller, &mut body, idle(), &open);
    }

    assert!(controller.boost().is_none());
}

// ============================================================================
// Grabbing
// ============================================================================

#[test]
fn test_grab_and_climb_drains_stamina() {
    let world = right_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);
    body.velocity = Vec2::new(2.0, -5.0);

    step(
        &mut controller,
        &mut body,
        grab(ButtonState::Down, Vec2::Y),
        &world,
    );

    assert!(controller.wall_grabbed());
    assert_eq!(body.velocity, Vec2::new(0.0, 4.0));
    assert_eq!(controller.stamina_left(), 179.0);
    assert_eq!(body.gravity_scale, 0.0);
    assert_eq!(controller.mode(), MovementMode::WallGrabbing);
}

#[test]
fn test_hanging_still_costs_nothing() {
    let world = right_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::ZERO), &world);
    step(&mut controller, &mut body, grab(ButtonState::Held, Vec2::ZERO), &world);

    assert!(controller.wall_grabbed());
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(controller.stamina_left(), 180.0);
}

#[test]
fn test_grab_without_wall_waits_for_one() {
    let world = BoxWorld::default();
    let mut controller = controller();
    let mut body = body_at(AIR);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::ZERO), &world);

    assert_eq!(controller.action(), Action::Grabbing { on_wall: false });
    assert!(!controller.wall_grabbed());
    assert_eq!(body.gravity_scale, 3.0);
}

#[test]
fn test_exhausted_stamina_releases_on_the_same_tick() {
    let world = right_wall();
    let tuning = MovementTuning {
        max_stamina: 3.0,
        ..default()
    };
    let mut controller = PlayerController::new(tuning);
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::Y), &world);
    step(&mut controller, &mut body, grab(ButtonState::Held, Vec2::Y), &world);
    assert!(controller.wall_grabbed());

    step(&mut controller, &mut body, grab(ButtonState::Held, Vec2::Y), &world);
    assert_eq!(controller.stamina_left(), 0.0);
    assert!(!controller.is_grabbing());

    // Holding grab does nothing until stamina comes back.
    step(&mut controller, &mut body, grab(ButtonState::Held, Vec2::Y), &world);
    assert!(!controller.is_grabbing());
}

#[test]
fn test_grab_jump_costs_stamina_and_sets_cooldown() {
    let world = right_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::ZERO), &world);
    let input = TickInput {
        grab: ButtonState::Held,
        jump: ButtonState::Down,
        ..default()
    };
    step(&mut controller, &mut body, input, &world);

    assert_close(body.velocity.y, 0.85 * 14.0);
    assert_eq!(controller.grab_cooldown(), 10);
    assert_eq!(controller.stamina_left(), 130.0);
    assert!(!controller.is_grabbing());

    // The cooldown runs down while grab stays held, without regrabbing.
    step(&mut controller, &mut body, grab(ButtonState::Held, Vec2::ZERO), &world);
    assert_eq!(controller.grab_cooldown(), 9);
    assert!(!controller.is_grabbing());

    // Releasing grab clears it.
    step(&mut controller, &mut body, grab(ButtonState::Up, Vec2::ZERO), &world);
    assert_eq!(controller.grab_cooldown(), 0);
}

#[test]
fn test_landing_refills_stamina() {
    let world = right_wall().solid(Vec2::new(0.0, -1.0), Vec2::new(8.0, 2.0));
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::Y), &world);
    assert_eq!(controller.stamina_left(), 179.0);

    body.position = Vec2::new(0.25, 0.375);
    step(&mut controller, &mut body, idle(), &world);
    assert_eq!(controller.stamina_left(), 180.0);
}

// ============================================================================
// Dashing
// ============================================================================

#[test]
fn test_dash_consumes_a_charge_at_dash_speed() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);

    let report = step(&mut controller, &mut body, dash(Vec2::ONE), &world);

    assert_eq!(controller.dash_left(), 0);
    assert_close(body.velocity.length(), 18.0);
    assert_close(body.velocity.x, body.velocity.y);
    assert_eq!(body.gravity_scale, 0.0);
    assert_eq!(report.after_image, Some(STAND));
    assert_eq!(controller.mode(), MovementMode::Dashing);
}

#[test]
fn test_neutral_dash_goes_where_the_player_faces() {
    let world = BoxWorld::default();
    let mut controller = controller();
    controller.set_facing(Facing::Left);
    let mut body = body_at(AIR);

    step(&mut controller, &mut body, dash(Vec2::ZERO), &world);

    assert_eq!(body.velocity, Vec2::new(-18.0, 0.0));
}

#[test]
fn test_down_diagonal_dash_on_ground_runs_flat() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);

    step(&mut controller, &mut body, dash(Vec2::new(1.0, -1.0)), &world);

    assert_eq!(body.velocity, Vec2::new(18.0, 0.0));
}

#[test]
fn test_dash_expires_with_zero_velocity_and_after_images() {
    let world = BoxWorld::default();
    let mut controller = controller();
    let mut body = body_at(AIR);
    let mut images = 0;

    let report = step(&mut controller, &mut body, dash(Vec2::X), &world);
    images += usize::from(report.after_image.is_some());
    for _ in 0..7 {
        let report = step(&mut controller, &mut body, idle(), &world);
        images += usize::from(report.after_image.is_some());
        assert_eq!(body.velocity, Vec2::new(18.0, 0.0));
    }
    assert!(controller.is_dashing());

    step(&mut controller, &mut body, idle(), &world);

    assert_eq!(controller.action(), Action::Free);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(images, 2);
}

#[test]
fn test_dash_without_charges_does_nothing() {
    let world = BoxWorld::default();
    let mut controller = controller();
    let mut body = body_at(AIR);

    step(&mut controller, &mut body, dash(Vec2::X), &world);
    for _ in 0..8 {
        step(&mut controller, &mut body, idle(), &world);
    }
    assert_eq!(controller.action(), Action::Free);

    step(&mut controller, &mut body, dash(Vec2::X), &world);

    assert_eq!(controller.action(), Action::Free);
    assert_eq!(controller.dash_left(), 0);
}

#[test]
fn test_dash_is_blocked_over_a_spring() {
    let world = BoxWorld::with_floor().spring(Vec2::new(0.0, -0.25), Vec2::new(1.0, 0.5));
    let mut controller = controller();
    let mut body = body_at(STAND);

    step(&mut controller, &mut body, dash(Vec2::X), &world);

    assert!(!controller.is_dashing());
    assert_eq!(controller.dash_left(), 1);
}

#[test]
fn test_dash_stops_on_a_blocked_axis() {
    let world = BoxWorld::default().solid(Vec2::new(0.0, 5.9375), Vec2::new(4.0, 1.0));
    let mut controller = controller();
    // Head a sixteenth below the ceiling, inside the dash contact distance.
    let mut body = body_at(Vec2::new(0.0, 5.0));

    step(&mut controller, &mut body, dash(Vec2::ONE), &world);

    assert_eq!(body.velocity.y, 0.0);
    assert!(body.velocity.x > 0.0);
}

#[test]
fn test_dash_cancels_grab_and_refills_stamina() {
    let world = right_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::Y), &world);
    assert_eq!(controller.stamina_left(), 179.0);

    let input = TickInput {
        axis: Vec2::NEG_X,
        grab: ButtonState::Held,
        dash: ButtonState::Down,
        ..default()
    };
    step(&mut controller, &mut body, input, &world);

    assert!(!controller.is_grabbing());
    assert!(controller.is_dashing());
    assert_eq!(controller.facing(), Facing::Left);
    assert_eq!(controller.stamina_left(), 180.0);
    assert_eq!(body.velocity, Vec2::new(-18.0, 0.0));
}

#[test]
fn test_landing_after_dash_restores_charges() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(AIR);

    step(&mut controller, &mut body, dash(Vec2::X), &world);
    for _ in 0..8 {
        step(&mut controller, &mut body, idle(), &world);
    }
    assert_eq!(controller.dash_left(), 0);

    body.position = STAND;
    step(&mut controller, &mut body, idle(), &world);
    assert_eq!(controller.dash_left(), 1);
}

// ============================================================================
// Wave-dash and wall-bounce
// ============================================================================

/// Dash on the ground, wait, then jump on tick `jump_tick` after the dash started.
fn wave_dash_after(axis: Vec2, jump_tick: u32) -> (PlayerController, KinematicBody) {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);

    step(&mut controller, &mut body, dash(axis), &world);
    for _ in 1..jump_tick {
        step(&mut controller, &mut body, idle(), &world);
    }
    step(&mut controller, &mut body, jump(), &world);

    (controller, body)
}

#[test]
fn test_wave_dash_launches_with_jump_force() {
    let (controller, body) = wave_dash_after(Vec2::ONE, 3);

    assert_eq!(controller.action(), Action::WaveDashing);
    assert_eq!(body.velocity, Vec2::new(14.0, 14.0));
    assert_eq!(controller.boost().map(|b| (b.timer, b.keep)), Some((11, true)));
    assert_eq!(controller.mode(), MovementMode::WaveDashing);
}

#[test]
fn test_diagonal_wave_dash_refunds_near_the_middle() {
    // Remaining ticks at the jump are 8 - tick; the middle of the dash is 4.
    for tick in 1..=7 {
        let (controller, _) = wave_dash_after(Vec2::ONE, tick);
        let expected = if (2..=6).contains(&tick) { 1 } else { 0 };
        assert_eq!(controller.dash_left(), expected, "jump on tick {tick}");
    }
}

#[test]
fn test_horizontal_wave_dash_refunds_late() {
    for tick in 1..=7 {
        let (controller, _) = wave_dash_after(Vec2::X, tick);
        let expected = if tick > 5 { 1 } else { 0 };
        assert_eq!(controller.dash_left(), expected, "jump on tick {tick}");
    }
}

#[test]
fn test_horizontal_wave_dash_speed_depends_on_timing() {
    let (_, early) = wave_dash_after(Vec2::X, 1);
    assert_eq!(early.velocity.x, 14.0);

    let (_, middle) = wave_dash_after(Vec2::X, 4);
    assert_close(middle.velocity.x, 14.0);

    let (_, late) = wave_dash_after(Vec2::X, 7);
    assert_close(late.velocity.x, 14.0 * wave_dash_efficiency(3.0));
    assert!(late.velocity.x < 14.0);
}

#[test]
fn test_wave_dash_efficiency_curve() {
    assert_eq!(wave_dash_efficiency(0.0), 1.0);
    assert_close(wave_dash_efficiency(2.0), 1.0);
    assert_close(wave_dash_efficiency(3.0), 0.6 + 0.4 / 3.0 * 2.0);
    assert_close(wave_dash_efficiency(5.0), 0.6);
    assert_close(wave_dash_efficiency(9.0), 0.6);
}

#[test]
fn test_wave_dash_ends_with_its_boost() {
    let world = BoxWorld::with_floor();
    let (mut controller, mut body) = wave_dash_after(Vec2::ONE, 3);

    for _ in 0..11 {
        step(&mut controller, &mut body, idle(), &world);
        assert_eq!(controller.action(), Action::WaveDashing);
    }
    step(&mut controller, &mut body, idle(), &world);

    assert_eq!(controller.action(), Action::Free);
}

/// Airborne with a wall a quarter unit to the left.
fn near_left_wall() -> (BoxWorld, KinematicBody) {
    (left_wall(), body_at(AIR))
}

#[test]
fn test_upward_dash_bounces_off_nearby_wall() {
    let (world, mut body) = near_left_wall();
    let mut controller = controller();

    step(&mut controller, &mut body, dash(Vec2::Y), &world);
    step(&mut controller, &mut body, jump(), &world);

    assert!(controller.is_wall_bouncing());
    assert_eq!(controller.facing(), Facing::Right);
    assert_close(body.velocity.x, 18.0 * 0.53);
    assert_close(body.velocity.y, 18.0 * 1.2);
    assert_eq!(controller.mode(), MovementMode::WallBouncing);
}

#[test]
fn test_wall_bounce_needs_a_straight_up_dash() {
    let (world, mut body) = near_left_wall();
    let mut controller = controller();

    step(&mut controller, &mut body, dash(Vec2::ONE), &world);
    step(&mut controller, &mut body, jump(), &world);

    assert!(controller.is_dashing());
    assert!(!controller.is_wall_bouncing());
}

#[test]
fn test_wall_bounce_momentum_bleeds_off() {
    let (world, mut body) = near_left_wall();
    let mut controller = controller();

    step(&mut controller, &mut body, dash(Vec2::Y), &world);
    step(&mut controller, &mut body, jump(), &world);
    let launch = body.velocity.x;

    let mut ticks = 0;
    while controller.is_wall_bouncing() && ticks < 500 {
        step(&mut controller, &mut body, idle(), &world);
        assert!(body.velocity.x <= launch);
        ticks += 1;
    }

    assert_eq!(controller.action(), Action::Free);
    assert_eq!(body.velocity.x, 0.0);
    assert!(controller.boost().is_none());
}

#[test]
fn test_kept_boost_gives_way_to_air_control() {
    let world = BoxWorld::default();
    let mut controller = controller();
    let mut body = body_at(AIR);
    controller.apply_boost(&mut body, 2, Vec2::new(14.0, 5.0), true);

    for _ in 0..3 {
        step(&mut controller, &mut body, idle(), &world);
    }
    assert_eq!(body.velocity.x, 14.0);

    let mut ticks = 0;
    while controller.boost().is_some() && ticks < 50 {
        step(&mut controller, &mut body, held(Vec2::NEG_X), &world);
        ticks += 1;
    }

    assert!(controller.boost().is_none());
    assert_eq!(body.velocity.x, -7.0);
}

// ============================================================================
// Squish
// ============================================================================

#[test]
fn test_squish_fires_once_per_episode() {
    let mut detector = SquishDetector::new(Vec2::new(0.5, 0.75));
    assert_eq!(detector.limit(), Vec2::new(0.375, 0.625));
    let pressed = BVec2::new(true, false);

    let fired: Vec<bool> = (0..10).map(|_| detector.step(pressed)).collect();
    assert_eq!(fired.iter().filter(|f| **f).count(), 1);
    assert!(fired[6]);
    assert_eq!(detector.offset().x, 0.375);

    // One tick of relief starts a new episode.
    assert!(!detector.step(BVec2::FALSE));
    assert_eq!(detector.offset().x, 0.3125);
    assert!(!detector.step(pressed));
    assert!(detector.step(pressed));
}

#[test]
fn test_squish_recovers_without_pressure() {
    let mut detector = SquishDetector::new(Vec2::new(0.5, 0.75));
    for _ in 0..3 {
        detector.step(BVec2::TRUE);
    }
    assert_eq!(detector.offset(), Vec2::splat(0.1875));

    for _ in 0..5 {
        detector.step(BVec2::FALSE);
    }
    assert_eq!(detector.offset(), Vec2::ZERO);
}

#[test]
fn test_controller_reports_crush_between_closing_walls() {
    // Both walls reach into the player's sides.
    let world = BoxWorld::default()
        .solid(Vec2::new(-0.675, 5.0), Vec2::new(1.15, 10.0))
        .solid(Vec2::new(0.675, 5.0), Vec2::new(1.15, 10.0));
    let mut controller = controller();
    let mut body = body_at(AIR);
    let mut crushed_on = Vec::new();

    for tick in 0..20 {
        body.velocity = Vec2::new(1.0, -1.0);
        let report = step(&mut controller, &mut body, idle(), &world);
        if report.crushed {
            crushed_on.push(tick);
            assert_eq!(body.velocity, Vec2::ZERO);
            assert_eq!(body.gravity_scale, 0.0);
        }
        let squish = controller.squish();
        assert!(squish.offset().cmple(squish.limit()).all());
    }

    assert_eq!(crushed_on, vec![6]);
}

// ============================================================================
// Platforms, resets and death
// ============================================================================

#[test]
fn test_jump_on_ejecting_platform_is_deferred() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);
    let mut platform = FakePlatform {
        eject: true,
        ..default()
    };

    controller.tick(&mut body, jump(), &world, Some(&mut platform), false);

    assert!(platform.requested);
    assert_eq!(body.velocity.y, 0.0);
}

#[test]
fn test_jump_on_resting_platform_is_normal() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);
    let mut platform = FakePlatform::default();

    controller.tick(&mut body, jump(), &world, Some(&mut platform), false);

    assert!(!platform.requested);
    assert_eq!(body.velocity.y, 14.0);
}

#[test]
fn test_grab_jump_on_ejecting_platform_keeps_the_grab() {
    let world = right_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);
    let mut platform = FakePlatform {
        eject: true,
        ..default()
    };

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::ZERO), &world);
    let input = TickInput {
        grab: ButtonState::Held,
        jump: ButtonState::Down,
        ..default()
    };
    controller.tick(&mut body, input, &world, Some(&mut platform), false);

    assert!(platform.requested);
    assert!(controller.wall_grabbed());
    assert_eq!(controller.stamina_left(), 180.0);
}

#[test]
fn test_reset_dash_and_grab() {
    let world = right_wall();
    let mut controller = controller();
    let mut body = body_at(HUG_RIGHT);

    step(&mut controller, &mut body, grab(ButtonState::Down, Vec2::Y), &world);
    controller.release_grab(10);
    step(&mut controller, &mut body, dash(Vec2::X), &BoxWorld::default());
    assert_eq!(controller.dash_left(), 0);

    controller.reset_dash_and_grab();

    assert_eq!(controller.action(), Action::Free);
    assert_eq!(controller.dash_left(), 1);
    assert_eq!(controller.stamina_left(), 180.0);
    assert_eq!(controller.grab_cooldown(), 0);
}

#[test]
fn test_reset_leaves_wave_dash_momentum() {
    let (mut controller, _) = wave_dash_after(Vec2::ONE, 3);

    controller.reset_dash_and_grab();

    assert_eq!(controller.action(), Action::WaveDashing);
}

#[test]
fn test_dead_controller_ignores_input() {
    let world = BoxWorld::with_floor();
    let mut controller = controller();
    let mut body = body_at(STAND);
    body.velocity = Vec2::new(3.0, 2.0);

    let report = controller.tick(&mut body, dash(Vec2::X), &world, None, true);

    assert_eq!(report, TickReport::default());
    assert_eq!(body.velocity, Vec2::new(3.0, 2.0));
    assert_eq!(controller.dash_left(), 1);
    assert!(!controller.is_airborne());
}

// ============================================================================
// Long runs
// ============================================================================

/// Small deterministic generator for scripted input.
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0 >> 16
    }

    fn chance(&mut self, percent: u32) -> bool {
        self.next() % 100 < percent
    }
}

#[test]
fn test_counters_stay_in_range_over_a_long_run() {
    let world = BoxWorld::with_floor()
        .solid(Vec2::new(-6.5, 4.0), Vec2::new(1.0, 10.0))
        .solid(Vec2::new(6.5, 4.0), Vec2::new(1.0, 10.0))
        .solid(Vec2::new(0.0, 9.5), Vec2::new(14.0, 1.0))
        .solid(Vec2::new(2.0, 2.0), Vec2::new(2.0, 0.5));
    let tuning = MovementTuning::default();
    let size = tuning.hitbox_size();
    let mut controller = PlayerController::new(tuning);
    let mut body = body_at(STAND);
    let mut sampler = InputSampler::default();
    let mut rng = Lcg(7);

    for _ in 0..3000 {
        let axis = Vec2::new(
            (rng.next() % 3) as f32 - 1.0,
            (rng.next() % 3) as f32 - 1.0,
        );
        sampler.poll_axis(axis);
        sampler.poll(ControlButton::Jump, rng.chance(20));
        sampler.poll(ControlButton::Dash, rng.chance(8));
        sampler.poll(ControlButton::Grab, rng.chance(40));

        let report = step(&mut controller, &mut body, sampler.resolve(), &world);
        if report.crushed {
            controller.reset_squish();
        }
        integrate(&mut body, size, &world);

        assert!(controller.dash_left() <= controller.dash_number());
        let stamina = controller.stamina_left();
        assert!((0.0..=controller.max_stamina()).contains(&stamina));
        let squish = controller.squish();
        assert!(squish.offset().cmpge(Vec2::ZERO).all());
        assert!(squish.offset().cmple(squish.limit()).all());
        assert!(body.velocity.y >= -20.0 - GRAVITY * 3.0 * DT);
        assert!(body.position.is_finite());
    }
}
