//! Grapple domain: tests for the hook state machine and tether.

use bevy::prelude::*;

use super::{
    Contact, GrappleController, GrappleRig, GrappleState, GrappleTuning,
    HIT_ROTATION_OFFSET_DEGREES, HookContacts, HookTint, SurfaceFrame, TetherShade,
    TetherSpring, apply_leash,
};
use crate::audio::{SoundKind, SoundLog};
use crate::movement::{LocomotionTuning, PlayerLocomotion};
use crate::physics::SimBody;
use crate::rope::RopeStep;

const DT: f32 = 0.02;

struct Fixture {
    controller: GrappleController,
    player: PlayerLocomotion,
    player_body: SimBody,
    hook_body: SimBody,
    sounds: SoundLog,
    tuning: GrappleTuning,
    locomotion: LocomotionTuning,
}

impl Fixture {
    fn new() -> Self {
        Self {
            controller: GrappleController::default(),
            player: PlayerLocomotion::default(),
            player_body: SimBody::at(Vec2::ZERO),
            hook_body: SimBody {
                rotation_locked: true,
                ..SimBody::kinematic_at(Vec2::ZERO)
            },
            sounds: SoundLog::default(),
            tuning: GrappleTuning::default(),
            locomotion: LocomotionTuning::default(),
        }
    }

    /// Fixture with a thrown hook already flying.
    fn thrown(target: Vec2) -> Self {
        let mut fixture = Self::new();
        fixture.controller.update_can_throw(true);
        fixture.with(|controller, rig, tuning| controller.fire(rig, target, None, tuning));
        fixture
    }

    /// Fixture with the hook anchored at `hook` on a surface at `surface`.
    fn anchored(hook: Vec2, surface: SurfaceFrame) -> Self {
        let mut fixture = Self::thrown(hook);
        fixture.hook_body.position = hook;
        let contact = Contact {
            surface: surface_entity(),
            frame: surface,
        };
        let anchored = fixture.with(|controller, rig, _| controller.on_contact(rig, contact));
        assert!(anchored);
        fixture
    }

    fn with<R>(
        &mut self,
        f: impl FnOnce(
            &mut GrappleController,
            &mut GrappleRig<'_, SimBody, SoundLog>,
            &GrappleTuning,
        ) -> R,
    ) -> R {
        let mut rig = GrappleRig {
            player: &mut self.player,
            player_body: &mut self.player_body,
            hook_body: &mut self.hook_body,
            sounds: &mut self.sounds,
        };
        f(&mut self.controller, &mut rig, &self.tuning)
    }

    fn rope_step(&mut self, taut: bool) -> bool {
        let locomotion = self.locomotion.clone();
        self.with(|controller, rig, tuning| {
            controller.on_rope_step(rig, RopeStep { taut }, 0.0, tuning, &locomotion)
        })
    }
}

fn surface_entities<const N: usize>() -> [Entity; N] {
    let mut world = World::new();
    std::array::from_fn(|_| world.spawn_empty().id())
}

fn surface_entity() -> Entity {
    let [surface] = surface_entities();
    surface
}

fn still_frame(position: Vec2) -> SurfaceFrame {
    SurfaceFrame {
        position,
        rotation: 0.0,
    }
}

// -----------------------------------------------------------------------------
// Initial state and throw gating
// -----------------------------------------------------------------------------

#[test]
fn test_initial_state() {
    let controller = GrappleController::default();

    assert_eq!(controller.state, GrappleState::OnCharacter);
    assert!(!controller.grip);
    assert!(!controller.can_throw);
    assert_eq!(controller.hook_tint(), HookTint::Blocked);
    assert_eq!(controller.tether_shade(), TetherShade::Off);
}

#[test]
fn test_can_throw_requires_ground_on_character() {
    let mut controller = GrappleController::default();
    controller.update_can_throw(false);
    assert!(!controller.can_throw);

    controller.update_can_throw(true);
    assert!(controller.can_throw);
    assert_eq!(controller.hook_tint(), HookTint::Ready);
}

#[test]
fn test_fire_without_can_throw_is_noop() {
    let mut fixture = Fixture::new();
    fixture.with(|controller, rig, tuning| {
        controller.fire(rig, Vec2::new(5.0, 5.0), None, tuning)
    });

    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);
    assert!(!fixture.controller.grip);
    assert!(fixture.hook_body.kinematic);
    assert_eq!(fixture.sounds.count(SoundKind::Throw), 0);
}

#[test]
fn test_throw_launches_hook_toward_target() {
    let mut fixture = Fixture::new();
    fixture.player_body.velocity = Vec2::new(1.0, 0.5);
    fixture.controller.update_can_throw(true);

    let target = Vec2::new(4.0, 2.0);
    fixture.with(|controller, rig, tuning| controller.fire(rig, target, None, tuning));

    let expected = Vec2::new(1.0, 0.5) + target * fixture.tuning.throw_speed;
    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
    assert!(fixture.controller.grip);
    assert!(!fixture.controller.can_throw);
    assert!(!fixture.hook_body.kinematic);
    assert!((fixture.hook_body.velocity - expected).length() < 1e-5);
    assert_eq!(fixture.sounds.count(SoundKind::Throw), 1);
}

#[test]
fn test_second_throw_without_landing_is_noop() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));

    // Fire while flying toggles grip rather than throwing again
    fixture.with(|controller, rig, tuning| {
        controller.fire(rig, Vec2::new(-4.0, 0.0), None, tuning)
    });
    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
    assert!(!fixture.controller.can_throw);

    // Back on the character but still airborne
    fixture.hook_body.position = Vec2::new(0.2, 0.0);
    fixture.with(|controller, rig, tuning| controller.back_to_character(rig, tuning));
    fixture.controller.update_can_throw(false);
    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);

    fixture.with(|controller, rig, tuning| {
        controller.fire(rig, Vec2::new(-4.0, 0.0), None, tuning)
    });
    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);
    assert!(!fixture.controller.can_throw);
    assert_eq!(fixture.sounds.count(SoundKind::Throw), 1);
}

// -----------------------------------------------------------------------------
// Anchoring and grip toggle
// -----------------------------------------------------------------------------

#[test]
fn test_contact_with_grip_anchors() {
    let hook = Vec2::new(3.0, 4.0);
    let fixture = Fixture::anchored(hook, still_frame(Vec2::new(3.0, 5.0)));

    let anchor = fixture.controller.anchor().copied().unwrap();
    assert!((anchor.rest_length - 5.0).abs() < 1e-5);
    assert!((anchor.local_offset - Vec2::new(0.0, -1.0)).length() < 1e-5);
    assert!(fixture.hook_body.kinematic);
    assert!(fixture.hook_body.rotation_locked);
    assert_eq!(fixture.hook_body.velocity, Vec2::ZERO);
    assert!(fixture.player.hooked);
    assert_eq!(fixture.sounds.count(SoundKind::Hit), 1);
    assert_eq!(fixture.controller.tether_shade(), TetherShade::Hooked);

    let expected_rotation = hook.to_angle() + HIT_ROTATION_OFFSET_DEGREES.to_radians();
    assert!((fixture.hook_body.rotation - expected_rotation).abs() < 1e-5);
}

#[test]
fn test_contact_without_grip_is_ignored() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.with(|controller, rig, _| controller.toggle_grip(rig, None));

    let contact = Contact {
        surface: surface_entity(),
        frame: still_frame(Vec2::new(2.0, 0.0)),
    };
    let anchored = fixture.with(|controller, rig, _| controller.on_contact(rig, contact));

    assert!(!anchored);
    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
    assert!(!fixture.player.hooked);
}

#[test]
fn test_contact_on_character_is_ignored() {
    let mut fixture = Fixture::new();
    fixture.controller.grip = true;
    let contact = Contact {
        surface: surface_entity(),
        frame: still_frame(Vec2::ZERO),
    };

    let anchored = fixture.with(|controller, rig, _| controller.on_contact(rig, contact));
    assert!(!anchored);
    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);
}

#[test]
fn test_grip_off_unhooks() {
    let mut fixture = Fixture::anchored(Vec2::new(3.0, 0.0), still_frame(Vec2::new(3.5, 0.0)));

    fixture.with(|controller, rig, tuning| controller.fire(rig, Vec2::ZERO, None, tuning));

    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
    assert!(!fixture.controller.grip);
    assert!(!fixture.hook_body.kinematic);
    assert!(!fixture.hook_body.rotation_locked);
    assert!(!fixture.player.hooked);
    assert_eq!(fixture.controller.tether_shade(), TetherShade::Off);
}

#[test]
fn test_grip_on_while_touching_anchors_immediately() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.with(|controller, rig, _| controller.toggle_grip(rig, None));
    fixture.hook_body.position = Vec2::new(2.0, 0.0);

    let mut contacts = HookContacts::default();
    let [first, second] = surface_entities();
    contacts.begin(first);
    contacts.begin(second);
    contacts.begin(first);
    assert_eq!(contacts.len(), 2);

    let contact = contacts.first().map(|surface| Contact {
        surface,
        frame: still_frame(Vec2::new(2.5, 0.0)),
    });
    fixture.with(|controller, rig, tuning| controller.fire(rig, Vec2::ZERO, contact, tuning));

    let anchor = fixture.controller.anchor().copied().unwrap();
    assert_eq!(anchor.surface, first);
    assert!(fixture.controller.grip);
}

#[test]
fn test_hook_contacts_end_removes_surface() {
    let mut contacts = HookContacts::default();
    let [first, second] = surface_entities();
    contacts.begin(first);
    contacts.begin(second);
    contacts.end(first);

    assert_eq!(contacts.first(), Some(second));
    contacts.clear();
    assert!(contacts.is_empty());
}

#[test]
fn test_release_detached_drops_grip() {
    let mut fixture = Fixture::anchored(Vec2::new(3.0, 0.0), still_frame(Vec2::new(3.5, 0.0)));
    fixture.with(|controller, rig, _| controller.release_detached(rig));

    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
    assert!(!fixture.controller.grip);
    assert!(!fixture.player.hooked);
}

// -----------------------------------------------------------------------------
// Re-homing
// -----------------------------------------------------------------------------

#[test]
fn test_back_to_character_when_close_and_not_gripping() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.with(|controller, rig, _| controller.toggle_grip(rig, None));
    fixture.hook_body.position = Vec2::new(0.5, 0.0);
    fixture.hook_body.velocity = Vec2::new(-3.0, 0.0);

    let rehomed = fixture.with(|controller, rig, tuning| controller.back_to_character(rig, tuning));

    assert!(rehomed);
    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);
    assert!(fixture.hook_body.kinematic);
    assert!(fixture.hook_body.rotation_locked);
    assert_eq!(fixture.hook_body.velocity, Vec2::ZERO);
    assert!((fixture.hook_body.rotation - 26.0_f32.to_radians()).abs() < 1e-6);
}

#[test]
fn test_back_to_character_waits_for_grip_off_and_distance() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.hook_body.position = Vec2::new(0.5, 0.0);
    let rehomed = fixture.with(|controller, rig, tuning| controller.back_to_character(rig, tuning));
    assert!(!rehomed);

    fixture.with(|controller, rig, _| controller.toggle_grip(rig, None));
    fixture.hook_body.position = Vec2::new(1.5, 0.0);
    let rehomed = fixture.with(|controller, rig, tuning| controller.back_to_character(rig, tuning));
    assert!(!rehomed);
    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
}

#[test]
fn test_follow_character_only_when_resting() {
    let mut fixture = Fixture::new();
    fixture.player_body.position = Vec2::new(2.0, 1.0);
    fixture.with(|controller, rig, _| controller.follow_character(rig));
    assert_eq!(fixture.hook_body.position, Vec2::new(2.0, 1.0));

    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.hook_body.position = Vec2::new(3.0, 0.0);
    fixture.with(|controller, rig, _| controller.follow_character(rig));
    assert_eq!(fixture.hook_body.position, Vec2::new(3.0, 0.0));
}

// -----------------------------------------------------------------------------
// Rewind
// -----------------------------------------------------------------------------

#[test]
fn test_rewind_pulls_loose_hook_toward_player() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.with(|controller, rig, _| controller.toggle_grip(rig, None));
    fixture.hook_body.position = Vec2::new(0.0, 3.0);
    fixture.hook_body.velocity = Vec2::ZERO;

    fixture.with(|controller, rig, tuning| controller.rewind(rig, DT, tuning));

    let expected = Vec2::NEG_Y * fixture.tuning.rewind_speed * 0.5;
    assert!((fixture.hook_body.velocity - expected).length() < 1e-5);
}

#[test]
fn test_rewind_shortens_tether_to_floor() {
    let mut fixture = Fixture::anchored(Vec2::new(2.0, 0.0), still_frame(Vec2::new(2.5, 0.0)));
    let floor = fixture.tuning.min_tether_length();

    let mut previous = fixture.controller.anchor().unwrap().rest_length;
    for _ in 0..100 {
        fixture.with(|controller, rig, tuning| controller.rewind(rig, DT, tuning));
        let rest = fixture.controller.anchor().unwrap().rest_length;
        assert!(rest <= previous);
        assert!(rest >= floor);
        previous = rest;
    }
    assert_eq!(previous, floor);
}

#[test]
fn test_rewind_never_lengthens_short_tether() {
    let mut fixture = Fixture::anchored(Vec2::new(0.3, 0.0), still_frame(Vec2::new(0.5, 0.0)));
    let before = fixture.controller.anchor().unwrap().rest_length;

    fixture.with(|controller, rig, tuning| controller.rewind(rig, DT, tuning));

    assert_eq!(fixture.controller.anchor().unwrap().rest_length, before);
}

#[test]
fn test_rewind_on_character_is_noop() {
    let mut fixture = Fixture::new();
    fixture.with(|controller, rig, tuning| controller.rewind(rig, DT, tuning));

    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);
    assert_eq!(fixture.hook_body.velocity, Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Snap-taut release
// -----------------------------------------------------------------------------

#[test]
fn test_taut_rope_on_moving_anchor_launches_once() {
    let surface = still_frame(Vec2::new(9.0, 0.0));
    let mut fixture = Fixture::anchored(Vec2::new(8.6, 0.0), surface);

    let moved = still_frame(Vec2::new(9.1, 0.0));
    fixture.controller.follow_attachment(&mut fixture.hook_body, moved, DT);
    let hook_velocity = fixture.controller.hook_velocity(&fixture.hook_body);
    assert!((hook_velocity - Vec2::new(5.0, 0.0)).length() < 1e-3);

    assert!(fixture.rope_step(true));

    let expected = Vec2::X * fixture.locomotion.launch_impulse;
    assert_eq!(fixture.controller.state, GrappleState::FreeFlying);
    assert!(!fixture.controller.grip);
    assert!(!fixture.player.hooked);
    assert!(fixture.player.airborne_lockout);
    assert_eq!(fixture.hook_body.velocity, Vec2::ZERO);
    assert!((fixture.player_body.velocity - expected).length() < 1e-3);

    // The next tick sees grip off and does nothing
    assert!(!fixture.rope_step(true));
    assert!((fixture.player_body.velocity - expected).length() < 1e-3);
}

#[test]
fn test_taut_rope_yanks_flying_hook() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.hook_body.velocity = Vec2::new(3.0, 4.0);
    fixture.player_body.velocity = Vec2::ZERO;

    assert!(fixture.rope_step(true));

    let expected = Vec2::new(0.6, 0.8) * fixture.locomotion.launch_impulse;
    assert!((fixture.player_body.velocity - expected).length() < 1e-3);
    assert_eq!(fixture.hook_body.velocity, Vec2::ZERO);
    assert!(!fixture.controller.grip);
}

#[test]
fn test_taut_rope_with_still_hook_does_not_yank() {
    let mut fixture = Fixture::anchored(Vec2::new(8.6, 0.0), still_frame(Vec2::new(9.0, 0.0)));

    assert!(!fixture.rope_step(true));
    assert!(fixture.controller.anchor().is_some());
    assert_eq!(fixture.player_body.velocity, Vec2::ZERO);
}

#[test]
fn test_slack_rope_never_yanks() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.hook_body.velocity = Vec2::new(10.0, 0.0);

    assert!(!fixture.rope_step(false));
    assert!(fixture.controller.grip);
}

// -----------------------------------------------------------------------------
// Attachment following
// -----------------------------------------------------------------------------

#[test]
fn test_follow_attachment_rotates_with_surface() {
    let surface = still_frame(Vec2::new(2.0, 0.0));
    let mut fixture = Fixture::anchored(Vec2::new(3.0, 0.0), surface);
    let anchored_rotation = fixture.hook_body.rotation;

    let turned = SurfaceFrame {
        position: Vec2::new(2.0, 0.0),
        rotation: std::f32::consts::FRAC_PI_2,
    };
    fixture.controller.follow_attachment(&mut fixture.hook_body, turned, DT);

    assert!((fixture.hook_body.position - Vec2::new(2.0, 1.0)).length() < 1e-5);
    let expected_rotation = anchored_rotation + std::f32::consts::FRAC_PI_2;
    assert!((fixture.hook_body.rotation - expected_rotation).abs() < 1e-5);
}

#[test]
fn test_surface_frame_round_trip() {
    let frame = SurfaceFrame {
        position: Vec2::new(-1.0, 2.0),
        rotation: 0.7,
    };
    let world = Vec2::new(3.0, -4.0);

    assert!((frame.to_world(frame.to_local(world)) - world).length() < 1e-5);
}

// -----------------------------------------------------------------------------
// Tether tests
// -----------------------------------------------------------------------------

#[test]
fn test_spring_coefficients() {
    let spring = TetherSpring {
        frequency: 1.0,
        damping_ratio: 0.5,
    };
    let omega = std::f32::consts::TAU;

    assert!((spring.stiffness(2.0) - 2.0 * omega * omega).abs() < 1e-3);
    assert!((spring.damping(2.0) - 2.0 * 0.5 * 2.0 * omega).abs() < 1e-4);
}

#[test]
fn test_spring_pulls_stretched_and_pushes_compressed() {
    let spring = TetherSpring {
        frequency: 1.0,
        damping_ratio: 0.0,
    };
    let anchor = Vec2::new(0.0, 5.0);

    let pulled = spring.force(1.0, Vec2::ZERO, Vec2::ZERO, anchor, Vec2::ZERO, 3.0);
    assert!(pulled.y > 0.0);
    assert!((pulled.y - spring.stiffness(1.0) * 2.0).abs() < 1e-3);

    let pushed = spring.force(1.0, Vec2::ZERO, Vec2::ZERO, anchor, Vec2::ZERO, 6.0);
    assert!(pushed.y < 0.0);

    let resting = spring.force(1.0, Vec2::ZERO, Vec2::ZERO, anchor, Vec2::ZERO, 5.0);
    assert!(resting.length() < 1e-4);

    let coincident = spring.force(1.0, anchor, Vec2::ZERO, anchor, Vec2::ZERO, 1.0);
    assert_eq!(coincident, Vec2::ZERO);
}

#[test]
fn test_tether_applies_only_while_anchored() {
    let mut fixture = Fixture::thrown(Vec2::new(4.0, 0.0));
    fixture.hook_body.position = Vec2::new(0.0, 4.0);
    fixture.player_body.velocity = Vec2::ZERO;
    fixture.with(|controller, rig, tuning| controller.apply_tether(rig, tuning));
    assert_eq!(fixture.player_body.velocity, Vec2::ZERO);

    let mut fixture = Fixture::anchored(Vec2::new(0.0, 4.0), still_frame(Vec2::new(0.0, 4.5)));
    if let GrappleState::Anchored(anchor) = &mut fixture.controller.state {
        anchor.rest_length = 2.0;
    }
    fixture.with(|controller, rig, tuning| controller.apply_tether(rig, tuning));
    assert!(fixture.player_body.velocity.y > 0.0);
}

#[test]
fn test_leash_removes_separating_velocity() {
    let mut a = SimBody {
        velocity: Vec2::new(-2.0, 0.0),
        ..SimBody::at(Vec2::ZERO)
    };
    let mut b = SimBody {
        velocity: Vec2::new(2.0, 1.0),
        ..SimBody::at(Vec2::new(5.0, 0.0))
    };

    assert!(apply_leash(&mut a, &mut b));

    let separating = (b.velocity - a.velocity).dot(Vec2::X);
    assert!(separating.abs() < 1e-5);
    assert!((a.velocity.x - 0.0).abs() < 1e-5);
    assert!((b.velocity.x - 0.0).abs() < 1e-5);
    assert_eq!(b.velocity.y, 1.0);
}

#[test]
fn test_leash_against_kinematic_moves_only_dynamic() {
    let mut player = SimBody {
        velocity: Vec2::new(-3.0, 0.0),
        ..SimBody::at(Vec2::ZERO)
    };
    let mut hook = SimBody::kinematic_at(Vec2::new(5.0, 0.0));

    assert!(apply_leash(&mut player, &mut hook));
    assert!(player.velocity.length() < 1e-5);
    assert_eq!(hook.velocity, Vec2::ZERO);
}

#[test]
fn test_leash_ignores_closing_bodies() {
    let mut player = SimBody {
        velocity: Vec2::new(3.0, 0.0),
        ..SimBody::at(Vec2::ZERO)
    };
    let mut hook = SimBody::kinematic_at(Vec2::new(5.0, 0.0));

    assert!(!apply_leash(&mut player, &mut hook));
    assert_eq!(player.velocity, Vec2::new(3.0, 0.0));
}

// -----------------------------------------------------------------------------
// Visual feedback
// -----------------------------------------------------------------------------

#[test]
fn test_colors_follow_tuning() {
    let tuning = GrappleTuning::default();
    let [r, g, b] = tuning.blocked_color;

    assert_eq!(HookTint::Blocked.color(&tuning), Color::srgb(r, g, b));
    assert_ne!(
        TetherShade::Hooked.color(&tuning),
        TetherShade::Off.color(&tuning)
    );
}

#[test]
fn test_reset_returns_to_initial_state() {
    let mut fixture = Fixture::anchored(Vec2::new(3.0, 0.0), still_frame(Vec2::new(3.5, 0.0)));
    fixture.controller.reset();

    assert_eq!(fixture.controller.state, GrappleState::OnCharacter);
    assert!(!fixture.controller.grip);
    assert!(!fixture.controller.can_throw);
}
