//! Movement domain: engine-independent locomotion rules.
//!
//! Everything here works against [`PhysicsBody`] and [`SoundSink`], so the
//! rules run the same under avian2d and under the plain test body.

use bevy::prelude::*;

use crate::audio::{SoundKind, SoundSink};
use crate::movement::{
    ContinuationAction, GroundProbe, LocomotionTuning, PlayerInput, PlayerLocomotion, Resume,
};
use crate::physics::PhysicsBody;

/// Grounded gravity scale, independent of tuning.
pub const GROUNDED_GRAVITY_SCALE: f32 = 0.3;
/// Below this input magnitude a grounded body brakes.
const BRAKE_INPUT_THRESHOLD: f32 = 0.2;

/// Direction of travel along a surface with the given normal: the normal
/// rotated -90 degrees, so flat ground gives world-right. Degenerate or
/// missing normals give world-right.
pub fn movement_axis(normal: Option<Vec2>) -> Vec2 {
    normal
        .map(|n| Vec2::new(n.y, -n.x).normalize_or(Vec2::X))
        .unwrap_or(Vec2::X)
}

/// Drag and gravity regime for one fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsTier {
    /// Grounded with no input or reversing direction.
    GroundBraking,
    GroundFree,
    Hooked,
    Falling,
    /// Ascending with jump released.
    ShortHop,
    Rising,
}

impl PhysicsTier {
    pub fn select(
        grounded: bool,
        airborne_lockout: bool,
        hooked: bool,
        horizontal: f32,
        velocity: Vec2,
        jump_held: bool,
    ) -> Self {
        if grounded {
            let reversing =
                (horizontal > 0.0 && velocity.x < 0.0) || (horizontal < 0.0 && velocity.x > 0.0);
            if !airborne_lockout && (horizontal.abs() < BRAKE_INPUT_THRESHOLD || reversing) {
                PhysicsTier::GroundBraking
            } else {
                PhysicsTier::GroundFree
            }
        } else if hooked {
            PhysicsTier::Hooked
        } else if velocity.y < 0.0 {
            PhysicsTier::Falling
        } else if velocity.y > 0.0 && !jump_held {
            PhysicsTier::ShortHop
        } else {
            PhysicsTier::Rising
        }
    }

    pub fn drag(self, tuning: &LocomotionTuning) -> f32 {
        match self {
            PhysicsTier::GroundBraking => tuning.linear_drag * 4.0,
            PhysicsTier::GroundFree => 0.0,
            PhysicsTier::Hooked => tuning.linear_drag * 0.05,
            PhysicsTier::Falling | PhysicsTier::ShortHop | PhysicsTier::Rising => {
                tuning.linear_drag * 0.15
            }
        }
    }

    pub fn gravity_scale(self, tuning: &LocomotionTuning) -> f32 {
        match self {
            PhysicsTier::GroundBraking | PhysicsTier::GroundFree => GROUNDED_GRAVITY_SCALE,
            PhysicsTier::Hooked | PhysicsTier::Rising => tuning.gravity,
            PhysicsTier::Falling => tuning.gravity * tuning.fall_multiplier,
            PhysicsTier::ShortHop => tuning.gravity * (tuning.fall_multiplier / 2.0),
        }
    }
}

impl PlayerLocomotion {
    /// Apply one ground probe result. The landing edge squashes and plays
    /// the landing cue.
    pub fn update_ground(
        &mut self,
        probe: GroundProbe,
        now: f32,
        position: Vec2,
        tuning: &LocomotionTuning,
        sounds: &mut impl SoundSink,
    ) {
        self.was_grounded = self.grounded;
        self.grounded = probe.grounded;
        self.movement_axis = if probe.grounded {
            movement_axis(probe.normal)
        } else {
            Vec2::X
        };

        if !self.was_grounded && self.grounded {
            debug!("[MOVE] Landed at ({:.2}, {:.2})", position.x, position.y);
            self.squash(now, tuning);
            sounds.play_at(SoundKind::Landing, position);
        }
    }

    /// Buffer a jump press.
    pub fn press_jump(&mut self, now: f32, tuning: &LocomotionTuning) {
        self.jump_deadline = Some(now + tuning.jump_delay);
    }

    /// Run due continuations against the current ground state.
    pub fn run_continuations(&mut self, now: f32) {
        for action in self.continuations.poll(now, self.grounded) {
            match action {
                ContinuationAction::RestoreScale => self.target_scale = Vec2::ONE,
                ContinuationAction::EndAirborneLockout => self.airborne_lockout = false,
            }
        }
    }

    /// One fixed tick: movement force, buffered jump, then drag/gravity tier.
    pub fn fixed_step(
        &mut self,
        body: &mut impl PhysicsBody,
        input: &PlayerInput,
        now: f32,
        tuning: &LocomotionTuning,
        sounds: &mut impl SoundSink,
    ) {
        self.move_character(body, input.horizontal, tuning);

        if self.jump_deadline.is_some_and(|deadline| deadline > now) && self.grounded {
            self.jump(body, now, tuning, sounds);
        }

        self.modify_physics(body, input, tuning);
    }

    fn move_character(
        &mut self,
        body: &mut impl PhysicsBody,
        horizontal: f32,
        tuning: &LocomotionTuning,
    ) {
        body.apply_force(self.movement_axis * horizontal * tuning.move_speed);

        if horizontal * self.facing.sign() < 0.0 {
            self.facing = self.facing.flipped();
        }

        if !self.hooked {
            let mut velocity = body.velocity();
            velocity.x = velocity.x.clamp(-tuning.max_speed, tuning.max_speed);
            body.set_velocity(velocity);
        }
    }

    fn jump(
        &mut self,
        body: &mut impl PhysicsBody,
        now: f32,
        tuning: &LocomotionTuning,
        sounds: &mut impl SoundSink,
    ) {
        sounds.play_at(SoundKind::Jump, body.position());

        let velocity = body.velocity();
        body.set_velocity(Vec2::new(velocity.x, 0.0));
        body.apply_impulse(Vec2::Y * tuning.jump_speed);
        self.jump_deadline = None;

        self.squash(now, tuning);
        self.start_airborne_lockout();
        debug!("[MOVE] Jump");
    }

    /// Select and apply the drag/gravity tier for this tick.
    pub fn modify_physics(
        &self,
        body: &mut impl PhysicsBody,
        input: &PlayerInput,
        tuning: &LocomotionTuning,
    ) -> PhysicsTier {
        let tier = PhysicsTier::select(
            self.grounded,
            self.airborne_lockout,
            self.hooked,
            input.horizontal,
            body.velocity(),
            input.jump_held,
        );
        body.set_drag(tier.drag(tuning));
        body.set_gravity_scale(tier.gravity_scale(tuning));
        tier
    }

    /// Fling the body along `direction` (world-up when degenerate).
    pub fn launch(
        &mut self,
        body: &mut impl PhysicsBody,
        direction: Vec2,
        now: f32,
        tuning: &LocomotionTuning,
    ) {
        body.apply_impulse(direction.normalize_or(Vec2::Y) * tuning.launch_impulse);
        self.squash(now, tuning);
        self.start_airborne_lockout();
    }

    /// Start a squash/stretch that eases back after `squash_duration`.
    pub fn squash(&mut self, now: f32, tuning: &LocomotionTuning) {
        self.target_scale = tuning.squash_scale();
        self.continuations.schedule(
            Resume::AtTime(now + tuning.squash_duration),
            ContinuationAction::RestoreScale,
        );
    }

    fn start_airborne_lockout(&mut self) {
        self.airborne_lockout = true;
        self.continuations
            .schedule(Resume::WhenAirborne, ContinuationAction::EndAirborneLockout);
    }
}
