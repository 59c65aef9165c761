//! Grapple domain: the hook state machine.
//!
//! The controller owns no bodies. Each call receives a [`GrappleRig`] with the
//! player's locomotion state, both bodies and a sound sink, so the same rules
//! run against avian2d components in the app and against
//! [`SimBody`](crate::physics::SimBody) in tests.

use bevy::prelude::*;

use crate::audio::{SoundKind, SoundSink};
use crate::grapple::{GrappleTuning, TetherSpring};
use crate::movement::{LocomotionTuning, PlayerLocomotion};
use crate::physics::PhysicsBody;
use crate::rope::RopeStep;

/// Added to the player-to-hook angle when the hook grips, degrees.
pub const HIT_ROTATION_OFFSET_DEGREES: f32 = 60.0 - 90.0;

/// World placement of a surface the hook can grip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    pub position: Vec2,
    /// Radians, counter-clockwise.
    pub rotation: f32,
}

impl SurfaceFrame {
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.rotation).rotate(local)
    }

    pub fn to_local(&self, world: Vec2) -> Vec2 {
        Vec2::from_angle(-self.rotation).rotate(world - self.position)
    }
}

/// A surface currently touching the hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub surface: Entity,
    pub frame: SurfaceFrame,
}

/// Where an anchored hook sits, in the gripped surface's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub surface: Entity,
    pub local_offset: Vec2,
    pub local_rotation: f32,
    /// Tether rest length. Only ever shrinks while anchored.
    pub rest_length: f32,
    /// Hook velocity inherited from the surface on the last follow.
    pub motion: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrappleState {
    #[default]
    OnCharacter,
    FreeFlying,
    Anchored(Anchor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetherShade {
    Hooked,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTint {
    Ready,
    Blocked,
}

/// Collaborators for one controller call.
pub struct GrappleRig<'a, B: PhysicsBody, S: SoundSink> {
    pub player: &'a mut PlayerLocomotion,
    pub player_body: &'a mut B,
    pub hook_body: &'a mut B,
    pub sounds: &'a mut S,
}

#[derive(Component, Debug, Clone, Default)]
pub struct GrappleController {
    pub state: GrappleState,
    /// Whether a contact should anchor the hook.
    pub grip: bool,
    /// Cleared on throw, set again once back on the character and grounded.
    pub can_throw: bool,
}

impl GrappleController {
    pub fn is_on_character(&self) -> bool {
        self.state == GrappleState::OnCharacter
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        match &self.state {
            GrappleState::Anchored(anchor) => Some(anchor),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fire button: throw from the character, otherwise toggle grip.
    /// `contact` is the first surface currently touching the hook.
    pub fn fire<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        target: Vec2,
        contact: Option<Contact>,
        tuning: &GrappleTuning,
    ) {
        if self.is_on_character() {
            if self.can_throw {
                self.throw(rig, target, tuning);
            }
            return;
        }
        self.toggle_grip(rig, contact);
    }

    fn throw<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        target: Vec2,
        tuning: &GrappleTuning,
    ) {
        rig.sounds.play_at(SoundKind::Throw, rig.hook_body.position());

        self.grip = true;
        self.can_throw = false;
        self.state = GrappleState::FreeFlying;

        let origin = rig.player_body.position();
        rig.hook_body.set_kinematic(false);
        rig.hook_body.set_velocity(rig.player_body.velocity());
        rig.hook_body.apply_impulse((target - origin) * tuning.throw_speed);

        info!("[GRAPPLE] Thrown toward ({:.2}, {:.2})", target.x, target.y);
    }

    /// Flip grip. Off releases an anchored hook; on grips `contact` at once.
    pub fn toggle_grip<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        contact: Option<Contact>,
    ) {
        self.grip = !self.grip;

        if !self.grip {
            self.unhook(rig);
        } else if let Some(contact) = contact {
            self.on_contact(rig, contact);
        }
    }

    /// Anchor to a touched surface if flying with grip on. Returns whether
    /// the hook anchored.
    pub fn on_contact<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        contact: Contact,
    ) -> bool {
        if !self.grip || self.state != GrappleState::FreeFlying {
            return false;
        }

        let hook = rig.hook_body.position();
        let player = rig.player_body.position();

        rig.hook_body.set_kinematic(true);
        rig.hook_body.set_rotation_locked(true);
        rig.hook_body.set_velocity(Vec2::ZERO);

        let away = (hook - player).normalize_or_zero();
        let rotation = away.to_angle() + HIT_ROTATION_OFFSET_DEGREES.to_radians();
        rig.hook_body.set_rotation(rotation);

        let rest_length = hook.distance(player);
        self.state = GrappleState::Anchored(Anchor {
            surface: contact.surface,
            local_offset: contact.frame.to_local(hook),
            local_rotation: rotation - contact.frame.rotation,
            rest_length,
            motion: Vec2::ZERO,
        });
        rig.player.hooked = true;

        rig.sounds.play_at(SoundKind::Hit, hook);
        info!(
            "[GRAPPLE] Anchored to {:?}, tether {:.2}",
            contact.surface, rest_length
        );
        true
    }

    /// Release the hook into free flight and drop the tether.
    pub fn unhook<B: PhysicsBody, S: SoundSink>(&mut self, rig: &mut GrappleRig<'_, B, S>) {
        rig.hook_body.set_kinematic(false);
        rig.hook_body.set_rotation_locked(false);
        rig.player.hooked = false;

        if let GrappleState::Anchored(anchor) = self.state {
            info!("[GRAPPLE] Unhooked from {:?}", anchor.surface);
            self.state = GrappleState::FreeFlying;
        }
    }

    /// The gripped surface no longer exists.
    pub fn release_detached<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
    ) {
        warn!("[GRAPPLE] Anchor surface vanished, releasing");
        self.grip = false;
        self.unhook(rig);
    }

    /// Snap back onto the character when close and not gripping. Returns
    /// whether the hook re-homed.
    pub fn back_to_character<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        tuning: &GrappleTuning,
    ) -> bool {
        if self.grip || self.is_on_character() {
            return false;
        }

        let distance = rig.hook_body.position().distance(rig.player_body.position());
        if distance >= tuning.hook_distance_check {
            return false;
        }

        rig.hook_body.set_rotation_locked(true);
        rig.hook_body.set_velocity(Vec2::ZERO);
        rig.hook_body.set_kinematic(true);
        rig.hook_body.set_rotation(tuning.rest_rotation_degrees.to_radians());
        self.state = GrappleState::OnCharacter;

        info!("[GRAPPLE] Hook back on character");
        true
    }

    /// Keep a resting hook on the character.
    pub fn follow_character<B: PhysicsBody, S: SoundSink>(&self, rig: &mut GrappleRig<'_, B, S>) {
        if self.is_on_character() {
            rig.hook_body.set_position(rig.player_body.position());
        }
    }

    pub fn update_can_throw(&mut self, grounded: bool) {
        if !self.can_throw && self.is_on_character() && grounded {
            self.can_throw = true;
        }
    }

    /// Move an anchored hook with its surface.
    pub fn follow_attachment(
        &mut self,
        hook_body: &mut impl PhysicsBody,
        frame: SurfaceFrame,
        dt: f32,
    ) {
        let GrappleState::Anchored(anchor) = &mut self.state else {
            return;
        };

        let target = frame.to_world(anchor.local_offset);
        anchor.motion = if dt > 0.0 {
            (target - hook_body.position()) / dt
        } else {
            Vec2::ZERO
        };
        hook_body.set_position(target);
        hook_body.set_rotation(frame.rotation + anchor.local_rotation);
    }

    /// Velocity the hook is moving at, including surface motion while
    /// anchored.
    pub fn hook_velocity(&self, hook_body: &impl PhysicsBody) -> Vec2 {
        match &self.state {
            GrappleState::Anchored(anchor) => anchor.motion,
            _ => hook_body.velocity(),
        }
    }

    /// Tether spring force on the player while anchored.
    pub fn tether_force(
        &self,
        player_body: &impl PhysicsBody,
        hook_position: Vec2,
        tuning: &GrappleTuning,
    ) -> Option<Vec2> {
        let anchor = self.anchor()?;
        let spring = TetherSpring {
            frequency: tuning.tether_frequency,
            damping_ratio: tuning.tether_damping_ratio,
        };
        Some(spring.force(
            player_body.mass(),
            player_body.position(),
            player_body.velocity(),
            hook_position,
            anchor.motion,
            anchor.rest_length,
        ))
    }

    /// Apply the tether spring to the player.
    pub fn apply_tether<B: PhysicsBody, S: SoundSink>(
        &self,
        rig: &mut GrappleRig<'_, B, S>,
        tuning: &GrappleTuning,
    ) {
        let hook_position = rig.hook_body.position();
        if let Some(force) = self.tether_force(&*rig.player_body, hook_position, tuning) {
            rig.player_body.apply_force(force);
        }
    }

    /// Held rewind: reel a loose hook in, or shorten an anchored tether.
    pub fn rewind<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        dt: f32,
        tuning: &GrappleTuning,
    ) {
        let grip = self.grip;
        match &mut self.state {
            GrappleState::FreeFlying if !grip => {
                let toward_player =
                    (rig.player_body.position() - rig.hook_body.position()).normalize_or_zero();
                rig.hook_body.apply_impulse(toward_player * tuning.rewind_speed * 0.5);
            }
            GrappleState::Anchored(anchor) if grip => {
                let floor = tuning.min_tether_length();
                if anchor.rest_length > floor {
                    anchor.rest_length = (anchor.rest_length - tuning.rewind_speed * dt).max(floor);
                }
            }
            _ => {}
        }
    }

    /// Consume a rope step. A taut rope with grip on and a moving hook
    /// launches the player along the hook's velocity and lets go. Returns
    /// whether the player was launched.
    pub fn on_rope_step<B: PhysicsBody, S: SoundSink>(
        &mut self,
        rig: &mut GrappleRig<'_, B, S>,
        step: RopeStep,
        now: f32,
        tuning: &GrappleTuning,
        locomotion: &LocomotionTuning,
    ) -> bool {
        if !step.taut || !self.grip {
            return false;
        }

        let velocity = self.hook_velocity(&*rig.hook_body);
        if velocity.length() <= tuning.snap_speed_threshold {
            return false;
        }

        rig.player.launch(&mut *rig.player_body, velocity, now, locomotion);
        rig.hook_body.set_velocity(Vec2::ZERO);
        if let GrappleState::Anchored(anchor) = &mut self.state {
            anchor.motion = Vec2::ZERO;
        }
        self.toggle_grip(rig, None);

        info!(
            "[GRAPPLE] Rope snapped taut, launching along ({:.2}, {:.2})",
            velocity.x, velocity.y
        );
        true
    }

    pub fn tether_shade(&self) -> TetherShade {
        match self.state {
            GrappleState::Anchored(_) => TetherShade::Hooked,
            _ => TetherShade::Off,
        }
    }

    pub fn hook_tint(&self) -> HookTint {
        if !self.can_throw && self.is_on_character() {
            HookTint::Blocked
        } else {
            HookTint::Ready
        }
    }
}

impl TetherShade {
    pub fn color(self, tuning: &GrappleTuning) -> Color {
        let [r, g, b] = match self {
            TetherShade::Hooked => tuning.hooked_color,
            TetherShade::Off => tuning.off_color,
        };
        Color::srgb(r, g, b)
    }
}

impl HookTint {
    pub fn color(self, tuning: &GrappleTuning) -> Color {
        let [r, g, b] = match self {
            HookTint::Ready => tuning.ready_color,
            HookTint::Blocked => tuning.blocked_color,
        };
        Color::srgb(r, g, b)
    }
}
