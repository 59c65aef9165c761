//! Physics domain: avian2d adapter for the body contract.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::PhysicsBody;

/// Query data for every body the gameplay core drives.
pub type BodyData = (
    &'static mut Position,
    &'static mut Rotation,
    &'static mut LinearVelocity,
    &'static mut AngularVelocity,
    &'static mut RigidBody,
    &'static mut LockedAxes,
    &'static mut LinearDamping,
    &'static mut GravityScale,
    &'static ComputedMass,
);

/// [`PhysicsBody`] over the components of one avian2d rigid body.
pub struct AvianBody<'w> {
    position: Mut<'w, Position>,
    rotation: Mut<'w, Rotation>,
    velocity: Mut<'w, LinearVelocity>,
    angular_velocity: Mut<'w, AngularVelocity>,
    body: Mut<'w, RigidBody>,
    locked_axes: Mut<'w, LockedAxes>,
    damping: Mut<'w, LinearDamping>,
    gravity_scale: Mut<'w, GravityScale>,
    mass: f32,
    dt: f32,
}

impl<'w> AvianBody<'w> {
    /// Wrap a [`BodyData`] query item. `dt` is the step used to integrate
    /// forces.
    pub fn new(
        (
            position,
            rotation,
            velocity,
            angular_velocity,
            body,
            locked_axes,
            damping,
            gravity_scale,
            computed_mass,
        ): (
            Mut<'w, Position>,
            Mut<'w, Rotation>,
            Mut<'w, LinearVelocity>,
            Mut<'w, AngularVelocity>,
            Mut<'w, RigidBody>,
            Mut<'w, LockedAxes>,
            Mut<'w, LinearDamping>,
            Mut<'w, GravityScale>,
            &'w ComputedMass,
        ),
        dt: f32,
    ) -> Self {
        // Bodies without collider density report zero inverse mass.
        let inverse = computed_mass.inverse();
        let mass = if inverse.is_finite() && inverse > 0.0 {
            1.0 / inverse
        } else {
            1.0
        };

        Self {
            position,
            rotation,
            velocity,
            angular_velocity,
            body,
            locked_axes,
            damping,
            gravity_scale,
            mass,
            dt,
        }
    }
}

impl PhysicsBody for AvianBody<'_> {
    fn position(&self) -> Vec2 {
        self.position.0
    }

    fn set_position(&mut self, position: Vec2) {
        self.position.0 = position;
    }

    fn set_rotation(&mut self, radians: f32) {
        *self.rotation = Rotation::radians(radians);
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.is_kinematic() {
            self.velocity.0 += impulse / self.mass;
        }
    }

    fn apply_force(&mut self, force: Vec2) {
        if !self.is_kinematic() {
            self.velocity.0 += force / self.mass * self.dt;
        }
    }

    fn is_kinematic(&self) -> bool {
        *self.body == RigidBody::Kinematic
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        let target = if kinematic {
            RigidBody::Kinematic
        } else {
            RigidBody::Dynamic
        };
        if *self.body != target {
            *self.body = target;
        }
    }

    fn set_rotation_locked(&mut self, locked: bool) {
        if locked {
            *self.locked_axes = LockedAxes::ROTATION_LOCKED;
            self.angular_velocity.0 = 0.0;
        } else {
            *self.locked_axes = LockedAxes::new();
        }
    }

    fn drag(&self) -> f32 {
        self.damping.0
    }

    fn set_drag(&mut self, drag: f32) {
        self.damping.0 = drag;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale.0
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale.0 = scale;
    }

    fn mass(&self) -> f32 {
        self.mass
    }
}
