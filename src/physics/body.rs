//! Physics domain: the rigid-body contract the gameplay core drives.

use bevy::prelude::*;

/// Operations the locomotion and grapple logic need from a rigid body.
///
/// The gameplay core never talks to the physics engine directly. Systems wrap
/// engine components in an implementation of this trait (see
/// [`AvianBody`](crate::physics::AvianBody)), and tests use [`SimBody`].
pub trait PhysicsBody {
    fn position(&self) -> Vec2;

    /// Teleport the body. Used for kinematic bodies that follow an anchor.
    fn set_position(&mut self, position: Vec2);

    /// Rotation in radians, counter-clockwise.
    fn set_rotation(&mut self, radians: f32);

    fn velocity(&self) -> Vec2;

    fn set_velocity(&mut self, velocity: Vec2);

    /// Instantaneous change in momentum. No-op on kinematic bodies.
    fn apply_impulse(&mut self, impulse: Vec2);

    /// Force integrated over one fixed step. No-op on kinematic bodies.
    fn apply_force(&mut self, force: Vec2);

    fn is_kinematic(&self) -> bool;

    fn set_kinematic(&mut self, kinematic: bool);

    fn set_rotation_locked(&mut self, locked: bool);

    fn drag(&self) -> f32;

    fn set_drag(&mut self, drag: f32);

    fn gravity_scale(&self) -> f32;

    fn set_gravity_scale(&mut self, scale: f32);

    fn mass(&self) -> f32;

    /// Inverse mass as seen by constraints: zero for kinematic bodies.
    fn effective_inverse_mass(&self) -> f32 {
        if self.is_kinematic() {
            0.0
        } else {
            1.0 / self.mass().max(f32::EPSILON)
        }
    }
}

/// Plain value rigid body with explicit-Euler integration.
///
/// Mirrors the subset of engine behavior the core depends on: impulses and
/// forces scale by inverse mass, kinematic bodies ignore both, drag damps
/// velocity as `v / (1 + drag * dt)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimBody {
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub mass: f32,
    pub kinematic: bool,
    pub rotation_locked: bool,
    pub drag: f32,
    pub gravity_scale: f32,
    /// Step length used to integrate forces.
    pub dt: f32,
}

impl Default for SimBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            mass: 1.0,
            kinematic: false,
            rotation_locked: false,
            drag: 0.0,
            gravity_scale: 1.0,
            dt: 1.0 / 50.0,
        }
    }
}

impl SimBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..default()
        }
    }

    pub fn kinematic_at(position: Vec2) -> Self {
        Self {
            position,
            kinematic: true,
            ..default()
        }
    }

    /// Advance position by one step under `gravity`.
    pub fn integrate(&mut self, gravity: Vec2) {
        if self.kinematic {
            self.position += self.velocity * self.dt;
            return;
        }
        self.velocity += gravity * self.gravity_scale * self.dt;
        self.velocity /= 1.0 + self.drag * self.dt;
        self.position += self.velocity * self.dt;
    }
}

impl PhysicsBody for SimBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.kinematic {
            self.velocity += impulse / self.mass.max(f32::EPSILON);
        }
    }

    fn apply_force(&mut self, force: Vec2) {
        if !self.kinematic {
            self.velocity += force / self.mass.max(f32::EPSILON) * self.dt;
        }
    }

    fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    fn set_rotation_locked(&mut self, locked: bool) {
        self.rotation_locked = locked;
    }

    fn drag(&self) -> f32 {
        self.drag
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn mass(&self) -> f32 {
        self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_scales_by_mass() {
        let mut body = SimBody {
            mass: 2.0,
            ..default()
        };
        body.apply_impulse(Vec2::new(4.0, 0.0));
        assert_eq!(body.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_force_integrates_over_step() {
        let mut body = SimBody {
            dt: 0.5,
            ..default()
        };
        body.apply_force(Vec2::new(0.0, 2.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_kinematic_ignores_impulses_and_forces() {
        let mut body = SimBody::kinematic_at(Vec2::ONE);
        body.apply_impulse(Vec2::X * 10.0);
        body.apply_force(Vec2::Y * 10.0);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.effective_inverse_mass(), 0.0);
    }

    #[test]
    fn test_integrate_applies_scaled_gravity() {
        let mut body = SimBody {
            gravity_scale: 2.0,
            dt: 0.1,
            ..default()
        };
        body.integrate(Vec2::new(0.0, -10.0));
        assert!((body.velocity.y + 2.0).abs() < 1e-5);
        assert!((body.position.y + 0.2).abs() < 1e-5);
    }
}
