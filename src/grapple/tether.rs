//! Grapple domain: elastic tether spring and the taut-rope leash.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::physics::PhysicsBody;

/// Damped spring parameters in frequency form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetherSpring {
    pub frequency: f32,
    pub damping_ratio: f32,
}

impl TetherSpring {
    /// Stiffness `m (2 pi f)^2`.
    pub fn stiffness(&self, mass: f32) -> f32 {
        let omega = TAU * self.frequency;
        mass * omega * omega
    }

    /// Damping `2 zeta m (2 pi f)`.
    pub fn damping(&self, mass: f32) -> f32 {
        2.0 * self.damping_ratio * mass * TAU * self.frequency
    }

    /// Force on a body at `position` moving at `velocity`, tethered to
    /// `anchor` (moving at `anchor_velocity`) with the given rest length.
    /// Pushes as well as pulls. Zero when the two points coincide.
    pub fn force(
        &self,
        mass: f32,
        position: Vec2,
        velocity: Vec2,
        anchor: Vec2,
        anchor_velocity: Vec2,
        rest_length: f32,
    ) -> Vec2 {
        let delta = position - anchor;
        let distance = delta.length();
        let Some(direction) = delta.try_normalize() else {
            return Vec2::ZERO;
        };

        let stretch = distance - rest_length;
        let closing_speed = (velocity - anchor_velocity).dot(direction);
        -(self.stiffness(mass) * stretch + self.damping(mass) * closing_speed) * direction
    }
}

/// Remove the separating velocity between two bodies along their axis,
/// shared by inverse mass. Returns false when nothing changed.
pub fn apply_leash(a: &mut impl PhysicsBody, b: &mut impl PhysicsBody) -> bool {
    let Some(axis) = (b.position() - a.position()).try_normalize() else {
        return false;
    };

    let separating = (b.velocity() - a.velocity()).dot(axis);
    if separating <= 0.0 {
        return false;
    }

    let inv_a = a.effective_inverse_mass();
    let inv_b = b.effective_inverse_mass();
    let total = inv_a + inv_b;
    if total <= 0.0 {
        return false;
    }

    let impulse = separating / total;
    a.set_velocity(a.velocity() + axis * impulse * inv_a);
    b.set_velocity(b.velocity() - axis * impulse * inv_b);
    true
}
