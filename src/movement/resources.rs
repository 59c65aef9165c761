//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocomotionTuning {
    /// Force per unit of horizontal input.
    pub move_speed: f32,
    /// Horizontal speed clamp while not hooked.
    pub max_speed: f32,
    /// Upward jump impulse.
    pub jump_speed: f32,
    /// How long a jump press stays buffered, seconds.
    pub jump_delay: f32,
    pub linear_drag: f32,
    /// Base airborne gravity scale.
    pub gravity: f32,
    pub fall_multiplier: f32,
    /// Ground probe box center, relative to the body origin.
    pub collider_offset: [f32; 2],
    /// Ground probe box size.
    pub collider_box: [f32; 2],
    /// Impulse magnitude of a grapple launch.
    pub launch_impulse: f32,
    pub squash_duration: f32,
    pub squash_scale: [f32; 2],
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            max_speed: 7.0,
            jump_speed: 8.0,
            jump_delay: 0.25,
            linear_drag: 4.0,
            gravity: 1.7,
            fall_multiplier: 5.0,
            collider_offset: [0.0, -0.5],
            collider_box: [0.45, 0.1],
            launch_impulse: 15.0,
            squash_duration: 0.1,
            squash_scale: [0.9, 1.1],
        }
    }
}

impl LocomotionTuning {
    pub fn collider_offset(&self) -> Vec2 {
        Vec2::from(self.collider_offset)
    }

    pub fn collider_box(&self) -> Vec2 {
        Vec2::from(self.collider_box)
    }

    /// Length of the downward normal ray from the body origin.
    pub fn ground_ray_length(&self) -> f32 {
        -self.collider_offset[1] + 2.0 * self.collider_box[1]
    }

    pub fn squash_scale(&self) -> Vec2 {
        Vec2::from(self.squash_scale)
    }
}

/// Resolved input for one frame. Edge flags are only true on the frame the
/// button went down.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    /// Throw / grip toggle.
    pub fire_pressed: bool,
    /// Rewind.
    pub rewind_held: bool,
    pub cancel_pressed: bool,
    /// Aim point in world space.
    pub aim: Vec2,
}
