//! Grapple domain: tuning values for the hook and tether.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GrappleTuning {
    /// Rewind pull strength, and tether shortening per second while anchored.
    pub rewind_speed: f32,
    /// Throw impulse per unit of distance to the aim point.
    pub throw_speed: f32,
    /// Re-home radius. Half of it floors the tether length.
    pub hook_distance_check: f32,
    pub line_width: f32,
    /// Tether spring frequency, Hz.
    pub tether_frequency: f32,
    pub tether_damping_ratio: f32,
    /// Minimum hook speed for a taut rope to yank the player.
    pub snap_speed_threshold: f32,
    /// Hook rotation after re-homing, degrees.
    pub rest_rotation_degrees: f32,
    pub hooked_color: [f32; 3],
    pub off_color: [f32; 3],
    pub ready_color: [f32; 3],
    pub blocked_color: [f32; 3],
}

impl Default for GrappleTuning {
    fn default() -> Self {
        Self {
            rewind_speed: 5.0,
            throw_speed: 0.5,
            hook_distance_check: 1.0,
            line_width: 0.1,
            tether_frequency: 1.0,
            tether_damping_ratio: 0.0,
            snap_speed_threshold: 0.1,
            rest_rotation_degrees: 26.0,
            hooked_color: [0.95, 0.8, 0.3],
            off_color: [0.35, 0.35, 0.4],
            ready_color: [0.05, 0.05, 0.05],
            blocked_color: [0.9, 0.1, 0.1],
        }
    }
}

impl GrappleTuning {
    /// Floor for the tether rest length while rewinding.
    pub fn min_tether_length(&self) -> f32 {
        self.hook_distance_check / 2.0
    }
}
