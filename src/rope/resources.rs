//! Rope domain: tuning values for the Verlet chain.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RopeTuning {
    /// Rest length of one segment, world units.
    pub segment_length: f32,
    /// Node capacity. Reaching `max_segments - 1` active nodes means taut.
    pub max_segments: usize,
    pub min_segments: usize,
    /// Acceleration applied to free nodes, independent of body gravity.
    pub gravity: [f32; 2],
    pub iterations: usize,
}

impl Default for RopeTuning {
    fn default() -> Self {
        Self {
            segment_length: 0.25,
            max_segments: 35,
            min_segments: 15,
            gravity: [0.0, -25.0],
            iterations: 25,
        }
    }
}

impl RopeTuning {
    pub fn gravity(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }

    /// Longest anchor separation the rope can represent before going taut.
    pub fn max_length(&self) -> f32 {
        self.max_segments.saturating_sub(1) as f32 * self.segment_length
    }
}
