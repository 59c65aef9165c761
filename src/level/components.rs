//! Level domain: components for the demo level.

use bevy::prelude::*;

/// Kinematic platform turning at a constant rate.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spinner {
    /// Counter-clockwise, degrees per second.
    pub degrees_per_second: f32,
}

impl Spinner {
    pub fn angular_velocity(&self) -> f32 {
        self.degrees_per_second.to_radians()
    }
}

/// Where the player and its hook return to on cancel.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);

/// Sensor that stops the run timer the first time the player touches it.
#[derive(Component, Debug, Clone, Copy)]
pub struct FinishLine;
