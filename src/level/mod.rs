//! Level domain: the demo level hosting the player and hook.

mod components;
mod reset;
mod spawn;


pub use components::{FinishLine, SpawnPoint, Spinner};
pub use reset::{ResetTargets, reset_to_spawn};
pub use spawn::PLAYER_SPAWN;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::level::reset::reset_on_cancel;
use crate::level::spawn::spawn_level;
use crate::{FixedSet, FrameSet};

/// Keep spinners at their configured rate.
fn drive_spinners(mut spinners: Query<(&Spinner, &mut AngularVelocity)>) {
    for (spinner, mut angular_velocity) in &mut spinners {
        let target = spinner.angular_velocity();
        if angular_velocity.0 != target {
            angular_velocity.0 = target;
        }
    }
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_level)
            .add_systems(Update, reset_on_cancel.in_set(FrameSet::Probe))
            .add_systems(FixedUpdate, drive_spinners.in_set(FixedSet::Locomotion));
    }
}
