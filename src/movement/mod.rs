//! Movement domain: player locomotion plugin wiring and public exports.

mod components;
mod continuations;
mod locomotion;
mod resources;
pub(crate) mod systems;


pub use components::{CharacterHolder, Facing, GroundProbe, Player, PlayerLocomotion};
pub use continuations::{Continuation, ContinuationAction, Continuations, Resume};
pub use locomotion::{GROUNDED_GRAVITY_SCALE, PhysicsTier, movement_axis};
pub use resources::{LocomotionTuning, PlayerInput};

use bevy::prelude::*;

use crate::movement::systems::{
    animate_character_holder, apply_locomotion, read_input, update_ground_state,
};
use crate::{FixedSet, FrameSet};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTuning>()
            .init_resource::<PlayerInput>()
            .add_systems(Update, update_ground_state.in_set(FrameSet::Probe))
            .add_systems(Update, animate_character_holder.in_set(FrameSet::Render))
            .add_systems(FixedUpdate, apply_locomotion.in_set(FixedSet::Locomotion));
    }
}

/// Maps keyboard and mouse onto [`PlayerInput`].
pub struct DesktopInputPlugin;

impl Plugin for DesktopInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, read_input.in_set(FrameSet::Input));
    }
}
