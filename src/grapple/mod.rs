//! Grapple domain: hook state machine, tether and their systems.

mod components;
mod controller;
mod resources;
pub(crate) mod systems;
mod tether;

#[cfg(test)]
mod tests;

pub use components::{Hook, HookContacts, RopeLine};
pub use controller::{
    Anchor, Contact, GrappleController, GrappleRig, GrappleState, HIT_ROTATION_OFFSET_DEGREES,
    HookTint, SurfaceFrame, TetherShade,
};
pub use resources::GrappleTuning;
pub use tether::{TetherSpring, apply_leash};

use bevy::prelude::*;

use crate::grapple::systems::{
    apply_tether, consume_rope_step, handle_hook_collisions, refresh_rope_lines, tint_hooks,
    update_grapple,
};
use crate::{FixedSet, FrameSet};

pub struct GrapplePlugin;

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GrappleTuning>()
            .add_systems(
                Update,
                (handle_hook_collisions, update_grapple)
                    .chain()
                    .in_set(FrameSet::Grapple),
            )
            .add_systems(
                Update,
                (refresh_rope_lines, tint_hooks).in_set(FrameSet::Render),
            )
            .add_systems(FixedUpdate, apply_tether.in_set(FixedSet::Tether))
            .add_systems(FixedUpdate, consume_rope_step.in_set(FixedSet::Grapple));
    }
}
