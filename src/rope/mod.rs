//! Rope domain: Verlet rope chain and its fixed-tick driver.

mod chain;
mod resources;
mod systems;


pub use chain::{RopeChain, RopeNode, RopeStep};
pub use resources::RopeTuning;

use bevy::prelude::*;

use crate::FixedSet;
use crate::rope::systems::advance_ropes;

/// A rope running from `start`'s position to the carrying entity's position.
#[derive(Component, Debug, Clone)]
pub struct Rope {
    pub chain: RopeChain,
    pub start: Entity,
}

impl Rope {
    pub fn new(tuning: &RopeTuning, start: Entity, origin: Vec2) -> Self {
        Self {
            chain: RopeChain::new(tuning, origin),
            start,
        }
    }
}

pub struct RopePlugin;

impl Plugin for RopePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RopeTuning>()
            .add_systems(FixedUpdate, advance_ropes.in_set(FixedSet::Rope));
    }
}
