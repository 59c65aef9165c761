//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::update_ground_state;
pub(crate) use input::read_input;
pub(crate) use movement::{animate_character_holder, apply_locomotion};
