//! Physics domain: body contract, avian2d adapter and collision layers.

mod avian;
mod body;
mod layers;

pub use avian::{AvianBody, BodyData};
pub use body::{PhysicsBody, SimBody};
pub use layers::{
    GameLayer, ground_layers, hook_layers, player_layers, trigger_layers, wall_layers,
};
