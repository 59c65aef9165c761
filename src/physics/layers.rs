//! Physics domain: collision layers.

use avian2d::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, slopes)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// The grappling hook
    Hook,
    /// Sensors only the player sets off
    Trigger,
}

/// Layers for static level geometry the player stands on.
pub fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Hook])
}

pub fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Hook])
}

pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Player,
        [GameLayer::Ground, GameLayer::Wall, GameLayer::Trigger],
    )
}

/// The hook grips level geometry but passes through the player.
pub fn hook_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Hook, [GameLayer::Ground, GameLayer::Wall])
}

pub fn trigger_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Trigger, [GameLayer::Player])
}
