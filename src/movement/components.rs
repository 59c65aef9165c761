//! Movement domain: player components and locomotion state.

use bevy::prelude::*;

use crate::movement::Continuations;

#[derive(Component, Debug)]
pub struct Player;

/// Visual child of the player. Receives squash/stretch scale and facing flip.
#[derive(Component, Debug)]
pub struct CharacterHolder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Outcome of one ground probe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundProbe {
    pub grounded: bool,
    /// Surface normal under the body origin, when the down ray hit.
    pub normal: Option<Vec2>,
}

impl GroundProbe {
    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn flat() -> Self {
        Self {
            grounded: true,
            normal: Some(Vec2::Y),
        }
    }

    pub fn on_normal(normal: Vec2) -> Self {
        Self {
            grounded: true,
            normal: Some(normal),
        }
    }
}

/// Per-player locomotion state. Mutated by the frame probe, the fixed step
/// and by the grapple (hooked flag, launches).
#[derive(Component, Debug, Clone)]
pub struct PlayerLocomotion {
    pub grounded: bool,
    pub was_grounded: bool,
    /// Unit vector along the ground, pointing right on flat ground.
    pub movement_axis: Vec2,
    pub facing: Facing,
    /// Absolute time after which a buffered jump is dropped.
    pub jump_deadline: Option<f32>,
    /// Suppresses the grounded braking tier until the body leaves the ground.
    pub airborne_lockout: bool,
    pub hooked: bool,
    /// Squash/stretch scale the visual child eases toward.
    pub target_scale: Vec2,
    pub continuations: Continuations,
}

impl Default for PlayerLocomotion {
    fn default() -> Self {
        Self {
            grounded: false,
            was_grounded: false,
            movement_axis: Vec2::X,
            facing: Facing::Right,
            jump_deadline: None,
            airborne_lockout: false,
            hooked: false,
            target_scale: Vec2::ONE,
            continuations: Continuations::default(),
        }
    }
}
