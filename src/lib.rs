//! Movement-and-grapple core of a 2D platformer.
//!
//! Domains:
//! - `physics`: the rigid-body contract and its avian2d adapter
//! - `rope`: Verlet rope between the player and the hook
//! - `grapple`: hook state machine and tether
//! - `movement`: player locomotion, ground probe and input
//! - `audio`: sound cues handed to the host
//! - `tuning`: RON-loaded tuning
//! - `level`: demo level with a rotating platform and a finish line
//! - `hud`: run timer

pub mod audio;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod grapple;
pub mod hud;
pub mod level;
pub mod movement;
pub mod physics;
pub mod rope;
pub mod tuning;

use bevy::prelude::*;
use std::path::PathBuf;

/// Frame-rate work, run in this order each `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Resolve raw input into `PlayerInput`.
    Input,
    /// Ground probe, jump buffering and continuations.
    Probe,
    /// Throw, grip, anchoring and re-homing.
    Grapple,
    /// Render outputs: rope line, hook tint, squash.
    Render,
}

/// Fixed-step work, run in this order each `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSet {
    Locomotion,
    /// Attachment following, tether spring and rewind.
    Tether,
    Rope,
    /// Snap-taut release and the leash.
    Grapple,
}

/// Everything except input sampling, the level, the HUD and physics engine
/// setup, which belong to the host.
pub struct PlatformerCorePlugin {
    pub tuning_path: PathBuf,
}

impl Default for PlatformerCorePlugin {
    fn default() -> Self {
        Self {
            tuning_path: tuning::TuningPlugin::default().path,
        }
    }
}

impl Plugin for PlatformerCorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Probe,
                FrameSet::Grapple,
                FrameSet::Render,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (
                FixedSet::Locomotion,
                FixedSet::Tether,
                FixedSet::Rope,
                FixedSet::Grapple,
            )
                .chain(),
        )
        .add_plugins((
            tuning::TuningPlugin {
                path: self.tuning_path.clone(),
            },
            audio::AudioCuePlugin,
            movement::MovementPlugin,
            rope::RopePlugin,
            grapple::GrapplePlugin,
        ));
    }
}
