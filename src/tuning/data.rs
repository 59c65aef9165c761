//! Tuning domain: the on-disk shape of every tuning value.

use serde::{Deserialize, Serialize};

use crate::audio::SoundTable;
use crate::grapple::GrappleTuning;
use crate::movement::LocomotionTuning;
use crate::rope::RopeTuning;

/// Root of `tuning.ron`. Missing sections keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameTuning {
    pub locomotion: LocomotionTuning,
    pub grapple: GrappleTuning,
    pub rope: RopeTuning,
    pub sounds: SoundTable,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            locomotion: LocomotionTuning::default(),
            grapple: GrappleTuning::default(),
            rope: RopeTuning::default(),
            sounds: SoundTable::default_entries(),
        }
    }
}
