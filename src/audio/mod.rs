//! Audio domain: sound cue plumbing between the core and the host.

mod cues;

pub use cues::{PlaySound, SoundDispatcher, SoundEntry, SoundKind, SoundLog, SoundSink, SoundTable};

use bevy::prelude::*;

pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundTable>().add_message::<PlaySound>();
    }
}
