//! Tuning domain: RON-backed tuning for locomotion, grapple, rope and sound.

mod data;
mod loader;
mod validation;


pub use data::GameTuning;
pub use loader::{TuningLoadError, load_tuning, parse_tuning};
pub use validation::{TuningIssue, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

/// Loads tuning once at build time and inserts one resource per section.
pub struct TuningPlugin {
    pub path: PathBuf,
}

impl Default for TuningPlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/data/tuning.ron"),
        }
    }
}

impl Plugin for TuningPlugin {
    fn build(&self, app: &mut App) {
        let tuning = match load_tuning(&self.path) {
            Ok(tuning) => {
                info!("[TUNING] Loaded {}", self.path.display());
                tuning
            }
            Err(e) => {
                warn!("[TUNING] {}, using defaults", e);
                GameTuning::default()
            }
        };

        for issue in validate_tuning(&tuning) {
            warn!("[TUNING] {}", issue);
        }

        insert_tuning(app, tuning);
    }
}

fn insert_tuning(app: &mut App, tuning: GameTuning) {
    let GameTuning {
        locomotion,
        grapple,
        rope,
        sounds,
    } = tuning;

    app.insert_resource(locomotion)
        .insert_resource(grapple)
        .insert_resource(rope)
        .insert_resource(sounds);
}
