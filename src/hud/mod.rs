//! HUD domain: run timer and finish line.

mod timer;

#[cfg(test)]
mod tests;

pub use timer::{RunTimer, RunTimerText, format_clock};

use bevy::prelude::*;

use crate::FrameSet;
use crate::hud::timer::{
    detect_finish, restart_on_cancel, spawn_timer_ui, start_run_timer, update_timer_text,
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunTimer>()
            .add_systems(Startup, (spawn_timer_ui, start_run_timer))
            .add_systems(
                Update,
                (restart_on_cancel, detect_finish, update_timer_text)
                    .chain()
                    .in_set(FrameSet::Render),
            );
    }
}
