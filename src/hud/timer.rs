//! HUD domain: run timer counting up from level load until the finish line.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::level::FinishLine;
use crate::movement::{Player, PlayerInput};

pub(crate) const TIMER_FONT_SIZE: f32 = 32.0;
pub(crate) const TIMER_PADDING: f32 = 16.0;

/// Run clock. Stops at the first finish and restarts on cancel.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RunTimer {
    started_at: f32,
    finished_at: Option<f32>,
}

impl RunTimer {
    pub fn restart(&mut self, now: f32) {
        self.started_at = now;
        self.finished_at = None;
    }

    /// Stop the clock. Returns false if it was already stopped.
    pub fn finish(&mut self, now: f32) -> bool {
        if self.finished_at.is_some() {
            return false;
        }
        self.finished_at = Some(now);
        true
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Seconds on the clock, frozen once finished.
    pub fn elapsed(&self, now: f32) -> f32 {
        (self.finished_at.unwrap_or(now) - self.started_at).max(0.0)
    }
}

/// `mm:ss` with whole seconds. Minutes keep their last two digits.
pub fn format_clock(seconds: f32) -> String {
    let whole = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", (whole / 60) % 100, whole % 60)
}

/// Marker for the HUD timer text
#[derive(Component)]
pub struct RunTimerText;

pub(crate) fn spawn_timer_ui(mut commands: Commands) {
    commands.spawn((
        RunTimerText,
        Text::new(format_clock(0.0)),
        TextFont {
            font_size: TIMER_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(TIMER_PADDING),
            top: Val::Px(TIMER_PADDING),
            ..default()
        },
    ));
}

pub(crate) fn start_run_timer(time: Res<Time>, mut timer: ResMut<RunTimer>) {
    timer.restart(time.elapsed_secs());
}

pub(crate) fn restart_on_cancel(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut timer: ResMut<RunTimer>,
) {
    if input.cancel_pressed {
        timer.restart(time.elapsed_secs());
    }
}

/// Stop the timer when the player enters a finish line sensor.
pub(crate) fn detect_finish(
    time: Res<Time>,
    mut collision_start_events: MessageReader<CollisionStart>,
    finish_query: Query<(), With<FinishLine>>,
    player_query: Query<(), With<Player>>,
    mut timer: ResMut<RunTimer>,
) {
    let now = time.elapsed_secs();

    for event in collision_start_events.read() {
        let other = if finish_query.contains(event.collider1) {
            event.collider2
        } else if finish_query.contains(event.collider2) {
            event.collider1
        } else {
            continue;
        };

        if !player_query.contains(other) {
            continue;
        }

        if timer.finish(now) {
            info!("[HUD] Finished in {}", format_clock(timer.elapsed(now)));
        }
    }
}

pub(crate) fn update_timer_text(
    time: Res<Time>,
    timer: Res<RunTimer>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<RunTimerText>>,
) {
    let label = format_clock(timer.elapsed(time.elapsed_secs()));
    let color = if timer.is_finished() {
        Color::srgb(0.2, 0.9, 0.3)
    } else {
        Color::WHITE
    };

    for (mut text, mut text_color) in &mut text_query {
        if text.0 != label {
            text.0 = label.clone();
        }
        if text_color.0 != color {
            text_color.0 = color;
        }
    }
}
