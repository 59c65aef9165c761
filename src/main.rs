use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use grapple_platformer::audio::PlaySound;
use grapple_platformer::grapple::RopeLine;
use grapple_platformer::hud::HudPlugin;
use grapple_platformer::level::LevelPlugin;
use grapple_platformer::movement::DesktopInputPlugin;
use grapple_platformer::{FrameSet, PlatformerCorePlugin};

/// Screen pixels per world unit.
const PIXELS_PER_UNIT: f32 = 40.0;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Grapple".to_string(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Gravity(Vec2::NEG_Y * 9.81))
    .insert_resource(Time::<Fixed>::from_hz(50.0))
    .add_plugins((
        PlatformerCorePlugin::default(),
        DesktopInputPlugin,
        LevelPlugin,
        HudPlugin,
    ))
    .add_systems(Startup, spawn_camera)
    .add_systems(Update, (draw_rope_lines, log_sounds).in_set(FrameSet::Render));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(grapple_platformer::debug::DebugPlugin);

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 2.0, 0.0),
    ));
}

/// Stand-in line renderer for the rope polyline.
fn draw_rope_lines(lines: Query<&RopeLine>, mut gizmos: Gizmos) {
    for line in &lines {
        if line.points.len() >= 2 {
            gizmos.linestrip_2d(line.points.iter().copied(), line.color);
        }
    }
}

/// Stand-in audio backend.
fn log_sounds(mut sounds: MessageReader<PlaySound>) {
    for sound in sounds.read() {
        debug!(
            "[AUDIO] {:?} {} at {:?} (volume {:.2})",
            sound.kind, sound.clip, sound.position, sound.volume
        );
    }
}
