//! Debug overlay for tuning the ground probe and movement axis.
//!
//! Draws, per player:
//! - the probe box, green while grounded
//! - the downward normal ray
//! - the movement axis
//!
//! F3 toggles the overlay.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::FrameSet;
use crate::movement::{LocomotionTuning, Player, PlayerLocomotion};

/// Resource tracking overlay visibility
#[derive(Resource, Debug)]
pub struct DebugOverlay {
    pub enabled: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self { enabled: true }
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>().add_systems(
            Update,
            (toggle_overlay, draw_ground_probe)
                .chain()
                .in_set(FrameSet::Render),
        );
    }
}

fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if keyboard.just_pressed(KeyCode::F3) {
        overlay.enabled = !overlay.enabled;
        info!("[DEBUG] Overlay {}", if overlay.enabled { "on" } else { "off" });
    }
}

fn draw_ground_probe(
    overlay: Res<DebugOverlay>,
    tuning: Res<LocomotionTuning>,
    players: Query<(&Position, &PlayerLocomotion), With<Player>>,
    mut gizmos: Gizmos,
) {
    if !overlay.enabled {
        return;
    }

    for (position, locomotion) in &players {
        let origin = position.0;
        let probe_color = if locomotion.grounded {
            Color::srgb(0.2, 0.9, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };

        gizmos.rect_2d(
            Isometry2d::from_translation(origin + tuning.collider_offset()),
            tuning.collider_box(),
            probe_color,
        );
        gizmos.line_2d(
            origin,
            origin + Vec2::NEG_Y * tuning.ground_ray_length(),
            Color::srgb(0.9, 0.9, 0.2),
        );
        gizmos.arrow_2d(
            origin,
            origin + locomotion.movement_axis,
            Color::srgb(0.3, 0.6, 1.0),
        );
    }
}
