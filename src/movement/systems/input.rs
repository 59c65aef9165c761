//! Movement domain: keyboard and mouse sampling into resolved input.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::movement::PlayerInput;

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut input: ResMut<PlayerInput>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.horizontal = x;
    input.vertical = y;
    input.jump_pressed = keyboard.just_pressed(KeyCode::Space);
    input.jump_held = keyboard.pressed(KeyCode::Space);
    input.fire_pressed =
        mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::KeyJ);
    input.rewind_held = mouse.pressed(MouseButton::Right) || keyboard.pressed(KeyCode::KeyK);
    input.cancel_pressed =
        keyboard.just_pressed(KeyCode::Escape) || keyboard.just_pressed(KeyCode::KeyR);

    // Keep the last aim point while the cursor is outside the window
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    for (camera, camera_transform) in &cameras {
        if let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) {
            input.aim = world;
            break;
        }
    }
}
