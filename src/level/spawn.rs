//! Level domain: demo level, player and hook spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::grapple::{GrappleController, GrappleTuning, Hook, HookContacts, HookTint, RopeLine};
use crate::level::{FinishLine, SpawnPoint, Spinner};
use crate::movement::{CharacterHolder, LocomotionTuning, Player, PlayerLocomotion};
use crate::physics::{
    ground_layers, hook_layers, player_layers, trigger_layers, wall_layers,
};
use crate::rope::{Rope, RopeTuning};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(-8.0, -2.0);
const PLAYER_SIZE: Vec2 = Vec2::new(0.6, 1.0);
const HOOK_RADIUS: f32 = 0.15;
const FINISH_SIZE: Vec2 = Vec2::new(1.0, 2.0);

fn block(color: Color, size: Vec2, position: Vec2, angle_degrees: f32) -> impl Bundle {
    (
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(0.0))
            .with_rotation(Quat::from_rotation_z(angle_degrees.to_radians())),
        Collider::rectangle(size.x, size.y),
    )
}

pub(crate) fn spawn_level(
    mut commands: Commands,
    locomotion: Res<LocomotionTuning>,
    grapple: Res<GrappleTuning>,
    rope: Res<RopeTuning>,
) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Floor
    commands.spawn((
        block(ground_color, Vec2::new(32.0, 1.0), Vec2::new(0.0, -4.0), 0.0),
        RigidBody::Static,
        ground_layers(),
    ));

    // Walls
    for x in [-16.0, 16.0] {
        commands.spawn((
            block(wall_color, Vec2::new(1.0, 16.0), Vec2::new(x, 3.5), 0.0),
            RigidBody::Static,
            wall_layers(),
        ));
    }

    // Slopes either side of the middle
    commands.spawn((
        block(ground_color, Vec2::new(5.0, 0.5), Vec2::new(-3.0, -3.0), 30.0),
        RigidBody::Static,
        ground_layers(),
    ));
    commands.spawn((
        block(ground_color, Vec2::new(5.0, 0.5), Vec2::new(7.0, -3.0), -30.0),
        RigidBody::Static,
        ground_layers(),
    ));

    // High platforms to grapple from
    for (x, y) in [(-9.0, 5.0), (9.0, 6.0)] {
        commands.spawn((
            block(platform_color, Vec2::new(4.0, 0.5), Vec2::new(x, y), 0.0),
            RigidBody::Static,
            ground_layers(),
        ));
    }

    let spinner = Spinner {
        degrees_per_second: 40.0,
    };
    commands.spawn((
        block(platform_color, Vec2::new(5.0, 0.4), Vec2::new(1.0, 6.5), 0.0),
        RigidBody::Kinematic,
        AngularVelocity(spinner.angular_velocity()),
        spinner,
        ground_layers(),
    ));

    // Finish line on top of the right platform
    commands.spawn((
        FinishLine,
        Sprite {
            color: Color::srgba(0.3, 0.9, 0.4, 0.35),
            custom_size: Some(FINISH_SIZE),
            ..default()
        },
        Transform::from_xyz(9.0, 6.25 + FINISH_SIZE.y / 2.0, -0.5),
        RigidBody::Static,
        Collider::rectangle(FINISH_SIZE.x, FINISH_SIZE.y),
        Sensor,
        CollisionEventsEnabled,
        trigger_layers(),
    ));

    let player = spawn_player(&mut commands, &locomotion);
    spawn_hook(&mut commands, player, &grapple, &rope);

    info!("[LEVEL] Demo level spawned");
}

fn spawn_player(commands: &mut Commands, tuning: &LocomotionTuning) -> Entity {
    commands
        .spawn((
            (Player, PlayerLocomotion::default(), SpawnPoint(PLAYER_SPAWN)),
            Transform::from_translation(PLAYER_SPAWN.extend(1.0)),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                Mass(1.0),
                LockedAxes::ROTATION_LOCKED,
                LinearDamping(tuning.linear_drag),
                GravityScale(tuning.gravity),
                Friction::new(0.0),
                player_layers(),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                CharacterHolder,
                Sprite {
                    color: Color::srgb(0.9, 0.9, 0.9),
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                Transform::default(),
            ));
        })
        .id()
}

fn spawn_hook(
    commands: &mut Commands,
    owner: Entity,
    grapple: &GrappleTuning,
    rope: &RopeTuning,
) -> Entity {
    commands
        .spawn((
            (
                Hook { owner },
                GrappleController::default(),
                HookContacts::default(),
                Rope::new(rope, owner, PLAYER_SPAWN),
                RopeLine::default(),
            ),
            Sprite {
                color: HookTint::Blocked.color(grapple),
                custom_size: Some(Vec2::splat(HOOK_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(PLAYER_SPAWN.extend(2.0)).with_rotation(
                Quat::from_rotation_z(grapple.rest_rotation_degrees.to_radians()),
            ),
            (
                RigidBody::Kinematic,
                Collider::circle(HOOK_RADIUS),
                Mass(1.0),
                LockedAxes::ROTATION_LOCKED,
                LinearDamping(0.0),
                GravityScale(1.0),
                CollisionEventsEnabled,
                hook_layers(),
            ),
        ))
        .id()
}
