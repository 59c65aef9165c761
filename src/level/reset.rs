//! Level domain: cancel puts the player and hook back at spawn.

use bevy::prelude::*;

use crate::grapple::{GrappleController, Hook, HookContacts};
use crate::level::SpawnPoint;
use crate::movement::{Player, PlayerInput, PlayerLocomotion};
use crate::physics::{AvianBody, BodyData, PhysicsBody};
use crate::rope::Rope;

/// Everything cancel restores for one player and its hook.
pub struct ResetTargets<'a, B: PhysicsBody> {
    pub locomotion: &'a mut PlayerLocomotion,
    pub player_body: &'a mut B,
    pub controller: &'a mut GrappleController,
    pub contacts: &'a mut HookContacts,
    pub rope: &'a mut Rope,
    pub hook_body: &'a mut B,
}

pub fn reset_to_spawn<B: PhysicsBody>(targets: ResetTargets<'_, B>, spawn: Vec2) {
    *targets.locomotion = PlayerLocomotion::default();
    targets.player_body.set_position(spawn);
    targets.player_body.set_velocity(Vec2::ZERO);

    targets.controller.reset();
    targets.contacts.clear();
    targets.rope.chain.reset(spawn);

    targets.hook_body.set_kinematic(true);
    targets.hook_body.set_rotation_locked(true);
    targets.hook_body.set_position(spawn);
    targets.hook_body.set_velocity(Vec2::ZERO);
}

pub(crate) fn reset_on_cancel(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut players: Query<
        (BodyData, &mut PlayerLocomotion, &SpawnPoint),
        (With<Player>, Without<Hook>),
    >,
    mut hooks: Query<
        (&Hook, BodyData, &mut GrappleController, &mut HookContacts, &mut Rope),
        Without<Player>,
    >,
) {
    if !input.cancel_pressed {
        return;
    }
    let dt = time.delta_secs();

    for (hook, hook_data, mut controller, mut contacts, mut rope) in &mut hooks {
        let Ok((player_data, mut locomotion, spawn)) = players.get_mut(hook.owner) else {
            continue;
        };

        let mut player_body = AvianBody::new(player_data, dt);
        let mut hook_body = AvianBody::new(hook_data, dt);
        reset_to_spawn(
            ResetTargets {
                locomotion: &mut locomotion,
                player_body: &mut player_body,
                controller: &mut controller,
                contacts: &mut contacts,
                rope: &mut rope,
                hook_body: &mut hook_body,
            },
            spawn.0,
        );
        info!("[LEVEL] Reset to spawn");
    }
}
