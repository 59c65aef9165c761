//! Grapple domain: frame and fixed-tick systems driving the controller.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{PlaySound, SoundDispatcher, SoundTable};
use crate::grapple::{
    Contact, GrappleController, GrappleRig, GrappleTuning, Hook, HookContacts, RopeLine,
    SurfaceFrame, apply_leash,
};
use crate::movement::{LocomotionTuning, Player, PlayerInput, PlayerLocomotion};
use crate::physics::{AvianBody, BodyData};
use crate::rope::Rope;

type PlayerBodies<'w, 's> =
    Query<'w, 's, (BodyData, &'static mut PlayerLocomotion), (With<Player>, Without<Hook>)>;
type Surfaces<'w, 's> =
    Query<'w, 's, (&'static Position, &'static Rotation), (Without<Hook>, Without<Player>)>;

fn surface_frame(surfaces: &Surfaces, entity: Entity) -> Option<SurfaceFrame> {
    surfaces
        .get(entity)
        .ok()
        .map(|(position, rotation)| SurfaceFrame {
            position: position.0,
            rotation: rotation.as_radians(),
        })
}

/// Fold collision messages into [`HookContacts`] and anchor on new contacts.
pub(crate) fn handle_hook_collisions(
    time: Res<Time>,
    sound_table: Res<SoundTable>,
    mut sound_writer: MessageWriter<PlaySound>,
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    mut hooks: Query<
        (&Hook, &mut GrappleController, &mut HookContacts, BodyData),
        Without<Player>,
    >,
    mut players: PlayerBodies,
    surfaces: Surfaces,
) {
    let dt = time.delta_secs();
    let mut sounds = SoundDispatcher::new(&sound_table, &mut sound_writer);

    for event in collision_start_events.read() {
        let (hook_entity, surface) = if hooks.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if hooks.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        let Ok((hook, mut controller, mut contacts, hook_data)) = hooks.get_mut(hook_entity)
        else {
            continue;
        };
        contacts.begin(surface);

        let Some(frame) = surface_frame(&surfaces, surface) else {
            continue;
        };
        let Ok((player_data, mut locomotion)) = players.get_mut(hook.owner) else {
            continue;
        };

        let mut hook_body = AvianBody::new(hook_data, dt);
        let mut player_body = AvianBody::new(player_data, dt);
        let mut rig = GrappleRig {
            player: &mut locomotion,
            player_body: &mut player_body,
            hook_body: &mut hook_body,
            sounds: &mut sounds,
        };
        controller.on_contact(&mut rig, Contact { surface, frame });
    }

    for event in collision_end_events.read() {
        for (hook_entity, surface) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if let Ok((_, _, mut contacts, _)) = hooks.get_mut(hook_entity) {
                contacts.end(surface);
            }
        }
    }
}

/// Per-frame transitions: follow, fire, throw eligibility, re-home.
pub(crate) fn update_grapple(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<GrappleTuning>,
    sound_table: Res<SoundTable>,
    mut sound_writer: MessageWriter<PlaySound>,
    mut hooks: Query<(&Hook, &mut GrappleController, &HookContacts, BodyData), Without<Player>>,
    mut players: PlayerBodies,
    surfaces: Surfaces,
) {
    let dt = time.delta_secs();
    let mut sounds = SoundDispatcher::new(&sound_table, &mut sound_writer);

    for (hook, mut controller, contacts, hook_data) in &mut hooks {
        let Ok((player_data, mut locomotion)) = players.get_mut(hook.owner) else {
            continue;
        };

        // First contact in report order wins
        let contact = contacts.first().and_then(|surface| {
            surface_frame(&surfaces, surface).map(|frame| Contact { surface, frame })
        });

        let mut hook_body = AvianBody::new(hook_data, dt);
        let mut player_body = AvianBody::new(player_data, dt);
        let mut rig = GrappleRig {
            player: &mut locomotion,
            player_body: &mut player_body,
            hook_body: &mut hook_body,
            sounds: &mut sounds,
        };

        controller.follow_character(&mut rig);
        if input.fire_pressed {
            controller.fire(&mut rig, input.aim, contact, &tuning);
        }
        let grounded = rig.player.grounded;
        controller.update_can_throw(grounded);
        controller.back_to_character(&mut rig, &tuning);
    }
}

/// Fixed tick: follow the gripped surface, pull the player with the tether
/// spring and apply rewind.
pub(crate) fn apply_tether(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<GrappleTuning>,
    sound_table: Res<SoundTable>,
    mut sound_writer: MessageWriter<PlaySound>,
    mut hooks: Query<(&Hook, &mut GrappleController, BodyData), Without<Player>>,
    mut players: PlayerBodies,
    surfaces: Surfaces,
) {
    let dt = time.delta_secs();
    let mut sounds = SoundDispatcher::new(&sound_table, &mut sound_writer);

    for (hook, mut controller, hook_data) in &mut hooks {
        let Ok((player_data, mut locomotion)) = players.get_mut(hook.owner) else {
            continue;
        };

        let mut hook_body = AvianBody::new(hook_data, dt);
        let mut player_body = AvianBody::new(player_data, dt);

        let attachment = controller
            .anchor()
            .map(|anchor| surface_frame(&surfaces, anchor.surface));
        if let Some(Some(frame)) = attachment {
            controller.follow_attachment(&mut hook_body, frame, dt);
        }

        let mut rig = GrappleRig {
            player: &mut locomotion,
            player_body: &mut player_body,
            hook_body: &mut hook_body,
            sounds: &mut sounds,
        };

        if let Some(None) = attachment {
            controller.release_detached(&mut rig);
        }
        controller.apply_tether(&mut rig, &tuning);
        if input.rewind_held {
            controller.rewind(&mut rig, dt, &tuning);
        }
    }
}

/// Fixed tick, after the rope advanced: snap-taut release, then the leash.
pub(crate) fn consume_rope_step(
    time: Res<Time>,
    tuning: Res<GrappleTuning>,
    locomotion_tuning: Res<LocomotionTuning>,
    sound_table: Res<SoundTable>,
    mut sound_writer: MessageWriter<PlaySound>,
    mut hooks: Query<(&Hook, &mut GrappleController, &Rope, BodyData), Without<Player>>,
    mut players: PlayerBodies,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();
    let mut sounds = SoundDispatcher::new(&sound_table, &mut sound_writer);

    for (hook, mut controller, rope, hook_data) in &mut hooks {
        let Ok((player_data, mut locomotion)) = players.get_mut(hook.owner) else {
            continue;
        };

        let step = rope.chain.last_step();
        let mut hook_body = AvianBody::new(hook_data, dt);
        let mut player_body = AvianBody::new(player_data, dt);
        let mut rig = GrappleRig {
            player: &mut locomotion,
            player_body: &mut player_body,
            hook_body: &mut hook_body,
            sounds: &mut sounds,
        };

        controller.on_rope_step(&mut rig, step, now, &tuning, &locomotion_tuning);

        if step.taut {
            apply_leash(&mut player_body, &mut hook_body);
        }
    }
}

pub(crate) fn refresh_rope_lines(
    tuning: Res<GrappleTuning>,
    mut hooks: Query<(&Rope, &GrappleController, &mut RopeLine)>,
) {
    for (rope, controller, mut line) in &mut hooks {
        line.points = rope.chain.points();
        line.start_width = tuning.line_width;
        line.end_width = tuning.line_width;
        line.color = controller.tether_shade().color(&tuning);
    }
}

pub(crate) fn tint_hooks(
    tuning: Res<GrappleTuning>,
    mut hooks: Query<(&GrappleController, &mut Sprite), With<Hook>>,
) {
    for (controller, mut sprite) in &mut hooks {
        let color = controller.hook_tint().color(&tuning);
        if sprite.color != color {
            sprite.color = color;
        }
    }
}
