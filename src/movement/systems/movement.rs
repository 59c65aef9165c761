//! Movement domain: fixed-tick locomotion and visual feedback systems.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::audio::{PlaySound, SoundDispatcher, SoundTable};
use crate::movement::{
    CharacterHolder, Facing, LocomotionTuning, Player, PlayerInput, PlayerLocomotion,
};
use crate::physics::{AvianBody, BodyData};

pub(crate) fn apply_locomotion(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<LocomotionTuning>,
    sound_table: Res<SoundTable>,
    mut sound_writer: MessageWriter<PlaySound>,
    mut query: Query<(BodyData, &mut PlayerLocomotion), With<Player>>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();
    let mut sounds = SoundDispatcher::new(&sound_table, &mut sound_writer);

    for (body, mut locomotion) in &mut query {
        let mut body = AvianBody::new(body, dt);
        locomotion.fixed_step(&mut body, &input, now, &tuning, &mut sounds);
    }
}

/// Ease the visual child toward the squash target and mirror it by facing.
pub(crate) fn animate_character_holder(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    players: Query<(&PlayerLocomotion, &Children), With<Player>>,
    mut holders: Query<(&mut Transform, &mut Sprite), With<CharacterHolder>>,
) {
    let blend = (time.delta_secs() / tuning.squash_duration.max(f32::EPSILON)).min(1.0);

    for (locomotion, children) in &players {
        for child in children.iter() {
            let Ok((mut transform, mut sprite)) = holders.get_mut(child) else {
                continue;
            };
            let target = locomotion.target_scale.extend(1.0);
            transform.scale = transform.scale.lerp(target, blend);
            sprite.flip_x = locomotion.facing == Facing::Left;
        }
    }
}
