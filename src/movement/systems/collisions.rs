//! Movement domain: ground probe and per-frame locomotion bookkeeping.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::audio::{PlaySound, SoundDispatcher, SoundTable};
use crate::movement::{GroundProbe, LocomotionTuning, Player, PlayerInput, PlayerLocomotion};
use crate::physics::GameLayer;

/// Box overlap for grounded, then a down ray from the body origin for the
/// surface normal.
pub(crate) fn probe(
    spatial_query: &SpatialQuery,
    position: Vec2,
    tuning: &LocomotionTuning,
) -> GroundProbe {
    // Filter to only hit Ground layer entities
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    let probe_box = tuning.collider_box();
    let shape = Collider::rectangle(probe_box.x, probe_box.y);
    let grounded = !spatial_query
        .shape_intersections(
            &shape,
            position + tuning.collider_offset(),
            0.0,
            &ground_filter,
        )
        .is_empty();

    if !grounded {
        return GroundProbe::airborne();
    }

    let hit = spatial_query.cast_ray(
        position,
        Dir2::NEG_Y,
        tuning.ground_ray_length(),
        true,
        &ground_filter,
    );

    GroundProbe {
        grounded,
        normal: hit.map(|hit| hit.normal),
    }
}

pub(crate) fn update_ground_state(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    tuning: Res<LocomotionTuning>,
    input: Res<PlayerInput>,
    sound_table: Res<SoundTable>,
    mut sound_writer: MessageWriter<PlaySound>,
    mut query: Query<(&Position, &mut PlayerLocomotion), With<Player>>,
) {
    let now = time.elapsed_secs();
    let mut sounds = SoundDispatcher::new(&sound_table, &mut sound_writer);

    for (position, mut locomotion) in &mut query {
        if input.jump_pressed {
            locomotion.press_jump(now, &tuning);
        }

        let ground = probe(&spatial_query, position.0, &tuning);
        locomotion.update_ground(ground, now, position.0, &tuning, &mut sounds);
        locomotion.run_continuations(now);
    }
}
