//! Rope domain: fixed-tick chain advance.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::rope::Rope;

/// Advance every rope between its start entity and the entity carrying it.
pub(crate) fn advance_ropes(
    time: Res<Time>,
    anchors: Query<&Position>,
    mut ropes: Query<(&mut Rope, &Position)>,
) {
    let dt = time.delta_secs();

    for (mut rope, end) in &mut ropes {
        let Ok(start) = anchors.get(rope.start) else {
            continue;
        };
        let (start, end) = (start.0, end.0);
        rope.chain.advance(dt, start, end);
    }
}
