//! Range checks for loaded tuning values.

use super::data::GameTuning;

/// One out-of-range tuning value.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningIssue {
    pub section: &'static str,
    pub field: &'static str,
    pub problem: String,
}

impl std::fmt::Display for TuningIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.problem)
    }
}

macro_rules! check {
    ($issues:expr, $cond:expr, $section:expr, $field:expr, $($problem:tt)+) => {
        if !$cond {
            $issues.push(TuningIssue {
                section: $section,
                field: $field,
                problem: format!($($problem)+),
            });
        }
    };
}

/// Validate ranges across all sections.
/// Returns a list of issues, empty if every value is usable as written.
pub fn validate_tuning(tuning: &GameTuning) -> Vec<TuningIssue> {
    let mut issues = Vec::new();

    let rope = &tuning.rope;
    check!(
        issues,
        rope.segment_length > 0.0,
        "rope",
        "segment_length",
        "must be positive, got {}",
        rope.segment_length
    );
    check!(
        issues,
        rope.max_segments >= 3,
        "rope",
        "max_segments",
        "must be at least 3, got {}",
        rope.max_segments
    );
    check!(
        issues,
        rope.min_segments >= 2 && rope.min_segments < rope.max_segments,
        "rope",
        "min_segments",
        "must be in [2, {}), got {}",
        rope.max_segments,
        rope.min_segments
    );
    check!(
        issues,
        rope.iterations > 0,
        "rope",
        "iterations",
        "must be at least 1"
    );

    let locomotion = &tuning.locomotion;
    check!(
        issues,
        locomotion.max_speed > 0.0,
        "locomotion",
        "max_speed",
        "must be positive, got {}",
        locomotion.max_speed
    );
    check!(
        issues,
        locomotion.jump_delay >= 0.0,
        "locomotion",
        "jump_delay",
        "must not be negative, got {}",
        locomotion.jump_delay
    );
    check!(
        issues,
        locomotion.linear_drag >= 0.0,
        "locomotion",
        "linear_drag",
        "must not be negative, got {}",
        locomotion.linear_drag
    );
    check!(
        issues,
        locomotion.collider_box.iter().all(|v| *v > 0.0),
        "locomotion",
        "collider_box",
        "both extents must be positive, got {:?}",
        locomotion.collider_box
    );

    let grapple = &tuning.grapple;
    check!(
        issues,
        grapple.hook_distance_check > 0.0,
        "grapple",
        "hook_distance_check",
        "must be positive, got {}",
        grapple.hook_distance_check
    );
    check!(
        issues,
        grapple.tether_frequency >= 0.0,
        "grapple",
        "tether_frequency",
        "must not be negative, got {}",
        grapple.tether_frequency
    );
    check!(
        issues,
        grapple.tether_damping_ratio >= 0.0,
        "grapple",
        "tether_damping_ratio",
        "must not be negative, got {}",
        grapple.tether_damping_ratio
    );

    for entry in &tuning.sounds.entries {
        check!(
            issues,
            (0.0..=1.0).contains(&entry.volume),
            "sounds",
            "volume",
            "{:?} volume must be in [0, 1], got {}",
            entry.kind,
            entry.volume
        );
    }

    issues
}
