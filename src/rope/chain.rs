//! Rope domain: Verlet chain with fixed-length constraint relaxation.

use bevy::prelude::*;

use crate::rope::RopeTuning;

const FALLBACK_SEGMENT_LENGTH: f32 = 0.25;

/// One mass point. Velocity is implicit in `pos_now - pos_old`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RopeNode {
    pub pos_now: Vec2,
    pub pos_old: Vec2,
}

impl RopeNode {
    pub fn at(position: Vec2) -> Self {
        Self {
            pos_now: position,
            pos_old: position,
        }
    }
}

/// Result of one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopeStep {
    /// The anchors are at or beyond the longest representable length.
    pub taut: bool,
}

/// Fixed-capacity node buffer between a start anchor (node 0) and an end
/// anchor (node `active_len - 1`).
#[derive(Debug, Clone)]
pub struct RopeChain {
    nodes: Vec<RopeNode>,
    active: usize,
    segment_length: f32,
    min_active: usize,
    gravity: Vec2,
    iterations: usize,
    last_step: RopeStep,
}

impl RopeChain {
    /// Build a chain with every node coincident at `origin`.
    ///
    /// Out-of-range tuning is clamped: capacity is at least 3, the floor sits
    /// in `[2, capacity - 1]` and a non-positive segment length falls back to
    /// 0.25.
    pub fn new(tuning: &RopeTuning, origin: Vec2) -> Self {
        let capacity = tuning.max_segments.max(3);
        let min_active = tuning.min_segments.clamp(2, capacity - 1);
        let segment_length = if tuning.segment_length.is_finite() && tuning.segment_length > 0.0
        {
            tuning.segment_length
        } else {
            FALLBACK_SEGMENT_LENGTH
        };

        Self {
            nodes: vec![RopeNode::at(origin); capacity],
            active: min_active,
            segment_length,
            min_active,
            gravity: tuning.gravity(),
            iterations: tuning.iterations.max(1),
            last_step: RopeStep::default(),
        }
    }

    /// Collapse every node back onto `origin`.
    pub fn reset(&mut self, origin: Vec2) {
        self.nodes.fill(RopeNode::at(origin));
        self.active = self.min_active;
        self.last_step = RopeStep::default();
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn active_len(&self) -> usize {
        self.active
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn min_active(&self) -> usize {
        self.min_active
    }

    pub fn last_step(&self) -> RopeStep {
        self.last_step
    }

    /// The active nodes, start anchor first.
    pub fn nodes(&self) -> &[RopeNode] {
        &self.nodes[..self.active]
    }

    /// Polyline of the active nodes.
    pub fn points(&self) -> Vec<Vec2> {
        self.nodes().iter().map(|node| node.pos_now).collect()
    }

    /// Integrate, recompute the active length and relax constraints.
    pub fn advance(&mut self, dt: f32, start: Vec2, end: Vec2) -> RopeStep {
        self.integrate(dt);

        let max_active = self.capacity() - 1;
        let seg_distance = (start.distance(end) / self.segment_length).floor() as usize;
        let mut active = seg_distance.max(self.min_active);
        let taut = active >= max_active;
        if taut {
            active = max_active;
        }
        self.active = active;

        if taut && !self.last_step.taut {
            debug!("[ROPE] Taut at {} segments", active);
        }

        for _ in 0..self.iterations {
            self.relax(start, end);
        }
        self.pin(start, end);

        self.last_step = RopeStep { taut };
        self.last_step
    }

    fn integrate(&mut self, dt: f32) {
        let gravity_step = self.gravity * dt * dt;
        for node in &mut self.nodes[1..self.active] {
            let velocity = node.pos_now - node.pos_old;
            node.pos_old = node.pos_now;
            node.pos_now += velocity + gravity_step;
        }
    }

    fn pin(&mut self, start: Vec2, end: Vec2) {
        let last = self.active - 1;
        self.nodes[0].pos_now = start;
        self.nodes[last].pos_now = end;
    }

    /// One relaxation sweep in increasing index order. The first pair moves
    /// only node 1; every other pair splits the correction evenly.
    fn relax(&mut self, start: Vec2, end: Vec2) {
        self.pin(start, end);

        let seg = self.segment_length;
        for i in 0..self.active - 1 {
            let first = self.nodes[i].pos_now;
            let second = self.nodes[i + 1].pos_now;
            let dist = first.distance(second);
            let error = (dist - seg).abs();

            let direction = if dist > seg {
                (first - second).normalize_or_zero()
            } else if dist < seg {
                (second - first).normalize_or(Vec2::NEG_Y)
            } else {
                Vec2::ZERO
            };
            let change = direction * error;

            if i == 0 {
                self.nodes[1].pos_now += change;
            } else {
                self.nodes[i].pos_now -= change * 0.5;
                self.nodes[i + 1].pos_now += change * 0.5;
            }
        }
    }
}
