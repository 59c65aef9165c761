//! Grapple domain: hook components and render outputs.

use bevy::prelude::*;

/// The grappling hook. `owner` is the player entity it is tied to.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hook {
    pub owner: Entity,
}

/// Surfaces currently touching the hook, in the order contact began.
#[derive(Component, Debug, Clone, Default)]
pub struct HookContacts {
    contacts: Vec<Entity>,
}

impl HookContacts {
    pub fn begin(&mut self, surface: Entity) {
        if !self.contacts.contains(&surface) {
            self.contacts.push(surface);
        }
    }

    pub fn end(&mut self, surface: Entity) {
        self.contacts.retain(|entity| *entity != surface);
    }

    pub fn first(&self) -> Option<Entity> {
        self.contacts.first().copied()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}

/// Polyline for an external line renderer, refreshed every frame.
#[derive(Component, Debug, Clone)]
pub struct RopeLine {
    pub points: Vec<Vec2>,
    pub start_width: f32,
    pub end_width: f32,
    pub color: Color,
}

impl Default for RopeLine {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            start_width: 0.1,
            end_width: 0.1,
            color: Color::WHITE,
        }
    }
}
