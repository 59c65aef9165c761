//! Audio domain: sound kinds, lookup table and the sink capability.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every cue the gameplay core can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SoundKind {
    Jump,
    Hit,
    Throw,
    Landing,
}

/// Fire-and-forget sound capability handed to the gameplay core.
pub trait SoundSink {
    /// Play a positional cue.
    fn play_at(&mut self, kind: SoundKind, position: Vec2);

    /// Play a non-positional cue.
    fn play_global(&mut self, kind: SoundKind);
}

/// Clip and volume for one sound kind.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SoundEntry {
    pub kind: SoundKind,
    pub clip: String,
    pub volume: f32,
}

/// Sound kind to clip lookup. The first entry for a kind wins.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SoundTable {
    pub entries: Vec<SoundEntry>,
}

impl SoundTable {
    pub fn lookup(&self, kind: SoundKind) -> Option<&SoundEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    pub fn default_entries() -> Self {
        let entry = |kind, clip: &str, volume| SoundEntry {
            kind,
            clip: clip.to_string(),
            volume,
        };
        Self {
            entries: vec![
                entry(SoundKind::Jump, "sounds/jump.ogg", 0.6),
                entry(SoundKind::Hit, "sounds/hit.ogg", 0.8),
                entry(SoundKind::Throw, "sounds/throw.ogg", 0.7),
                entry(SoundKind::Landing, "sounds/landing.ogg", 0.5),
            ],
        }
    }
}

/// Request for the host to play a resolved clip.
#[derive(Debug, Clone)]
pub struct PlaySound {
    pub kind: SoundKind,
    pub clip: String,
    pub volume: f32,
    /// `None` for global cues.
    pub position: Option<Vec2>,
}

impl Message for PlaySound {}

/// [`SoundSink`] that resolves cues through a [`SoundTable`] and writes
/// [`PlaySound`] messages. Kinds without a table entry are dropped.
pub struct SoundDispatcher<'a, 'w> {
    table: &'a SoundTable,
    writer: &'a mut MessageWriter<'w, PlaySound>,
}

impl<'a, 'w> SoundDispatcher<'a, 'w> {
    pub fn new(table: &'a SoundTable, writer: &'a mut MessageWriter<'w, PlaySound>) -> Self {
        Self { table, writer }
    }

    fn dispatch(&mut self, kind: SoundKind, position: Option<Vec2>) {
        let Some(entry) = self.table.lookup(kind) else {
            debug!("[AUDIO] No clip mapped for {:?}", kind);
            return;
        };
        self.writer.write(PlaySound {
            kind,
            clip: entry.clip.clone(),
            volume: entry.volume,
            position,
        });
    }
}

impl SoundSink for SoundDispatcher<'_, '_> {
    fn play_at(&mut self, kind: SoundKind, position: Vec2) {
        self.dispatch(kind, Some(position));
    }

    fn play_global(&mut self, kind: SoundKind) {
        self.dispatch(kind, None);
    }
}

/// Sink that records every cue. Used by headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct SoundLog {
    pub played: Vec<(SoundKind, Option<Vec2>)>,
}

impl SoundLog {
    pub fn count(&self, kind: SoundKind) -> usize {
        self.played.iter().filter(|(k, _)| *k == kind).count()
    }
}

impl SoundSink for SoundLog {
    fn play_at(&mut self, kind: SoundKind, position: Vec2) {
        self.played.push((kind, Some(position)));
    }

    fn play_global(&mut self, kind: SoundKind) {
        self.played.push((kind, None));
    }
}
