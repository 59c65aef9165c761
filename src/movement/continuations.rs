//! Movement domain: scheduled follow-ups polled once per tick.

/// When a scheduled follow-up becomes due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resume {
    /// At or after an absolute time.
    AtTime(f32),
    /// The first poll that sees the body off the ground.
    WhenAirborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationAction {
    RestoreScale,
    EndAirborneLockout,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuation {
    pub resume: Resume,
    pub action: ContinuationAction,
}

impl Continuation {
    fn is_due(&self, now: f32, grounded: bool) -> bool {
        match self.resume {
            Resume::AtTime(at) => now >= at,
            Resume::WhenAirborne => !grounded,
        }
    }
}

/// Pending follow-ups. Entries are never deduplicated or cancelled; each one
/// fires exactly once when due.
#[derive(Debug, Clone, Default)]
pub struct Continuations {
    pending: Vec<Continuation>,
}

impl Continuations {
    pub fn schedule(&mut self, resume: Resume, action: ContinuationAction) {
        self.pending.push(Continuation { resume, action });
    }

    /// Remove and return every due action, in scheduling order.
    pub fn poll(&mut self, now: f32, grounded: bool) -> Vec<ContinuationAction> {
        let mut due = Vec::new();
        self.pending.retain(|entry| {
            if entry.is_due(now, grounded) {
                due.push(entry.action);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
