//! Timer queue for delayed and repeating session events
//!
//! Every entry carries the generation of the session that scheduled it. When a
//! session ends or is replaced the generation moves on, and stale entries are
//! discarded as they come due instead of acting on the new session.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Repeating one-second clock (countdown or speed level)
    ClockTick,
    /// Bring in the next target
    Spawn,
    /// Follow-up hit check during a swing
    HitCheck,
}

/// A pending timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduled {
    pub due_ms: f64,
    pub kind: TimerKind,
    pub generation: u32,
}

/// Time-ordered queue of pending timers (FIFO among equal due times)
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn schedule(&mut self, due_ms: f64, kind: TimerKind, generation: u32) {
        let idx = self.queue.partition_point(|s| s.due_ms <= due_ms);
        self.queue.insert(
            idx,
            Scheduled {
                due_ms,
                kind,
                generation,
            },
        );
    }

    /// Schedule a spawn unless one is already pending for this generation.
    /// Returns false when the request was dropped.
    pub fn schedule_spawn(&mut self, due_ms: f64, generation: u32) -> bool {
        if self.is_pending(TimerKind::Spawn, generation) {
            log::debug!("Spawn already pending, ignoring duplicate request");
            return false;
        }
        self.schedule(due_ms, TimerKind::Spawn, generation);
        true
    }

    pub fn is_pending(&self, kind: TimerKind, generation: u32) -> bool {
        self.queue
            .iter()
            .any(|s| s.kind == kind && s.generation == generation)
    }

    /// Remove every pending timer of a kind, whatever its generation
    pub fn cancel(&mut self, kind: TimerKind) {
        self.queue.retain(|s| s.kind != kind);
    }

    /// Pop the earliest timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Scheduled> {
        match self.queue.first() {
            Some(first) if first.due_ms <= now_ms => Some(self.queue.remove(0)),
            _ => None,
        }
    }
}
