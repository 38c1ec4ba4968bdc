//! Time-sliced sweep over all replayed actors.
//!
//! A sweep visits every actor index once, `batch_size` indices per tick, starting
//! where the previous sweep stopped. Requesting an update while a sweep is in flight
//! redirects it: the lap restarts from the current cursor so every actor still gets
//! one visit with the newest playback time, and no index is skipped or doubled.

use std::ops::Range;

/// Scheduler state. `target` is the cursor position at which the lap ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    Sweeping { target: usize, remaining: usize },
}

#[derive(Clone, Debug)]
pub struct BatchScheduler {
    batch_size: usize,
    cursor: usize,
    state: SweepState,
}

impl BatchScheduler {
    /// `batch_size` of zero is treated as one.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            cursor: 0,
            state: SweepState::Idle,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SweepState::Idle
    }

    /// Next index a tick will visit.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn target_index(&self) -> usize {
        match self.state {
            SweepState::Idle => self.cursor,
            SweepState::Sweeping { target, .. } => target,
        }
    }

    /// Start a sweep over `actor_count` actors, or redirect the one in flight.
    pub fn request_update(&mut self, actor_count: usize) {
        if actor_count == 0 {
            self.reset();
            return;
        }
        if self.cursor >= actor_count {
            self.cursor = 0;
        }
        if !self.is_idle() {
            log::debug!("scheduler: redirecting sweep at index {}", self.cursor);
        }
        self.state = SweepState::Sweeping {
            target: self.cursor,
            remaining: actor_count,
        };
    }

    /// Claim the next batch of indices. `None` when idle.
    pub fn tick(&mut self, actor_count: usize) -> Option<Range<usize>> {
        let SweepState::Sweeping { target, remaining } = self.state else {
            return None;
        };
        if actor_count == 0 {
            self.reset();
            return None;
        }
        if self.cursor >= actor_count {
            self.cursor = 0;
        }

        let start = self.cursor;
        let end = (start + self.batch_size.min(remaining)).min(actor_count);
        let remaining = remaining - (end - start);
        self.cursor = end % actor_count;
        self.state = if remaining == 0 {
            SweepState::Idle
        } else {
            SweepState::Sweeping { target, remaining }
        };
        Some(start..end)
    }

    /// Drop any sweep in flight and rewind to index 0.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = SweepState::Idle;
    }
}
