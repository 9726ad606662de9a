use tracing::{debug, trace};

use crate::scheduler::{Scheduler, Task, TaskId};
use crate::settings::TimeLimit;

pub const COUNTDOWN_INTERVAL_MS: u64 = 1_000;

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(u32),
    /// The budget just ran out. Reported once per session.
    Expired,
}

/// Ticking clock for time-boxed sessions.
///
/// Remaining time is always derived from the session start, never accumulated
/// per tick, so late ticks cannot drift.
#[derive(Debug)]
pub struct Countdown {
    limit: TimeLimit,
    remaining: u32,
    task: Option<TaskId>,
    expired: bool,
}

impl Countdown {
    pub fn new(limit: TimeLimit) -> Self {
        Self {
            limit,
            remaining: limit.as_secs(),
            task: None,
            expired: false,
        }
    }

    pub fn limit(&self) -> TimeLimit {
        self.limit
    }

    /// Seconds left; equals the limit until the session starts
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// Begin ticking if the session is time-boxed and the budget is not spent
    pub fn start(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        if self.limit.is_unlimited() || self.expired || self.task.is_some() {
            return;
        }
        let id = scheduler.schedule_every(
            now_ms + COUNTDOWN_INTERVAL_MS,
            COUNTDOWN_INTERVAL_MS,
            Task::Countdown,
        );
        trace!(?id, limit = %self.limit, "countdown started");
        self.task = Some(id);
    }

    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.task.take() {
            scheduler.cancel(id);
            trace!(?id, "countdown stopped");
        }
    }

    /// Stop and rewind to a fresh budget of `limit`
    pub fn reset(&mut self, scheduler: &mut Scheduler, limit: TimeLimit) {
        self.stop(scheduler);
        self.limit = limit;
        self.remaining = limit.as_secs();
        self.expired = false;
    }

    pub fn owns(&self, task: TaskId) -> bool {
        self.task == Some(task)
    }

    /// Recompute remaining time. On expiry the countdown cancels itself.
    pub fn tick(&mut self, scheduler: &mut Scheduler, started_at_ms: u64, now_ms: u64) -> CountdownTick {
        if self.expired {
            return CountdownTick::Remaining(0);
        }

        let elapsed_secs = now_ms.saturating_sub(started_at_ms) / 1_000;
        let remaining = u64::from(self.limit.as_secs()).saturating_sub(elapsed_secs) as u32;
        self.remaining = remaining;

        if remaining == 0 {
            self.expired = true;
            self.stop(scheduler);
            debug!(limit = %self.limit, "countdown expired");
            CountdownTick::Expired
        } else {
            CountdownTick::Remaining(remaining)
        }
    }
}
