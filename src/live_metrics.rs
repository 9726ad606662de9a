use tracing::trace;

use crate::metrics;
use crate::scheduler::{Scheduler, Task, TaskId};

/// How often live stats are recomputed while a session runs
pub const METRICS_INTERVAL_MS: u64 = 500;

/// Last published live figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub wpm: u32,
    pub accuracy: u32,
    pub progress: f64,
}

impl Default for MetricsSnapshot {
    /// Nothing typed yet: no speed, perfect accuracy
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            progress: 0.0,
        }
    }
}

impl MetricsSnapshot {
    /// Derive all three figures from absolute session state
    pub fn compute(text: &str, input: &str, started_at_ms: u64, now_ms: u64) -> Self {
        let text_len = text.chars().count();
        let typed = input.chars().count();
        let cursor = typed.min(text_len);
        let elapsed_secs = now_ms.saturating_sub(started_at_ms) as f64 / 1000.0;

        Self {
            wpm: metrics::wpm(cursor, elapsed_secs),
            accuracy: metrics::accuracy(metrics::correct_chars(text, input), typed),
            progress: metrics::progress(cursor, text_len),
        }
    }
}

/// Periodic recompute-and-publish of wpm, accuracy and progress.
///
/// Figures are stale between ticks; keystrokes do not refresh them.
#[derive(Debug, Default)]
pub struct LiveMetrics {
    task: Option<TaskId>,
    snapshot: MetricsSnapshot,
}

impl LiveMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.snapshot
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start ticking every [`METRICS_INTERVAL_MS`] from `now_ms`. No-op if already running.
    pub fn start(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        if self.task.is_some() {
            return;
        }
        let id = scheduler.schedule_every(
            now_ms + METRICS_INTERVAL_MS,
            METRICS_INTERVAL_MS,
            Task::Metrics,
        );
        trace!(?id, "live metrics started");
        self.task = Some(id);
    }

    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.task.take() {
            scheduler.cancel(id);
            trace!(?id, "live metrics stopped");
        }
    }

    /// Stop ticking and zero the published figures
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.stop(scheduler);
        self.snapshot = MetricsSnapshot::default();
    }

    /// Whether `task` is this updater's tick
    pub fn owns(&self, task: TaskId) -> bool {
        self.task == Some(task)
    }

    /// Recompute and publish from the current session state
    pub fn publish(&mut self, text: &str, input: &str, started_at_ms: u64, now_ms: u64) {
        self.snapshot = MetricsSnapshot::compute(text, input, started_at_ms, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_from_session_state() {
        // 4 of 5 typed, one mistake, two seconds in
        let snap = MetricsSnapshot::compute("hello", "hexl", 1_000, 3_000);
        assert_eq!(snap.wpm, 24);
        assert_eq!(snap.accuracy, 75);
        assert_eq!(snap.progress, 80.0);
    }

    #[test]
    fn compute_before_any_time_passes() {
        let snap = MetricsSnapshot::compute("abc", "a", 500, 500);
        assert_eq!(snap.wpm, 0);
        assert_eq!(snap.accuracy, 100);
    }

    #[test]
    fn start_is_idempotent_and_stop_cancels() {
        let mut sched = Scheduler::new();
        let mut live = LiveMetrics::new();

        live.start(&mut sched, 0);
        live.start(&mut sched, 100);
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.next_deadline(), Some(METRICS_INTERVAL_MS));

        live.stop(&mut sched);
        assert!(!live.is_running());
        assert!(sched.is_empty());
    }

    #[test]
    fn reset_zeroes_snapshot() {
        let mut sched = Scheduler::new();
        let mut live = LiveMetrics::new();
        live.start(&mut sched, 0);
        live.publish("ab", "ab", 0, 1_000);
        assert_ne!(live.snapshot(), MetricsSnapshot::default());

        live.reset(&mut sched);
        assert_eq!(live.snapshot(), MetricsSnapshot::default());
        assert!(sched.is_empty());
    }

    #[test]
    fn owns_only_its_own_task() {
        let mut sched = Scheduler::new();
        let other = sched.schedule_once(10, Task::Countdown);
        let mut live = LiveMetrics::new();
        live.start(&mut sched, 0);
        assert!(!live.owns(other));
        let (id, task) = sched.pop_due(METRICS_INTERVAL_MS).unwrap();
        // countdown at 10ms fires first
        assert_eq!(task, Task::Countdown);
        assert!(!live.owns(id));
        let (id, _) = sched.pop_due(METRICS_INTERVAL_MS).unwrap();
        assert!(live.owns(id));
    }
}
