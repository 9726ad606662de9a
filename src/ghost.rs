//! Ghost cursor replay of a previously recorded attempt.
//!
//! The projector runs on its own origin, taken when it is activated, and is
//! not synchronised with the live session clock: it only replays the stored
//! relative timestamps.

use tracing::{debug, trace};

use crate::scheduler::{Scheduler, Task, TaskId};
use crate::timing::TypingProgress;

#[derive(Debug, Default)]
pub struct GhostReplay {
    baseline: Option<Vec<TypingProgress>>,
    origin_ms: Option<u64>,
    reveals: Vec<TaskId>,
    position: Option<usize>,
}

impl GhostReplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> Option<&[TypingProgress]> {
        self.baseline.as_deref()
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.as_ref().is_some_and(|b| !b.is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.origin_ms.is_some()
    }

    /// Visible ghost position; `None` while hidden
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Swap the timing sequence. Any replay in flight is cancelled.
    pub fn set_baseline(&mut self, scheduler: &mut Scheduler, baseline: Option<Vec<TypingProgress>>) {
        self.deactivate(scheduler);
        self.baseline = baseline;
    }

    /// Start a fresh replay at `now_ms`, scheduling one reveal per entry.
    ///
    /// Restarts from scratch if already active. Does nothing without a
    /// non-empty baseline.
    pub fn activate(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        self.deactivate(scheduler);

        let Some(baseline) = self.baseline.as_ref().filter(|b| !b.is_empty()) else {
            return;
        };

        self.reveals = baseline
            .iter()
            .enumerate()
            .map(|(idx, step)| scheduler.schedule_once(now_ms + step.timestamp, Task::GhostReveal(idx)))
            .collect();
        self.origin_ms = Some(now_ms);
        debug!(steps = self.reveals.len(), origin_ms = now_ms, "ghost replay activated");
    }

    /// Cancel every pending reveal and hide the ghost
    pub fn deactivate(&mut self, scheduler: &mut Scheduler) {
        if self.origin_ms.take().is_some() {
            trace!(pending = self.reveals.len(), "ghost replay deactivated");
        }
        for id in self.reveals.drain(..) {
            scheduler.cancel(id);
        }
        self.position = None;
    }

    /// Apply a due reveal. Returns false for tasks this replay does not own.
    pub fn reveal(&mut self, task: TaskId, index: usize) -> bool {
        let Some(slot) = self.reveals.iter().position(|id| *id == task) else {
            return false;
        };
        self.reveals.swap_remove(slot);

        match self.baseline.as_ref().and_then(|b| b.get(index)) {
            Some(step) => {
                self.position = Some(step.position);
                true
            }
            None => false,
        }
    }

    pub fn pending_reveals(&self) -> usize {
        self.reveals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Vec<TypingProgress> {
        vec![
            TypingProgress::new(0, 0),
            TypingProgress::new(100, 1),
            TypingProgress::new(250, 2),
        ]
    }

    fn run_until(ghost: &mut GhostReplay, sched: &mut Scheduler, now: u64) {
        while let Some((id, task)) = sched.pop_due(now) {
            if let Task::GhostReveal(idx) = task {
                ghost.reveal(id, idx);
            }
        }
    }

    #[test]
    fn hidden_until_first_reveal() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.set_baseline(&mut sched, Some(vec![TypingProgress::new(40, 0)]));
        ghost.activate(&mut sched, 1_000);

        assert!(ghost.is_active());
        assert_eq!(ghost.position(), None);
        run_until(&mut ghost, &mut sched, 1_039);
        assert_eq!(ghost.position(), None);
        run_until(&mut ghost, &mut sched, 1_040);
        assert_eq!(ghost.position(), Some(0));
    }

    #[test]
    fn replays_relative_to_own_origin() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.set_baseline(&mut sched, Some(baseline()));
        ghost.activate(&mut sched, 5_000);

        run_until(&mut ghost, &mut sched, 5_000);
        assert_eq!(ghost.position(), Some(0));
        run_until(&mut ghost, &mut sched, 5_150);
        assert_eq!(ghost.position(), Some(1));
        run_until(&mut ghost, &mut sched, 5_250);
        assert_eq!(ghost.position(), Some(2));
        assert_eq!(ghost.pending_reveals(), 0);
    }

    #[test]
    fn deactivate_cancels_pending_reveals() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.set_baseline(&mut sched, Some(baseline()));
        ghost.activate(&mut sched, 0);
        run_until(&mut ghost, &mut sched, 120);
        assert_eq!(ghost.position(), Some(1));

        ghost.deactivate(&mut sched);
        assert!(sched.is_empty());
        assert_eq!(ghost.position(), None);
        run_until(&mut ghost, &mut sched, 10_000);
        assert_eq!(ghost.position(), None);
    }

    #[test]
    fn new_baseline_cancels_old_replay() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.set_baseline(&mut sched, Some(baseline()));
        ghost.activate(&mut sched, 0);

        ghost.set_baseline(&mut sched, Some(vec![TypingProgress::new(0, 7)]));
        assert!(!ghost.is_active());
        assert!(sched.is_empty());
    }

    #[test]
    fn reactivation_restarts_origin() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.set_baseline(&mut sched, Some(baseline()));
        ghost.activate(&mut sched, 0);
        run_until(&mut ghost, &mut sched, 260);
        assert_eq!(ghost.position(), Some(2));

        ghost.activate(&mut sched, 1_000);
        assert_eq!(ghost.position(), None);
        assert_eq!(sched.len(), 3);
        assert_eq!(sched.next_deadline(), Some(1_000));
    }

    #[test]
    fn empty_or_missing_baseline_never_activates() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.activate(&mut sched, 0);
        assert!(!ghost.is_active());

        ghost.set_baseline(&mut sched, Some(Vec::new()));
        ghost.activate(&mut sched, 0);
        assert!(!ghost.is_active());
        assert!(!ghost.has_baseline());
        assert!(sched.is_empty());
    }

    #[test]
    fn foreign_task_is_ignored() {
        let mut sched = Scheduler::new();
        let mut ghost = GhostReplay::new();
        ghost.set_baseline(&mut sched, Some(baseline()));
        let stray = sched.schedule_once(0, Task::GhostReveal(0));
        ghost.activate(&mut sched, 0);
        assert!(!ghost.reveal(stray, 0));
        assert_eq!(ghost.position(), None);
    }
}
