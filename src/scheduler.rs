//! Cooperative, single-threaded timer queue.
//!
//! Nothing here runs on its own: the owner asks for the next deadline, waits
//! however it likes, then drains due tasks with [`Scheduler::pop_due`]. A
//! cancelled task is removed immediately and can never be returned again,
//! which is what keeps callbacks from a discarded session away from the next
//! one.

/// Handle to a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// What a due task asks its owner to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Recompute and publish live wpm/accuracy/progress
    Metrics,
    /// Recompute the remaining time of a timed session
    Countdown,
    /// Reveal the ghost cursor at entry `n` of the replay baseline
    GhostReveal(usize),
}

#[derive(Clone, Debug)]
struct Entry {
    id: TaskId,
    due_ms: u64,
    period_ms: Option<u64>,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once at `due_ms`
    pub fn schedule_once(&mut self, due_ms: u64, task: Task) -> TaskId {
        self.push(due_ms, None, task)
    }

    /// Run `task` at `first_due_ms` and then every `period_ms` after it
    pub fn schedule_every(&mut self, first_due_ms: u64, period_ms: u64, task: Task) -> TaskId {
        self.push(first_due_ms, Some(period_ms.max(1)), task)
    }

    fn push(&mut self, due_ms: u64, period_ms: Option<u64>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms,
            period_ms,
            task,
        });
        id
    }

    /// Returns true if the task was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest time any pending task becomes due
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Take the earliest task due at or before `now_ms`.
    ///
    /// Ties go to the task scheduled first. Periodic tasks are re-armed on
    /// their original grid; ticks missed while the owner was not polling are
    /// skipped rather than replayed.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TaskId, Task)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(idx, _)| idx)?;

        let entry = &mut self.entries[idx];
        let fired = (entry.id, entry.task);

        match entry.period_ms {
            Some(period) => {
                let behind = (now_ms - entry.due_ms) / period;
                entry.due_ms += (behind + 1) * period;
            }
            None => {
                self.entries.remove(idx);
            }
        }

        Some(fired)
    }
}
