//! Virtual-time task queue.
//!
//! The browser only gives us one frame callback; every "timer" in the game is an
//! entry here, fired by `pop_due` when the frame clock passes its due time.
//! Entries are kept in a small vec because a round never has more than a
//! handful of pending tasks.

/// Handle returned when scheduling, used to cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

struct Entry<T> {
    id: TaskId,
    due_ms: u64,
    period_ms: Option<u64>, // Some(..) => re-queued after firing
    task: T,
}

/// A task that became due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Due<T> {
    pub id: TaskId,
    pub due_ms: u64,
    pub task: T,
}

pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, due_ms: u64, period_ms: Option<u64>, task: T) -> TaskId {
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

    /// Fire `task` once, `delay_ms` after `now_ms`.
    pub fn schedule_once(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TaskId {
        self.push(now_ms.saturating_add(delay_ms), None, task)
    }

    /// Fire `task` every `period_ms`, first time one period after `now_ms`.
    pub fn schedule_every(&mut self, now_ms: u64, period_ms: u64, task: T) -> TaskId {
        let period = period_ms.max(1); // zero period would never let pop_due drain
        self.push(now_ms.saturating_add(period), Some(period), task)
    }

    /// Remove a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.entries.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Earliest task due at or before `now_ms`. Ties go to the task scheduled first.
    /// Periodic tasks are re-queued one period after their own due time, so a
    /// long gap between frames replays every missed tick in order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Due<T>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(idx, _)| idx)?;

        let entry = &mut self.entries[idx];
        let due = Due {
            id: entry.id,
            due_ms: entry.due_ms,
            task: entry.task,
        };
        match entry.period_ms {
            Some(period) => entry.due_ms = entry.due_ms.saturating_add(period),
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(due)
    }
}
