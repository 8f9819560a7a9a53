//! Timer queue for the page's single-threaded event loop.
//!
//! Time is virtual: the host advances it by calling [`Timers::advance_to`]
//! with the current page time, and receives the tasks that fell due.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Delayed tasks ordered by due time, ties by scheduling order.
#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), T>,
}

impl<T> Timers<T> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current page time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((self.now + delay, id), task);
        id
    }

    /// Drop a pending task. Returns it if it had not run yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let slot = self.queue.keys().find(|(_, tid)| *tid == id).copied()?;
        self.queue.remove(&slot)
    }

    /// Move the clock to `now` and take every task due by then.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }
        let mut tasks = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            tasks.push(entry.remove());
        }
        tasks
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
