//! Owner-scoped timer queue
//!
//! Every delayed UI mutation (modal fade-out, alert removal, auto-dismiss)
//! is scheduled here against a logical millisecond clock. Each timer records
//! the element that owns it so that removing the element can cancel all of
//! its pending callbacks in one call.
//!
//! The queue never calls back into user code. Due timers are popped one at a
//! time by the driver, which keeps the single-threaded, run-to-completion
//! semantics of an event loop and lets a fired task schedule further timers.

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Handle to a scheduled timer, valid until it fires or is cancelled
    pub struct TimerId;
}

struct Timer<O, T> {
    owner: O,
    due_ms: u64,
    /// Scheduling order, breaks ties between timers due at the same instant
    seq: u64,
    task: T,
}

/// A timer that reached its due time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<O, T> {
    pub id: TimerId,
    pub owner: O,
    pub due_ms: u64,
    pub task: T,
}

/// Logical-clock timer queue keyed by owner
pub struct TimerQueue<O, T> {
    timers: SlotMap<TimerId, Timer<O, T>>,
    now_ms: u64,
    next_seq: u64,
}

impl<O: Copy + PartialEq, T> TimerQueue<O, T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now_ms: 0,
            next_seq: 0,
        }
    }

    /// Current logical time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to fire `delay_ms` from now on behalf of `owner`
    pub fn schedule(&mut self, owner: O, delay_ms: u64, task: T) -> TimerId {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.timers.insert(Timer {
            owner,
            due_ms,
            seq,
            task,
        });
        trace!(?id, due_ms, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(id).is_some();
        if removed {
            trace!(?id, "timer cancelled");
        }
        removed
    }

    /// Cancel every pending timer owned by `owner`, returning how many were dropped
    pub fn cancel_owned_by(&mut self, owner: O) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, timer| timer.owner != owner);
        before - self.timers.len()
    }

    /// Whether a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Number of pending timers owned by `owner`
    pub fn pending_for(&self, owner: O) -> usize {
        self.timers.values().filter(|t| t.owner == owner).count()
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.values().map(|t| t.due_ms).min()
    }

    /// Pop the earliest timer due at or before `deadline_ms`
    ///
    /// The clock moves forward to the popped timer's due time so that tasks
    /// scheduled while handling it are measured from the right instant.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<FiredTimer<O, T>> {
        let id = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= deadline_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(id, _)| id)?;
        let timer = self.timers.remove(id)?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(FiredTimer {
            id,
            owner: timer.owner,
            due_ms: timer.due_ms,
            task: timer.task,
        })
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl<O: Copy + PartialEq, T> Default for TimerQueue<O, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn drain(queue: &mut TimerQueue<u32, &'static str>, deadline: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(deadline) {
            fired.push(timer.task);
        }
        queue.set_now(deadline);
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(1, 300, "late");
        queue.schedule(2, 100, "early");
        queue.schedule(3, 200, "middle");

        assert_eq!(drain(&mut queue, 250), vec!["early", "middle"]);
        assert_eq!(queue.now_ms(), 250);
        assert_eq!(queue.pending(), 1);
        assert_eq!(drain(&mut queue, 300), vec!["late"]);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(1, 150, "first");
        queue.schedule(1, 150, "second");
        queue.schedule(1, 150, "third");
        assert_eq!(drain(&mut queue, 150), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(1, 150, "hide");
        assert!(queue.is_pending(id));
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(drain(&mut queue, 1_000).is_empty());
    }

    #[test]
    fn test_cancel_owned_by() {
        let mut queue = TimerQueue::new();
        queue.schedule(1, 10, "a");
        queue.schedule(2, 10, "b");
        queue.schedule(1, 20, "c");

        assert_eq!(queue.pending_for(1), 2);
        assert_eq!(queue.cancel_owned_by(1), 2);
        assert_eq!(queue.cancel_owned_by(1), 0);
        assert_eq!(drain(&mut queue, 100), vec!["b"]);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut queue: TimerQueue<u32, &str> = TimerQueue::new();
        queue.set_now(500);
        queue.set_now(100);
        assert_eq!(queue.now_ms(), 500);

        queue.schedule(1, 50, "x");
        assert_eq!(queue.next_due(), Some(550));
    }

    #[test]
    fn test_pop_due_advances_clock_to_due_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(1, 100, "a");
        let fired = queue.pop_due(1_000).unwrap();
        assert_eq!(fired.due_ms, 100);
        assert_eq!(queue.now_ms(), 100);

        // A follow-up scheduled from inside the handler is relative to 100ms
        queue.schedule(1, 100, "b");
        assert_eq!(queue.next_due(), Some(200));
    }
}
