//! Frame-polled one-shot timers.
//!
//! [`Ui::after`](super::Ui::after) schedules an action and returns a
//! [`TimerHandle`]. Dropping the handle cancels the timer; call
//! [`TimerHandle::detach`] to let it run regardless. Due timers fire during
//! [`Ui::update_at`](super::Ui::update_at), in due order.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::tree::WidgetId;

use super::Ui;

pub(crate) type TimerAction = Box<dyn FnOnce(&mut Ui)>;

// ---------------------------------------------------------------------------
// TimerHandle
// ---------------------------------------------------------------------------

/// Cancels its timer when dropped.
#[must_use = "dropping a TimerHandle cancels the timer; call detach() to keep it"]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
    detached: bool,
}

impl TimerHandle {
    /// Cancel now.
    pub fn cancel(self) {
        self.cancelled.set(true);
    }

    /// Let the timer run without keeping the handle.
    pub fn detach(mut self) {
        self.detached = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if !self.detached {
            self.cancelled.set(true);
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancelled", &self.cancelled.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

pub(crate) struct Timer {
    pub(crate) due: Instant,
    /// Skipped when this widget is gone from the tree by the time it fires.
    pub(crate) owner: Option<WidgetId>,
    pub(crate) cancelled: Rc<Cell<bool>>,
    pub(crate) action: TimerAction,
}

/// Pending timers, in scheduling order.
#[derive(Default)]
pub(crate) struct Timers {
    pending: Vec<Timer>,
}

impl Timers {
    pub(crate) fn schedule(&mut self, due: Instant, owner: Option<WidgetId>, action: TimerAction) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.pending.push(Timer { due, owner, cancelled: Rc::clone(&cancelled), action });
        TimerHandle { cancelled, detached: false }
    }

    /// Remove and return every timer due at `now`, earliest first.
    ///
    /// Cancelled timers are dropped on the way.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<Timer> {
        self.pending.retain(|t| !t.cancelled.get());
        let (mut due, rest): (Vec<Timer>, Vec<Timer>) =
            std::mem::take(&mut self.pending).into_iter().partition(|t| t.due <= now);
        self.pending = rest;
        // Stable: equal deadlines keep scheduling order.
        due.sort_by_key(|t| t.due);
        due
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.iter().filter(|t| !t.cancelled.get()).count()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn noop() -> TimerAction {
        Box::new(|_| {})
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let mut timers = Timers::default();
        let now = Instant::now();
        let handle = timers.schedule(now, None, noop());
        assert_eq!(timers.len(), 1);
        drop(handle);
        assert_eq!(timers.len(), 0);
        assert!(timers.take_due(now).is_empty());
    }

    #[test]
    fn detached_timers_survive() {
        let mut timers = Timers::default();
        let now = Instant::now();
        timers.schedule(now, None, noop()).detach();
        assert_eq!(timers.take_due(now).len(), 1);
    }

    #[test]
    fn take_due_orders_by_deadline() {
        let mut timers = Timers::default();
        let now = Instant::now();
        let late = timers.schedule(now + Duration::from_secs(2), None, noop());
        let early = timers.schedule(now + Duration::from_secs(1), None, noop());
        let future = timers.schedule(now + Duration::from_secs(9), None, noop());

        let due = timers.take_due(now + Duration::from_secs(3));
        assert_eq!(due.len(), 2);
        assert!(due[0].due < due[1].due);
        assert_eq!(timers.len(), 1);
        assert!(!future.is_cancelled());
        drop((late, early));
    }

    #[test]
    fn cancel_marks_handle() {
        let mut timers = Timers::default();
        let handle = timers.schedule(Instant::now(), None, noop());
        let flag = Rc::clone(&timers.pending[0].cancelled);
        handle.cancel();
        assert!(flag.get());
    }
}
