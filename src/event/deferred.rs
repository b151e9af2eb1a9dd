//! Run-later queue for deferred event firing.
//!
//! [`DeferredQueue`] collects actions enqueued by deferred-mode
//! [`Event`](super::channel::Event)s and runs them in FIFO order when drained.
//! The queue is an explicit, cloneable handle owned by the frame driver
//! ([`Ui`](crate::ui::Ui)); nothing about it is process-global, so tests can
//! create one and drain it by hand.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Action = Box<dyn FnOnce()>;

// ---------------------------------------------------------------------------
// DeferredQueue
// ---------------------------------------------------------------------------

/// Shared FIFO of pending deferred actions.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct DeferredQueue {
    pending: Rc<RefCell<VecDeque<Action>>>,
}

impl DeferredQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an action to run on the next drain.
    pub fn push(&self, action: impl FnOnce() + 'static) {
        self.pending.borrow_mut().push_back(Box::new(action));
    }

    /// Run every pending action in enqueue order.
    ///
    /// Actions enqueued while draining run in the same drain, after everything
    /// that was already queued. The queue is never borrowed while an action runs,
    /// so actions may freely push. Returns the number of actions executed.
    pub fn drain(&self) -> usize {
        let mut executed = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(action) = next else { break };
            action();
            executed += 1;
        }
        if executed > 0 {
            tracing::trace!(target: "trellis::event", executed, "drained deferred queue");
        }
        executed
    }

    /// Number of pending actions.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl fmt::Debug for DeferredQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &self.pending_count())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
