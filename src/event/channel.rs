//! Typed publish/subscribe event channel.
//!
//! An [`Event<A>`] holds an ordered list of handlers taking `&A`. Firing either
//! runs every handler immediately, in registration order, or enqueues a single
//! invocation on a [`DeferredQueue`] that runs when the frame driver drains it.
//!
//! Handlers registered while a fire is in progress only see later fires: each
//! fire iterates over a snapshot of the handler list taken when it starts.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::deferred::DeferredQueue;

type Handler<A> = Rc<dyn Fn(&A)>;

// ---------------------------------------------------------------------------
// FireMode
// ---------------------------------------------------------------------------

/// When handlers run relative to the call to [`Event::fire`].
#[derive(Clone, Debug)]
pub enum FireMode {
    /// Handlers run synchronously inside `fire`.
    Immediate,
    /// `fire` enqueues one invocation on the queue; handlers run when it drains.
    Deferred(DeferredQueue),
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A typed event channel.
///
/// Cloning an `Event` yields another handle to the same handler list, which is
/// how composite widgets expose an inner widget's event without copying it.
pub struct Event<A> {
    handlers: Rc<RefCell<Vec<Handler<A>>>>,
    mode: FireMode,
}

impl<A: 'static> Event<A> {
    /// An event whose handlers run synchronously.
    pub fn new() -> Self {
        Self {
            handlers: Rc::new(RefCell::new(Vec::new())),
            mode: FireMode::Immediate,
        }
    }

    /// An event whose fires are queued on `queue`.
    pub fn deferred(queue: &DeferredQueue) -> Self {
        Self {
            handlers: Rc::new(RefCell::new(Vec::new())),
            mode: FireMode::Deferred(queue.clone()),
        }
    }

    /// The firing mode.
    pub fn mode(&self) -> &FireMode {
        &self.mode
    }

    /// Append a handler.
    pub fn add_handler(&self, handler: impl Fn(&A) + 'static) {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Fire the event with `args`.
    pub fn fire(&self, args: A) {
        match &self.mode {
            FireMode::Immediate => Self::dispatch(&self.handlers, &args),
            FireMode::Deferred(queue) => {
                let handlers = Rc::clone(&self.handlers);
                queue.push(move || Self::dispatch(&handlers, &args));
            }
        }
    }

    fn dispatch(handlers: &RefCell<Vec<Handler<A>>>, args: &A) {
        // Snapshot so handlers can register more handlers without a borrow conflict.
        let snapshot: Vec<Handler<A>> = handlers.borrow().iter().cloned().collect();
        for handler in snapshot {
            handler(args);
        }
    }
}

impl<A: 'static> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Event<A> {
    fn clone(&self) -> Self {
        Self {
            handlers: Rc::clone(&self.handlers),
            mode: self.mode.clone(),
        }
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.handlers.borrow().len())
            .field("mode", &self.mode)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
