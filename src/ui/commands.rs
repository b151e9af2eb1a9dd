//! Queued tree mutations.
//!
//! Event handlers only see their event arguments. To change the tree they
//! push a closure onto [`Commands`]; the [`Ui`] runs it at the start of the
//! next update, outside any tree walk.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use super::Ui;

type Command = Box<dyn FnOnce(&mut Ui)>;

/// Cloneable handle to a [`Ui`]'s command queue.
#[derive(Clone, Default)]
pub struct Commands {
    queue: Rc<RefCell<VecDeque<Command>>>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command` to run with the [`Ui`] on the next update.
    pub fn push(&self, command: impl FnOnce(&mut Ui) + 'static) {
        self.queue.borrow_mut().push_back(Box::new(command));
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub(crate) fn pop(&self) -> Option<Command> {
        self.queue.borrow_mut().pop_front()
    }
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commands")
            .field("pending", &self.pending_count())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
