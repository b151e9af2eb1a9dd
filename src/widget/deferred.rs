//! One-shot deferred initialization for composite widgets.
//!
//! A composite widget collects its options first and builds the widgets it
//! wraps only when something actually needs them. [`DeferredInit`] holds the
//! build steps; [`ensure_init`] runs them, once, in the order they were added.
//!
//! ```
//! use trellis::widget::deferred::{ensure_init, Deferred, DeferredInit};
//!
//! struct Labelled {
//!     init: DeferredInit<Labelled>,
//!     text: String,
//!     built: Option<String>,
//! }
//!
//! impl Deferred for Labelled {
//!     fn deferred_init(&mut self) -> &mut DeferredInit<Self> {
//!         &mut self.init
//!     }
//! }
//!
//! let mut w = Labelled { init: DeferredInit::new(), text: "hi".into(), built: None };
//! w.init.append(|w: &mut Labelled| w.built = Some(w.text.to_uppercase()));
//! ensure_init(&mut w);
//! ensure_init(&mut w);
//! assert_eq!(w.built.as_deref(), Some("HI"));
//! ```

use std::fmt;

type Step<T> = Box<dyn FnOnce(&mut T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Pending,
    Running,
    Done,
}

/// Ordered initializer steps plus a has-run flag.
pub struct DeferredInit<T> {
    steps: Vec<Step<T>>,
    state: GateState,
}

impl<T> DeferredInit<T> {
    pub fn new() -> Self {
        Self { steps: Vec::new(), state: GateState::Pending }
    }

    /// Register a step.
    ///
    /// # Panics
    ///
    /// Panics if the steps have already run: a late step would never execute.
    pub fn append(&mut self, step: impl FnOnce(&mut T) + 'static) {
        assert!(
            self.state == GateState::Pending,
            "deferred init step appended after initialization started"
        );
        self.steps.push(Box::new(step));
    }

    /// Whether the steps have run.
    pub fn has_run(&self) -> bool {
        self.state == GateState::Done
    }

    pub fn pending_steps(&self) -> usize {
        self.steps.len()
    }
}

impl<T> Default for DeferredInit<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DeferredInit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredInit")
            .field("steps", &self.steps.len())
            .field("state", &self.state)
            .finish()
    }
}

/// A widget that owns a [`DeferredInit`] over itself.
pub trait Deferred: Sized {
    fn deferred_init(&mut self) -> &mut DeferredInit<Self>;
}

/// Run `target`'s pending steps if they have not run yet.
///
/// Every public operation of a composite widget calls this first. Later calls
/// are no-ops.
///
/// # Panics
///
/// Panics when called again from inside one of the steps.
pub fn ensure_init<T: Deferred>(target: &mut T) {
    let gate = target.deferred_init();
    match gate.state {
        GateState::Done => return,
        GateState::Running => panic!("deferred init re-entered from one of its own steps"),
        GateState::Pending => {}
    }
    gate.state = GateState::Running;
    let steps = std::mem::take(&mut gate.steps);
    for step in steps {
        step(target);
    }
    target.deferred_init().state = GateState::Done;
}

// ===========================================================================
// Tests
// ===========================================================================
