//! Widget lifecycle: mount, unmount, reparent.
//!
//! The [`LifecycleTracker`] records which widgets are currently in the tree and
//! accumulates lifecycle events that the frame driver drains once per update.

use std::collections::HashSet;

use crate::tree::WidgetId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during a widget's time in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A widget was inserted into the tree.
    Mount { widget: WidgetId },
    /// A widget was removed from the tree and dropped.
    Unmount { widget: WidgetId },
    /// A widget moved under a new parent, or became a root (`parent: None`).
    Reparent { widget: WidgetId, parent: Option<WidgetId> },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks mounted widgets and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    mounted: HashSet<WidgetId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a widget has been mounted.
    ///
    /// Mounting twice records a single event.
    pub fn on_mount(&mut self, id: WidgetId) {
        if self.mounted.insert(id) {
            self.pending.push(LifecycleEvent::Mount { widget: id });
        }
    }

    /// Record that a widget has been unmounted. No-op for unknown widgets.
    pub fn on_unmount(&mut self, id: WidgetId) {
        if self.mounted.remove(&id) {
            self.pending.push(LifecycleEvent::Unmount { widget: id });
        }
    }

    /// Record a parent change of a mounted widget.
    pub fn on_reparent(&mut self, id: WidgetId, parent: Option<WidgetId>) {
        if self.mounted.contains(&id) {
            self.pending.push(LifecycleEvent::Reparent { widget: id, parent });
        }
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.mounted.contains(&id)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
