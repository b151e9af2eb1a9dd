//! Frame driver configuration.

use std::time::Duration;

use crate::geometry::{Offset, Size};

/// Configuration for a [`Ui`](super::Ui).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Initial size of the host surface; the main tree fills it.
    pub viewport: Size,
    /// How long the cursor must rest on a widget before its tooltip shows.
    pub tooltip_delay: Duration,
    /// Tooltip position relative to the cursor.
    pub tooltip_offset: Offset,
    /// Whether tooltips stay where they appeared.
    pub tooltip_sticky: bool,
    /// Manhattan distance a press must travel to become a drag.
    pub drag_min_distance: i32,
    /// Drag visual position relative to the cursor.
    pub drag_offset: Offset,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(80, 24),
            tooltip_delay: Duration::ZERO,
            tooltip_offset: Offset::new(1, 1),
            tooltip_sticky: false,
            drag_min_distance: 2,
            drag_offset: Offset::new(1, 1),
        }
    }
}

impl UiConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn with_tooltip_delay(mut self, delay: Duration) -> Self {
        self.tooltip_delay = delay;
        self
    }

    pub fn with_tooltip_offset(mut self, offset: Offset) -> Self {
        self.tooltip_offset = offset;
        self
    }

    pub fn with_tooltip_sticky(mut self, sticky: bool) -> Self {
        self.tooltip_sticky = sticky;
        self
    }

    pub fn with_drag_min_distance(mut self, distance: i32) -> Self {
        self.drag_min_distance = distance;
        self
    }

    pub fn with_drag_offset(mut self, offset: Offset) -> Self {
        self.drag_offset = offset;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
