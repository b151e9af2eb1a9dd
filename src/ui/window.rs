//! Windows: widget trees floating above the main tree.
//!
//! Windows paint after the main tree, in the order they were added, and the
//! topmost window under the cursor receives input first. A modal window
//! swallows input aimed at anything beneath it.

use std::fmt;

use slotmap::new_key_type;

use crate::geometry::Region;
use crate::tree::WidgetId;
use crate::widget::Widget;

new_key_type! {
    /// Handle of a window added to a [`Ui`](super::Ui).
    pub struct WindowId;
}

/// A window waiting to be added with [`Ui::add_window`](super::Ui::add_window).
pub struct Window {
    pub(crate) contents: Box<dyn Widget>,
    pub(crate) rect: Option<Region>,
    pub(crate) modal: bool,
}

impl Window {
    pub fn new(contents: impl Widget + 'static) -> Self {
        Self { contents: Box::new(contents), rect: None, modal: false }
    }

    /// Place the window at `rect` instead of centering it at its preferred size.
    pub fn with_rect(mut self, rect: Region) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Block input to everything beneath this window.
    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("contents", &self.contents.widget_type())
            .field("rect", &self.rect)
            .field("modal", &self.modal)
            .finish()
    }
}

/// A window that lives in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenWindow {
    pub(crate) root: WidgetId,
    pub(crate) modal: bool,
}
