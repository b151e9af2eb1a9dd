//! Errors from structural tree operations.

use super::node::WidgetId;

/// Why a tree mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("widget {0:?} is not in the tree")]
    NoSuchWidget(WidgetId),

    #[error("widget {0:?} has no layout and cannot hold children")]
    NotAContainer(WidgetId),

    #[error("widget {child:?} already belongs to {parent:?}; detach it first")]
    AlreadyAttached { child: WidgetId, parent: WidgetId },

    #[error("attaching {child:?} under {parent:?} would make it its own ancestor")]
    WouldCycle { child: WidgetId, parent: WidgetId },
}
