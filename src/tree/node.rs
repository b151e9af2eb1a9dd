//! Node types: WidgetId, WidgetNode.

use std::fmt;

use slotmap::new_key_type;

use crate::geometry::Region;
use crate::layout::{LayoutData, Layouter};
use crate::widget::Widget;

new_key_type! {
    /// Unique identifier for a widget in a [`WidgetTree`](super::WidgetTree).
    ///
    /// Copy and lightweight. Registries key on it, so identity is by node,
    /// never by value. A removed widget's id is never reused.
    pub struct WidgetId;
}

/// One node in the tree: the widget plus the state the tree manages for it.
pub struct WidgetNode {
    pub(crate) widget: Box<dyn Widget>,
    /// Present for containers only.
    pub(crate) layout: Option<Box<dyn Layouter>>,
    pub(crate) rect: Region,
    pub(crate) enabled: bool,
    pub(crate) layout_data: LayoutData,
}

impl WidgetNode {
    pub(crate) fn new(widget: Box<dyn Widget>, layout: Option<Box<dyn Layouter>>) -> Self {
        Self {
            widget,
            layout,
            rect: Region::EMPTY,
            enabled: true,
            layout_data: LayoutData::None,
        }
    }

    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    pub fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    pub fn rect(&self) -> Region {
        self.rect
    }

    /// This node's own flag; ancestors may still disable it.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn layout_data(&self) -> &LayoutData {
        &self.layout_data
    }

    /// Whether this node owns a layout and may hold children.
    pub fn is_container(&self) -> bool {
        self.layout.is_some()
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("widget_type", &self.widget.widget_type())
            .field("rect", &self.rect)
            .field("enabled", &self.enabled)
            .field("layout_data", &self.layout_data)
            .field("container", &self.layout.is_some())
            .finish()
    }
}
