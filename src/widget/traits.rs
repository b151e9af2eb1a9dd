//! Widget trait: sizing, location, input, painting.
//!
//! Every element in the tree implements [`Widget`]. The tree owns the geometry
//! and enablement of each node and hands widgets a [`WidgetState`] snapshot
//! when it asks them to handle input or paint.

use std::any::Any;

use crate::event::InputEvent;
use crate::geometry::{Region, Size};
use crate::layout::{LayoutData, Layouter};
use crate::render::Surface;
use crate::tree::WidgetId;

// ---------------------------------------------------------------------------
// WidgetState
// ---------------------------------------------------------------------------

/// The tree-owned part of a widget, as seen by the widget itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    pub id: WidgetId,
    /// Last location assigned by a layout pass or the host.
    pub rect: Region,
    /// False when the widget or any ancestor is disabled.
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Widget is object-safe; the tree stores `Box<dyn Widget>`. Methods take
/// `&mut self` where a composite widget may need to finish building itself
/// first.
pub trait Widget {
    /// Type name, used in logs and debugging output.
    fn widget_type(&self) -> &str;

    /// The size this widget would like, or `None` if it cannot say.
    ///
    /// Layouts give size-less widgets a placeholder extent. For a container
    /// a `Some` here overrides what its layout would compute.
    fn preferred_size(&mut self) -> Option<Size> {
        None
    }

    /// Whether layouts may assign this widget a location.
    ///
    /// Non-locateable widgets still take up space in a row but keep whatever
    /// rect they already had.
    fn is_locateable(&self) -> bool {
        true
    }

    /// Called after the tree stores a new location for this widget.
    fn set_location(&mut self, _rect: Region) {}

    /// Called once when the widget is inserted into a tree.
    fn on_mount(&mut self, _id: WidgetId) {}

    /// Whether (x, y) hits this widget.
    fn hit_test(&self, state: &WidgetState, x: i32, y: i32) -> bool {
        state.rect.contains(x, y)
    }

    /// Whether (x, y) hits content this widget paints outside its own rect,
    /// such as an open drop-down. Checked before every normal hit test.
    fn overlay_contains(&self, _state: &WidgetState, _x: i32, _y: i32) -> bool {
        false
    }

    /// Handle an input event. Returns `true` if consumed, which stops bubbling.
    fn handle_input(&mut self, _event: &InputEvent, _state: &WidgetState) -> bool {
        false
    }

    /// Paint into `surface` within `state.rect`.
    fn render(&mut self, _state: &WidgetState, _surface: &mut dyn Surface) {}

    /// Paint content that must sit above the rest of the tree.
    ///
    /// Runs after every widget in the same tree has had [`render`](Widget::render).
    fn render_overlay(&mut self, _state: &WidgetState, _surface: &mut dyn Surface) {}

    /// Hand the widget's layout strategy to the tree.
    ///
    /// Called once at insertion. A widget that returns `Some` becomes a
    /// container node that may hold children.
    fn take_layout(&mut self) -> Option<Box<dyn Layouter>> {
        None
    }

    /// Hand over children declared at construction, with their layout data.
    ///
    /// Called once at insertion, after [`take_layout`](Widget::take_layout).
    fn take_children(&mut self) -> Vec<(Box<dyn Widget>, LayoutData)> {
        Vec::new()
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowLayout;
    use slotmap::SlotMap;

    struct Dummy;

    impl Widget for Dummy {
        fn widget_type(&self) -> &str {
            "Dummy"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Panel {
        layout: Option<RowLayout>,
    }

    impl Widget for Panel {
        fn widget_type(&self) -> &str {
            "Panel"
        }

        fn take_layout(&mut self) -> Option<Box<dyn Layouter>> {
            self.layout.take().map(|l| Box::new(l) as Box<dyn Layouter>)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn state(rect: Region) -> WidgetState {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        WidgetState { id: ids.insert(()), rect, enabled: true }
    }

    #[test]
    fn defaults() {
        let mut dummy = Dummy;
        let st = state(Region::new(0, 0, 4, 4));
        assert_eq!(dummy.widget_type(), "Dummy");
        assert_eq!(dummy.preferred_size(), None);
        assert!(dummy.is_locateable());
        assert!(dummy.take_layout().is_none());
        assert!(dummy.take_children().is_empty());
        assert!(!dummy.handle_input(&InputEvent::Resize { width: 1, height: 1 }, &st));
        assert!(!dummy.overlay_contains(&st, 1, 1));
    }

    #[test]
    fn default_hit_test_uses_rect() {
        let dummy = Dummy;
        let st = state(Region::new(2, 2, 3, 3));
        assert!(dummy.hit_test(&st, 2, 2));
        assert!(!dummy.hit_test(&st, 5, 2));
    }

    #[test]
    fn take_layout_hands_over_once() {
        let mut panel = Panel { layout: Some(RowLayout::new()) };
        assert!(panel.take_layout().is_some());
        assert!(panel.take_layout().is_none());
    }

    #[test]
    fn downcast_through_any() {
        let mut boxed: Box<dyn Widget> = Box::new(Dummy);
        assert!(boxed.as_any().downcast_ref::<Dummy>().is_some());
        assert!(boxed.as_any_mut().downcast_mut::<Panel>().is_none());
    }
}
