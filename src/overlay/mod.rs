//! Floating overlays: tooltips and drag-and-drop.
//!
//! Each overlay pairs a controller, driven by the [`Ui`](crate::ui::Ui) every
//! frame, with a host-supplied contents creator that decides whether a widget
//! gets an overlay at all and builds its visual. Visuals are extra roots in
//! the same [`WidgetTree`] and paint after everything else.

pub mod drag_drop;
pub mod tooltip;

use std::collections::HashSet;

use crate::geometry::{Offset, Size};
use crate::layout::PLACEHOLDER_SIZE;
use crate::tree::{WidgetId, WidgetTree};

pub use drag_drop::{DragAndDrop, DragAndDropDroppedEventArgs, DragContents, DragContentsCreator, DragLabels};
pub use tooltip::{ToolTip, ToolTipContents, ToolTipContentsCreator};

/// Whether `widget` or any of its ancestors is in `registered`.
pub fn in_registered_subtree(tree: &WidgetTree, widget: WidgetId, registered: &HashSet<WidgetId>) -> bool {
    registered.contains(&widget) || tree.ancestors(widget).iter().any(|id| registered.contains(id))
}

/// Size a floating visual, put its top-left corner at `at`, and lay it out.
pub(crate) fn place_visual(tree: &mut WidgetTree, visual: WidgetId, at: Offset) {
    let size: Size = tree.preferred_size(visual).unwrap_or(PLACEHOLDER_SIZE);
    tree.set_location(visual, size.at(at));
    tree.request_relayout(visual);
    tree.layout(visual);
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Container, Text};

    #[test]
    fn registered_subtree_walks_ancestors() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::column());
        let panel = tree.add_child(root, Container::anchored()).unwrap();
        let inner = tree.add_child(panel, Container::anchored()).unwrap();
        let leaf = tree.add_child(inner, Text::new("x")).unwrap();
        let sibling = tree.add_child(root, Text::new("y")).unwrap();

        let registered: HashSet<WidgetId> = [panel].into_iter().collect();
        assert!(in_registered_subtree(&tree, panel, &registered));
        assert!(in_registered_subtree(&tree, leaf, &registered));
        assert!(!in_registered_subtree(&tree, sibling, &registered));
        assert!(!in_registered_subtree(&tree, root, &registered));
    }

    #[test]
    fn place_visual_uses_preferred_size() {
        let mut tree = WidgetTree::new();
        let visual = tree.insert(Text::new("hello"));
        place_visual(&mut tree, visual, Offset::new(3, 4));
        assert_eq!(tree.rect(visual), Some(crate::geometry::Region::new(3, 4, 5, 1)));
    }
}
