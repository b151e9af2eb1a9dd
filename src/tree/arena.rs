//! Tree operations: insert, attach, detach, remove, walk, layout, hit-test.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace, warn};

use crate::event::InputEvent;
use crate::geometry::{Region, Size};
use crate::layout::{LayoutChild, LayoutData};
use crate::render::Surface;
use crate::widget::{LifecycleTracker, Widget, WidgetState};

use super::error::TreeError;
use super::node::{WidgetId, WidgetNode};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

/// The widget tree, backed by a slotmap arena.
///
/// All widgets live in a single `SlotMap`. Parent/child links are kept in
/// secondary maps: a parent owns its children through the arena, and the
/// child-to-parent link is a plain id, so dropping the tree drops everything.
///
/// The tree may hold several roots: the main widget tree, window contents, and
/// overlay visuals all live in the same arena.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    /// Preferred size of each child as of its parent's last layout pass.
    measured: SecondaryMap<WidgetId, Option<Size>>,
    lifecycle: LifecycleTracker,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            measured: SecondaryMap::new(),
            lifecycle: LifecycleTracker::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Insert a widget with no parent.
    ///
    /// If the widget hands over a layout it becomes a container.
    pub fn insert(&mut self, widget: impl Widget + 'static) -> WidgetId {
        self.insert_boxed(Box::new(widget))
    }

    /// Insert an already boxed widget with no parent.
    ///
    /// Children the widget declared at construction are inserted under it.
    pub fn insert_boxed(&mut self, mut widget: Box<dyn Widget>) -> WidgetId {
        let layout = widget.take_layout();
        let declared = widget.take_children();
        let id = self.nodes.insert(WidgetNode::new(widget, layout));
        self.children.insert(id, Vec::new());
        self.nodes[id].widget.on_mount(id);
        self.lifecycle.on_mount(id);
        trace!(target: "trellis::tree", ?id, widget = self.nodes[id].widget_type(), "mounted");

        if !declared.is_empty() && !self.nodes[id].is_container() {
            warn!(target: "trellis::tree", ?id, "widget without a layout declared children; dropping them");
            return id;
        }
        for (child, data) in declared {
            let child_id = self.insert_boxed(child);
            self.nodes[child_id].layout_data = data;
            self.link(id, child_id);
        }
        id
    }

    /// Insert `widget` as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: WidgetId,
        widget: impl Widget + 'static,
    ) -> Result<WidgetId, TreeError> {
        self.add_child_with(parent, widget, LayoutData::None)
    }

    /// Insert `widget` as the last child of `parent` with the given layout data.
    pub fn add_child_with(
        &mut self,
        parent: WidgetId,
        widget: impl Widget + 'static,
        data: impl Into<LayoutData>,
    ) -> Result<WidgetId, TreeError> {
        self.check_container(parent)?;
        let id = self.insert(widget);
        self.nodes[id].layout_data = data.into();
        self.link(parent, id);
        Ok(id)
    }

    /// Attach a parentless widget as the last child of `parent`.
    ///
    /// A widget has at most one parent: attaching one that already has a
    /// parent fails with [`TreeError::AlreadyAttached`].
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        if !self.contains(child) {
            return Err(TreeError::NoSuchWidget(child));
        }
        self.check_container(parent)?;
        if let Some(existing) = self.parent(child) {
            return Err(TreeError::AlreadyAttached { child, parent: existing });
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(TreeError::WouldCycle { child, parent });
        }
        self.link(parent, child);
        self.lifecycle.on_reparent(child, Some(parent));
        Ok(())
    }

    /// Detach `child` from its parent, keeping its subtree intact.
    ///
    /// Detaching a root is a no-op.
    pub fn detach(&mut self, child: WidgetId) -> Result<(), TreeError> {
        if !self.contains(child) {
            return Err(TreeError::NoSuchWidget(child));
        }
        if let Some(old_parent) = self.unlink(child) {
            self.mark_dirty(old_parent);
            self.lifecycle.on_reparent(child, None);
        }
        Ok(())
    }

    /// Move `child` (with its subtree) to the end of `new_parent`'s children.
    pub fn reparent(&mut self, child: WidgetId, new_parent: WidgetId) -> Result<(), TreeError> {
        if !self.contains(child) {
            return Err(TreeError::NoSuchWidget(child));
        }
        self.check_container(new_parent)?;
        if new_parent == child || self.ancestors(new_parent).contains(&child) {
            return Err(TreeError::WouldCycle { child, parent: new_parent });
        }
        self.detach(child)?;
        self.attach(new_parent, child)
    }

    /// Remove a widget and all its descendants.
    ///
    /// Returns the removed widget, or `None` if it didn't exist.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.unlink(id) {
            self.mark_dirty(parent_id);
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.measured.remove(current);
            self.lifecycle.on_unmount(current);
            if let Some(node) = self.nodes.remove(current) {
                if current == id {
                    removed = Some(node.widget);
                }
            }
        }

        debug!(target: "trellis::tree", ?id, remaining = self.nodes.len(), "removed subtree");
        removed
    }

    fn check_container(&self, id: WidgetId) -> Result<(), TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::NoSuchWidget(id))?;
        if node.is_container() {
            Ok(())
        } else {
            Err(TreeError::NotAContainer(id))
        }
    }

    fn link(&mut self, parent: WidgetId, child: WidgetId) {
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
        self.mark_dirty(parent);
    }

    fn unlink(&mut self, child: WidgetId) -> Option<WidgetId> {
        let parent = self.parent.remove(child)?;
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&c| c != child);
        }
        Some(parent)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Get the parent of a widget, if it has one.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Children in z-order. Empty if the widget has none or does not exist.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to its root, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// The topmost ancestor of `id` (or `id` itself for a root).
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    pub fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    /// The widget at `id`, downcast to `T`.
    pub fn widget<T: Widget + 'static>(&self, id: WidgetId) -> Option<&T> {
        self.nodes.get(id)?.widget.as_any().downcast_ref::<T>()
    }

    /// The widget at `id`, downcast to `T`, mutably.
    pub fn widget_mut<T: Widget + 'static>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.nodes.get_mut(id)?.widget.as_any_mut().downcast_mut::<T>()
    }

    pub fn rect(&self, id: WidgetId) -> Option<Region> {
        self.nodes.get(id).map(WidgetNode::rect)
    }

    /// Whether the widget and all its ancestors are enabled.
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.enabled)
            && self
                .ancestors(id)
                .into_iter()
                .all(|a| self.nodes.get(a).is_some_and(|n| n.enabled))
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.enabled = enabled;
        }
    }

    /// The tree-owned state of `id` as widgets see it.
    pub fn state(&self, id: WidgetId) -> Option<WidgetState> {
        let node = self.nodes.get(id)?;
        Some(WidgetState { id, rect: node.rect, enabled: self.is_enabled(id) })
    }

    /// Number of widgets in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut LifecycleTracker {
        &mut self.lifecycle
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Replace a widget's layout data and mark its parent's layout dirty.
    pub fn set_layout_data(
        &mut self,
        id: WidgetId,
        data: impl Into<LayoutData>,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::NoSuchWidget(id))?;
        node.layout_data = data.into();
        if let Some(parent) = self.parent(id) {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    /// Mark a container's layout dirty. No-op for leaves.
    pub fn mark_dirty(&mut self, id: WidgetId) {
        if let Some(layout) = self.nodes.get_mut(id).and_then(|n| n.layout.as_mut()) {
            layout.mark_dirty();
        }
    }

    /// Whether `id` is a container whose layout still has to run.
    pub fn is_layout_dirty(&self, id: WidgetId) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.layout.as_ref())
            .is_some_and(|l| l.is_dirty())
    }

    /// Mark every container in the subtree dirty.
    ///
    /// Use after a change the layouts cannot see, such as a label that
    /// altered a widget's preferred size.
    pub fn request_relayout(&mut self, id: WidgetId) {
        for node in self.walk_depth_first(id) {
            self.mark_dirty(node);
        }
    }

    /// The preferred size of `id`.
    ///
    /// Leaves answer for themselves. A container's own answer wins when it
    /// has one; otherwise its layout sizes it from its children.
    pub fn preferred_size(&mut self, id: WidgetId) -> Option<Size> {
        let node = self.nodes.get_mut(id)?;
        let own = node.widget.preferred_size();
        if own.is_some() || node.layout.is_none() {
            return own;
        }
        let children = self.children(id).to_vec();
        let items = self.layout_children(&children);
        let layout = self.nodes.get(id)?.layout.as_ref()?;
        Some(layout.preferred_size(&items))
    }

    fn layout_children(&mut self, children: &[WidgetId]) -> Vec<LayoutChild> {
        let mut items = Vec::with_capacity(children.len());
        for &child in children {
            let preferred = self.preferred_size(child);
            if let Some(node) = self.nodes.get(child) {
                items.push(LayoutChild {
                    preferred,
                    data: node.layout_data,
                    locateable: node.widget.is_locateable(),
                });
            }
        }
        items
    }

    /// Assign a location. A container whose rect changes is marked dirty.
    pub fn set_location(&mut self, id: WidgetId, rect: Region) {
        let Some(node) = self.nodes.get_mut(id) else { return };
        if node.rect != rect {
            node.rect = rect;
            if let Some(layout) = node.layout.as_mut() {
                layout.mark_dirty();
            }
        }
        node.widget.set_location(rect);
    }

    /// Run every dirty layout in the subtree rooted at `id`, parents first.
    ///
    /// A container whose children report a different preferred size than at
    /// its last pass is marked dirty first, so a relabelled widget gets room.
    pub fn layout(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else { return };
        let children = self.children(id).to_vec();
        if node.is_container() {
            let items = self.layout_children(&children);
            let resized = children
                .iter()
                .zip(&items)
                .any(|(&child, item)| self.measured.get(child) != Some(&item.preferred));
            if resized && !self.is_layout_dirty(id) {
                trace!(target: "trellis::layout", ?id, "child preferred size changed");
                self.mark_dirty(id);
            }
            if self.is_layout_dirty(id) {
                let rect = self.nodes[id].rect;
                let placements = match self.nodes[id].layout.as_mut() {
                    Some(layout) => layout.layout(&items, rect),
                    None => Vec::new(),
                };
                trace!(target: "trellis::layout", ?id, placed = placements.len(), "layout");
                for (&child, item) in children.iter().zip(&items) {
                    self.measured.insert(child, item.preferred);
                }
                for placement in placements {
                    if let Some(&child) = children.get(placement.index) {
                        self.set_location(child, placement.rect);
                    }
                }
            }
        }
        for child in children {
            self.layout(child);
        }
    }

    // -----------------------------------------------------------------------
    // Input and painting
    // -----------------------------------------------------------------------

    /// The frontmost widget under (x, y) in the subtree rooted at `root`.
    ///
    /// Content painted outside a widget's rect (an open drop-down) is checked
    /// first. Otherwise the deepest hit wins, and among siblings the later one.
    /// A child can be hit outside its parent's rect.
    pub fn widget_at(&self, root: WidgetId, x: i32, y: i32) -> Option<WidgetId> {
        let order = self.walk_depth_first(root);
        for &id in order.iter().rev() {
            if let Some(state) = self.state(id) {
                if self.nodes[id].widget.overlay_contains(&state, x, y) {
                    return Some(id);
                }
            }
        }
        self.hit(root, x, y)
    }

    fn hit(&self, id: WidgetId, x: i32, y: i32) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        for &child in self.children(id).iter().rev() {
            if let Some(found) = self.hit(child, x, y) {
                return Some(found);
            }
        }
        let state = self.state(id)?;
        node.widget.hit_test(&state, x, y).then_some(id)
    }

    /// Offer `event` to `target`, then to each ancestor until one consumes it.
    ///
    /// Disabled widgets are skipped. Returns the widget that consumed it.
    pub fn dispatch_input(&mut self, target: WidgetId, event: &InputEvent) -> Option<WidgetId> {
        let mut path = vec![target];
        path.extend(self.ancestors(target));
        for id in path {
            let Some(state) = self.state(id) else { continue };
            if !state.enabled {
                continue;
            }
            if self.nodes[id].widget.handle_input(event, &state) {
                return Some(id);
            }
        }
        None
    }

    /// Offer `event` to `target` only, whatever its enablement.
    pub fn deliver_input(&mut self, target: WidgetId, event: &InputEvent) -> bool {
        match self.state(target) {
            Some(state) => self.nodes[target].widget.handle_input(event, &state),
            None => false,
        }
    }

    /// Paint the subtree rooted at `root` top-down in child order, then its
    /// overlay content.
    pub fn render(&mut self, root: WidgetId, surface: &mut dyn Surface) {
        let order = self.walk_depth_first(root);
        for &id in &order {
            if let Some(state) = self.state(id) {
                self.nodes[id].widget.render(&state, surface);
            }
        }
        for &id in &order {
            if let Some(state) = self.state(id) {
                self.nodes[id].widget.render_overlay(&state, surface);
            }
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseEvent;
    use crate::layout::{Layouter, RowLayout, RowLayoutData};
    use crate::render::{Canvas, CellStyle};
    use crate::widget::LifecycleEvent;
    use pretty_assertions::assert_eq;
    use std::any::Any;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Leaf with a fixed preferred size that counts location updates.
    struct Leaf {
        size: Option<Size>,
        moves: Rc<Cell<u32>>,
        consume: bool,
        label: char,
    }

    impl Leaf {
        fn new(w: i32, h: i32) -> Self {
            Self { size: Some(Size::new(w, h)), moves: Rc::new(Cell::new(0)), consume: false, label: '#' }
        }
    }

    impl Widget for Leaf {
        fn widget_type(&self) -> &str {
            "Leaf"
        }

        fn preferred_size(&mut self) -> Option<Size> {
            self.size
        }

        fn set_location(&mut self, _rect: Region) {
            self.moves.set(self.moves.get() + 1);
        }

        fn handle_input(&mut self, _event: &InputEvent, _state: &WidgetState) -> bool {
            self.consume
        }

        fn render(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
            let text: String = std::iter::repeat(self.label).take(state.rect.width as usize).collect();
            surface.draw_text(state.rect.x, state.rect.y, &text, &CellStyle::new());
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// Container with a row layout.
    struct Panel {
        layout: Option<RowLayout>,
        consume: bool,
    }

    impl Panel {
        fn row(spacing: i32) -> Self {
            Self { layout: Some(RowLayout::horizontal().with_spacing(spacing)), consume: false }
        }
    }

    impl Widget for Panel {
        fn widget_type(&self) -> &str {
            "Panel"
        }

        fn take_layout(&mut self) -> Option<Box<dyn Layouter>> {
            self.layout.take().map(|l| Box::new(l) as Box<dyn Layouter>)
        }

        fn handle_input(&mut self, _event: &InputEvent, _state: &WidgetState) -> bool {
            self.consume
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel::row(0));
        let a = tree.add_child(root, Panel::row(1)).unwrap();
        let b = tree.add_child(root, Leaf::new(5, 1)).unwrap();
        let c = tree.add_child(a, Leaf::new(2, 1)).unwrap();
        let d = tree.add_child(a, Leaf::new(3, 1)).unwrap();
        (tree, root, a, b, c, d)
    }

    #[test]
    fn children_and_parents() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn ancestors_and_root_of() {
        let (tree, root, a, _b, c, _d) = build_tree();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.ancestors(root).is_empty());
        assert_eq!(tree.root_of(c), root);
        assert_eq!(tree.root_of(root), root);
    }

    #[test]
    fn walk_depth_first() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk_depth_first(a), vec![a, c, d]);
    }

    #[test]
    fn leaf_cannot_hold_children() {
        let (mut tree, _root, _a, b, ..) = build_tree();
        assert_eq!(tree.add_child(b, Leaf::new(1, 1)), Err(TreeError::NotAContainer(b)));
    }

    #[test]
    fn attach_requires_detach_first() {
        let (mut tree, root, a, _b, c, _d) = build_tree();
        assert_eq!(
            tree.attach(root, c),
            Err(TreeError::AlreadyAttached { child: c, parent: a })
        );
        tree.detach(c).unwrap();
        assert_eq!(tree.parent(c), None);
        assert_eq!(tree.children(a).len(), 1);
        tree.attach(root, c).unwrap();
        assert_eq!(tree.children(root).last(), Some(&c));
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        let other = tree.add_child(root, Panel::row(0)).unwrap();
        tree.reparent(a, other).unwrap();
        assert_eq!(tree.children(root), &[b, other]);
        assert_eq!(tree.ancestors(d), vec![a, other, root]);
        assert_eq!(tree.children(a), &[c, d]);
    }

    #[test]
    fn reparent_under_own_descendant_is_refused() {
        let (mut tree, root, a, ..) = build_tree();
        let inner = tree.add_child(a, Panel::row(0)).unwrap();
        assert_eq!(tree.reparent(a, inner), Err(TreeError::WouldCycle { child: a, parent: inner }));
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        let removed = tree.remove(a).unwrap();
        assert_eq!(removed.widget_type(), "Panel");
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert_eq!(tree.children(root), &[b]);
        assert!(tree.remove(a).is_none());
    }

    #[test]
    fn lifecycle_records_mount_and_unmount() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel::row(0));
        let leaf = tree.add_child(root, Leaf::new(1, 1)).unwrap();
        tree.remove(leaf);
        assert_eq!(
            tree.lifecycle_mut().drain(),
            vec![
                LifecycleEvent::Mount { widget: root },
                LifecycleEvent::Mount { widget: leaf },
                LifecycleEvent::Unmount { widget: leaf },
            ]
        );
    }

    #[test]
    fn downcast_access() {
        let (mut tree, _root, a, b, ..) = build_tree();
        assert!(tree.widget::<Leaf>(b).is_some());
        assert!(tree.widget::<Leaf>(a).is_none());
        tree.widget_mut::<Leaf>(b).unwrap().label = 'x';
        assert_eq!(tree.widget::<Leaf>(b).unwrap().label, 'x');
    }

    #[test]
    fn disabled_ancestor_disables_descendants() {
        let (mut tree, _root, a, b, c, _d) = build_tree();
        tree.set_enabled(a, false);
        assert!(!tree.is_enabled(c));
        assert!(tree.is_enabled(b));
        assert!(tree.node(c).unwrap().is_enabled());
    }

    #[test]
    fn preferred_size_recurses_through_layouts() {
        let (mut tree, root, a, ..) = build_tree();
        // a: 2 + 1 + 3 wide; root: a (6) + b (5).
        assert_eq!(tree.preferred_size(a), Some(Size::new(6, 1)));
        assert_eq!(tree.preferred_size(root), Some(Size::new(11, 1)));
    }

    #[test]
    fn layout_places_nested_children() {
        let (mut tree, root, a, b, c, d) = build_tree();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);
        assert_eq!(tree.rect(a), Some(Region::new(0, 0, 6, 1)));
        assert_eq!(tree.rect(b), Some(Region::new(6, 0, 5, 1)));
        assert_eq!(tree.rect(c), Some(Region::new(0, 0, 2, 1)));
        assert_eq!(tree.rect(d), Some(Region::new(3, 0, 3, 1)));
        assert!(!tree.is_layout_dirty(root));
        assert!(!tree.is_layout_dirty(a));
    }

    #[test]
    fn clean_layout_assigns_nothing() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel::row(0));
        let leaf = Leaf::new(3, 1);
        let moves = leaf.moves.clone();
        tree.add_child(root, leaf).unwrap();
        tree.set_location(root, Region::new(0, 0, 10, 1));

        tree.layout(root);
        assert_eq!(moves.get(), 1);
        tree.layout(root);
        assert_eq!(moves.get(), 1);

        tree.mark_dirty(root);
        tree.layout(root);
        assert_eq!(moves.get(), 2);
    }

    #[test]
    fn grown_child_triggers_relayout() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel::row(0));
        let first = tree.add_child(root, Leaf::new(3, 1)).unwrap();
        let second = tree.add_child(root, Leaf::new(2, 1)).unwrap();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);
        assert_eq!(tree.rect(second), Some(Region::new(3, 0, 2, 1)));

        tree.widget_mut::<Leaf>(first).unwrap().size = Some(Size::new(6, 1));
        tree.layout(root);
        assert_eq!(tree.rect(first), Some(Region::new(0, 0, 6, 1)));
        assert_eq!(tree.rect(second), Some(Region::new(6, 0, 2, 1)));
    }

    #[test]
    fn structural_changes_mark_parent_dirty() {
        let (mut tree, root, a, _b, c, _d) = build_tree();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);

        tree.set_layout_data(c, RowLayoutData::new().max_width(1)).unwrap();
        assert!(tree.is_layout_dirty(a));
        tree.layout(root);
        assert_eq!(tree.rect(c).map(|r| r.width), Some(1));

        tree.remove(c);
        assert!(tree.is_layout_dirty(a));
    }

    #[test]
    fn resizing_a_container_marks_it_dirty() {
        let (mut tree, root, ..) = build_tree();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);
        tree.set_location(root, Region::new(0, 0, 20, 1));
        assert!(!tree.is_layout_dirty(root));
        tree.set_location(root, Region::new(0, 0, 30, 1));
        assert!(tree.is_layout_dirty(root));
    }

    #[test]
    fn request_relayout_marks_whole_subtree() {
        let (mut tree, root, a, ..) = build_tree();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);
        tree.request_relayout(root);
        assert!(tree.is_layout_dirty(root));
        assert!(tree.is_layout_dirty(a));
    }

    #[test]
    fn widget_at_returns_deepest_hit() {
        let (mut tree, root, a, b, c, d) = build_tree();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);
        assert_eq!(tree.widget_at(root, 0, 0), Some(c));
        assert_eq!(tree.widget_at(root, 4, 0), Some(d));
        assert_eq!(tree.widget_at(root, 2, 0), Some(a));
        assert_eq!(tree.widget_at(root, 7, 0), Some(b));
        assert_eq!(tree.widget_at(root, 15, 0), Some(root));
        assert_eq!(tree.widget_at(root, 25, 0), None);
    }

    #[test]
    fn dispatch_bubbles_to_consuming_ancestor() {
        let (mut tree, root, a, _b, c, _d) = build_tree();
        tree.widget_mut::<Panel>(a).unwrap().consume = true;
        let event = InputEvent::Mouse(MouseEvent::down(0, 0));
        assert_eq!(tree.dispatch_input(c, &event), Some(a));

        tree.set_enabled(a, false);
        assert_eq!(tree.dispatch_input(c, &event), None);

        tree.widget_mut::<Panel>(root).unwrap().consume = true;
        tree.set_enabled(a, true);
        tree.widget_mut::<Panel>(a).unwrap().consume = false;
        assert_eq!(tree.dispatch_input(c, &event), Some(root));
    }

    #[test]
    fn render_paints_in_child_order() {
        let (mut tree, root, _a, b, c, _d) = build_tree();
        tree.widget_mut::<Leaf>(c).unwrap().label = 'c';
        tree.widget_mut::<Leaf>(b).unwrap().label = 'b';
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);

        let mut canvas = Canvas::new(12, 1);
        tree.render(root, &mut canvas);
        assert_eq!(canvas.to_text(), "cc ###bbbbb");
    }
}
