//! Drag-and-drop: source/target registry and the drag controller.
//!
//! A drag starts when the left button is pressed on a widget and the cursor
//! then moves at least the configured distance. The controller asks its
//! [`DragContentsCreator`] for a visual; no visual means no drag. While the
//! drag is live the visual follows the cursor and is refreshed every frame.
//! Releasing the button removes the visual and fires the deferred `dropped`
//! event.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::event::{DeferredQueue, Event, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Insets, Offset};
use crate::layout::{AnchorLayout, AnchorLayoutData};
use crate::render::CellStyle;
use crate::tree::{WidgetId, WidgetTree};
use crate::widgets::{Container, Text};

use super::{in_registered_subtree, place_visual};

// ---------------------------------------------------------------------------
// DragContentsCreator
// ---------------------------------------------------------------------------

/// Builds and refreshes the floating visual of a drag.
pub trait DragContentsCreator {
    /// Build the visual for a drag starting on `source` at (x, y).
    ///
    /// The visual is inserted into `tree` as a new root and its id returned.
    /// Returning `None` means `source` cannot be dragged.
    fn create(&mut self, tree: &mut WidgetTree, source: WidgetId, x: i32, y: i32) -> Option<WidgetId>;

    /// Refresh `visual` while the cursor is at (x, y) over `target`.
    fn update(&mut self, tree: &mut WidgetTree, target: Option<WidgetId>, x: i32, y: i32, visual: WidgetId);
}

// ---------------------------------------------------------------------------
// DragContents
// ---------------------------------------------------------------------------

/// Labels shown on the drag visual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLabels {
    pub idle: String,
    pub over_target: String,
}

impl Default for DragLabels {
    fn default() -> Self {
        Self {
            idle: "Drag Me!".into(),
            over_target: "* DROP ME! *".into(),
        }
    }
}

#[derive(Default)]
struct DragRegistry {
    sources: HashSet<WidgetId>,
    targets: HashSet<WidgetId>,
    labels: DragLabels,
    background: Option<CellStyle>,
    text: Option<WidgetId>,
}

/// Registry of drag sources and drop targets, and the stock drag visual.
///
/// A widget is a source (or target) when it or any ancestor was registered
/// as one, so registering a panel covers everything inside it. Clones share
/// the registry: keep one to register widgets and hand another to the
/// [`DragAndDrop`] controller.
#[derive(Clone, Default)]
pub struct DragContents {
    inner: Rc<RefCell<DragRegistry>>,
}

impl DragContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(self, labels: DragLabels) -> Self {
        self.inner.borrow_mut().labels = labels;
        self
    }

    pub fn with_background(self, style: CellStyle) -> Self {
        self.inner.borrow_mut().background = Some(style);
        self
    }

    pub fn add_source(&self, widget: WidgetId) {
        self.inner.borrow_mut().sources.insert(widget);
    }

    pub fn add_target(&self, widget: WidgetId) {
        self.inner.borrow_mut().targets.insert(widget);
    }

    pub fn remove_source(&self, widget: WidgetId) {
        self.inner.borrow_mut().sources.remove(&widget);
    }

    pub fn remove_target(&self, widget: WidgetId) {
        self.inner.borrow_mut().targets.remove(&widget);
    }

    /// Whether `widget` lies in a registered source's subtree.
    pub fn is_source(&self, tree: &WidgetTree, widget: WidgetId) -> bool {
        in_registered_subtree(tree, widget, &self.inner.borrow().sources)
    }

    /// Whether `widget` lies in a registered target's subtree.
    pub fn is_target(&self, tree: &WidgetTree, widget: WidgetId) -> bool {
        in_registered_subtree(tree, widget, &self.inner.borrow().targets)
    }

    /// The text widget of the live visual, if one was created.
    pub fn label_widget(&self) -> Option<WidgetId> {
        self.inner.borrow().text
    }
}

impl DragContentsCreator for DragContents {
    fn create(&mut self, tree: &mut WidgetTree, source: WidgetId, _x: i32, _y: i32) -> Option<WidgetId> {
        if !self.is_source(tree, source) {
            return None;
        }
        let (label, background) = {
            let inner = self.inner.borrow();
            (inner.labels.idle.clone(), inner.background.clone())
        };
        let mut container = Container::new(AnchorLayout::new().with_padding(Insets::symmetric(0, 1)))
            .with_child_data(Text::new(label), AnchorLayoutData::centered());
        if let Some(style) = background {
            container = container.with_background(style);
        }
        let visual = tree.insert(container);
        self.inner.borrow_mut().text = tree.children(visual).first().copied();
        Some(visual)
    }

    fn update(&mut self, tree: &mut WidgetTree, target: Option<WidgetId>, _x: i32, _y: i32, _visual: WidgetId) {
        let over_target = target.is_some_and(|t| self.is_target(tree, t));
        let inner = self.inner.borrow();
        let Some(text_id) = inner.text else { return };
        let label = if over_target { &inner.labels.over_target } else { &inner.labels.idle };
        if let Some(text) = tree.widget_mut::<Text>(text_id) {
            if text.label() != label {
                text.set_label(label.clone());
            }
        }
    }
}

impl fmt::Debug for DragContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("DragContents")
            .field("sources", &inner.sources.len())
            .field("targets", &inner.targets.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DragAndDrop
// ---------------------------------------------------------------------------

/// Arguments of [`DragAndDrop::dropped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAndDropDroppedEventArgs {
    pub source: WidgetId,
    /// The widget under the cursor at release, if any.
    pub target: Option<WidgetId>,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    /// Pressed on `source`; waiting for the cursor to move far enough.
    Armed { source: WidgetId, origin: Offset },
    Dragging { source: WidgetId, visual: WidgetId },
}

/// Drives drags over one widget tree.
pub struct DragAndDrop {
    creator: Box<dyn DragContentsCreator>,
    min_distance: i32,
    offset: Offset,
    state: DragState,
    dropped: Event<DragAndDropDroppedEventArgs>,
}

impl DragAndDrop {
    /// A controller firing `dropped` through `queue`.
    pub fn new(queue: &DeferredQueue, creator: impl DragContentsCreator + 'static) -> Self {
        Self {
            creator: Box::new(creator),
            min_distance: 2,
            offset: Offset::new(1, 1),
            state: DragState::Idle,
            dropped: Event::deferred(queue),
        }
    }

    /// Manhattan distance the cursor must travel before a press becomes a drag.
    pub fn with_min_distance(mut self, distance: i32) -> Self {
        self.min_distance = distance;
        self
    }

    /// Where the visual sits relative to the cursor.
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn on_dropped(self, handler: impl Fn(&DragAndDropDroppedEventArgs) + 'static) -> Self {
        self.dropped.add_handler(handler);
        self
    }

    pub fn dropped(&self) -> &Event<DragAndDropDroppedEventArgs> {
        &self.dropped
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The live drag visual.
    pub fn visual(&self) -> Option<WidgetId> {
        match self.state {
            DragState::Dragging { visual, .. } => Some(visual),
            _ => None,
        }
    }

    /// Observe a mouse event over the layer rooted at `root`.
    ///
    /// `root` is `None` where a modal window blocks the point: no drag arms
    /// there, and a drag in progress finds no target. Returns `true` when the
    /// event belongs to a drag and must not reach the widgets.
    pub fn handle_mouse(&mut self, tree: &mut WidgetTree, root: Option<WidgetId>, event: &MouseEvent) -> bool {
        match (self.state, event.kind) {
            (DragState::Idle, MouseAction::Down(MouseBtn::Left)) => {
                if let Some(source) = widget_under(tree, root, event.position()) {
                    self.state = DragState::Armed { source, origin: event.position() };
                }
                false
            }
            (DragState::Armed { source, origin }, MouseAction::Drag(MouseBtn::Left)) => {
                if origin.manhattan_distance(event.position()) < self.min_distance {
                    return false;
                }
                match self.creator.create(tree, source, event.x, event.y) {
                    Some(visual) => {
                        debug!(target: "trellis::overlay", ?source, ?visual, "drag started");
                        self.state = DragState::Dragging { source, visual };
                        self.refresh(tree, root, event.position());
                        true
                    }
                    None => {
                        self.state = DragState::Idle;
                        false
                    }
                }
            }
            (DragState::Armed { .. }, MouseAction::Up(MouseBtn::Left)) => {
                self.state = DragState::Idle;
                false
            }
            (DragState::Dragging { source, visual }, MouseAction::Up(MouseBtn::Left)) => {
                let target = widget_under(tree, root, event.position());
                tree.remove(visual);
                self.state = DragState::Idle;
                debug!(target: "trellis::overlay", ?source, ?target, "dropped");
                self.dropped.fire(DragAndDropDroppedEventArgs {
                    source,
                    target,
                    x: event.x,
                    y: event.y,
                });
                true
            }
            (DragState::Dragging { .. }, _) => true,
            _ => false,
        }
    }

    /// Refresh the live visual for a cursor at `cursor`. Called every frame.
    pub fn refresh(&mut self, tree: &mut WidgetTree, root: Option<WidgetId>, cursor: Offset) {
        let DragState::Dragging { visual, .. } = self.state else { return };
        if !tree.contains(visual) {
            self.state = DragState::Idle;
            return;
        }
        let target = widget_under(tree, root, cursor);
        self.creator.update(tree, target, cursor.x, cursor.y, visual);
        place_visual(tree, visual, cursor + self.offset);
    }

    /// Abort any drag without firing `dropped`.
    pub fn cancel(&mut self, tree: &mut WidgetTree) {
        if let DragState::Dragging { visual, .. } = self.state {
            tree.remove(visual);
        }
        self.state = DragState::Idle;
    }
}

fn widget_under(tree: &WidgetTree, root: Option<WidgetId>, at: Offset) -> Option<WidgetId> {
    root.and_then(|root| tree.widget_at(root, at.x, at.y))
}

impl fmt::Debug for DragAndDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragAndDrop")
            .field("state", &self.state)
            .field("min_distance", &self.min_distance)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Region;
    use pretty_assertions::assert_eq;

    struct Fixture {
        tree: WidgetTree,
        root: WidgetId,
        source: WidgetId,
        source_leaf: WidgetId,
        target: WidgetId,
        target_leaf: WidgetId,
        bystander: WidgetId,
    }

    // root (column)
    // +-- source panel (0,0 10x3) -> inner -> leaf
    // +-- target panel (0,3 10x3) -> leaf
    // +-- bystander    (0,6 10x1)
    fn fixture() -> Fixture {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::column());
        let source = tree.add_child(root, Container::anchored().with_size(10, 3)).unwrap();
        let inner = tree.add_child(source, Container::anchored()).unwrap();
        let source_leaf = tree.add_child(inner, Text::new("drag")).unwrap();
        let target = tree.add_child(root, Container::anchored().with_size(10, 3)).unwrap();
        let target_leaf = tree.add_child(target, Text::new("drop")).unwrap();
        let bystander = tree.add_child(root, Text::new("nobody")).unwrap();
        tree.set_location(root, Region::new(0, 0, 10, 7));
        tree.layout(root);
        Fixture { tree, root, source, source_leaf, target, target_leaf, bystander }
    }

    fn contents(f: &Fixture) -> DragContents {
        let contents = DragContents::new();
        contents.add_source(f.source);
        contents.add_target(f.target);
        contents
    }

    #[test]
    fn source_and_target_resolve_through_ancestors() {
        let f = fixture();
        let c = contents(&f);
        assert!(c.is_source(&f.tree, f.source));
        assert!(c.is_source(&f.tree, f.source_leaf));
        assert!(!c.is_source(&f.tree, f.target_leaf));
        assert!(!c.is_source(&f.tree, f.bystander));
        assert!(c.is_target(&f.tree, f.target_leaf));
        assert!(!c.is_target(&f.tree, f.source_leaf));
        assert!(!c.is_target(&f.tree, f.root));
    }

    #[test]
    fn create_only_for_sources() {
        let mut f = fixture();
        let mut c = contents(&f);
        assert_eq!(c.create(&mut f.tree, f.bystander, 0, 6), None);
        let visual = c.create(&mut f.tree, f.source_leaf, 0, 0).unwrap();
        let text = c.label_widget().unwrap();
        assert_eq!(f.tree.parent(text), Some(visual));
        assert_eq!(f.tree.widget::<Text>(text).unwrap().label(), "Drag Me!");
    }

    #[test]
    fn update_switches_label_over_targets() {
        let mut f = fixture();
        let mut c = contents(&f);
        let visual = c.create(&mut f.tree, f.source, 0, 0).unwrap();
        let text = c.label_widget().unwrap();

        c.update(&mut f.tree, Some(f.target_leaf), 0, 4, visual);
        assert_eq!(f.tree.widget::<Text>(text).unwrap().label(), "* DROP ME! *");
        c.update(&mut f.tree, Some(f.bystander), 0, 6, visual);
        assert_eq!(f.tree.widget::<Text>(text).unwrap().label(), "Drag Me!");
        c.update(&mut f.tree, None, 40, 40, visual);
        assert_eq!(f.tree.widget::<Text>(text).unwrap().label(), "Drag Me!");
    }

    #[test]
    fn press_without_movement_is_not_a_drag() {
        let mut f = fixture();
        let queue = DeferredQueue::new();
        let mut dnd = DragAndDrop::new(&queue, contents(&f));
        assert!(!dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::down(1, 1)));
        assert!(!dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::drag(2, 1)));
        assert!(!dnd.is_dragging());
        assert!(!dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::up(2, 1)));
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn drag_from_non_source_never_starts() {
        let mut f = fixture();
        let queue = DeferredQueue::new();
        let mut dnd = DragAndDrop::new(&queue, contents(&f));
        let before = f.tree.len();
        dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::down(0, 6));
        assert!(!dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::drag(5, 6)));
        assert!(!dnd.is_dragging());
        assert_eq!(f.tree.len(), before);
    }

    #[test]
    fn full_drag_fires_deferred_drop() {
        let mut f = fixture();
        let queue = DeferredQueue::new();
        let drops = Rc::new(RefCell::new(Vec::new()));
        let d = drops.clone();
        let mut dnd = DragAndDrop::new(&queue, contents(&f)).on_dropped(move |args| d.borrow_mut().push(*args));
        let before = f.tree.len();

        dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::down(1, 0));
        assert!(dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::drag(1, 3)));
        let visual = dnd.visual().unwrap();
        assert_eq!(f.tree.rect(visual).map(|r| r.origin()), Some(Offset::new(2, 4)));

        assert!(dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::up(1, 3)));
        assert!(!f.tree.contains(visual));
        assert_eq!(f.tree.len(), before);
        assert!(drops.borrow().is_empty());

        queue.drain();
        let drops = drops.borrow();
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].source, f.source_leaf);
        assert_eq!(drops[0].target, Some(f.target_leaf));
        assert_eq!((drops[0].x, drops[0].y), (1, 3));
    }

    #[test]
    fn blocked_layer_arms_nothing_and_drops_without_target() {
        let mut f = fixture();
        let queue = DeferredQueue::new();
        let drops = Rc::new(RefCell::new(Vec::new()));
        let d = drops.clone();
        let mut dnd = DragAndDrop::new(&queue, contents(&f)).on_dropped(move |args| d.borrow_mut().push(*args));

        assert!(!dnd.handle_mouse(&mut f.tree, None, &MouseEvent::down(1, 0)));
        assert!(!dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::drag(1, 3)));
        assert!(!dnd.is_dragging());

        dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::down(1, 0));
        assert!(dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::drag(1, 3)));
        assert!(dnd.handle_mouse(&mut f.tree, None, &MouseEvent::up(1, 3)));
        queue.drain();
        assert_eq!(drops.borrow().len(), 1);
        assert_eq!(drops.borrow()[0].target, None);
    }

    #[test]
    fn cancel_removes_visual_silently() {
        let mut f = fixture();
        let queue = DeferredQueue::new();
        let mut dnd = DragAndDrop::new(&queue, contents(&f)).with_min_distance(1);
        dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::down(1, 1));
        dnd.handle_mouse(&mut f.tree, Some(f.root), &MouseEvent::drag(1, 2));
        let visual = dnd.visual().unwrap();
        dnd.cancel(&mut f.tree);
        assert!(!f.tree.contains(visual));
        assert!(!dnd.is_dragging());
        assert!(queue.is_empty());
    }
}
