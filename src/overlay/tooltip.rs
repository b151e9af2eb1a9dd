//! Tooltips: per-widget text registry and the hover controller.
//!
//! The [`ToolTip`] controller watches which widget the cursor rests on. Once
//! the cursor has stayed on it for the configured delay, the controller asks
//! its [`ToolTipContentsCreator`] for a visual, trying the hovered widget
//! first and then each ancestor, so a tip registered on a button also shows
//! over the button's inner parts.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::geometry::{Insets, Offset};
use crate::layout::RowLayout;
use crate::render::CellStyle;
use crate::tree::{WidgetId, WidgetTree};
use crate::widgets::{Container, Text};

use super::place_visual;

/// Timestamp format of the optional time line.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// ToolTipContentsCreator
// ---------------------------------------------------------------------------

/// Builds and refreshes tooltip visuals.
pub trait ToolTipContentsCreator {
    /// Build the tooltip for `widget` as a new root in `tree`.
    ///
    /// `None` means `widget` has no tooltip.
    fn create(&mut self, tree: &mut WidgetTree, widget: WidgetId) -> Option<WidgetId>;

    /// Refresh the live tooltip of `widget`. Called every frame it is shown.
    fn update(&mut self, tree: &mut WidgetTree, widget: WidgetId);
}

// ---------------------------------------------------------------------------
// ToolTipContents
// ---------------------------------------------------------------------------

type Clock = Rc<dyn Fn() -> NaiveDateTime>;

struct TipRegistry {
    tips: HashMap<WidgetId, String>,
    with_time: HashSet<WidgetId>,
    show_time: bool,
    clock: Clock,
    background: Option<CellStyle>,
    text: Option<WidgetId>,
    time_text: Option<WidgetId>,
}

/// Tooltip texts keyed by widget, plus the stock tooltip visual.
///
/// The visual is a vertical column holding the tip text and, for widgets
/// on the time allow-list while `show_time` is on, a line with the current
/// local time. Clones share the registry.
#[derive(Clone)]
pub struct ToolTipContents {
    inner: Rc<RefCell<TipRegistry>>,
}

impl ToolTipContents {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TipRegistry {
                tips: HashMap::new(),
                with_time: HashSet::new(),
                show_time: false,
                clock: Rc::new(|| Local::now().naive_local()),
                background: None,
                text: None,
                time_text: None,
            })),
        }
    }

    /// Replace the local-time source.
    pub fn with_clock(self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.inner.borrow_mut().clock = Rc::new(clock);
        self
    }

    pub fn with_background(self, style: CellStyle) -> Self {
        self.inner.borrow_mut().background = Some(style);
        self
    }

    /// Register or replace the tip for `widget`.
    pub fn set(&self, widget: WidgetId, text: impl Into<String>) {
        self.inner.borrow_mut().tips.insert(widget, text.into());
    }

    pub fn remove(&self, widget: WidgetId) {
        self.inner.borrow_mut().tips.remove(&widget);
    }

    pub fn text(&self, widget: WidgetId) -> Option<String> {
        self.inner.borrow().tips.get(&widget).cloned()
    }

    /// Allow the time line on `widget`'s tooltip.
    pub fn add_widget_with_time(&self, widget: WidgetId) {
        self.inner.borrow_mut().with_time.insert(widget);
    }

    pub fn can_show_time(&self, widget: WidgetId) -> bool {
        self.inner.borrow().with_time.contains(&widget)
    }

    pub fn set_show_time(&self, show: bool) {
        self.inner.borrow_mut().show_time = show;
    }

    pub fn show_time(&self) -> bool {
        self.inner.borrow().show_time
    }

    fn wants_time(&self, widget: WidgetId) -> bool {
        let inner = self.inner.borrow();
        inner.show_time && inner.with_time.contains(&widget)
    }

    fn now_text(&self) -> String {
        let clock = Rc::clone(&self.inner.borrow().clock);
        clock().format(TIME_FORMAT).to_string()
    }
}

impl Default for ToolTipContents {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolTipContentsCreator for ToolTipContents {
    fn create(&mut self, tree: &mut WidgetTree, widget: WidgetId) -> Option<WidgetId> {
        let tip = self.text(widget)?;
        let with_time = self.wants_time(widget);

        let mut container = Container::new(
            RowLayout::vertical()
                .with_padding(Insets::symmetric(0, 1))
                .with_spacing(1),
        )
        .with_child(Text::new(tip));
        if with_time {
            container = container.with_child(Text::new(self.now_text()));
        }
        if let Some(style) = self.inner.borrow().background.clone() {
            container = container.with_background(style);
        }

        let visual = tree.insert(container);
        let children = tree.children(visual);
        let mut inner = self.inner.borrow_mut();
        inner.text = children.first().copied();
        inner.time_text = if with_time { children.get(1).copied() } else { None };
        Some(visual)
    }

    fn update(&mut self, tree: &mut WidgetTree, widget: WidgetId) {
        let (text_id, time_id) = {
            let inner = self.inner.borrow();
            (inner.text, inner.time_text)
        };
        if let Some(id) = text_id {
            // A removed tip blanks the line instead of keeping stale text.
            let tip = self.text(widget).unwrap_or_default();
            if let Some(text) = tree.widget_mut::<Text>(id) {
                text.set_label(tip);
            }
        }
        if !self.wants_time(widget) {
            return;
        }
        if let Some(id) = time_id {
            let now = self.now_text();
            if let Some(text) = tree.widget_mut::<Text>(id) {
                text.set_label(now);
            }
        }
    }
}

impl fmt::Debug for ToolTipContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ToolTipContents")
            .field("tips", &inner.tips.len())
            .field("show_time", &inner.show_time)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ToolTip
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Hover {
    widget: WidgetId,
    since: Instant,
    /// Set once creation was attempted for this hover.
    resolved: bool,
}

#[derive(Debug, Clone, Copy)]
struct Shown {
    /// The widget whose contents are shown: the hovered one or an ancestor.
    owner: WidgetId,
    visual: WidgetId,
    anchor: Offset,
}

/// Shows tooltips for the widget under the cursor.
pub struct ToolTip {
    creator: Box<dyn ToolTipContentsCreator>,
    delay: Duration,
    offset: Offset,
    sticky: bool,
    hover: Option<Hover>,
    shown: Option<Shown>,
}

impl ToolTip {
    pub fn new(creator: impl ToolTipContentsCreator + 'static) -> Self {
        Self {
            creator: Box::new(creator),
            delay: Duration::ZERO,
            offset: Offset::new(1, 1),
            sticky: false,
            hover: None,
            shown: None,
        }
    }

    /// How long the cursor must rest on a widget before its tip shows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Where the tooltip sits relative to the cursor.
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Keep the tooltip where it appeared instead of following the cursor.
    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
    }

    /// The live tooltip visual.
    pub fn visual(&self) -> Option<WidgetId> {
        self.shown.map(|s| s.visual)
    }

    /// The widget whose tip is showing.
    pub fn owner(&self) -> Option<WidgetId> {
        self.shown.map(|s| s.owner)
    }

    /// Track the cursor over the tree rooted at `root`. Called every frame.
    pub fn refresh(&mut self, tree: &mut WidgetTree, root: WidgetId, cursor: Option<Offset>, now: Instant) {
        let hovered = cursor.and_then(|c| tree.widget_at(root, c.x, c.y));
        if hovered != self.hover.map(|h| h.widget) {
            self.hide(tree);
            self.hover = hovered.map(|widget| Hover { widget, since: now, resolved: false });
        }
        let (Some(hover), Some(cursor)) = (self.hover.as_mut(), cursor) else { return };

        if !hover.resolved && now.saturating_duration_since(hover.since) >= self.delay {
            hover.resolved = true;
            let widget = hover.widget;
            let candidates = std::iter::once(widget).chain(tree.ancestors(widget));
            for owner in candidates {
                if let Some(visual) = self.creator.create(tree, owner) {
                    debug!(target: "trellis::overlay", ?widget, ?owner, "tooltip shown");
                    self.shown = Some(Shown { owner, visual, anchor: cursor });
                    break;
                }
            }
        }

        let Some(shown) = self.shown else { return };
        if !tree.contains(shown.visual) {
            self.shown = None;
            return;
        }
        self.creator.update(tree, shown.owner);
        let at = if self.sticky { shown.anchor } else { cursor };
        place_visual(tree, shown.visual, at + self.offset);
    }

    /// Remove the tooltip, if shown.
    pub fn hide(&mut self, tree: &mut WidgetTree) {
        if let Some(shown) = self.shown.take() {
            tree.remove(shown.visual);
        }
    }
}

impl fmt::Debug for ToolTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolTip")
            .field("delay", &self.delay)
            .field("sticky", &self.sticky)
            .field("shown", &self.shown)
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
    use crate::render::Canvas;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 7))
            .unwrap()
    }

    fn labels(tree: &WidgetTree, visual: WidgetId) -> Vec<String> {
        tree.children(visual)
            .iter()
            .filter_map(|&id| tree.widget::<Text>(id))
            .map(|t| t.label().to_string())
            .collect()
    }

    /// root (row) with a button-like panel holding a label, and a bare label.
    fn fixture() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::row().with_size(20, 1));
        let panel = tree.add_child(root, Container::anchored().with_size(6, 1)).unwrap();
        let inner = tree.add_child(panel, Text::new("ok")).unwrap();
        let other = tree.add_child(root, Text::new("plain")).unwrap();
        tree.set_location(root, Region::new(0, 0, 20, 1));
        tree.layout(root);
        (tree, root, panel, inner, other)
    }

    #[test]
    fn create_requires_text() {
        let (mut tree, _, panel, _, other) = fixture();
        let mut contents = ToolTipContents::new();
        contents.set(panel, "Tool tip for button 1");
        assert_eq!(contents.create(&mut tree, other), None);
        let visual = contents.create(&mut tree, panel).unwrap();
        assert_eq!(labels(&tree, visual), vec!["Tool tip for button 1"]);
    }

    #[test]
    fn time_line_needs_allow_list_and_toggle() {
        let (mut tree, _, panel, _, other) = fixture();
        let mut contents = ToolTipContents::new().with_clock(fixed_clock);
        contents.set(panel, "tip");
        contents.set(other, "other tip");
        contents.add_widget_with_time(panel);

        let visual = contents.create(&mut tree, panel).unwrap();
        assert_eq!(tree.children(visual).len(), 1);
        tree.remove(visual);

        contents.set_show_time(true);
        let visual = contents.create(&mut tree, panel).unwrap();
        assert_eq!(labels(&tree, visual), vec!["tip", "2024-03-09 14:05:07"]);
        tree.remove(visual);

        let visual = contents.create(&mut tree, other).unwrap();
        assert_eq!(tree.children(visual).len(), 1);
    }

    #[test]
    fn update_refreshes_without_rebuilding() {
        let (mut tree, _, panel, _, _) = fixture();
        let mut contents = ToolTipContents::new();
        contents.set(panel, "before");
        let visual = contents.create(&mut tree, panel).unwrap();
        let count = tree.len();

        contents.set(panel, "after");
        contents.update(&mut tree, panel);
        assert_eq!(labels(&tree, visual), vec!["after"]);
        assert_eq!(tree.len(), count);
    }

    #[test]
    fn update_after_remove_clears_label() {
        let (mut tree, _, panel, _, _) = fixture();
        let mut contents = ToolTipContents::new();
        contents.set(panel, "gone soon");
        let visual = contents.create(&mut tree, panel).unwrap();

        contents.remove(panel);
        contents.update(&mut tree, panel);
        assert_eq!(labels(&tree, visual), vec![""]);
    }

    #[test]
    fn controller_falls_back_to_ancestor() {
        let (mut tree, root, panel, inner, _) = fixture();
        let contents = ToolTipContents::new();
        contents.set(panel, "panel tip");
        let mut tip = ToolTip::new(contents);

        let now = Instant::now();
        assert_eq!(tree.widget_at(root, 0, 0), Some(inner));
        tip.refresh(&mut tree, root, Some(Offset::new(0, 0)), now);
        assert_eq!(tip.owner(), Some(panel));
        let visual = tip.visual().unwrap();
        assert_eq!(tree.rect(visual).map(|r| r.origin()), Some(Offset::new(1, 1)));
    }

    #[test]
    fn controller_waits_for_delay() {
        let (mut tree, root, panel, _, _) = fixture();
        let contents = ToolTipContents::new();
        contents.set(panel, "tip");
        let mut tip = ToolTip::new(contents).with_delay(Duration::from_millis(800));

        let start = Instant::now();
        let cursor = Some(Offset::new(1, 0));
        tip.refresh(&mut tree, root, cursor, start);
        assert_eq!(tip.visual(), None);
        tip.refresh(&mut tree, root, cursor, start + Duration::from_millis(500));
        assert_eq!(tip.visual(), None);
        tip.refresh(&mut tree, root, cursor, start + Duration::from_millis(800));
        assert!(tip.visual().is_some());
    }

    #[test]
    fn moving_to_another_widget_hides() {
        let (mut tree, root, panel, _, other) = fixture();
        let contents = ToolTipContents::new();
        contents.set(panel, "tip");
        let mut tip = ToolTip::new(contents);
        let now = Instant::now();

        tip.refresh(&mut tree, root, Some(Offset::new(0, 0)), now);
        let visual = tip.visual().unwrap();
        assert_eq!(tree.widget_at(root, 7, 0), Some(other));
        tip.refresh(&mut tree, root, Some(Offset::new(7, 0)), now);
        assert_eq!(tip.visual(), None);
        assert!(!tree.contains(visual));
    }

    #[test]
    fn sticky_tip_stays_put() {
        let (mut tree, root, panel, _, _) = fixture();
        let contents = ToolTipContents::new();
        contents.set(panel, "tip");
        let mut tip = ToolTip::new(contents).with_sticky(true);
        let now = Instant::now();

        tip.refresh(&mut tree, root, Some(Offset::new(3, 0)), now);
        tip.refresh(&mut tree, root, Some(Offset::new(5, 0)), now);
        let visual = tip.visual().unwrap();
        assert_eq!(tree.rect(visual).map(|r| r.origin()), Some(Offset::new(4, 1)));
    }

    #[test]
    fn tip_renders_padded_text() {
        let (mut tree, root, panel, _, _) = fixture();
        let contents = ToolTipContents::new();
        contents.set(panel, "hi");
        let mut tip = ToolTip::new(contents).with_offset(Offset::ZERO);
        tip.refresh(&mut tree, root, Some(Offset::new(0, 0)), Instant::now());

        let visual = tip.visual().unwrap();
        let mut canvas = Canvas::new(6, 1);
        tree.render(visual, &mut canvas);
        assert_eq!(canvas.to_text(), " hi");
    }
}
