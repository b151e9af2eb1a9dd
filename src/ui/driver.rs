//! The frame driver: owns the tree and everything that mutates it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::event::{DeferredQueue, InputEvent, MouseAction, MouseEvent};
use crate::geometry::{Offset, Region, Size};
use crate::layout::PLACEHOLDER_SIZE;
use crate::overlay::{DragAndDrop, DragContentsCreator, ToolTip, ToolTipContentsCreator};
use crate::render::Surface;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::Widget;

use super::commands::Commands;
use super::config::UiConfig;
use super::timer::{TimerHandle, Timers};
use super::window::{OpenWindow, Window, WindowId};

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// A widget tree driven frame by frame.
///
/// The host queues input with [`push_input`](Ui::push_input), then calls
/// [`update`](Ui::update) and [`render`](Ui::render) once per frame. An
/// update runs, in order:
///
/// 1. deferred events and queued [`Commands`], until both are empty
/// 2. due timers
/// 3. queued input
/// 4. dirty layouts
/// 5. the drag and tooltip overlays
///
/// Rendering paints the main tree, then windows, then overlays.
///
/// # Examples
///
/// ```
/// use trellis::render::Canvas;
/// use trellis::ui::{Ui, UiConfig};
/// use trellis::widgets::{Container, Text};
///
/// let mut ui = Ui::with_config(
///     Container::column().with_child(Text::new("Hello")),
///     UiConfig::new().with_viewport(10, 2),
/// );
/// ui.update();
/// let mut canvas = Canvas::new(10, 2);
/// ui.render(&mut canvas);
/// assert_eq!(canvas.to_text(), "Hello\n");
/// ```
pub struct Ui {
    config: UiConfig,
    tree: WidgetTree,
    root: WidgetId,
    deferred: DeferredQueue,
    commands: Commands,
    timers: Timers,
    windows: SlotMap<WindowId, OpenWindow>,
    window_order: Vec<WindowId>,
    input: VecDeque<InputEvent>,
    /// The widget that consumed the last press; receives drags and the release.
    pressed: Option<WidgetId>,
    /// The widget that consumed the last press; receives keys.
    focused: Option<WidgetId>,
    cursor: Option<Offset>,
    now: Instant,
    tooltip: Option<ToolTip>,
    drag_and_drop: Option<DragAndDrop>,
}

impl Ui {
    /// A driver for `root` with the default config.
    pub fn new(root: impl Widget + 'static) -> Self {
        Self::with_config(root, UiConfig::default())
    }

    pub fn with_config(root: impl Widget + 'static, config: UiConfig) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert(root);
        tree.set_location(root, config.viewport.at(Offset::ZERO));
        Self {
            config,
            tree,
            root,
            deferred: DeferredQueue::new(),
            commands: Commands::new(),
            timers: Timers::default(),
            windows: SlotMap::with_key(),
            window_order: Vec::new(),
            input: VecDeque::new(),
            pressed: None,
            focused: None,
            cursor: None,
            now: Instant::now(),
            tooltip: None,
            drag_and_drop: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The main tree's root.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn viewport(&self) -> Size {
        self.config.viewport
    }

    /// The queue deferred events fire through. Pass it to widgets with
    /// deferred events, such as [`SelectComboButton`](crate::widgets::SelectComboButton).
    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    /// A handle for queueing tree mutations from event handlers.
    pub fn commands(&self) -> Commands {
        self.commands.clone()
    }

    /// The time of the current (or last) update.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> Option<Offset> {
        self.cursor
    }

    /// The widget that receives key input.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    // -----------------------------------------------------------------------
    // Overlays
    // -----------------------------------------------------------------------

    /// Show tooltips from `creator`, with delay and offset from the config.
    pub fn install_tooltip(&mut self, creator: impl ToolTipContentsCreator + 'static) -> &mut ToolTip {
        let tooltip = ToolTip::new(creator)
            .with_delay(self.config.tooltip_delay)
            .with_offset(self.config.tooltip_offset)
            .with_sticky(self.config.tooltip_sticky);
        self.set_tooltip(tooltip)
    }

    pub fn set_tooltip(&mut self, tooltip: ToolTip) -> &mut ToolTip {
        if let Some(mut old) = self.tooltip.take() {
            old.hide(&mut self.tree);
        }
        self.tooltip.insert(tooltip)
    }

    pub fn tooltip(&self) -> Option<&ToolTip> {
        self.tooltip.as_ref()
    }

    pub fn tooltip_mut(&mut self) -> Option<&mut ToolTip> {
        self.tooltip.as_mut()
    }

    /// Enable drag-and-drop through `creator`, with threshold and offset
    /// from the config. Drops fire through [`deferred`](Ui::deferred).
    pub fn install_drag_and_drop(&mut self, creator: impl DragContentsCreator + 'static) -> &mut DragAndDrop {
        let dnd = DragAndDrop::new(&self.deferred, creator)
            .with_min_distance(self.config.drag_min_distance)
            .with_offset(self.config.drag_offset);
        self.set_drag_and_drop(dnd)
    }

    pub fn set_drag_and_drop(&mut self, dnd: DragAndDrop) -> &mut DragAndDrop {
        if let Some(mut old) = self.drag_and_drop.take() {
            old.cancel(&mut self.tree);
        }
        self.drag_and_drop.insert(dnd)
    }

    pub fn drag_and_drop(&self) -> Option<&DragAndDrop> {
        self.drag_and_drop.as_ref()
    }

    pub fn drag_and_drop_mut(&mut self) -> Option<&mut DragAndDrop> {
        self.drag_and_drop.as_mut()
    }

    // -----------------------------------------------------------------------
    // Windows
    // -----------------------------------------------------------------------

    /// Open `window` above the main tree and every window opened before it.
    pub fn add_window(&mut self, window: Window) -> WindowId {
        let root = self.tree.insert_boxed(window.contents);
        let rect = match window.rect {
            Some(rect) => rect,
            None => {
                let size = self.tree.preferred_size(root).unwrap_or(PLACEHOLDER_SIZE);
                let viewport = self.config.viewport;
                size.at(Offset::new(
                    (viewport.width - size.width) / 2,
                    (viewport.height - size.height) / 2,
                ))
            }
        };
        self.tree.set_location(root, rect);
        let id = self.windows.insert(OpenWindow { root, modal: window.modal });
        self.window_order.push(id);
        debug!(target: "trellis::ui", ?id, ?root, modal = window.modal, "window opened");
        id
    }

    /// Close a window, removing its widgets. Returns `false` if it was not open.
    pub fn remove_window(&mut self, id: WindowId) -> bool {
        let Some(window) = self.windows.remove(id) else { return false };
        self.window_order.retain(|&w| w != id);
        self.tree.remove(window.root);
        debug!(target: "trellis::ui", ?id, "window closed");
        true
    }

    /// The root widget of an open window.
    pub fn window_root(&self, id: WindowId) -> Option<WidgetId> {
        self.windows.get(id).map(|w| w.root)
    }

    /// Open windows, bottom first.
    pub fn windows(&self) -> &[WindowId] {
        &self.window_order
    }

    /// The root of the topmost layer that takes input at (x, y).
    ///
    /// `None` when a modal window above the hit layer blocks it.
    fn layer_at(&self, x: i32, y: i32) -> Option<WidgetId> {
        for id in self.window_order.iter().rev() {
            let window = self.windows[*id];
            if self.tree.widget_at(window.root, x, y).is_some() {
                return Some(window.root);
            }
            if window.modal {
                return None;
            }
        }
        Some(self.root)
    }

    fn hit(&self, x: i32, y: i32) -> Option<WidgetId> {
        self.layer_at(x, y).and_then(|layer| self.tree.widget_at(layer, x, y))
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    /// Run `action` once `delay` has passed since the current update.
    ///
    /// With an `owner`, the timer is skipped if that widget has been removed
    /// by the time it is due.
    pub fn after(
        &mut self,
        delay: Duration,
        owner: Option<WidgetId>,
        action: impl FnOnce(&mut Ui) + 'static,
    ) -> TimerHandle {
        self.timers.schedule(self.now + delay, owner, Box::new(action))
    }

    /// Timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Queue input for the next update.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push_back(event);
    }

    /// Queue a crossterm event; events the toolkit does not use are dropped.
    pub fn push_crossterm(&mut self, event: crossterm::event::Event) {
        if let Some(event) = InputEvent::from_crossterm(event) {
            self.push_input(event);
        }
    }

    /// Run one frame at the current time.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Run one frame as if the time were `now`.
    pub fn update_at(&mut self, now: Instant) {
        self.now = now;
        self.run_deferred();
        self.fire_timers(now);
        while let Some(event) = self.input.pop_front() {
            self.dispatch(event);
        }
        self.run_layouts();
        self.refresh_overlays(now);
        for event in self.tree.lifecycle_mut().drain() {
            trace!(target: "trellis::ui", ?event, "lifecycle");
        }
    }

    fn run_deferred(&mut self) {
        loop {
            let mut ran = self.deferred.drain();
            while let Some(command) = self.commands.pop() {
                command(self);
                ran += 1;
            }
            if ran == 0 {
                break;
            }
        }
    }

    fn fire_timers(&mut self, now: Instant) {
        for timer in self.timers.take_due(now) {
            if timer.cancelled.get() {
                continue;
            }
            if let Some(owner) = timer.owner.filter(|&o| !self.tree.contains(o)) {
                trace!(target: "trellis::ui", ?owner, "timer owner removed; skipping");
                continue;
            }
            trace!(target: "trellis::ui", "timer fired");
            (timer.action)(self);
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                self.config.viewport = Size::new(width, height);
                self.tree.set_location(self.root, Region::new(0, 0, width, height));
            }
            InputEvent::Key(_) => {
                if let Some(target) = self.focused {
                    self.tree.dispatch_input(target, &event);
                }
            }
            InputEvent::Mouse(mouse) => self.dispatch_mouse(mouse),
        }
    }

    fn dispatch_mouse(&mut self, mouse: MouseEvent) {
        let event = InputEvent::Mouse(mouse);
        self.cursor = Some(mouse.position());

        let layer = self.layer_at(mouse.x, mouse.y);
        if let Some(dnd) = self.drag_and_drop.as_mut() {
            if dnd.handle_mouse(&mut self.tree, layer, &mouse) {
                // Let the pressed widget finish its press so it does not stay armed.
                if matches!(mouse.kind, MouseAction::Up(_)) {
                    if let Some(pressed) = self.pressed.take() {
                        self.tree.deliver_input(pressed, &event);
                    }
                }
                return;
            }
        }

        match mouse.kind {
            MouseAction::Down(_) => {
                let consumer = self.hit(mouse.x, mouse.y).and_then(|t| self.tree.dispatch_input(t, &event));
                self.pressed = consumer;
                if consumer.is_some() {
                    self.focused = consumer;
                }
            }
            MouseAction::Up(_) | MouseAction::Drag(_) => match self.pressed {
                Some(pressed) => {
                    self.tree.deliver_input(pressed, &event);
                    if matches!(mouse.kind, MouseAction::Up(_)) {
                        self.pressed = None;
                    }
                }
                None => {
                    if let Some(target) = self.hit(mouse.x, mouse.y) {
                        self.tree.dispatch_input(target, &event);
                    }
                }
            },
            MouseAction::Moved => {
                if let Some(target) = self.hit(mouse.x, mouse.y) {
                    self.tree.dispatch_input(target, &event);
                }
            }
        }
    }

    fn run_layouts(&mut self) {
        self.tree.layout(self.root);
        for id in &self.window_order {
            self.tree.layout(self.windows[*id].root);
        }
    }

    fn refresh_overlays(&mut self, now: Instant) {
        let cursor = self.cursor;
        let layer = cursor.and_then(|c| self.layer_at(c.x, c.y));

        let dragging = match (self.drag_and_drop.as_mut(), cursor) {
            (Some(dnd), Some(cursor)) => {
                dnd.refresh(&mut self.tree, layer, cursor);
                dnd.is_dragging()
            }
            (Some(dnd), None) => dnd.is_dragging(),
            (None, _) => false,
        };

        if let Some(tooltip) = self.tooltip.as_mut() {
            if dragging {
                tooltip.hide(&mut self.tree);
            } else {
                let root = layer.unwrap_or(self.root);
                tooltip.refresh(&mut self.tree, root, layer.and(cursor), now);
            }
        }
    }

    /// Paint the main tree, then windows bottom to top, then overlays.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.tree.render(self.root, surface);
        for id in &self.window_order {
            self.tree.render(self.windows[*id].root, surface);
        }
        let tooltip = self.tooltip.as_ref().and_then(ToolTip::visual);
        let drag = self.drag_and_drop.as_ref().and_then(DragAndDrop::visual);
        for visual in [tooltip, drag].into_iter().flatten() {
            self.tree.render(visual, surface);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
