//! SelectComboButton: a button that drops down a list of entries.
//!
//! The button shows the selected entry's label. Clicking it toggles the list,
//! which is painted below the button as overlay content. Clicking a list row
//! selects that entry and closes the list.

use std::any::Any;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::event::{DeferredQueue, Event, InputEvent};
use crate::geometry::{Region, Size};
use crate::render::Surface;
use crate::tree::WidgetId;
use crate::widget::{ensure_init, Deferred, DeferredInit, Widget, WidgetState};

use super::button::{Button, ButtonInput, ButtonOpt};
use super::list::{EntryCompareFn, EntryLabelFn, List, ListInput};

/// Arguments of [`SelectComboButton::entry_selected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectComboButtonEntrySelectedEventArgs<E> {
    pub combo: Option<WidgetId>,
    pub entry: E,
    pub previous_entry: Option<E>,
}

/// A combo button selecting one of a set of entries.
///
/// The `entry_selected` event is deferred: handlers run when the owning
/// queue drains, so they may freely touch the tree through commands.
pub struct SelectComboButton<E> {
    entries: Vec<E>,
    label: EntryLabelFn<E>,
    compare: Option<EntryCompareFn<E>>,
    button_opts: Vec<ButtonOpt>,
    entry_selected: Event<SelectComboButtonEntrySelectedEventArgs<E>>,
    init: DeferredInit<SelectComboButton<E>>,
    button: Option<Button>,
    list: Option<List<E>>,
    selected: Option<E>,
    content_visible: bool,
    id: Option<WidgetId>,
}

impl<E: Clone + PartialEq + 'static> SelectComboButton<E> {
    /// A combo over `entries`, firing selection events through `queue`.
    pub fn new(queue: &DeferredQueue, entries: Vec<E>, label: impl Fn(&E) -> String + 'static) -> Self {
        let mut combo = Self {
            entries,
            label: Rc::new(label),
            compare: None,
            button_opts: Vec::new(),
            entry_selected: Event::deferred(queue),
            init: DeferredInit::new(),
            button: None,
            list: None,
            selected: None,
            content_visible: false,
            id: None,
        };
        combo.init.append(Self::create_widgets);
        combo
    }

    pub fn with_button_opts(mut self, opts: impl IntoIterator<Item = ButtonOpt>) -> Self {
        self.button_opts.extend(opts);
        self
    }

    /// Sort the drop-down entries with `compare`.
    pub fn with_sort(mut self, compare: impl Fn(&E, &E) -> Ordering + 'static) -> Self {
        self.compare = Some(Rc::new(compare));
        self
    }

    pub fn on_entry_selected(
        self,
        handler: impl Fn(&SelectComboButtonEntrySelectedEventArgs<E>) + 'static,
    ) -> Self {
        self.entry_selected.add_handler(handler);
        self
    }

    fn create_widgets(&mut self) {
        let mut button = Button::from_opts(std::mem::take(&mut self.button_opts));
        if let Some(entry) = &self.selected {
            button.set_label((self.label)(entry));
        }
        if let Some(id) = self.id {
            button.set_owner(id);
        }

        let mut list = List::with_label_fn(std::mem::take(&mut self.entries), Rc::clone(&self.label));
        if let Some(compare) = self.compare.clone() {
            list = list.with_sort(move |a, b| compare(a, b));
        }
        if let Some(entry) = self.selected.clone() {
            list.set_selected_entry(entry);
        }
        if let Some(id) = self.id {
            list.set_owner(id);
        }

        self.button = Some(button);
        self.list = Some(list);
    }

    fn parts_mut(&mut self) -> (&mut Button, &mut List<E>) {
        ensure_init(self);
        match (self.button.as_mut(), self.list.as_mut()) {
            (Some(button), Some(list)) => (button, list),
            _ => unreachable!("combo parts are built by deferred init"),
        }
    }

    /// The event fired when the selection changes.
    pub fn entry_selected(&self) -> &Event<SelectComboButtonEntrySelectedEventArgs<E>> {
        &self.entry_selected
    }

    pub fn selected_entry(&self) -> Option<&E> {
        self.selected.as_ref()
    }

    /// Select `entry`. Relabels the button and fires
    /// [`entry_selected`](SelectComboButton::entry_selected) if the selection changed.
    pub fn set_selected_entry(&mut self, entry: E) {
        if self.selected.as_ref() == Some(&entry) {
            return;
        }
        let text = (self.label)(&entry);
        let (button, list) = self.parts_mut();
        button.set_label(text);
        list.set_selected_entry(entry.clone());

        let previous_entry = self.selected.replace(entry.clone());
        self.entry_selected.fire(SelectComboButtonEntrySelectedEventArgs {
            combo: self.id,
            entry,
            previous_entry,
        });
    }

    /// The button's current label.
    pub fn label(&mut self) -> &str {
        self.parts_mut().0.label()
    }

    /// The drop-down entries, in display order.
    pub fn entries(&mut self) -> &[E] {
        self.parts_mut().1.entries()
    }

    pub fn set_entries(&mut self, entries: Vec<E>) {
        self.parts_mut().1.set_entries(entries);
    }

    pub fn content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn set_content_visible(&mut self, visible: bool) {
        ensure_init(self);
        self.content_visible = visible;
    }

    /// Where the drop-down is painted for a button at `rect`.
    fn content_rect(&self, rect: Region) -> Option<Region> {
        let list = self.list.as_ref()?;
        let size = list.content_size();
        Some(Region::new(rect.x, rect.bottom(), size.width.max(rect.width), size.height))
    }
}

impl<E: Clone + PartialEq + 'static> Deferred for SelectComboButton<E> {
    fn deferred_init(&mut self) -> &mut DeferredInit<Self> {
        &mut self.init
    }
}

impl<E: Clone + PartialEq + 'static> Widget for SelectComboButton<E> {
    fn widget_type(&self) -> &str {
        "SelectComboButton"
    }

    fn preferred_size(&mut self) -> Option<Size> {
        self.parts_mut().0.preferred_size()
    }

    fn on_mount(&mut self, id: WidgetId) {
        self.id = Some(id);
        if let Some(button) = self.button.as_mut() {
            button.set_owner(id);
        }
        if let Some(list) = self.list.as_mut() {
            list.set_owner(id);
        }
    }

    fn overlay_contains(&self, state: &WidgetState, x: i32, y: i32) -> bool {
        self.content_visible
            && self
                .content_rect(state.rect)
                .is_some_and(|content| content.contains(x, y))
    }

    fn handle_input(&mut self, event: &InputEvent, state: &WidgetState) -> bool {
        let InputEvent::Mouse(mouse) = event else { return false };
        ensure_init(self);

        if self.content_visible {
            if let Some(content) = self.content_rect(state.rect) {
                let picked = self.parts_mut().1.process_mouse(mouse, content, state.enabled);
                match picked {
                    ListInput::Ignored => {}
                    ListInput::Consumed => return true,
                    ListInput::Picked(entry) => {
                        self.content_visible = false;
                        self.set_selected_entry(entry);
                        return true;
                    }
                }
            }
        }

        match self.parts_mut().0.process_mouse(mouse, state) {
            ButtonInput::Ignored => false,
            ButtonInput::Consumed => true,
            ButtonInput::Clicked => {
                self.content_visible = !self.content_visible;
                true
            }
        }
    }

    fn render(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
        self.parts_mut().0.paint(state.rect, state.enabled, surface);
    }

    fn render_overlay(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
        if !self.content_visible {
            return;
        }
        ensure_init(self);
        if let (Some(content), Some(list)) = (self.content_rect(state.rect), self.list.as_ref()) {
            list.paint(content, state.enabled, surface);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
