//! List widget: a column of selectable entries.
//!
//! Entries are any `Clone + PartialEq` value. The host supplies the function
//! that turns an entry into its label and, optionally, the ordering used to
//! sort entries (for example a locale-aware collation).

use std::any::Any;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::event::{Event, InputEvent, MouseEvent};
use crate::geometry::{Region, Size};
use crate::render::{CellStyle, Surface};
use crate::tree::WidgetId;
use crate::widget::{Widget, WidgetState};

/// Maps an entry to the text shown for it.
pub type EntryLabelFn<E> = Rc<dyn Fn(&E) -> String>;

/// Orders entries for display.
pub type EntryCompareFn<E> = Rc<dyn Fn(&E, &E) -> Ordering>;

/// Arguments of [`List::entry_selected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntrySelectedEventArgs<E> {
    pub list: Option<WidgetId>,
    pub entry: E,
    pub previous_entry: Option<E>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyle {
    pub idle: CellStyle,
    pub selected: CellStyle,
    pub disabled: CellStyle,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            idle: CellStyle::new(),
            selected: CellStyle::new().reverse(),
            disabled: CellStyle::new().dim(),
        }
    }
}

/// What a list made of a mouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListInput<E> {
    Ignored,
    Consumed,
    /// A row was clicked; carries the entry, whether or not it changed.
    Picked(E),
}

/// A selectable list.
pub struct List<E> {
    entries: Vec<E>,
    label: EntryLabelFn<E>,
    compare: Option<EntryCompareFn<E>>,
    selected: Option<E>,
    entry_selected: Event<ListEntrySelectedEventArgs<E>>,
    style: ListStyle,
    pressed_row: Option<usize>,
    id: Option<WidgetId>,
}

impl<E: Clone + PartialEq + 'static> List<E> {
    pub fn new(entries: Vec<E>, label: impl Fn(&E) -> String + 'static) -> Self {
        Self::with_label_fn(entries, Rc::new(label))
    }

    /// Like [`new`](List::new) with a label function shared with another widget.
    pub fn with_label_fn(entries: Vec<E>, label: EntryLabelFn<E>) -> Self {
        Self {
            entries,
            label,
            compare: None,
            selected: None,
            entry_selected: Event::new(),
            style: ListStyle::default(),
            pressed_row: None,
            id: None,
        }
    }

    /// Keep entries sorted by `compare`.
    pub fn with_sort(mut self, compare: impl Fn(&E, &E) -> Ordering + 'static) -> Self {
        self.compare = Some(Rc::new(compare));
        self.sort();
        self
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_entry_selected(self, handler: impl Fn(&ListEntrySelectedEventArgs<E>) + 'static) -> Self {
        self.entry_selected.add_handler(handler);
        self
    }

    fn sort(&mut self) {
        if let Some(compare) = &self.compare {
            let compare = Rc::clone(compare);
            self.entries.sort_by(|a, b| compare(a, b));
        }
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    /// Replace the entries. A selection no longer present is cleared.
    pub fn set_entries(&mut self, entries: Vec<E>) {
        self.entries = entries;
        self.sort();
        if self.selected.as_ref().is_some_and(|s| !self.entries.contains(s)) {
            self.selected = None;
        }
    }

    pub fn entry_label(&self, entry: &E) -> String {
        (self.label)(entry)
    }

    pub fn selected_entry(&self) -> Option<&E> {
        self.selected.as_ref()
    }

    /// Select `entry`, firing [`entry_selected`](List::entry_selected) if the
    /// selection changed.
    pub fn set_selected_entry(&mut self, entry: E) {
        if self.selected.as_ref() == Some(&entry) {
            return;
        }
        let previous_entry = self.selected.replace(entry.clone());
        self.entry_selected.fire(ListEntrySelectedEventArgs {
            list: self.id,
            entry,
            previous_entry,
        });
    }

    pub fn entry_selected(&self) -> &Event<ListEntrySelectedEventArgs<E>> {
        &self.entry_selected
    }

    /// Report `id` in events instead of the list's own.
    pub fn set_owner(&mut self, id: WidgetId) {
        self.id = Some(id);
    }

    fn row_at(&self, rect: Region, x: i32, y: i32) -> Option<usize> {
        if !rect.contains(x, y) {
            return None;
        }
        let row = (y - rect.y) as usize;
        (row < self.entries.len()).then_some(row)
    }

    /// Run the row-click state machine for one mouse event inside `rect`.
    ///
    /// A press and release on the same row selects that row's entry.
    pub fn process_mouse(&mut self, event: &MouseEvent, rect: Region, enabled: bool) -> ListInput<E> {
        if !enabled {
            self.pressed_row = None;
            return ListInput::Ignored;
        }
        if event.is_left_down() {
            self.pressed_row = self.row_at(rect, event.x, event.y);
            return if rect.contains(event.x, event.y) { ListInput::Consumed } else { ListInput::Ignored };
        }
        if event.is_left_up() {
            let Some(pressed) = self.pressed_row.take() else { return ListInput::Ignored };
            if self.row_at(rect, event.x, event.y) != Some(pressed) {
                return ListInput::Consumed;
            }
            let entry = self.entries[pressed].clone();
            self.set_selected_entry(entry.clone());
            return ListInput::Picked(entry);
        }
        ListInput::Ignored
    }

    /// Paint the rows into `rect`.
    pub fn paint(&self, rect: Region, enabled: bool, surface: &mut dyn Surface) {
        surface.fill(rect, if enabled { &self.style.idle } else { &self.style.disabled });
        let width = rect.width.max(0) as usize;
        for (row, entry) in self.entries.iter().enumerate().take(rect.height.max(0) as usize) {
            let style = if !enabled {
                &self.style.disabled
            } else if self.selected.as_ref() == Some(entry) {
                &self.style.selected
            } else {
                &self.style.idle
            };
            let y = rect.y + row as i32;
            let text: String = self.entry_label(entry).chars().take(width).collect();
            surface.fill(Region::new(rect.x, y, rect.width, 1), style);
            surface.draw_text(rect.x, y, &text, style);
        }
    }

    /// Width of the longest label by one row per entry.
    pub fn content_size(&self) -> Size {
        let width = self
            .entries
            .iter()
            .map(|e| self.entry_label(e).chars().count())
            .max()
            .unwrap_or(0);
        Size::new(width as i32, self.entries.len() as i32)
    }
}

impl<E: Clone + PartialEq + 'static> Widget for List<E> {
    fn widget_type(&self) -> &str {
        "List"
    }

    fn preferred_size(&mut self) -> Option<Size> {
        Some(self.content_size())
    }

    fn on_mount(&mut self, id: WidgetId) {
        self.id.get_or_insert(id);
    }

    fn handle_input(&mut self, event: &InputEvent, state: &WidgetState) -> bool {
        match event {
            InputEvent::Mouse(mouse) => {
                self.process_mouse(mouse, state.rect, state.enabled) != ListInput::Ignored
            }
            _ => false,
        }
    }

    fn render(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
        self.paint(state.rect, state.enabled, surface);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;
    use crate::tree::WidgetTree;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn fruit() -> List<&'static str> {
        List::new(vec!["pear", "apple", "fig"], |e| e.to_string())
    }

    #[test]
    fn sorting_uses_host_comparator() {
        let list = fruit().with_sort(|a, b| a.cmp(b));
        assert_eq!(list.entries(), &["apple", "fig", "pear"]);
        let reversed = fruit().with_sort(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        assert_eq!(reversed.entries(), &["apple", "pear", "fig"]);
    }

    #[test]
    fn set_selected_entry_fires_only_on_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        let mut list = fruit().on_entry_selected(move |a| l.borrow_mut().push((a.entry, a.previous_entry)));
        list.set_selected_entry("fig");
        list.set_selected_entry("fig");
        list.set_selected_entry("pear");
        assert_eq!(*log.borrow(), vec![("fig", None), ("pear", Some("fig"))]);
    }

    #[test]
    fn set_entries_drops_missing_selection() {
        let mut list = fruit();
        list.set_selected_entry("fig");
        list.set_entries(vec!["kiwi"]);
        assert_eq!(list.selected_entry(), None);
    }

    #[test]
    fn clicking_a_row_selects_it() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(fruit());
        tree.set_location(id, Region::new(0, 0, 6, 3));
        tree.dispatch_input(id, &InputEvent::Mouse(MouseEvent::down(0, 1)));
        tree.dispatch_input(id, &InputEvent::Mouse(MouseEvent::up(0, 1)));
        assert_eq!(tree.widget::<List<&str>>(id).unwrap().selected_entry(), Some(&"apple"));
    }

    #[test]
    fn release_on_another_row_does_not_select() {
        let mut list = fruit();
        let rect = Region::new(0, 0, 6, 3);
        list.process_mouse(&MouseEvent::down(0, 0), rect, true);
        assert_eq!(list.process_mouse(&MouseEvent::up(0, 2), rect, true), ListInput::Consumed);
        assert_eq!(list.selected_entry(), None);
    }

    #[test]
    fn paint_highlights_selection() {
        let mut list = fruit();
        list.set_selected_entry("apple");
        let mut canvas = Canvas::new(6, 3);
        list.paint(Region::new(0, 0, 6, 3), true, &mut canvas);
        assert_eq!(canvas.to_text(), "pear\napple\nfig");
        assert!(canvas.cell(0, 1).unwrap().style.reverse);
        assert!(!canvas.cell(0, 0).unwrap().style.reverse);
    }

    #[test]
    fn content_size() {
        assert_eq!(fruit().content_size(), Size::new(5, 3));
    }
}
