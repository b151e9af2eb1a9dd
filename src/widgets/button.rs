//! Button widget: a clickable label with an optional graphic.
//!
//! A click is a left press inside the button followed by a left release
//! inside it. Releasing outside cancels.

use std::any::Any;
use std::fmt;

use crate::event::{Event, InputEvent, MouseEvent};
use crate::geometry::{Insets, Region, Size};
use crate::render::{CellStyle, Surface};
use crate::tree::WidgetId;
use crate::widget::{Widget, WidgetState};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Colors for each visual state of a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStyle {
    pub idle: CellStyle,
    pub pressed: CellStyle,
    pub disabled: CellStyle,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            idle: CellStyle::new().reverse(),
            pressed: CellStyle::new().bold(),
            disabled: CellStyle::new().dim(),
        }
    }
}

/// Arguments of [`Button::clicked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonClickedEventArgs {
    /// The button's tree id, or the id of the widget embedding it.
    pub button: Option<WidgetId>,
    pub x: i32,
    pub y: i32,
}

/// A deferred button setting.
///
/// Composite widgets collect these from the host and apply them when they
/// build their inner button.
pub enum ButtonOpt {
    Label(String),
    Graphic(String),
    Padding(Insets),
    Style(ButtonStyle),
    ClickedHandler(Box<dyn Fn(&ButtonClickedEventArgs)>),
}

impl fmt::Debug for ButtonOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonOpt::Label(l) => f.debug_tuple("Label").field(l).finish(),
            ButtonOpt::Graphic(g) => f.debug_tuple("Graphic").field(g).finish(),
            ButtonOpt::Padding(p) => f.debug_tuple("Padding").field(p).finish(),
            ButtonOpt::Style(s) => f.debug_tuple("Style").field(s).finish(),
            ButtonOpt::ClickedHandler(_) => f.write_str("ClickedHandler"),
        }
    }
}

/// What a button made of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonInput {
    Ignored,
    /// Press or cancelled release.
    Consumed,
    Clicked,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A clickable button.
///
/// # Examples
///
/// ```
/// use trellis::widgets::Button;
///
/// let button = Button::new("OK").on_clicked(|_| println!("clicked"));
/// assert_eq!(button.label(), "OK");
/// ```
#[derive(Debug)]
pub struct Button {
    label: String,
    graphic: Option<String>,
    padding: Insets,
    style: ButtonStyle,
    clicked: Event<ButtonClickedEventArgs>,
    pressed: bool,
    id: Option<WidgetId>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            graphic: None,
            padding: Insets::symmetric(0, 1),
            style: ButtonStyle::default(),
            clicked: Event::new(),
            pressed: false,
            id: None,
        }
    }

    /// Build a button from deferred options, applied in order.
    pub fn from_opts(opts: impl IntoIterator<Item = ButtonOpt>) -> Self {
        let mut button = Self::new("");
        for opt in opts {
            button.apply(opt);
        }
        button
    }

    /// Apply one option.
    pub fn apply(&mut self, opt: ButtonOpt) {
        match opt {
            ButtonOpt::Label(label) => self.label = label,
            ButtonOpt::Graphic(graphic) => self.graphic = Some(graphic),
            ButtonOpt::Padding(padding) => self.padding = padding,
            ButtonOpt::Style(style) => self.style = style,
            ButtonOpt::ClickedHandler(handler) => self.clicked.add_handler(handler),
        }
    }

    pub fn with_graphic(mut self, graphic: impl Into<String>) -> Self {
        self.apply(ButtonOpt::Graphic(graphic.into()));
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.apply(ButtonOpt::Padding(padding));
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.apply(ButtonOpt::Style(style));
        self
    }

    pub fn on_clicked(self, handler: impl Fn(&ButtonClickedEventArgs) + 'static) -> Self {
        self.clicked.add_handler(handler);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn graphic(&self) -> Option<&str> {
        self.graphic.as_deref()
    }

    pub fn set_graphic(&mut self, graphic: Option<String>) {
        self.graphic = graphic;
    }

    /// The click event. Clones share handlers.
    pub fn clicked(&self) -> &Event<ButtonClickedEventArgs> {
        &self.clicked
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Report `id` in click events instead of the button's own.
    ///
    /// Used by widgets that embed a button without inserting it into the tree.
    pub fn set_owner(&mut self, id: WidgetId) {
        self.id = Some(id);
    }

    fn content(&self) -> String {
        match (&self.graphic, self.label.is_empty()) {
            (Some(graphic), true) => graphic.clone(),
            (Some(graphic), false) => format!("{graphic} {}", self.label),
            (None, _) => self.label.clone(),
        }
    }

    /// Run the press/release state machine for one mouse event.
    ///
    /// Fires [`clicked`](Button::clicked) on a completed click.
    pub fn process_mouse(&mut self, event: &MouseEvent, state: &WidgetState) -> ButtonInput {
        if !state.enabled {
            self.pressed = false;
            return ButtonInput::Ignored;
        }
        if event.is_left_down() {
            if !state.rect.contains(event.x, event.y) {
                return ButtonInput::Ignored;
            }
            self.pressed = true;
            return ButtonInput::Consumed;
        }
        if event.is_left_up() && self.pressed {
            self.pressed = false;
            if !state.rect.contains(event.x, event.y) {
                return ButtonInput::Consumed;
            }
            self.clicked.fire(ButtonClickedEventArgs {
                button: self.id.or(Some(state.id)),
                x: event.x,
                y: event.y,
            });
            return ButtonInput::Clicked;
        }
        ButtonInput::Ignored
    }

    /// Paint into `rect`; shared with widgets that embed a button.
    pub fn paint(&self, rect: Region, enabled: bool, surface: &mut dyn Surface) {
        let style = if !enabled {
            &self.style.disabled
        } else if self.pressed {
            &self.style.pressed
        } else {
            &self.style.idle
        };
        surface.fill(rect, style);
        let inner = rect.inset(self.padding);
        let content: String = self.content().chars().take(inner.width.max(0) as usize).collect();
        let y = inner.y + (inner.height - 1).max(0) / 2;
        surface.draw_text(inner.x, y, &content, style);
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn preferred_size(&mut self) -> Option<Size> {
        let width = self.content().chars().count() as i32;
        Some(Size::new(width, 1).pad(self.padding))
    }

    fn on_mount(&mut self, id: WidgetId) {
        self.id.get_or_insert(id);
    }

    fn handle_input(&mut self, event: &InputEvent, state: &WidgetState) -> bool {
        match event {
            InputEvent::Mouse(mouse) => self.process_mouse(mouse, state) != ButtonInput::Ignored,
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
    use slotmap::SlotMap;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn state(rect: Region, enabled: bool) -> WidgetState {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        WidgetState { id: ids.insert(()), rect, enabled }
    }

    fn click(button: &mut Button, st: &WidgetState, x: i32, y: i32) -> ButtonInput {
        button.process_mouse(&MouseEvent::down(x, y), st);
        button.process_mouse(&MouseEvent::up(x, y), st)
    }

    #[test]
    fn preferred_size_includes_padding_and_graphic() {
        assert_eq!(Button::new("OK").preferred_size(), Some(Size::new(4, 1)));
        let mut b = Button::new("OK").with_graphic("[x]").with_padding(Insets::ZERO);
        assert_eq!(b.preferred_size(), Some(Size::new(6, 1)));
    }

    #[test]
    fn press_and_release_inside_fires_clicked() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let c = clicks.clone();
        let mut button = Button::new("Go").on_clicked(move |args| c.borrow_mut().push((args.x, args.y)));
        let st = state(Region::new(0, 0, 4, 1), true);

        assert_eq!(button.process_mouse(&MouseEvent::down(1, 0), &st), ButtonInput::Consumed);
        assert!(button.is_pressed());
        assert_eq!(button.process_mouse(&MouseEvent::up(2, 0), &st), ButtonInput::Clicked);
        assert!(!button.is_pressed());
        assert_eq!(*clicks.borrow(), vec![(2, 0)]);
    }

    #[test]
    fn release_outside_cancels() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut button = Button::new("Go").on_clicked(move |_| c.set(c.get() + 1));
        let st = state(Region::new(0, 0, 4, 1), true);

        button.process_mouse(&MouseEvent::down(1, 0), &st);
        assert_eq!(button.process_mouse(&MouseEvent::up(9, 9), &st), ButtonInput::Consumed);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut button = Button::new("Go");
        let st = state(Region::new(0, 0, 4, 1), true);
        assert_eq!(button.process_mouse(&MouseEvent::up(1, 0), &st), ButtonInput::Ignored);
    }

    #[test]
    fn disabled_button_ignores_clicks() {
        let mut button = Button::new("Go");
        let st = state(Region::new(0, 0, 4, 1), false);
        assert_eq!(click(&mut button, &st, 1, 0), ButtonInput::Ignored);
    }

    #[test]
    fn opts_apply_in_order() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut button = Button::from_opts([
            ButtonOpt::Label("first".into()),
            ButtonOpt::Label("second".into()),
            ButtonOpt::Graphic("*".into()),
            ButtonOpt::ClickedHandler(Box::new(move |_| c.set(c.get() + 1))),
        ]);
        assert_eq!(button.label(), "second");
        assert_eq!(button.graphic(), Some("*"));

        let st = state(Region::new(0, 0, 10, 1), true);
        assert_eq!(click(&mut button, &st, 0, 0), ButtonInput::Clicked);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn click_reports_owner_id() {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let owner = ids.insert(());
        let seen = Rc::new(Cell::new(None));
        let s = seen.clone();
        let mut button = Button::new("x").on_clicked(move |args| s.set(args.button));
        button.set_owner(owner);
        let st = state(Region::new(0, 0, 3, 1), true);
        click(&mut button, &st, 0, 0);
        assert_eq!(seen.get(), Some(owner));
    }

    #[test]
    fn paint_draws_graphic_then_label() {
        let button = Button::new("Yes").with_graphic("[ ]");
        let mut canvas = Canvas::new(12, 3);
        button.paint(Region::new(0, 0, 12, 3), true, &mut canvas);
        assert_eq!(canvas.row_text(1), " [ ] Yes");
        assert!(canvas.cell(0, 0).unwrap().style.reverse);
    }

    #[test]
    fn paint_truncates_to_inner_width() {
        let button = Button::new("Cancel");
        let mut canvas = Canvas::new(5, 1);
        button.paint(Region::new(0, 0, 5, 1), true, &mut canvas);
        assert_eq!(canvas.to_text(), " Can");
    }
}
