//! Checkbox widget: a two- or three-state toggle built on an embedded button.
//!
//! The checkbox collects button options from the host and builds its button
//! the first time it is sized, placed, clicked, or painted. A click advances
//! the state: two-state boxes cycle Unchecked, Checked; tri-state boxes cycle
//! Unchecked, Checked, Greyed.

use std::any::Any;

use crate::event::{Event, InputEvent};
use crate::geometry::{Region, Size};
use crate::render::Surface;
use crate::tree::WidgetId;
use crate::widget::{ensure_init, Deferred, DeferredInit, Widget, WidgetState};

use super::button::{Button, ButtonInput, ButtonOpt};

// ---------------------------------------------------------------------------
// CheckboxState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckboxState {
    #[default]
    Unchecked,
    Checked,
    /// Indeterminate; only valid for tri-state checkboxes.
    Greyed,
}

impl CheckboxState {
    /// The state a click moves to.
    pub fn advance(self, tri_state: bool) -> CheckboxState {
        match self {
            CheckboxState::Unchecked => CheckboxState::Checked,
            CheckboxState::Checked if tri_state => CheckboxState::Greyed,
            CheckboxState::Checked | CheckboxState::Greyed => CheckboxState::Unchecked,
        }
    }
}

/// The graphic shown for each state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGraphic {
    pub unchecked: String,
    pub checked: String,
    pub greyed: String,
}

impl CheckboxGraphic {
    fn for_state(&self, state: CheckboxState) -> &str {
        match state {
            CheckboxState::Unchecked => &self.unchecked,
            CheckboxState::Checked => &self.checked,
            CheckboxState::Greyed => &self.greyed,
        }
    }
}

impl Default for CheckboxGraphic {
    fn default() -> Self {
        Self {
            unchecked: "[ ]".into(),
            checked: "[x]".into(),
            greyed: "[-]".into(),
        }
    }
}

/// Arguments of [`Checkbox::changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxChangedEventArgs {
    pub checkbox: Option<WidgetId>,
    pub state: CheckboxState,
}

// ---------------------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------------------

/// A checkbox.
///
/// # Examples
///
/// ```
/// use trellis::widgets::{ButtonOpt, Checkbox, CheckboxState};
///
/// let mut checkbox = Checkbox::new()
///     .with_button_opts([ButtonOpt::Label("Enable sound".into())])
///     .on_changed(|args| println!("now {:?}", args.state));
/// checkbox.set_state(CheckboxState::Checked);
/// assert_eq!(checkbox.state(), CheckboxState::Checked);
/// ```
pub struct Checkbox {
    changed: Event<CheckboxChangedEventArgs>,
    button_opts: Vec<ButtonOpt>,
    graphic: CheckboxGraphic,
    tri_state: bool,
    init: DeferredInit<Checkbox>,
    button: Option<Button>,
    state: CheckboxState,
    id: Option<WidgetId>,
}

impl Checkbox {
    pub fn new() -> Self {
        let mut checkbox = Self {
            changed: Event::new(),
            button_opts: Vec::new(),
            graphic: CheckboxGraphic::default(),
            tri_state: false,
            init: DeferredInit::new(),
            button: None,
            state: CheckboxState::Unchecked,
            id: None,
        };
        checkbox.init.append(Checkbox::create_button);
        checkbox
    }

    /// Options for the embedded button, applied when it is built.
    pub fn with_button_opts(mut self, opts: impl IntoIterator<Item = ButtonOpt>) -> Self {
        self.button_opts.extend(opts);
        self
    }

    pub fn with_graphic(mut self, graphic: CheckboxGraphic) -> Self {
        self.graphic = graphic;
        self
    }

    /// Allow the Greyed state.
    pub fn tri_state(mut self) -> Self {
        self.tri_state = true;
        self
    }

    pub fn on_changed(self, handler: impl Fn(&CheckboxChangedEventArgs) + 'static) -> Self {
        self.changed.add_handler(handler);
        self
    }

    fn create_button(&mut self) {
        let opts = std::mem::take(&mut self.button_opts);
        let mut button = Button::from_opts(opts);
        // The graphic always comes from `with_graphic`; render swaps it per state.
        button.set_graphic(Some(self.graphic.for_state(self.state).to_owned()));
        if let Some(id) = self.id {
            button.set_owner(id);
        }
        self.button = Some(button);
    }

    fn button_mut(&mut self) -> &mut Button {
        ensure_init(self);
        self.button
            .as_mut()
            .expect("checkbox button is built by deferred init")
    }

    pub fn state(&self) -> CheckboxState {
        self.state
    }

    pub fn is_tri_state(&self) -> bool {
        self.tri_state
    }

    /// The state-changed event.
    pub fn changed(&self) -> &Event<CheckboxChangedEventArgs> {
        &self.changed
    }

    /// Set the state, firing [`changed`](Checkbox::changed) if it differs.
    ///
    /// # Panics
    ///
    /// Panics when setting Greyed on a two-state checkbox.
    pub fn set_state(&mut self, state: CheckboxState) {
        assert!(
            state != CheckboxState::Greyed || self.tri_state,
            "non-tri-state checkbox cannot be greyed"
        );
        if state == self.state {
            return;
        }
        self.state = state;
        self.changed.fire(CheckboxChangedEventArgs { checkbox: self.id, state });
    }

    /// The embedded button's label.
    pub fn label(&mut self) -> &str {
        self.button_mut().label()
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Deferred for Checkbox {
    fn deferred_init(&mut self) -> &mut DeferredInit<Self> {
        &mut self.init
    }
}

impl Widget for Checkbox {
    fn widget_type(&self) -> &str {
        "Checkbox"
    }

    fn preferred_size(&mut self) -> Option<Size> {
        self.button_mut().preferred_size()
    }

    fn set_location(&mut self, rect: Region) {
        self.button_mut().set_location(rect);
    }

    fn on_mount(&mut self, id: WidgetId) {
        self.id = Some(id);
        if let Some(button) = self.button.as_mut() {
            button.set_owner(id);
        }
    }

    fn handle_input(&mut self, event: &InputEvent, state: &WidgetState) -> bool {
        let InputEvent::Mouse(mouse) = event else { return false };
        match self.button_mut().process_mouse(mouse, state) {
            ButtonInput::Ignored => false,
            ButtonInput::Consumed => true,
            ButtonInput::Clicked => {
                let next = self.state.advance(self.tri_state);
                self.set_state(next);
                true
            }
        }
    }

    fn render(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
        let graphic = self.graphic.for_state(self.state).to_owned();
        let button = self.button_mut();
        button.set_graphic(Some(graphic));
        button.paint(state.rect, state.enabled, surface);
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
