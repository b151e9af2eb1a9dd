//! Pilot: programmatic interaction with a headless Ui.
//!
//! The `Pilot` wraps a [`Ui`] and a virtual clock. Every input method queues
//! the event and runs one frame, so handlers, commands and layouts have all
//! settled when it returns.

use std::time::{Duration, Instant};

use crate::event::{InputEvent, Key, KeyEvent, Modifiers, MouseEvent};
use crate::ui::{Ui, UiConfig};
use crate::widget::Widget;

use super::snapshot;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless frame driver for tests.
///
/// # Examples
///
/// ```
/// use trellis::testing::Pilot;
/// use trellis::widgets::{Checkbox, CheckboxState, Container};
///
/// let mut pilot = Pilot::new(Container::column().with_child(Checkbox::new()), 20, 2);
/// pilot.click(1, 0);
/// let id = pilot.ui().tree().children(pilot.ui().root())[0];
/// let state = pilot.ui().tree().widget::<Checkbox>(id).map(Checkbox::state);
/// assert_eq!(state, Some(CheckboxState::Checked));
/// ```
pub struct Pilot {
    ui: Ui,
    now: Instant,
}

impl Pilot {
    /// Drive `root` on a `width` x `height` viewport. Runs the first frame.
    pub fn new(root: impl Widget + 'static, width: i32, height: i32) -> Self {
        Self::with_config(root, UiConfig::new().with_viewport(width, height))
    }

    /// Drive `root` with a full config. Runs the first frame.
    pub fn with_config(root: impl Widget + 'static, config: UiConfig) -> Self {
        Self::from_ui(Ui::with_config(root, config))
    }

    /// Take over an already configured [`Ui`]. Runs the first frame.
    pub fn from_ui(ui: Ui) -> Self {
        let mut pilot = Self { ui, now: Instant::now() };
        pilot.update();
        pilot
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.send(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Simulate a left-button click at (x, y) within a single frame.
    pub fn click(&mut self, x: i32, y: i32) {
        self.ui.push_input(InputEvent::Mouse(MouseEvent::down(x, y)));
        self.send(InputEvent::Mouse(MouseEvent::up(x, y)));
    }

    /// Press the left button at (x, y).
    pub fn press(&mut self, x: i32, y: i32) {
        self.send(InputEvent::Mouse(MouseEvent::down(x, y)));
    }

    /// Move to (x, y) with the left button held.
    pub fn drag_to(&mut self, x: i32, y: i32) {
        self.send(InputEvent::Mouse(MouseEvent::drag(x, y)));
    }

    /// Release the left button at (x, y).
    pub fn release(&mut self, x: i32, y: i32) {
        self.send(InputEvent::Mouse(MouseEvent::up(x, y)));
    }

    /// Move to (x, y) with no button held.
    pub fn hover(&mut self, x: i32, y: i32) {
        self.send(InputEvent::Mouse(MouseEvent::moved(x, y)));
    }

    /// Press at `from`, drag to `to`, release there.
    pub fn drag_and_drop(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.press(from.0, from.1);
        self.drag_to(to.0, to.1);
        self.release(to.0, to.1);
    }

    /// Simulate a host surface resize.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.send(InputEvent::Resize { width, height });
    }

    fn send(&mut self, event: InputEvent) {
        self.ui.push_input(event);
        self.update();
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Run one frame at the pilot's current time.
    pub fn update(&mut self) {
        self.ui.update_at(self.now);
    }

    /// Move the clock forward by `by` and run one frame.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.update();
    }

    /// The pilot's virtual time.
    pub fn now(&self) -> Instant {
        self.now
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying ui immutably.
    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// Borrow the underlying ui mutably.
    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Render the whole ui to plain text.
    pub fn render_to_string(&mut self) -> String {
        snapshot::render_to_string(&mut self.ui)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
