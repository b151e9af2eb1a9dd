//! Host input events, decoupled from any windowing or terminal backend.
//!
//! The frame driver consumes [`InputEvent`]s queued by the host. Crossterm
//! events convert via [`InputEvent::from_crossterm`] so the rest of the toolkit
//! never touches crossterm types.

use std::ops::BitOr;

use crate::geometry::Offset;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    /// Movement with a button held.
    Drag(MouseBtn),
    /// Movement with no button held.
    Moved,
}

/// A mouse event at a surface position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseAction, x: i32, y: i32) -> Self {
        Self { kind, x, y, modifiers: Modifiers::NONE }
    }

    /// Left button pressed at (x, y).
    pub fn down(x: i32, y: i32) -> Self {
        Self::new(MouseAction::Down(MouseBtn::Left), x, y)
    }

    /// Left button released at (x, y).
    pub fn up(x: i32, y: i32) -> Self {
        Self::new(MouseAction::Up(MouseBtn::Left), x, y)
    }

    /// Cursor moved to (x, y) with the left button held.
    pub fn drag(x: i32, y: i32) -> Self {
        Self::new(MouseAction::Drag(MouseBtn::Left), x, y)
    }

    /// Cursor moved to (x, y) with no button held.
    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(MouseAction::Moved, x, y)
    }

    pub fn position(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    /// Whether this is a left-button press.
    pub fn is_left_down(&self) -> bool {
        self.kind == MouseAction::Down(MouseBtn::Left)
    }

    /// Whether this is a left-button release.
    pub fn is_left_up(&self) -> bool {
        self.kind == MouseAction::Up(MouseBtn::Left)
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event queued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The host surface changed size.
    Resize { width: i32, height: i32 },
}

impl InputEvent {
    /// Convert a crossterm event. Focus and paste events carry nothing the
    /// toolkit consumes and map to `None`.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<InputEvent> {
        use crossterm::event::Event;
        match event {
            Event::Key(ke) => KeyEvent::try_from(ke).ok().map(InputEvent::Key),
            Event::Mouse(me) => MouseEvent::try_from(me).ok().map(InputEvent::Mouse),
            Event::Resize(w, h) => Some(InputEvent::Resize {
                width: i32::from(w),
                height: i32::from(h),
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// crossterm conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers;
    let mut out = Modifiers::NONE;
    if m.contains(KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

fn convert_button(b: crossterm::event::MouseButton) -> MouseBtn {
    match b {
        crossterm::event::MouseButton::Left => MouseBtn::Left,
        crossterm::event::MouseButton::Right => MouseBtn::Right,
        crossterm::event::MouseButton::Middle => MouseBtn::Middle,
    }
}

impl TryFrom<crossterm::event::KeyEvent> for KeyEvent {
    type Error = ();

    fn try_from(ct: crossterm::event::KeyEvent) -> Result<Self, ()> {
        use crossterm::event::KeyCode;
        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::F(n) => Key::F(n),
            _ => return Err(()),
        };
        Ok(KeyEvent::new(code, convert_modifiers(ct.modifiers)))
    }
}

impl TryFrom<crossterm::event::MouseEvent> for MouseEvent {
    type Error = ();

    fn try_from(me: crossterm::event::MouseEvent) -> Result<Self, ()> {
        use crossterm::event::MouseEventKind;
        let kind = match me.kind {
            MouseEventKind::Down(b) => MouseAction::Down(convert_button(b)),
            MouseEventKind::Up(b) => MouseAction::Up(convert_button(b)),
            MouseEventKind::Drag(b) => MouseAction::Drag(convert_button(b)),
            MouseEventKind::Moved => MouseAction::Moved,
            _ => return Err(()),
        };
        Ok(MouseEvent {
            kind,
            x: i32::from(me.column),
            y: i32::from(me.row),
            modifiers: convert_modifiers(me.modifiers),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
