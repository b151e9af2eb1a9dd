//! Event system: typed channels, the deferred queue, host input.

pub mod channel;
pub mod deferred;
pub mod input;

pub use channel::{Event, FireMode};
pub use deferred::DeferredQueue;
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
