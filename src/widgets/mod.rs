//! Built-in widgets: Button, Checkbox, Container, List, SelectComboButton, Text.

pub mod button;
pub mod checkbox;
pub mod combo;
pub mod container;
pub mod list;
pub mod text;

pub use button::{Button, ButtonClickedEventArgs, ButtonInput, ButtonOpt, ButtonStyle};
pub use checkbox::{Checkbox, CheckboxChangedEventArgs, CheckboxGraphic, CheckboxState};
pub use combo::{SelectComboButton, SelectComboButtonEntrySelectedEventArgs};
pub use container::Container;
pub use list::{EntryCompareFn, EntryLabelFn, List, ListEntrySelectedEventArgs, ListInput, ListStyle};
pub use text::Text;
