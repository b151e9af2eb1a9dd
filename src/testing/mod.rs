//! Headless testing: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Ui`](crate::ui::Ui) with simulated input
//! and a controllable clock. Use [`render_to_string`] and related helpers to
//! capture output as plain text for snapshot assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_to_string, render_tree_to_string, render_widget_to_string};
