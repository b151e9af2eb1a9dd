//! Widget tree: slotmap-backed arena of widgets with parent links, layout
//! passes, hit-testing, and painting.

pub mod arena;
pub mod error;
pub mod node;

pub use arena::WidgetTree;
pub use error::TreeError;
pub use node::{WidgetId, WidgetNode};
