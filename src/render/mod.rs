//! Rendering: the [`Surface`] paint target, cell styles, and the in-memory [`Canvas`].

pub mod canvas;
pub mod style;
pub mod surface;

pub use canvas::Canvas;
pub use style::{CellStyle, StyledCell};
pub use surface::Surface;
