//! Layout engine: the [`Layouter`] contract and its row and anchor strategies.

pub mod anchor;
pub mod data;
pub mod row;
pub mod traits;

pub use anchor::AnchorLayout;
pub use data::{AnchorLayoutData, LayoutData, Position, RowLayoutData};
pub use row::RowLayout;
pub use traits::{Direction, LayoutChild, Layouter, Placement, PLACEHOLDER_SIZE};
