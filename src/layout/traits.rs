//! The layout strategy contract.

use crate::geometry::{Region, Size};

use super::data::LayoutData;

/// Extent used for a child that cannot report a preferred size.
pub const PLACEHOLDER_SIZE: Size = Size::new(50, 50);

/// Which axis a row layout advances along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

/// What a layout strategy knows about one child.
///
/// The widget tree builds these from its nodes so strategies never touch
/// widgets directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutChild {
    /// `None` when the child cannot report a size.
    pub preferred: Option<Size>,
    pub data: LayoutData,
    /// Whether the child accepts a location.
    pub locateable: bool,
}

impl LayoutChild {
    pub fn new(preferred: Option<Size>) -> Self {
        Self { preferred, data: LayoutData::None, locateable: true }
    }

    pub fn with_data(mut self, data: impl Into<LayoutData>) -> Self {
        self.data = data.into();
        self
    }

    /// The preferred size, or [`PLACEHOLDER_SIZE`] when unknown.
    pub fn extent(&self) -> Size {
        self.preferred.unwrap_or(PLACEHOLDER_SIZE)
    }
}

/// A rectangle assigned to the child at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub rect: Region,
}

/// A pluggable layout algorithm owned by a container.
pub trait Layouter {
    /// The size this layout would occupy given unlimited space.
    ///
    /// Must not change any state, including the dirty flag.
    fn preferred_size(&self, children: &[LayoutChild]) -> Size;

    /// Assign rectangles to children inside `rect`.
    ///
    /// Returns no placements when the layout is clean. Clears the dirty flag.
    fn layout(&mut self, children: &[LayoutChild], rect: Region) -> Vec<Placement>;

    /// Force the next [`layout`](Layouter::layout) call to recompute.
    fn mark_dirty(&mut self);

    fn is_dirty(&self) -> bool;
}
