//! Anchor layout: each child pinned to an edge, corner, or the center.

use crate::geometry::{Insets, Offset, Region, Size};

use super::data::Position;
use super::traits::{LayoutChild, Layouter, Placement};

/// Places every child independently inside the padded container rect.
///
/// Children without [`AnchorLayoutData`](super::AnchorLayoutData) sit at the
/// top-left corner with their preferred size.
#[derive(Debug, Clone)]
pub struct AnchorLayout {
    padding: Insets,
    dirty: bool,
}

impl AnchorLayout {
    pub fn new() -> Self {
        Self { padding: Insets::ZERO, dirty: true }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Change the padding. Marks the layout dirty.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.dirty = true;
    }
}

impl Default for AnchorLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn anchor(position: Position, available: i32, extent: i32) -> i32 {
    match position {
        Position::Start => 0,
        Position::Center => (available - extent) / 2,
        Position::End => available - extent,
    }
}

impl Layouter for AnchorLayout {
    fn preferred_size(&self, children: &[LayoutChild]) -> Size {
        if children.is_empty() {
            return Size::ZERO;
        }
        children
            .iter()
            .fold(Size::ZERO, |acc, child| acc.max(child.extent()))
            .pad(self.padding)
    }

    fn layout(&mut self, children: &[LayoutChild], rect: Region) -> Vec<Placement> {
        if !self.dirty {
            return Vec::new();
        }
        let inner = rect.inset(self.padding);
        let mut placements = Vec::with_capacity(children.len());

        for (index, child) in children.iter().enumerate() {
            let mut extent = child.extent();
            let mut at = Offset::ZERO;

            if let Some(data) = child.data.as_anchor() {
                if data.stretch_horizontal {
                    extent.width = inner.width;
                }
                if data.stretch_vertical {
                    extent.height = inner.height;
                }
                at = Offset::new(
                    anchor(data.horizontal, inner.width, extent.width),
                    anchor(data.vertical, inner.height, extent.height),
                );
            }

            if child.locateable {
                placements.push(Placement { index, rect: extent.at(inner.origin() + at) });
            }
        }

        self.dirty = false;
        tracing::trace!(target: "trellis::layout", children = children.len(), "anchor layout pass");
        placements
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}
