//! Row layout: children placed one after another along a single axis.

use crate::geometry::{Insets, Offset, Region, Size};

use super::data::{Position, RowLayoutData};
use super::traits::{Direction, LayoutChild, Layouter, Placement};

/// Lays children out in a row (horizontal) or column (vertical).
///
/// Each child gets its preferred size. [`RowLayoutData`] can stretch a child
/// across the cross axis, clamp it to a maximum, and align it within the
/// cross axis. The order is always stretch, then clamp, then align.
#[derive(Debug, Clone)]
pub struct RowLayout {
    direction: Direction,
    padding: Insets,
    spacing: i32,
    dirty: bool,
}

impl RowLayout {
    /// A horizontal row with no padding or spacing.
    ///
    /// A new layout starts dirty so its first pass always runs.
    pub fn new() -> Self {
        Self {
            direction: Direction::Horizontal,
            padding: Insets::ZERO,
            spacing: 0,
            dirty: true,
        }
    }

    pub fn horizontal() -> Self {
        Self::new()
    }

    pub fn vertical() -> Self {
        Self::new().with_direction(Direction::Vertical)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Change the direction. Marks the layout dirty.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.dirty = true;
    }

    /// Change the padding. Marks the layout dirty.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.dirty = true;
    }

    /// Change the spacing. Marks the layout dirty.
    pub fn set_spacing(&mut self, spacing: i32) {
        self.spacing = spacing;
        self.dirty = true;
    }

    /// Walk the children, reporting each locateable child's rectangle.
    ///
    /// With `apply_position` unset this is the speculative pass used for
    /// sizing: stretch and alignment need a real container rect, so only the
    /// max clamp applies.
    fn place(
        &self,
        children: &[LayoutChild],
        rect: Region,
        apply_position: bool,
        mut place: impl FnMut(usize, Region),
    ) {
        if children.is_empty() {
            return;
        }

        let inner = rect.inset(self.padding);
        let mut cursor = Offset::ZERO;

        for (index, child) in children.iter().enumerate() {
            let mut at = cursor;
            let mut extent = child.extent();

            if let Some(data) = child.data.as_row() {
                if apply_position {
                    extent = self.stretch(data, extent, inner);
                }
                extent = clamp(data, extent);
                if apply_position {
                    at = self.align(data, at, extent, inner, cursor);
                }
            }

            if child.locateable {
                place(index, extent.at(inner.origin() + at));
            }

            match self.direction {
                Direction::Horizontal => cursor.x += extent.width + self.spacing,
                Direction::Vertical => cursor.y += extent.height + self.spacing,
            }
        }
    }

    fn stretch(&self, data: &RowLayoutData, extent: Size, inner: Region) -> Size {
        if !data.stretch {
            return extent;
        }
        match self.direction {
            Direction::Horizontal => Size::new(extent.width, inner.height),
            Direction::Vertical => Size::new(inner.width, extent.height),
        }
    }

    fn align(
        &self,
        data: &RowLayoutData,
        at: Offset,
        extent: Size,
        inner: Region,
        cursor: Offset,
    ) -> Offset {
        let (cross, size, start) = match self.direction {
            Direction::Horizontal => (inner.height, extent.height, cursor.y),
            Direction::Vertical => (inner.width, extent.width, cursor.x),
        };
        let offset = match data.position {
            Position::Start => return at,
            Position::Center => start + (cross - size) / 2,
            Position::End => start + cross - size,
        };
        match self.direction {
            Direction::Horizontal => Offset::new(at.x, offset),
            Direction::Vertical => Offset::new(offset, at.y),
        }
    }
}

fn clamp(data: &RowLayoutData, extent: Size) -> Size {
    let mut out = extent;
    if let Some(max) = data.max_width.filter(|&m| m > 0) {
        out.width = out.width.min(max);
    }
    if let Some(max) = data.max_height.filter(|&m| m > 0) {
        out.height = out.height.min(max);
    }
    out
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layouter for RowLayout {
    fn preferred_size(&self, children: &[LayoutChild]) -> Size {
        if children.is_empty() {
            return Size::ZERO;
        }
        let mut bounds = Region::EMPTY;
        self.place(children, Region::EMPTY, false, |_, rect| {
            bounds = bounds.union(rect);
        });
        bounds.size().pad(self.padding)
    }

    fn layout(&mut self, children: &[LayoutChild], rect: Region) -> Vec<Placement> {
        if !self.dirty {
            return Vec::new();
        }
        let mut placements = Vec::with_capacity(children.len());
        self.place(children, rect, true, |index, rect| {
            placements.push(Placement { index, rect });
        });
        self.dirty = false;
        tracing::trace!(target: "trellis::layout", children = children.len(), "row layout pass");
        placements
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}

// ===========================================================================
// Tests
// ===========================================================================
