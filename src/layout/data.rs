//! Per-child layout data.
//!
//! Each child carries one [`LayoutData`] value that only its parent's layout
//! strategy interprets. A strategy that meets a variant it does not understand
//! treats the child as having no layout data.

/// Alignment along the cross axis (row layout) or either axis (anchor layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[default]
    Start,
    Center,
    End,
}

/// Row layout settings for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowLayoutData {
    pub position: Position,
    /// Fill the container's full cross-axis extent.
    pub stretch: bool,
    /// Upper bound on the width; applied after stretching.
    pub max_width: Option<i32>,
    /// Upper bound on the height; applied after stretching.
    pub max_height: Option<i32>,
}

impl RowLayoutData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn max_width(mut self, max_width: i32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn max_height(mut self, max_height: i32) -> Self {
        self.max_height = Some(max_height);
        self
    }
}

/// Anchor layout settings for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorLayoutData {
    pub horizontal: Position,
    pub vertical: Position,
    pub stretch_horizontal: bool,
    pub stretch_vertical: bool,
}

impl AnchorLayoutData {
    /// Anchored at the given horizontal and vertical positions, no stretching.
    pub fn new(horizontal: Position, vertical: Position) -> Self {
        Self { horizontal, vertical, ..Self::default() }
    }

    /// Centered on both axes.
    pub fn centered() -> Self {
        Self::new(Position::Center, Position::Center)
    }

    pub fn stretch_horizontal(mut self, stretch: bool) -> Self {
        self.stretch_horizontal = stretch;
        self
    }

    pub fn stretch_vertical(mut self, stretch: bool) -> Self {
        self.stretch_vertical = stretch;
        self
    }
}

/// Layout data attached to a child widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutData {
    #[default]
    None,
    Row(RowLayoutData),
    Anchor(AnchorLayoutData),
}

impl LayoutData {
    /// The row data, if this is row data.
    pub fn as_row(&self) -> Option<&RowLayoutData> {
        match self {
            LayoutData::Row(data) => Some(data),
            _ => None,
        }
    }

    /// The anchor data, if this is anchor data.
    pub fn as_anchor(&self) -> Option<&AnchorLayoutData> {
        match self {
            LayoutData::Anchor(data) => Some(data),
            _ => None,
        }
    }
}

impl From<RowLayoutData> for LayoutData {
    fn from(data: RowLayoutData) -> Self {
        LayoutData::Row(data)
    }
}

impl From<AnchorLayoutData> for LayoutData {
    fn from(data: AnchorLayoutData) -> Self {
        LayoutData::Anchor(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(LayoutData::default(), LayoutData::None);
        assert!(LayoutData::None.as_row().is_none());
        assert!(LayoutData::None.as_anchor().is_none());
    }

    #[test]
    fn row_builder() {
        let data = RowLayoutData::new()
            .position(Position::End)
            .stretch(true)
            .max_width(80);
        assert_eq!(data.position, Position::End);
        assert!(data.stretch);
        assert_eq!(data.max_width, Some(80));
        assert_eq!(data.max_height, None);
    }

    #[test]
    fn from_conversions_pick_the_variant() {
        let row: LayoutData = RowLayoutData::new().into();
        assert!(row.as_row().is_some());
        assert!(row.as_anchor().is_none());

        let anchor: LayoutData = AnchorLayoutData::centered().into();
        assert_eq!(anchor.as_anchor().map(|a| a.vertical), Some(Position::Center));
        assert!(anchor.as_row().is_none());
    }
}
