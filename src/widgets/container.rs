//! Container widget: owns children and the layout that arranges them.
//!
//! Children passed with [`Container::with_child`] are moved into the tree
//! when the container is inserted; after that, the tree owns them and
//! [`WidgetTree::add_child`](crate::tree::WidgetTree::add_child) adds more.

use std::any::Any;

use crate::geometry::Size;
use crate::layout::{AnchorLayout, LayoutData, Layouter, RowLayout};
use crate::render::{CellStyle, Surface};
use crate::widget::{Widget, WidgetState};

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A widget that holds children and delegates their placement to a layout.
///
/// # Examples
///
/// ```
/// use trellis::layout::{RowLayout, RowLayoutData};
/// use trellis::tree::WidgetTree;
/// use trellis::widgets::{Button, Container, Text};
///
/// let mut tree = WidgetTree::new();
/// let root = tree.insert(
///     Container::new(RowLayout::vertical().with_spacing(1))
///         .with_child(Text::new("Title"))
///         .with_child_data(Button::new("OK"), RowLayoutData::new().stretch(true)),
/// );
/// assert_eq!(tree.children(root).len(), 2);
/// ```
pub struct Container {
    layout: Option<Box<dyn Layouter>>,
    children: Vec<(Box<dyn Widget>, LayoutData)>,
    background: Option<CellStyle>,
    size: Option<Size>,
}

impl Container {
    pub fn new(layout: impl Layouter + 'static) -> Self {
        Self {
            layout: Some(Box::new(layout)),
            children: Vec::new(),
            background: None,
            size: None,
        }
    }

    /// A container with a horizontal [`RowLayout`].
    pub fn row() -> Self {
        Self::new(RowLayout::horizontal())
    }

    /// A container with a vertical [`RowLayout`].
    pub fn column() -> Self {
        Self::new(RowLayout::vertical())
    }

    /// A container with an [`AnchorLayout`].
    pub fn anchored() -> Self {
        Self::new(AnchorLayout::new())
    }

    /// Add a child with no layout data (builder pattern).
    pub fn with_child(self, child: impl Widget + 'static) -> Self {
        self.with_child_data(child, LayoutData::None)
    }

    /// Add a child with layout data (builder pattern).
    pub fn with_child_data(mut self, child: impl Widget + 'static, data: impl Into<LayoutData>) -> Self {
        self.children.push((Box::new(child), data.into()));
        self
    }

    /// Fill the container's rect with `style` before its children paint.
    pub fn with_background(mut self, style: CellStyle) -> Self {
        self.background = Some(style);
        self
    }

    /// Report a fixed preferred size instead of asking the layout.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn background(&self) -> Option<&CellStyle> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, style: Option<CellStyle>) {
        self.background = style;
    }

    /// Children not yet moved into a tree.
    pub fn pending_children(&self) -> usize {
        self.children.len()
    }
}

impl Widget for Container {
    fn widget_type(&self) -> &str {
        "Container"
    }

    fn preferred_size(&mut self) -> Option<Size> {
        self.size
    }

    fn render(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
        if let Some(style) = &self.background {
            surface.fill(state.rect, style);
        }
    }

    fn take_layout(&mut self) -> Option<Box<dyn Layouter>> {
        self.layout.take()
    }

    fn take_children(&mut self) -> Vec<(Box<dyn Widget>, LayoutData)> {
        std::mem::take(&mut self.children)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Insets, Region};
    use crate::layout::{Position, RowLayoutData};
    use crate::render::Canvas;
    use crate::tree::{TreeError, WidgetTree};
    use crate::widgets::Text;
    use pretty_assertions::assert_eq;

    #[test]
    fn declared_children_move_into_tree_with_their_data() {
        let mut tree = WidgetTree::new();
        let data = RowLayoutData::new().position(Position::End);
        let root = tree.insert(
            Container::row()
                .with_child(Text::new("a"))
                .with_child_data(Text::new("b"), data),
        );
        let kids = tree.children(root).to_vec();
        assert_eq!(kids.len(), 2);
        assert_eq!(tree.node(kids[1]).unwrap().layout_data(), &LayoutData::Row(data));
        assert_eq!(tree.widget::<Container>(root).unwrap().pending_children(), 0);
    }

    #[test]
    fn nested_containers_insert_recursively() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::column().with_child(Container::row().with_child(Text::new("x"))));
        assert_eq!(tree.len(), 3);
        let inner = tree.children(root)[0];
        assert_eq!(tree.children(inner).len(), 1);
    }

    #[test]
    fn fixed_size_overrides_layout() {
        let mut tree = WidgetTree::new();
        let sized = tree.insert(Container::row().with_size(40, 3).with_child(Text::new("hi")));
        assert_eq!(tree.preferred_size(sized), Some(Size::new(40, 3)));
        let plain = tree.insert(Container::row().with_child(Text::new("hi")));
        assert_eq!(tree.preferred_size(plain), Some(Size::new(2, 1)));
    }

    #[test]
    fn container_accepts_children_after_insertion() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::column());
        let leaf = tree.add_child(root, Text::new("t")).unwrap();
        assert_eq!(tree.add_child(leaf, Text::new("u")), Err(TreeError::NotAContainer(leaf)));
    }

    #[test]
    fn background_paints_under_children() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            Container::new(RowLayout::horizontal().with_padding(Insets::new(0, 0, 0, 1)))
                .with_background(CellStyle::new().bg("blue"))
                .with_child(Text::new("hi")),
        );
        tree.set_location(root, Region::new(0, 0, 4, 1));
        tree.layout(root);
        let mut canvas = Canvas::new(4, 1);
        tree.render(root, &mut canvas);
        assert_eq!(canvas.to_text(), " hi");
        assert_eq!(canvas.cell(1, 0).unwrap().style.bg.as_deref(), Some("blue"));
        assert_eq!(canvas.cell(3, 0).unwrap().style.bg.as_deref(), Some("blue"));
    }
}
