//! Snapshot rendering helpers.
//!
//! Each helper paints into a fresh [`Canvas`] and returns its text: one line
//! per row, trailing spaces trimmed, rows joined with `'\n'`.

use crate::geometry::Region;
use crate::render::Canvas;
use crate::tree::{WidgetId, WidgetTree};
use crate::ui::Ui;
use crate::widget::Widget;

/// Render a whole [`Ui`] at its viewport size.
pub fn render_to_string(ui: &mut Ui) -> String {
    let size = ui.viewport();
    let mut canvas = Canvas::new(size.width, size.height);
    ui.render(&mut canvas);
    canvas.to_text()
}

/// Lay out and render the subtree rooted at `root` on a `width` x `height` canvas.
pub fn render_tree_to_string(tree: &mut WidgetTree, root: WidgetId, width: i32, height: i32) -> String {
    tree.layout(root);
    let mut canvas = Canvas::new(width, height);
    tree.render(root, &mut canvas);
    canvas.to_text()
}

/// Render a single widget filling a `width` x `height` area.
///
/// The widget is inserted into a scratch tree, so containers lay out the
/// children they were built with.
///
/// # Examples
///
/// ```
/// use trellis::testing::render_widget_to_string;
/// use trellis::widgets::Text;
///
/// assert_eq!(render_widget_to_string(Text::new("Hello"), 20, 1), "Hello");
/// ```
pub fn render_widget_to_string(widget: impl Widget + 'static, width: i32, height: i32) -> String {
    let mut tree = WidgetTree::new();
    let root = tree.insert(widget);
    tree.set_location(root, Region::new(0, 0, width, height));
    render_tree_to_string(&mut tree, root, width, height)
}

// ===========================================================================
// Tests
// ===========================================================================
