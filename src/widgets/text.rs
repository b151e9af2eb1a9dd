//! Text widget: one or more lines of plain text.

use std::any::Any;

use crate::geometry::Size;
use crate::render::{CellStyle, Surface};
use crate::widget::{Widget, WidgetState};

/// Static text. Lines split on `'\n'`; anything past the rect is clipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    label: String,
    style: CellStyle,
}

impl Text {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), style: CellStyle::default() }
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the text. The parent's layout does not notice on its own;
    /// call [`WidgetTree::request_relayout`](crate::tree::WidgetTree::request_relayout)
    /// if the size changed.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

impl Widget for Text {
    fn widget_type(&self) -> &str {
        "Text"
    }

    fn preferred_size(&mut self) -> Option<Size> {
        let width = self.label.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let height = self.label.lines().count().max(1);
        Some(Size::new(width as i32, height as i32))
    }

    fn render(&mut self, state: &WidgetState, surface: &mut dyn Surface) {
        let rect = state.rect;
        for (row, line) in self.label.lines().enumerate().take(rect.height.max(0) as usize) {
            let clipped: String = line.chars().take(rect.width.max(0) as usize).collect();
            surface.draw_text(rect.x, rect.y + row as i32, &clipped, &self.style);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Region;
    use crate::render::Canvas;
    use crate::tree::WidgetTree;

    #[test]
    fn preferred_size_counts_lines() {
        assert_eq!(Text::new("hello").preferred_size(), Some(Size::new(5, 1)));
        assert_eq!(Text::new("ab\nlonger").preferred_size(), Some(Size::new(6, 2)));
        assert_eq!(Text::new("").preferred_size(), Some(Size::new(0, 1)));
    }

    #[test]
    fn render_clips_to_rect() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(Text::new("first line\nsecond\nthird"));
        tree.set_location(id, Region::new(1, 0, 5, 2));
        let mut canvas = Canvas::new(10, 3);
        tree.render(id, &mut canvas);
        assert_eq!(canvas.to_text(), " first\n secon\n");
    }

    #[test]
    fn set_label() {
        let mut text = Text::new("a");
        text.set_label("bcd");
        assert_eq!(text.label(), "bcd");
        assert_eq!(text.preferred_size(), Some(Size::new(3, 1)));
    }
}
