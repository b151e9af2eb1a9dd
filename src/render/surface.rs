//! The paint target widgets render into.

use crate::geometry::{Region, Size};

use super::style::CellStyle;

/// Something widgets can paint on.
///
/// Hosts implement this over their real output (a terminal buffer, a bitmap);
/// [`Canvas`](super::Canvas) is the in-memory implementation used headless.
/// Implementations clip every call to their own bounds.
pub trait Surface {
    fn size(&self) -> Size;

    /// Paint every cell in `region` with `style`, clearing its text.
    fn fill(&mut self, region: Region, style: &CellStyle);

    /// Draw a single line of text starting at (x, y).
    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: &CellStyle);
}
