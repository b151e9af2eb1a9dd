//! In-memory cell grid implementing [`Surface`].

use crate::geometry::{Region, Size};

use super::style::{CellStyle, StyledCell};
use super::surface::Surface;

/// A fixed-size grid of styled cells.
///
/// `cells[y][x]` is the cell at column x, row y.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    cells: Vec<Vec<StyledCell>>,
    width: i32,
    height: i32,
}

impl Canvas {
    /// A blank canvas. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![vec![StyledCell::blank(); width as usize]; height as usize],
            width,
            height,
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(StyledCell::blank());
        }
    }

    /// The cell at (x, y), if in bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<&StyledCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize)
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut StyledCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get_mut(y as usize)?.get_mut(x as usize)
    }

    /// The text of row `y` with trailing spaces trimmed.
    pub fn row_text(&self, y: i32) -> String {
        match usize::try_from(y).ok().and_then(|y| self.cells.get(y)) {
            Some(row) => row.iter().map(|c| c.ch).collect::<String>().trim_end().to_owned(),
            None => String::new(),
        }
    }

    /// Plain text of the whole canvas.
    ///
    /// Each row is right-trimmed; rows are joined with `'\n'`, no trailing newline.
    pub fn to_text(&self) -> String {
        (0..self.height).map(|y| self.row_text(y)).collect::<Vec<_>>().join("\n")
    }
}

fn region_clip(region: Region, width: i32, height: i32) -> Region {
    let x = region.x.max(0);
    let y = region.y.max(0);
    let right = region.right().min(width);
    let bottom = region.bottom().min(height);
    Region::new(x, y, (right - x).max(0), (bottom - y).max(0))
}

impl Surface for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn fill(&mut self, region: Region, style: &CellStyle) {
        let clip = region_clip(region, self.width, self.height);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                if let Some(cell) = self.cell_mut(x, y) {
                    *cell = StyledCell::new(' ', style.over(&cell.style));
                }
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: &CellStyle) {
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32;
            if let Some(cell) = self.cell_mut(cx, y) {
                *cell = StyledCell::new(ch, style.over(&cell.style));
            }
        }
    }
}
