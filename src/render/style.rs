//! Cell styling shared by widgets and surfaces.

/// Visual style for a single cell.
///
/// Colors are free-form names (`"red"`, `"#1e1e2e"`); interpreting them is the
/// surface's business. A `None` background keeps whatever is already painted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: impl Into<String>) -> Self {
        self.fg = Some(color.into());
        self
    }

    pub fn bg(mut self, color: impl Into<String>) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// `self` drawn over `below`: unset colors fall through.
    pub fn over(&self, below: &CellStyle) -> CellStyle {
        CellStyle {
            fg: self.fg.clone().or_else(|| below.fg.clone()),
            bg: self.bg.clone().or_else(|| below.bg.clone()),
            ..self.clone()
        }
    }
}

/// A single cell: one character with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A space with default style.
    pub fn blank() -> Self {
        Self { ch: ' ', style: CellStyle::default() }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}
