use crate::style::TextStyle;

pub const COMMIT_SYMBOL: &str = "⎔";
pub const MERGE_SYMBOL: &str = "⏣";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Connection,
    Commit,
    Merge,
}

/// One lane of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub cell_type: CellType,
    /// Style of the glyph
    pub style: TextStyle,
    /// Style of the horizontal filler, when it differs from `style`
    pub right_style: Option<TextStyle>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            cell_type: CellType::Connection,
            style: TextStyle::DEFAULT,
            right_style: None,
        }
    }
}

impl Cell {
    pub fn set_up(&mut self, style: TextStyle) -> &mut Self {
        self.up = true;
        self.style = style;
        self
    }

    pub fn set_down(&mut self, style: TextStyle) -> &mut Self {
        self.down = true;
        self.style = style;
        self
    }

    pub fn set_left(&mut self, style: TextStyle) -> &mut Self {
        self.left = true;
        // vertical lines keep their colour
        if !self.up && !self.down {
            self.style = style;
        }
        self
    }

    pub fn set_right(&mut self, style: TextStyle, override_style: bool) -> &mut Self {
        self.right = true;
        if self.right_style.is_none() || override_style {
            self.right_style = Some(style);
        }
        self
    }

    pub fn set_style(&mut self, style: TextStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn set_type(&mut self, cell_type: CellType) -> &mut Self {
        self.cell_type = cell_type;
        self
    }

    /// Forget everything drawn so far, keeping the cell type.
    pub fn reset(&mut self) {
        *self = Cell {
            cell_type: self.cell_type,
            ..Cell::default()
        };
    }

    /// The two characters of this cell, before styling.
    pub fn glyphs(&self) -> (&'static str, &'static str) {
        let (first, second) = box_drawing_chars(self.up, self.down, self.left, self.right);
        let first = match self.cell_type {
            CellType::Connection => first,
            CellType::Commit => COMMIT_SYMBOL,
            CellType::Merge => MERGE_SYMBOL,
        };
        (first, second)
    }

    pub fn render(&self, out: &mut String) {
        let (first, second) = self.glyphs();
        out.push_str(&self.style.paint(first));
        // a blank filler is never styled
        if second == " " {
            out.push(' ');
        } else {
            out.push_str(&self.right_style.unwrap_or(self.style).paint(second));
        }
    }
}

/// Glyph and horizontal filler for a combination of connector flags.
///
/// Vertical lines win over crossings: a lane passing straight through a
/// horizontal join is drawn as `│` rather than `┼`.
pub fn box_drawing_chars(
    up: bool,
    down: bool,
    left: bool,
    right: bool,
) -> (&'static str, &'static str) {
    match (up, down, left, right) {
        (true, true, true, true) => ("│", "─"),
        (true, true, true, false) => ("│", " "),
        (true, true, false, true) => ("│", "─"),
        (true, true, false, false) => ("│", " "),
        (true, false, true, true) => ("┴", "─"),
        (true, false, true, false) => ("┘", " "),
        (true, false, false, true) => ("└", "─"),
        (true, false, false, false) => ("╵", " "),
        (false, true, true, true) => ("┬", "─"),
        (false, true, true, false) => ("┐", " "),
        (false, true, false, true) => ("┌", "─"),
        (false, true, false, false) => ("╷", " "),
        (false, false, true, true) => ("─", "─"),
        (false, false, true, false) => ("─", " "),
        (false, false, false, true) => ("╶", "─"),
        (false, false, false, false) => (" ", " "),
    }
}

/// Concatenate a row of cells into a styled string.
pub fn render_cells(cells: &[Cell]) -> String {
    let mut out = String::with_capacity(cells.len() * 4);
    for cell in cells {
        cell.render(&mut out);
    }
    out
}
