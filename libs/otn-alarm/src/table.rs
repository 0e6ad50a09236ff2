//! Plain-text table layout
//!
//! Columns are at least two characters wider than their header and as wide as
//! their widest cell, separated by two spaces, with a row of dashes under the
//! header. Numeric columns are right-aligned, all others left-aligned, and
//! trailing blanks are trimmed from every line.

use std::fmt::Write as _;

const MIN_PADDING: usize = 2;
const COLUMN_SEPARATOR: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Table with fixed headers and string cells
#[derive(Debug, Clone, Default)]
pub struct SimpleTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SimpleTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells are blank and surplus cells are ignored
    pub fn push_row(&mut self, row: Vec<String>) {
        let mut row: Vec<String> = row.into_iter().map(|c| c.trim().to_string()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, one `\n`-terminated line per row
    pub fn render(&self) -> String {
        let columns: Vec<(usize, Align)> = (0..self.headers.len())
            .map(|col| (self.column_width(col), self.column_align(col)))
            .collect();

        let mut out = String::new();
        self.push_line(&mut out, &columns, self.headers.iter());
        let dashes: Vec<String> = columns.iter().map(|(w, _)| "-".repeat(*w)).collect();
        self.push_line(&mut out, &columns, dashes.iter());
        for row in &self.rows {
            self.push_line(&mut out, &columns, row.iter());
        }
        out
    }

    fn push_line<'a>(
        &self,
        out: &mut String,
        columns: &[(usize, Align)],
        cells: impl Iterator<Item = &'a String>,
    ) {
        let mut line = String::new();
        for (i, (cell, (width, align))) in cells.zip(columns).enumerate() {
            if i > 0 {
                line.push_str(COLUMN_SEPARATOR);
            }
            // Writing to a String cannot fail
            let _ = match align {
                Align::Left => write!(line, "{cell:<width$}"),
                Align::Right => write!(line, "{cell:>width$}"),
            };
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    fn column_width(&self, col: usize) -> usize {
        let header = self.headers[col].chars().count() + MIN_PADDING;
        self.rows
            .iter()
            .map(|row| row[col].chars().count())
            .fold(header, usize::max)
    }

    fn column_align(&self, col: usize) -> Align {
        let mut cells = self
            .rows
            .iter()
            .map(|row| row[col].as_str())
            .filter(|c| !c.is_empty())
            .peekable();

        if cells.peek().is_none() {
            return Align::Left;
        }
        if cells.all(is_number) {
            Align::Right
        } else {
            Align::Left
        }
    }
}

fn is_number(cell: &str) -> bool {
    cell.parse::<f64>().is_ok_and(f64::is_finite)
}
