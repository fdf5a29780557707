use crossterm::style::{Color, Stylize, style};
use std::fmt;
use unicode_width::UnicodeWidthStr;

const PADDING: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
}

impl Cell {
    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, color: None }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

/// Box-drawn text grid. The first row is the heading.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
    justify: Vec<Justify>,
    pub outer_border: bool,
    pub inner_column_border: bool,
    pub inner_heading_row_border: bool,
    pub inner_row_border: bool,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            rows,
            justify: Vec::new(),
            outer_border: true,
            inner_column_border: true,
            inner_heading_row_border: true,
            inner_row_border: false,
        }
    }

    pub fn justify(&mut self, col: usize, j: Justify) -> &mut Self {
        if self.justify.len() <= col {
            self.justify.resize(col + 1, Justify::Left);
        }
        self.justify[col] = j;
        self
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Replace one cell; out-of-range positions are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(r) = self.rows.get_mut(row) {
            if r.len() <= col {
                r.resize(col + 1, Cell::default());
            }
            r[col] = cell;
        }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Widest line of every column, in display columns.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.text.lines().map(|l| l.width()).max().unwrap_or(0);
                widths[i] = widths[i].max(w);
            }
        }
        widths
    }

    /// Room left for the contents of `col` if the whole table must fit in `total_width`.
    pub fn column_max_width(&self, col: usize, total_width: usize) -> usize {
        let widths = self.column_widths();
        let n = widths.len();
        let outer = if self.outer_border { 2 } else { 0 };
        let inner = if self.inner_column_border {
            n.saturating_sub(1)
        } else {
            0
        };
        let others: usize = widths
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != col)
            .map(|(_, w)| *w)
            .sum();

        total_width
            .saturating_sub(outer + inner + n * 2 * PADDING + others)
            .max(1)
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = Vec::new();

        if self.outer_border {
            out.push(self.hline(&widths, '┌', '┬', '┐'));
        }
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                let heading_sep = idx == 1 && self.inner_heading_row_border;
                if heading_sep || self.inner_row_border {
                    out.push(self.hline(&widths, '├', '┼', '┤'));
                }
            }
            self.push_row(&mut out, row, &widths);
        }
        if self.outer_border {
            out.push(self.hline(&widths, '└', '┴', '┘'));
        }

        out.join("\n")
    }

    fn hline(&self, widths: &[usize], left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        if self.outer_border {
            s.push(left);
        }
        for (i, w) in widths.iter().enumerate() {
            if i > 0 && self.inner_column_border {
                s.push(mid);
            }
            s.push_str(&"─".repeat(w + 2 * PADDING));
        }
        if self.outer_border {
            s.push(right);
        }
        s
    }

    fn push_row(&self, out: &mut Vec<String>, row: &[Cell], widths: &[usize]) {
        let split: Vec<Vec<&str>> = (0..widths.len())
            .map(|i| {
                row.get(i)
                    .map(|c| c.text.lines().collect())
                    .unwrap_or_default()
            })
            .collect();
        let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for k in 0..height {
            let mut s = String::new();
            if self.outer_border {
                s.push('│');
            }
            for (i, w) in widths.iter().enumerate() {
                if i > 0 && self.inner_column_border {
                    s.push('│');
                }
                let line = split[i].get(k).copied().unwrap_or("");
                let color = row.get(i).and_then(|c| c.color);
                let j = self.justify.get(i).copied().unwrap_or_default();
                s.push_str(&" ".repeat(PADDING));
                s.push_str(&pad(line, *w, j, color));
                s.push_str(&" ".repeat(PADDING));
            }
            if self.outer_border {
                s.push('│');
            }
            out.push(s);
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn pad(line: &str, width: usize, j: Justify, color: Option<Color>) -> String {
    let gap = width.saturating_sub(line.width());
    let (left, right) = match j {
        Justify::Left => (0, gap),
        Justify::Right => (gap, 0),
        Justify::Center => (gap / 2, gap - gap / 2),
    };
    let text = match color {
        Some(c) if !line.is_empty() => style(line).with(c).to_string(),
        _ => line.to_string(),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
