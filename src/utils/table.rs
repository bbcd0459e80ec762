//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    /// Maximum width; longer cells wrap onto continuation lines.
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: '-',
        }
    }

    pub fn with_separator(mut self, sep: char) -> Self {
        self.separator = sep;
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        let header: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| vec![c.header.clone()])
            .collect();
        self.push_line_group(&mut out, &header);

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&self.separator.to_string().repeat(total.saturating_sub(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<Vec<String>> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let value = row.get(i).map(String::as_str).unwrap_or("");
                    wrap_cell(value, col.width)
                })
                .collect();
            self.push_line_group(&mut out, &cells);
        }

        out
    }

    fn push_line_group(&self, out: &mut String, cells: &[Vec<String>]) {
        let height = cells.iter().map(Vec::len).max().unwrap_or(1);
        for line in 0..height {
            let mut text = String::new();
            for (i, col) in self.columns.iter().enumerate() {
                let part = cells[i].get(line).map(String::as_str).unwrap_or("");
                text.push_str(part);
                let pad = col.width.saturating_sub(UnicodeWidthStr::width(part));
                text.push_str(&" ".repeat(pad + 1));
            }
            out.push_str(text.trim_end());
            out.push('\n');
        }
    }
}

fn wrap_cell(value: &str, width: usize) -> Vec<String> {
    if value.is_empty() {
        return vec![String::new()];
    }
    if UnicodeWidthStr::width(value) <= width || width == 0 {
        return vec![value.to_string()];
    }
    textwrap::wrap(value, width)
        .into_iter()
        .map(|c| c.into_owned())
        .collect()
}
