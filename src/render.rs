//! List renderer — projects a message list onto numbered sheet rows.
//!
//! Rows are numbered from 2 (row 1 is the sheet header) and padded with
//! blank rows up to a minimum count. Rendering is pure: the list is only
//! borrowed and nothing is retained.

use crate::entry::Entry;

/// Number of the first data row; row 1 is the header.
pub const FIRST_ROW_NUMBER: usize = 2;

const NAME_HEADER: &str = "nome";
const MESSAGE_HEADER: &str = "mensagem";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub number: usize,
    pub name: String,
    pub message: String,
}

impl Row {
    fn blank(number: usize) -> Self {
        Self { number, name: String::new(), message: String::new() }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.message.is_empty()
    }
}

/// Produce `max(minimum_rows, list.len())` rows, entries first in order,
/// then blank placeholders continuing the numbering.
#[must_use]
pub fn render(list: &[Entry], minimum_rows: usize) -> Vec<Row> {
    let total = minimum_rows.max(list.len());
    let mut rows = Vec::with_capacity(list.len());

    for (index, entry) in list.iter().enumerate() {
        rows.push(Row {
            number: FIRST_ROW_NUMBER + index,
            name: entry.name.clone(),
            message: entry.message.clone(),
        });
    }
    for index in list.len()..total {
        rows.push(Row::blank(FIRST_ROW_NUMBER + index));
    }

    rows
}

/// Lay rows out as a plain-text sheet with a header line.
#[must_use]
pub fn format_table(rows: &[Row]) -> String {
    let number_width = rows
        .iter()
        .map(|row| row.number.to_string().len())
        .max()
        .unwrap_or(1)
        .max(1);
    let name_width = column_width(NAME_HEADER, rows.iter().map(|row| row.name.as_str()));

    let header = format!("{:>number_width$} | {NAME_HEADER:<name_width$} | {MESSAGE_HEADER}", 1);
    let body = rows.iter().map(|row| {
        let line = format!("{:>number_width$} | {:<name_width$} | {}", row.number, row.name, row.message);
        line.trim_end().to_owned()
    });

    let mut out = String::new();
    for line in std::iter::once(header).chain(body) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
