//! Fixed-width, pipe-delimited text grid.
//!
//! [`compute_table`] turns a column list and a slice of rows into a header
//! line and a body block whose lines all share the same display width.

use unicode_width::UnicodeWidthStr;

use crate::db::{Row, SqlValue};
use crate::utils::text::{pad_to_width, truncate_to_width};

/// Narrowest rendered column.
pub const MIN_COLUMN_WIDTH: usize = 4;
/// Widest rendered column.
pub const MAX_COLUMN_WIDTH: usize = 60;
/// Upper bound for `max_visible_rows`.
pub const MAX_VISIBLE_ROWS: usize = 500;
/// Text placed between cells.
pub const COLUMN_SEPARATOR: &str = " | ";
/// Display width of [`COLUMN_SEPARATOR`].
pub const SEPARATOR_WIDTH: usize = 3;

/// Rendered grid text plus layout metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridRender {
    pub header: String,
    pub body: String,
    /// Display width of every header and body line
    pub width: usize,
    /// Rows actually rendered
    pub row_count: usize,
    /// Clamped width of each column
    pub column_widths: Vec<usize>,
    pub separator_width: usize,
}

/// Format a value the way it appears in the grid and detail views.
pub fn format_cell(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Text(s) => s.clone(),
        SqlValue::Integer(i) => i.to_string(),
        SqlValue::Real(f) => f.to_string(),
        SqlValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        SqlValue::Blob(bytes) => format!("BLOB({})", bytes.len()),
    }
}

/// Cell text for a grid line.
fn grid_text(value: Option<&SqlValue>) -> String {
    flatten_controls(format_cell(value.unwrap_or(&SqlValue::Null)))
}

/// Control characters become spaces so a cell or column name never spans
/// terminal rows.
fn flatten_controls(raw: String) -> String {
    if raw.chars().any(char::is_control) {
        raw.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect()
    } else {
        raw
    }
}

/// Lay out `rows` under `columns`.
///
/// When `max_visible_rows` is given it is clamped to `1..=500` and only that
/// many leading rows are rendered. Columns are sized to their widest cell or
/// name, then clamped to `4..=60`; overlong cells are cut and end in `...`.
pub fn compute_table(
    columns: &[String],
    rows: &[Row],
    max_visible_rows: Option<usize>,
) -> GridRender {
    compute_table_capped(columns, rows, max_visible_rows, MAX_COLUMN_WIDTH)
}

/// Same as [`compute_table`] with a narrower column cap. `max_column_width`
/// is itself kept within `4..=60`.
pub fn compute_table_capped(
    columns: &[String],
    rows: &[Row],
    max_visible_rows: Option<usize>,
    max_column_width: usize,
) -> GridRender {
    let max_column_width = max_column_width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
    if columns.is_empty() {
        return GridRender {
            separator_width: SEPARATOR_WIDTH,
            ..GridRender::default()
        };
    }

    let visible_rows = match max_visible_rows {
        Some(max) => {
            let max = max.clamp(1, MAX_VISIBLE_ROWS);
            &rows[..rows.len().min(max)]
        }
        None => rows,
    };

    let names: Vec<String> = columns.iter().cloned().map(flatten_controls).collect();
    let cells: Vec<Vec<String>> = visible_rows
        .iter()
        .map(|row| columns.iter().map(|col| grid_text(row.get(col))).collect())
        .collect();

    let column_widths: Vec<usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .fold(name.width(), usize::max)
                .clamp(MIN_COLUMN_WIDTH, max_column_width)
        })
        .collect();

    let width = column_widths.iter().sum::<usize>() + SEPARATOR_WIDTH * (columns.len() - 1);

    let header = join_cells(names.iter().map(String::as_str), &column_widths);
    let body = cells
        .iter()
        .map(|row| join_cells(row.iter().map(String::as_str), &column_widths))
        .collect::<Vec<_>>()
        .join("\n");

    GridRender {
        header,
        body,
        width,
        row_count: visible_rows.len(),
        column_widths,
        separator_width: SEPARATOR_WIDTH,
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| pad_to_width(&truncate_to_width(cell, w), w))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

/// Column under content x-coordinate `x`, or `None` on a separator or past
/// the last column.
pub fn hit_test_column(render: &GridRender, x: usize) -> Option<usize> {
    let mut start = 0;
    for (i, &w) in render.column_widths.iter().enumerate() {
        let end = start + w;
        if x < start {
            return None;
        }
        if x < end {
            return Some(i);
        }
        start = end + render.separator_width;
    }
    None
}
