//! Text formatting helpers shared by the report sections
//!
//! Pure functions only; printing is left to the caller.

use comfy_table::{presets::NOTHING, CellAlignment, Table};

/// Filled bar segment
pub const BAR_FILLED: char = '█';
/// Unfilled bar segment
pub const BAR_EMPTY: char = '░';
/// Appended to truncated values
pub const ELLIPSIS: &str = "...";

/// Format an integer with `,` thousands separators
pub fn thousands(value: impl Into<i128>) -> String {
    let value = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-width percentage bar
///
/// Each of the `width` segments stands for `100 / width` percent; the filled
/// count is `floor(percentage / segment)`, clamped to `[0, width]`.
pub fn null_bar(percentage: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let per_segment = 100.0 / width as f64;
    let filled = (percentage / per_segment).floor();
    let filled = if filled.is_nan() {
        0
    } else {
        (filled.max(0.0) as usize).min(width)
    };

    let mut bar = String::with_capacity(width * BAR_FILLED.len_utf8());
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(width - filled));
    bar
}

/// Cut `text` to `limit` characters, marking the cut with an ellipsis
pub fn truncate_display(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Render a borderless, right-aligned text table
///
/// With `with_index` a leading column numbers the rows from 0.
pub fn render_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>], with_index: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    let mut header: Vec<String> = Vec::with_capacity(headers.len() + 1);
    if with_index {
        header.push(String::new());
    }
    header.extend(headers.iter().map(|h| h.as_ref().to_string()));
    table.set_header(header);

    for (i, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = Vec::with_capacity(row.len() + 1);
        if with_index {
            cells.push(i.to_string());
        }
        cells.extend(row.iter().cloned());
        table.add_row(cells);
    }

    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table.trim_fmt()
}
