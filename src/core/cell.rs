use crate::domain::model::{RawCell, SourceRow};

/// Collapses a raw cell into a trimmed string, or `None` when there is nothing in it.
///
/// Numeric cells are truncated toward zero (`13.9` reads as `"13"`), so fractional
/// markers such as `3.5*` only survive when the sheet stores them as text.
pub fn normalize(cell: &RawCell) -> Option<String> {
    let value = match cell {
        RawCell::Blank => return None,
        RawCell::Text(s) | RawCell::Other(s) => s.trim().to_string(),
        RawCell::Numeric(n) if n.is_finite() => (n.trunc() as i64).to_string(),
        RawCell::Numeric(n) => n.to_string(),
    };

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn read(row: &SourceRow, column: usize) -> Option<String> {
    normalize(row.cell(column))
}
