//! Education matrix reader backed by calamine.

use crate::core::layout;
use crate::domain::model::{RawCell, SourceRow};
use crate::domain::ports::{ConfigProvider, RowSource};
use crate::utils::error::{AtlasError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
    sheet_index: usize,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>, sheet_index: usize) -> Self {
        Self {
            path: path.into(),
            sheet_index,
        }
    }

    /// Reads the workbook and sheet named by `config`.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.workbook_path(), config.sheet_index())
    }

    pub fn sheet_index(&self) -> usize {
        self.sheet_index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, message: impl Into<String>) -> AtlasError {
        AtlasError::SourceUnavailable {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn open_sheet(&self) -> Result<Range<Data>> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e: calamine::XlsxError| self.unavailable(e.to_string()))?;

        workbook
            .worksheet_range_at(self.sheet_index)
            .ok_or_else(|| self.unavailable(format!("no sheet at index {}", self.sheet_index)))?
            .map_err(|e| self.unavailable(e.to_string()))
    }
}

impl RowSource for XlsxSource {
    fn read_rows(&self, first: u32, last: u32) -> Result<Vec<SourceRow>> {
        let range = self.open_sheet()?;
        tracing::debug!(
            "Opened sheet {} of {} (cells {:?}..{:?})",
            self.sheet_index,
            self.path.display(),
            range.start(),
            range.end()
        );

        let Some((_, last_used_row)) = range.end() else {
            return Ok(Vec::new());
        };

        let rows = (first.max(1)..=last)
            .map(|number| number - 1)
            .take_while(|index| *index <= last_used_row)
            .map(|index| {
                let cells = (0..=layout::COUNTRY_CODE as u32)
                    .map(|col| {
                        range
                            .get_value((index, col))
                            .map(to_raw_cell)
                            .unwrap_or(RawCell::Blank)
                    })
                    .collect();
                SourceRow::new(index + 1, cells)
            })
            .collect();

        Ok(rows)
    }
}

/// Maps calamine's cell typing onto the four kinds the normalizer distinguishes.
pub fn to_raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Blank,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Numeric(*f),
        Data::Int(i) => RawCell::Numeric(*i as f64),
        Data::Bool(b) => RawCell::Other(b.to_string().to_uppercase()),
        Data::DateTime(dt) => RawCell::Other(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Other(s.clone()),
        Data::Error(e) => RawCell::Other(e.to_string()),
    }
}
