use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CountryId = u64;
pub type ProgramId = u64;

/// One spreadsheet cell as the workbook reader saw it, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Numeric(f64),
    Blank,
    Other(String),
}

impl RawCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// A data row addressed by its 1-based row number in the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub number: u32,
    pub cells: Vec<RawCell>,
}

impl SourceRow {
    pub fn new(number: u32, cells: Vec<RawCell>) -> Self {
        Self { number, cells }
    }

    pub fn cell(&self, column: usize) -> &RawCell {
        self.cells.get(column).unwrap_or(&RawCell::Blank)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| match cell {
            RawCell::Blank => true,
            RawCell::Text(s) | RawCell::Other(s) => s.trim().is_empty(),
            RawCell::Numeric(_) => false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub years_compulsory_schooling: i32,
    pub grading_system: String,
    pub credit_ratio: Option<String>,
    pub country_code: Option<String>,
}

/// A country candidate that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
    pub name: String,
    pub years_compulsory_schooling: i32,
    pub grading_system: String,
    pub credit_ratio: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BachelorProgram {
    pub id: ProgramId,
    pub country_id: CountryId,
    pub duration: i32,
    pub is_special_program: bool,
    pub credits_per_year: i32,
    pub total_credits: i32,
    pub eqf_level: i32,
    pub official_denomination: String,
}

/// A program candidate. `total_credits` starts as `duration * credits_per_year`
/// and is stored as-is afterwards; nothing re-derives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBachelorProgram {
    pub country_id: CountryId,
    pub duration: i32,
    pub is_special_program: bool,
    pub credits_per_year: i32,
    pub total_credits: i32,
    pub eqf_level: i32,
    pub official_denomination: String,
}

impl NewBachelorProgram {
    pub fn new(
        country_id: CountryId,
        duration: i32,
        is_special_program: bool,
        credits_per_year: i32,
        eqf_level: i32,
        official_denomination: impl Into<String>,
    ) -> Self {
        Self {
            country_id,
            duration,
            is_special_program,
            credits_per_year,
            total_credits: duration * credits_per_year,
            eqf_level,
            official_denomination: official_denomination.into(),
        }
    }

    pub fn with_total_credits(mut self, total_credits: i32) -> Self {
        self.total_credits = total_credits;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    BlankName,
    AlreadyExists,
    InvalidRow,
    ProgramRejected,
    StoreFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub row: u32,
    pub country: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedCountry {
    pub row: u32,
    pub country: Country,
    pub programs: Vec<BachelorProgram>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub rows_read: usize,
    pub imported: Vec<ImportedCountry>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ImportReport {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            rows_read: 0,
            imported: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn countries_created(&self) -> usize {
        self.imported.len()
    }

    pub fn programs_created(&self) -> usize {
        self.imported.iter().map(|c| c.programs.len()).sum()
    }

    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &RowDiagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}
