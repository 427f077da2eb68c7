use crate::core::country_row::{parse_country_row, RowDecision};
use crate::core::programs::expand_programs;
use crate::domain::model::{
    BachelorProgram, DiagnosticKind, ImportReport, ImportedCountry, RowDiagnostic, SourceRow,
};
use crate::domain::ports::{CatalogStore, RowSource};
use crate::utils::error::{AtlasError, Result};

/// Seeds the catalog from matrix rows.
///
/// Runs sequentially and is meant to be invoked once at start-up; the exists-then-create
/// check is not atomic, so concurrent imports into one store must be serialized by the
/// caller.
pub struct Importer<'a, S: CatalogStore> {
    store: &'a S,
}

impl<'a, S: CatalogStore> Importer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reads the row window from `source` and imports it. Only an unopenable source
    /// is reported as an error; row problems end up in the report.
    pub async fn import_from_source<R: RowSource + ?Sized>(
        &self,
        source: &R,
        first_row: u32,
        last_row: u32,
    ) -> Result<ImportReport> {
        let rows = source.read_rows(first_row, last_row)?;
        Ok(self.import_rows(rows).await)
    }

    pub async fn import_rows(&self, rows: Vec<SourceRow>) -> ImportReport {
        let mut report = ImportReport::start();

        for row in rows {
            if row.is_empty() {
                continue;
            }
            report.rows_read += 1;
            self.import_row(&row, &mut report).await;
        }

        let report = report.finish();
        tracing::info!(
            "Import finished: {} countries, {} programs, {} skipped/failed rows",
            report.countries_created(),
            report.programs_created(),
            report.diagnostics.len()
        );
        report
    }

    async fn import_row(&self, row: &SourceRow, report: &mut ImportReport) {
        let candidate = match parse_country_row(row, self.store).await {
            RowDecision::Accepted(candidate) => candidate,
            RowDecision::Rejected(diagnostic) => {
                report.diagnostics.push(diagnostic);
                return;
            }
        };

        let name = candidate.name.clone();
        let country = match self.store.create_country(candidate).await {
            Ok(country) => country,
            Err(AtlasError::Duplicate { message }) => {
                tracing::info!("⏭️  Country {} already exists, skipping (row {})", name, row.number);
                report.diagnostics.push(RowDiagnostic {
                    row: row.number,
                    country: Some(name),
                    kind: DiagnosticKind::AlreadyExists,
                    message,
                });
                return;
            }
            Err(e) => {
                tracing::error!("Error saving row {} ({}): {}", row.number, name, e);
                report.diagnostics.push(RowDiagnostic {
                    row: row.number,
                    country: Some(name),
                    kind: DiagnosticKind::StoreFailure,
                    message: e.to_string(),
                });
                return;
            }
        };
        tracing::info!("✅ Saved: {} (row {})", country.name, row.number);

        let mut programs: Vec<BachelorProgram> = Vec::new();
        for draft in expand_programs(&country, row) {
            let duration = draft.duration;
            match self.store.create_program(draft).await {
                Ok(program) => {
                    tracing::info!(
                        "  - Created program: {} years, {} credits{}",
                        program.duration,
                        program.credits_per_year,
                        if program.is_special_program { " (special)" } else { "" }
                    );
                    programs.push(program);
                }
                Err(e) => {
                    tracing::warn!(
                        "  - Program of {} years rejected for {} (row {}): {}",
                        duration,
                        country.name,
                        row.number,
                        e
                    );
                    report.diagnostics.push(RowDiagnostic {
                        row: row.number,
                        country: Some(country.name.clone()),
                        kind: DiagnosticKind::ProgramRejected,
                        message: format!("{}-year program: {}", duration, e),
                    });
                }
            }
        }

        report.imported.push(ImportedCountry {
            row: row.number,
            country,
            programs,
        });
    }
}
