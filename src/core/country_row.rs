use crate::core::{cell, grading, layout, numeric};
use crate::domain::model::{DiagnosticKind, NewCountry, RowDiagnostic, SourceRow};
use crate::domain::ports::CatalogStore;

/// Outcome of reading one sheet row as a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDecision {
    Accepted(NewCountry),
    Rejected(RowDiagnostic),
}

/// Reads a country candidate from `row`, skipping names the store already knows.
pub async fn parse_country_row<S: CatalogStore>(row: &SourceRow, store: &S) -> RowDecision {
    let Some(name) = cell::read(row, layout::NAME) else {
        tracing::debug!("Row {}: no country name, skipping", row.number);
        return RowDecision::Rejected(RowDiagnostic {
            row: row.number,
            country: None,
            kind: DiagnosticKind::BlankName,
            message: "country name is blank".to_string(),
        });
    };

    match store.country_exists(&name).await {
        Ok(true) => {
            tracing::info!("⏭️  Country {} already exists, skipping (row {})", name, row.number);
            return RowDecision::Rejected(RowDiagnostic {
                row: row.number,
                country: Some(name),
                kind: DiagnosticKind::AlreadyExists,
                message: "country already exists".to_string(),
            });
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!("Error parsing row {} ({}): {}", row.number, name, e);
            return RowDecision::Rejected(RowDiagnostic {
                row: row.number,
                country: Some(name),
                kind: DiagnosticKind::StoreFailure,
                message: e.to_string(),
            });
        }
    }

    match country_from_row(row, name.clone()) {
        Ok(country) => RowDecision::Accepted(country),
        Err(message) => {
            tracing::warn!("Error parsing row {} ({}): {}", row.number, name, message);
            RowDecision::Rejected(RowDiagnostic {
                row: row.number,
                country: Some(name),
                kind: DiagnosticKind::InvalidRow,
                message,
            })
        }
    }
}

/// Builds the candidate once the name is known. Fails only when the compulsory
/// schooling length is missing or not a positive number.
pub fn country_from_row(row: &SourceRow, name: String) -> Result<NewCountry, String> {
    let schooling_raw = cell::read(row, layout::COMPULSORY_SCHOOLING);
    let years = numeric::parse_numeric(schooling_raw.as_deref()).ok_or_else(|| {
        format!(
            "compulsory schooling years unreadable: {:?}",
            schooling_raw.unwrap_or_default()
        )
    })?;
    if years < 1 {
        return Err(format!("compulsory schooling years must be positive, got {}", years));
    }

    let best = cell::read(row, layout::BEST_GRADE);
    let worst = cell::read(row, layout::WORST_GRADE);

    Ok(NewCountry {
        name,
        years_compulsory_schooling: years,
        grading_system: grading::grading_system(best.as_deref(), worst.as_deref()),
        credit_ratio: cell::read(row, layout::CREDIT_RATIO),
        country_code: cell::read(row, layout::COUNTRY_CODE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::MemoryStore;
    use crate::domain::model::RawCell;

    fn row_with(number: u32, values: &[(usize, RawCell)]) -> SourceRow {
        let mut cells = vec![RawCell::Blank; 25];
        for (col, value) in values {
            cells[*col] = value.clone();
        }
        SourceRow::new(number, cells)
    }

    fn italy_row() -> SourceRow {
        row_with(
            3,
            &[
                (layout::NAME, RawCell::text("Italy")),
                (layout::COMPULSORY_SCHOOLING, RawCell::Numeric(13.0)),
                (layout::BEST_GRADE, RawCell::text("30 cum laude")),
                (layout::WORST_GRADE, RawCell::text("18")),
                (layout::CREDIT_RATIO, RawCell::text("25/30")),
                (layout::COUNTRY_CODE, RawCell::text("IT")),
            ],
        )
    }

    #[tokio::test]
    async fn test_accepts_complete_row() {
        let store = MemoryStore::new();
        let decision = parse_country_row(&italy_row(), &store).await;

        let RowDecision::Accepted(country) = decision else {
            panic!("expected accepted row, got {:?}", decision);
        };
        assert_eq!(country.name, "Italy");
        assert_eq!(country.years_compulsory_schooling, 13);
        assert_eq!(country.grading_system, "18-30");
        assert_eq!(country.credit_ratio.as_deref(), Some("25/30"));
        assert_eq!(country.country_code.as_deref(), Some("IT"));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_quietly() {
        let store = MemoryStore::new();
        let row = row_with(4, &[(layout::COMPULSORY_SCHOOLING, RawCell::Numeric(12.0))]);

        match parse_country_row(&row, &store).await {
            RowDecision::Rejected(diag) => {
                assert_eq!(diag.kind, DiagnosticKind::BlankName);
                assert_eq!(diag.row, 4);
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_existing_name_is_skipped_case_insensitively() {
        let store = MemoryStore::new();
        let RowDecision::Accepted(italy) = parse_country_row(&italy_row(), &store).await else {
            panic!("first pass should accept");
        };
        store.create_country(italy).await.unwrap();

        let shouted = row_with(
            9,
            &[
                (layout::NAME, RawCell::text("ITALY")),
                (layout::COMPULSORY_SCHOOLING, RawCell::Numeric(13.0)),
            ],
        );
        match parse_country_row(&shouted, &store).await {
            RowDecision::Rejected(diag) => {
                assert_eq!(diag.kind, DiagnosticKind::AlreadyExists);
                assert_eq!(diag.country.as_deref(), Some("ITALY"));
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn test_marked_schooling_years() {
        let row = row_with(5, &[(layout::COMPULSORY_SCHOOLING, RawCell::text("12|13*"))]);
        let country = country_from_row(&row, "Germany".to_string()).unwrap();
        assert_eq!(country.years_compulsory_schooling, 13);
        assert_eq!(country.grading_system, "N/A");
        assert_eq!(country.credit_ratio, None);
    }

    #[test]
    fn test_missing_schooling_years_rejects_row() {
        let row = row_with(6, &[(layout::COMPULSORY_SCHOOLING, RawCell::text("varies"))]);
        assert!(country_from_row(&row, "Nowhere".to_string()).is_err());

        let zero = row_with(7, &[(layout::COMPULSORY_SCHOOLING, RawCell::Numeric(0.0))]);
        assert!(country_from_row(&zero, "Nowhere".to_string()).is_err());
    }
}
