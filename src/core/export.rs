use crate::core::selector::select_representative;
use crate::domain::model::{BachelorProgram, Country, ImportReport, RowDiagnostic};
use crate::utils::error::{AtlasError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const COUNTRIES_CSV: &str = "countries.csv";
pub const PROGRAMS_CSV: &str = "bachelor_programs.csv";
pub const CATALOG_JSON: &str = "catalog.json";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    #[serde(flatten)]
    pub country: Country,
    pub representative_program_id: Option<u64>,
    pub programs: Vec<BachelorProgram>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub rows_read: usize,
    pub countries_created: usize,
    pub programs_created: usize,
    pub diagnostics: Vec<RowDiagnostic>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub generated_at: DateTime<Utc>,
    pub import: ImportSummary,
    pub countries: Vec<CountryEntry>,
}

impl CatalogSnapshot {
    pub fn new(report: &ImportReport, catalog: Vec<(Country, Vec<BachelorProgram>)>) -> Self {
        let countries = catalog
            .into_iter()
            .map(|(country, programs)| CountryEntry {
                representative_program_id: select_representative(&country, &programs).map(|p| p.id),
                country,
                programs,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            import: ImportSummary {
                started_at: report.started_at,
                finished_at: report.finished_at,
                rows_read: report.rows_read,
                countries_created: report.countries_created(),
                programs_created: report.programs_created(),
                diagnostics: report.diagnostics.clone(),
            },
            countries,
        }
    }

    pub fn program_count(&self) -> usize {
        self.countries.iter().map(|c| c.programs.len()).sum()
    }
}

/// Renders the requested formats as `(file name, bytes)` pairs.
pub fn render(snapshot: &CatalogSnapshot, formats: &[String]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();

    for format in formats {
        match format.as_str() {
            "csv" => {
                files.push((COUNTRIES_CSV.to_string(), countries_csv(snapshot)?));
                files.push((PROGRAMS_CSV.to_string(), programs_csv(snapshot)?));
            }
            "json" => {
                files.push((CATALOG_JSON.to_string(), serde_json::to_vec_pretty(snapshot)?));
            }
            other => {
                return Err(AtlasError::InvalidConfigValueError {
                    field: "export_formats".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported format".to_string(),
                })
            }
        }
    }

    Ok(files)
}

fn countries_csv(snapshot: &CatalogSnapshot) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "name",
        "years_compulsory_schooling",
        "grading_system",
        "credit_ratio",
        "country_code",
        "representative_program_id",
    ])?;
    for entry in &snapshot.countries {
        let c = &entry.country;
        writer.write_record([
            c.id.to_string(),
            c.name.clone(),
            c.years_compulsory_schooling.to_string(),
            c.grading_system.clone(),
            c.credit_ratio.clone().unwrap_or_default(),
            c.country_code.clone().unwrap_or_default(),
            entry
                .representative_program_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| AtlasError::IoError(e.into_error()))
}

fn programs_csv(snapshot: &CatalogSnapshot) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "country_id",
        "country",
        "duration",
        "is_special_program",
        "credits_per_year",
        "total_credits",
        "eqf_level",
        "official_denomination",
    ])?;
    for entry in &snapshot.countries {
        for p in &entry.programs {
            writer.write_record([
                p.id.to_string(),
                p.country_id.to_string(),
                entry.country.name.clone(),
                p.duration.to_string(),
                p.is_special_program.to_string(),
                p.credits_per_year.to_string(),
                p.total_credits.to_string(),
                p.eqf_level.to_string(),
                p.official_denomination.clone(),
            ])?;
        }
    }
    writer
        .into_inner()
        .map_err(|e| AtlasError::IoError(e.into_error()))
}

pub fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }
    Ok(zip.finish()?.into_inner())
}
