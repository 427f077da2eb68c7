use anyhow::{Context, Result};
use eduatlas::core::layout;
use eduatlas::domain::model::DiagnosticKind;
use eduatlas::domain::ports::CatalogStore;
use eduatlas::{
    AtlasError, CatalogService, CliConfig, EtlEngine, Importer, LocalStorage, MatrixPipeline,
    MemoryStore, XlsxSource,
};
use rust_xlsxwriter::Workbook;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

enum Value {
    Text(&'static str),
    Number(f64),
}

/// Writes a matrix workbook with two header rows; `rows` start at sheet row 3.
fn write_matrix(dir: &Path, rows: &[Vec<(usize, Value)>]) -> Result<PathBuf> {
    let path = dir.join("matrix.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Education systems")?;
    sheet.write_string(1, 0, "Country")?;
    sheet.write_string(1, layout::OFFICIAL_DENOMINATION as u16, "Denomination")?;

    for (offset, cells) in rows.iter().enumerate() {
        let row = 2 + offset as u32;
        for (col, value) in cells {
            match value {
                Value::Text(s) => sheet.write_string(row, *col as u16, *s)?,
                Value::Number(n) => sheet.write_number(row, *col as u16, *n)?,
            };
        }
    }

    workbook.save(&path)?;
    Ok(path)
}

fn italy() -> Vec<(usize, Value)> {
    vec![
        (layout::NAME, Value::Text("Italy")),
        (layout::COMPULSORY_SCHOOLING, Value::Number(13.0)),
        (layout::duration_column(3), Value::Text("X")),
        (layout::credits_column(3), Value::Number(60.0)),
        (layout::BEST_GRADE, Value::Text("30 e lode|30")),
        (layout::WORST_GRADE, Value::Text("18")),
        (layout::EQF_LEVEL, Value::Number(6.0)),
        (layout::OFFICIAL_DENOMINATION, Value::Text("Laurea")),
        (layout::CREDIT_RATIO, Value::Text("25/30")),
        (layout::COUNTRY_CODE, Value::Text("IT")),
    ]
}

fn poland() -> Vec<(usize, Value)> {
    vec![
        (layout::NAME, Value::Text("Poland")),
        (layout::COMPULSORY_SCHOOLING, Value::Number(12.0)),
        (layout::duration_column(3), Value::Text("X")),
        (layout::duration_column(4), Value::Text("3.5*")),
        (layout::credits_column(4), Value::Text("52.5")),
        (layout::BEST_GRADE, Value::Number(5.0)),
        (layout::WORST_GRADE, Value::Number(2.0)),
        (layout::OFFICIAL_DENOMINATION, Value::Text("Licencjat")),
        (layout::COUNTRY_CODE, Value::Text("PL")),
    ]
}

fn portugal_with_trailing_pipes() -> Vec<(usize, Value)> {
    vec![
        (layout::NAME, Value::Text("Portugal")),
        (layout::COMPULSORY_SCHOOLING, Value::Text("12|")),
        (layout::duration_column(3), Value::Text("X")),
        (layout::BEST_GRADE, Value::Text("20|")),
        (layout::WORST_GRADE, Value::Text("10")),
        (layout::OFFICIAL_DENOMINATION, Value::Text("Licenciatura")),
    ]
}

fn blank_name() -> Vec<(usize, Value)> {
    vec![
        (layout::COMPULSORY_SCHOOLING, Value::Number(12.0)),
        (layout::duration_column(3), Value::Text("X")),
    ]
}

#[tokio::test]
async fn test_valid_row_and_blank_name_row() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_matrix(temp_dir.path(), &[italy(), blank_name()])?;

    let store = MemoryStore::new();
    let report = Importer::new(&store)
        .import_from_source(&XlsxSource::new(path, 0), 3, 33)
        .await?;

    assert_eq!(report.countries_created(), 1);
    assert_eq!(report.programs_created(), 1);
    assert_eq!(report.diagnostics_of(DiagnosticKind::BlankName).count(), 1);

    let countries = store.list_countries().await?;
    assert_eq!(countries.len(), 1);
    let italy = &countries[0];
    assert_eq!(italy.name, "Italy");
    assert_eq!(italy.years_compulsory_schooling, 13);
    assert_eq!(italy.grading_system, "18-30");
    assert_eq!(italy.credit_ratio.as_deref(), Some("25/30"));
    assert_eq!(italy.country_code.as_deref(), Some("IT"));

    let programs = store.programs_for_country(italy.id).await?;
    assert_eq!(programs[0].duration, 3);
    assert_eq!(programs[0].total_credits, 180);
    assert_eq!(programs[0].official_denomination, "Laurea");
    Ok(())
}

#[tokio::test]
async fn test_trailing_pipe_cells_still_import() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_matrix(temp_dir.path(), &[portugal_with_trailing_pipes()])?;

    let store = MemoryStore::new();
    let report = Importer::new(&store)
        .import_from_source(&XlsxSource::new(path, 0), 3, 33)
        .await?;

    assert_eq!(report.countries_created(), 1);
    let portugal = store
        .find_country_by_name("Portugal")
        .await?
        .context("Portugal should be imported")?;
    assert_eq!(portugal.years_compulsory_schooling, 12);
    assert_eq!(portugal.grading_system, "10-20");
    Ok(())
}

#[tokio::test]
async fn test_rerun_skips_existing_country() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_matrix(temp_dir.path(), &[italy()])?;
    let source = XlsxSource::new(path, 0);

    let store = MemoryStore::new();
    let importer = Importer::new(&store);
    let first = importer.import_from_source(&source, 3, 33).await?;
    assert_eq!(first.countries_created(), 1);

    let second = importer.import_from_source(&source, 3, 33).await?;
    assert_eq!(second.countries_created(), 0);
    assert_eq!(second.diagnostics_of(DiagnosticKind::AlreadyExists).count(), 1);
    assert_eq!(store.list_countries().await?.len(), 1);
    assert_eq!(store.all_programs().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_poland_special_program_correction() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_matrix(temp_dir.path(), &[poland()])?;

    let store = MemoryStore::new();
    Importer::new(&store)
        .import_from_source(&XlsxSource::new(path, 0), 3, 33)
        .await?;

    let poland = store
        .find_country_by_name("Poland")
        .await?
        .context("Poland should be imported")?;
    assert_eq!(poland.grading_system, "2-5");

    let programs = store.programs_for_country(poland.id).await?;
    let special = programs
        .iter()
        .find(|p| p.duration == 4)
        .context("4-year slot should hold the special program")?;
    assert!(special.is_special_program);
    assert_eq!(special.credits_per_year, 60);
    assert_eq!(special.total_credits, 210);

    let service = CatalogService::new(store.clone());
    let representative = service.representative_program_for(poland.id).await?;
    assert_eq!(representative.duration, 4);
    assert!(representative.is_special_program);
    Ok(())
}

#[tokio::test]
async fn test_representative_program_selection() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_matrix(temp_dir.path(), &[italy(), poland()])?;

    let store = MemoryStore::new();
    Importer::new(&store)
        .import_from_source(&XlsxSource::new(path, 0), 3, 33)
        .await?;

    let service = CatalogService::new(store);
    let italy = service.find_country_by_name("Italy").await?;
    let program = service.representative_program_for(italy.id).await?;
    assert_eq!(program.duration, 3);
    assert!(!program.is_special_program);

    let missing = service.representative_program_for(999).await;
    assert!(matches!(missing, Err(AtlasError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_export_bundle() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_matrix(temp_dir.path(), &[italy(), blank_name(), poland()])?;
    let output_path = temp_dir.path().join("out").display().to_string();

    let config = CliConfig {
        workbook: path.display().to_string(),
        output_path: output_path.clone(),
        ..CliConfig::default()
    };
    let pipeline = MatrixPipeline::new(
        XlsxSource::from_config(&config),
        MemoryStore::new(),
        LocalStorage::new(output_path.clone()),
        config,
    );

    let result = EtlEngine::new(pipeline).run().await?;
    assert!(result.ends_with("catalog_export.zip"));

    let zip_data = std::fs::read(Path::new(&output_path).join("catalog_export.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;

    let file_names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(file_names.contains(&"countries.csv".to_string()));
    assert!(file_names.contains(&"bachelor_programs.csv".to_string()));
    assert!(file_names.contains(&"catalog.json".to_string()));

    let mut countries_csv = String::new();
    archive
        .by_name("countries.csv")?
        .read_to_string(&mut countries_csv)?;
    assert!(countries_csv.starts_with("id,name,years_compulsory_schooling"));
    assert!(countries_csv.contains("Italy"));
    assert!(countries_csv.contains("Poland"));

    let mut json = String::new();
    archive.by_name("catalog.json")?.read_to_string(&mut json)?;
    let catalog: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(catalog["countries"].as_array().map(Vec::len), Some(2));
    assert_eq!(catalog["import"]["countriesCreated"], 2);
    Ok(())
}

#[tokio::test]
async fn test_missing_workbook_is_fatal() -> Result<()> {
    let store = MemoryStore::new();
    let result = Importer::new(&store)
        .import_from_source(&XlsxSource::new("missing/matrix.xlsx", 0), 3, 33)
        .await;

    assert!(matches!(result, Err(AtlasError::SourceUnavailable { .. })));
    assert!(store.list_countries().await?.is_empty());
    Ok(())
}
