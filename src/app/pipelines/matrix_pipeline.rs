use crate::core::export::{self, CatalogSnapshot};
use crate::core::import::Importer;
use crate::core::{CatalogStore, ConfigProvider, ImportReport, Pipeline, RowSource, SourceRow, Storage};
use crate::utils::error::Result;

/// Wires the matrix import into the extract → transform → load engine:
/// read the row window, import it into the store, export the resulting catalog.
pub struct MatrixPipeline<R: RowSource, S: CatalogStore, W: Storage, C: ConfigProvider> {
    source: R,
    store: S,
    storage: W,
    config: C,
}

impl<R: RowSource, S: CatalogStore, W: Storage, C: ConfigProvider> MatrixPipeline<R, S, W, C> {
    pub fn new(source: R, store: S, storage: W, config: C) -> Self {
        Self {
            source,
            store,
            storage,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    async fn snapshot(&self, report: &ImportReport) -> Result<CatalogSnapshot> {
        let mut catalog = Vec::new();
        for country in self.store.list_countries().await? {
            let programs = self.store.programs_for_country(country.id).await?;
            catalog.push((country, programs));
        }
        Ok(CatalogSnapshot::new(report, catalog))
    }
}

#[async_trait::async_trait]
impl<R: RowSource, S: CatalogStore, W: Storage, C: ConfigProvider> Pipeline
    for MatrixPipeline<R, S, W, C>
{
    async fn extract(&self) -> Result<Vec<SourceRow>> {
        let (first, last) = self.config.row_range();
        tracing::debug!("Reading rows {}..={} from the matrix", first, last);
        self.source.read_rows(first, last)
    }

    async fn transform(&self, rows: Vec<SourceRow>) -> Result<ImportReport> {
        Ok(Importer::new(&self.store).import_rows(rows).await)
    }

    async fn load(&self, report: ImportReport) -> Result<String> {
        let snapshot = self.snapshot(&report).await?;
        let files = export::render(&snapshot, self.config.export_formats())?;

        tracing::debug!(
            "Exporting {} countries / {} programs as {} files",
            snapshot.countries.len(),
            snapshot.program_count(),
            files.len()
        );

        match self.config.export_bundle() {
            Some(bundle_name) => {
                let zip_data = export::bundle(&files)?;
                tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
                self.storage.write_file(bundle_name, &zip_data).await?;
                Ok(format!("{}/{}", self.config.output_path(), bundle_name))
            }
            None => {
                for (name, data) in &files {
                    self.storage.write_file(name, data).await?;
                }
                Ok(self.config.output_path().to_string())
            }
        }
    }
}
