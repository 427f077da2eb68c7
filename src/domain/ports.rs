use crate::domain::model::{
    BachelorProgram, Country, CountryId, ImportReport, NewBachelorProgram, NewCountry, SourceRow,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(&self, path: &str, data: &[u8]) -> impl Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn workbook_path(&self) -> &str;
    fn sheet_index(&self) -> usize;
    /// Inclusive, 1-based.
    fn row_range(&self) -> (u32, u32);
    fn output_path(&self) -> &str;
    fn export_formats(&self) -> &[String];
    /// Bundle file name when exports are zipped, `None` for loose files.
    fn export_bundle(&self) -> Option<&str>;
}

/// Position-addressed access to the source spreadsheet.
pub trait RowSource: Send + Sync {
    /// Returns the non-missing rows in `first..=last` (1-based). Failing to open the
    /// workbook is fatal and reported as `AtlasError::SourceUnavailable`.
    fn read_rows(&self, first: u32, last: u32) -> Result<Vec<SourceRow>>;
}

/// Persistence collaborator for countries and their bachelor programs.
pub trait CatalogStore: Send + Sync {
    /// Case-insensitive.
    fn country_exists(&self, name: &str) -> impl Future<Output = Result<bool>> + Send;
    fn find_country_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Country>>> + Send;
    fn find_country(&self, id: CountryId) -> impl Future<Output = Result<Option<Country>>> + Send;
    fn list_countries(&self) -> impl Future<Output = Result<Vec<Country>>> + Send;
    /// Fails with `AtlasError::Duplicate` when the name is already taken.
    fn create_country(&self, country: NewCountry) -> impl Future<Output = Result<Country>> + Send;
    fn delete_country(&self, id: CountryId) -> impl Future<Output = Result<()>> + Send;
    fn create_program(
        &self,
        program: NewBachelorProgram,
    ) -> impl Future<Output = Result<BachelorProgram>> + Send;
    /// Ordered by program id.
    fn programs_for_country(
        &self,
        id: CountryId,
    ) -> impl Future<Output = Result<Vec<BachelorProgram>>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceRow>>;
    async fn transform(&self, rows: Vec<SourceRow>) -> Result<ImportReport>;
    async fn load(&self, report: ImportReport) -> Result<String>;
}
