pub mod cli;
pub mod toml_config;

use crate::core::layout::{FIRST_DATA_ROW, LAST_DATA_ROW};
use crate::core::ConfigProvider;
use crate::utils::error::{AtlasError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKBOOK: &str = "data/matrix.xlsx";
pub const DEFAULT_BUNDLE: &str = "catalog_export.zip";
pub const EXPORT_FORMATS: &[&str] = &["csv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "eduatlas"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Imports the education systems matrix and compares bachelor programs")
)]
pub struct CliConfig {
    /// Path to the education matrix workbook (.xlsx)
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_WORKBOOK))]
    pub workbook: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "0"))]
    pub sheet_index: usize,

    /// First data row, 1-based
    #[cfg_attr(feature = "cli", arg(long, default_value_t = FIRST_DATA_ROW))]
    pub first_row: u32,

    /// Last data row, 1-based and inclusive
    #[cfg_attr(feature = "cli", arg(long, default_value_t = LAST_DATA_ROW))]
    pub last_row: u32,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ',', default_value = "csv,json"))]
    pub formats: Vec<String>,

    /// Write export files loose instead of bundling them into a zip
    #[cfg_attr(feature = "cli", arg(long))]
    pub no_zip: bool,

    /// Import only, skip the export step
    #[cfg_attr(feature = "cli", arg(long))]
    pub no_export: bool,

    /// Print the representative bachelor program of this country
    #[cfg_attr(feature = "cli", arg(long))]
    pub representative: Option<String>,

    /// Compare two countries, e.g. --compare Italy,Germany
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub compare: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit JSON log lines"))]
    pub json_logs: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            workbook: DEFAULT_WORKBOOK.to_string(),
            sheet_index: 0,
            first_row: FIRST_DATA_ROW,
            last_row: LAST_DATA_ROW,
            output_path: "./output".to_string(),
            formats: vec!["csv".to_string(), "json".to_string()],
            no_zip: false,
            no_export: false,
            representative: None,
            compare: Vec::new(),
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn workbook_path(&self) -> &str {
        &self.workbook
    }

    fn sheet_index(&self) -> usize {
        self.sheet_index
    }

    fn row_range(&self) -> (u32, u32) {
        (self.first_row, self.last_row)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_formats(&self) -> &[String] {
        &self.formats
    }

    fn export_bundle(&self) -> Option<&str> {
        if self.no_zip {
            None
        } else {
            Some(DEFAULT_BUNDLE)
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("workbook", &self.workbook)?;
        validation::validate_file_extension("workbook", &self.workbook, &["xlsx"])?;
        validation::validate_row_range(self.first_row, self.last_row)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats, EXPORT_FORMATS)?;

        if !self.compare.is_empty() && self.compare.len() != 2 {
            return Err(AtlasError::InvalidConfigValueError {
                field: "compare".to_string(),
                value: self.compare.join(","),
                reason: "Exactly two country names are required".to_string(),
            });
        }
        Ok(())
    }
}
