use crate::config::{DEFAULT_BUNDLE, EXPORT_FORMATS};
use crate::core::layout::{FIRST_DATA_ROW, LAST_DATA_ROW};
use crate::core::ConfigProvider;
use crate::utils::error::{AtlasError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub workbook: String,
    pub sheet_index: Option<usize>,
    pub first_row: Option<u32>,
    pub last_row: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AtlasError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AtlasError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.workbook", &self.source.workbook)?;
        validation::validate_file_extension("source.workbook", &self.source.workbook, &["xlsx"])?;

        let (first, last) = ConfigProvider::row_range(self);
        validation::validate_row_range(first, last)?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats(
            "load.output_formats",
            &self.load.output_formats,
            EXPORT_FORMATS,
        )?;

        if let Some(format) = self.log_format() {
            if format != "compact" && format != "json" {
                return Err(AtlasError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn export_enabled(&self) -> bool {
        self.load.enabled.unwrap_or(true)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }

    pub fn verbose(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn workbook_path(&self) -> &str {
        &self.source.workbook
    }

    fn sheet_index(&self) -> usize {
        self.source.sheet_index.unwrap_or(0)
    }

    fn row_range(&self) -> (u32, u32) {
        (
            self.source.first_row.unwrap_or(FIRST_DATA_ROW),
            self.source.last_row.unwrap_or(LAST_DATA_ROW),
        )
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn export_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn export_bundle(&self) -> Option<&str> {
        match &self.load.compression {
            Some(c) if c.enabled => Some(c.filename.as_deref().unwrap_or(DEFAULT_BUNDLE)),
            _ => None,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
