pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{MemoryStore, XlsxSource};
pub use app::pipelines::MatrixPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{etl::EtlEngine, import::Importer};
pub use domain::services::CatalogService;
pub use utils::error::{AtlasError, Result};
