pub mod affinity;
pub mod cell;
pub mod corrections;
pub mod country_row;
pub mod etl;
pub mod export;
pub mod grading;
pub mod import;
pub mod layout;
pub mod numeric;
pub mod programs;
pub mod selector;

pub use crate::domain::model::{ImportReport, SourceRow};
pub use crate::domain::ports::{CatalogStore, ConfigProvider, Pipeline, RowSource, Storage};
pub use crate::utils::error::Result;
