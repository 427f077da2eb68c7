// Adapters layer: concrete implementations of the domain ports (workbook source, catalog store).

pub mod memory_store;
pub mod xlsx;

pub use memory_store::MemoryStore;
pub use xlsx::XlsxSource;
