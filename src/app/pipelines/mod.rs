pub mod matrix_pipeline;

pub use matrix_pipeline::MatrixPipeline;
