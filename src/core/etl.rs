use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs read → import → export and returns where the export landed.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("=== Starting data import... ===");

        let rows = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} rows from the matrix", rows.len());

        let report = self.pipeline.transform(rows).await?;
        tracing::info!(
            "🔄 Imported {} countries and {} programs ({} diagnostics)",
            report.countries_created(),
            report.programs_created(),
            report.diagnostics.len()
        );

        let output_path = self.pipeline.load(report).await?;
        tracing::info!(
            "=== Data import completed in {:?}! ===",
            started.elapsed()
        );

        Ok(output_path)
    }
}
