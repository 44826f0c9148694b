use crate::core::{EtlOutcome, Pipeline};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<EtlOutcome> {
        tracing::info!("Starting ETL process...");

        tracing::info!("Extracting data...");
        let raw = self.pipeline.extract().await?;

        tracing::info!("Validating data...");
        let result = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Validated {} {} records for '{}'",
            result.summary.record_count,
            result.summary.kind,
            result.name
        );

        let dataset = result.dataset.clone();
        let summary = result.summary.clone();

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(EtlOutcome {
            output_path,
            dataset,
            summary,
        })
    }
}
