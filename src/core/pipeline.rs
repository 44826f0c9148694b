use crate::core::summary;
use crate::core::{ConfigProvider, Pipeline, Storage, TransformResult};
use crate::schema;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::is_remote_source;
use reqwest::Client;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Fetches one source document, validates it against the schema for the
/// configured kind, and writes the normalized outputs.
pub struct DatasetPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> DatasetPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn output_file(&self, file_name: &str) -> String {
        format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            file_name
        )
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Source response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DatasetPipeline<S, C> {
    async fn extract(&self) -> Result<serde_json::Value> {
        let source = self.config.source();

        let bytes = if is_remote_source(source) {
            self.fetch_remote(source).await?
        } else {
            tracing::debug!("Reading local source: {}", source);
            self.storage.read_file(source).await?
        };

        tracing::debug!("Read {} bytes from {}", bytes.len(), source);
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn transform(&self, raw: serde_json::Value) -> Result<TransformResult> {
        let kind = self.config.dataset_kind();
        let name = self.config.dataset_name().to_string();

        let dataset = schema::parse_dataset(kind, &raw).inspect_err(|e| {
            tracing::warn!(kind = %kind, path = %e.path, reason = %e.reason, "Rejected {} dataset", kind);
        })?;

        let json_output = serde_json::to_string_pretty(&dataset.to_json_value()?)?;
        let csv_output = summary::dataset_table(&dataset)?;
        let summary = summary::summarize(&name, &dataset);

        Ok(TransformResult {
            name,
            dataset,
            json_output,
            csv_output,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let summary_json = serde_json::to_string_pretty(&result.summary)?;
        let files = [
            (format!("{}.json", result.name), result.json_output.as_bytes()),
            (format!("{}.csv", result.name), result.csv_output.as_bytes()),
            (format!("{}.summary.json", result.name), summary_json.as_bytes()),
        ];

        if !self.config.compress() {
            for (file_name, data) in &files {
                let path = self.output_file(file_name);
                tracing::debug!("Writing {} ({} bytes)", path, data.len());
                self.storage.write_file(&path, data).await?;
            }
            return Ok(self.output_file(&files[0].0));
        }

        tracing::debug!("Creating ZIP archive with {} files", files.len());
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (file_name, data) in &files {
                zip.start_file(file_name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(data)?;
            }
            zip.finish()?.into_inner()
        };

        let path = self.output_file(&format!("{}.zip", result.name));
        tracing::debug!("Writing ZIP file ({} bytes) to {}", zip_data.len(), path);
        self.storage.write_file(&path, &zip_data).await?;

        Ok(path)
    }
}
