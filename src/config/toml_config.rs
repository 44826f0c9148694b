use crate::core::ConfigProvider;
use crate::domain::model::DatasetKind;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A TOML file describing several datasets to fetch and validate in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchInfo,
    pub load: LoadConfig,
    pub datasets: Vec<DatasetConfig>,
    pub reconcile: Option<ReconcileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub compress: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub kind: DatasetKind,
    pub source: String,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub enabled: bool,
}

/// One dataset of a batch, resolved against the batch-wide load settings.
#[derive(Debug, Clone)]
pub struct DatasetJob {
    pub name: String,
    pub kind: DatasetKind,
    pub source: String,
    pub output_path: String,
    pub compress: bool,
}

impl BatchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn compress(&self) -> bool {
        self.load.compress.unwrap_or(false)
    }

    pub fn reconcile_enabled(&self) -> bool {
        self.reconcile.as_ref().map(|r| r.enabled).unwrap_or(false)
    }

    pub fn jobs(&self) -> Vec<DatasetJob> {
        self.datasets
            .iter()
            .filter(|d| d.enabled.unwrap_or(true))
            .map(|d| DatasetJob {
                name: d.name.clone(),
                kind: d.kind,
                source: d.source.clone(),
                output_path: self.load.output_path.clone(),
                compress: self.compress(),
            })
            .collect()
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("batch.name", &self.batch.name)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        if self.datasets.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "datasets".to_string(),
            });
        }

        validation::validate_dataset_names(
            "datasets.name",
            self.datasets.iter().map(|d| d.name.as_str()),
        )?;

        for dataset in &self.datasets {
            validation::validate_source(&format!("datasets.{}.source", dataset.name), &dataset.source)?;
        }

        Ok(())
    }
}

impl ConfigProvider for DatasetJob {
    fn source(&self) -> &str {
        &self.source
    }

    fn dataset_kind(&self) -> DatasetKind {
        self.kind
    }

    fn dataset_name(&self) -> &str {
        &self.name
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn compress(&self) -> bool {
        self.compress
    }
}
