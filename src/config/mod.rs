pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::DatasetKind;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "covid-map-etl")]
#[command(about = "Validate and normalize one COVID-19 map dataset")]
pub struct CliConfig {
    /// Which document the source holds
    #[arg(long, value_enum)]
    pub kind: DatasetKind,

    /// http(s) URL or local path of the raw JSON
    #[arg(long)]
    pub source: String,

    /// Output file stem; defaults to one derived from --kind
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Bundle the outputs into a single ZIP archive
    #[arg(long)]
    pub compress: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source(&self) -> &str {
        &self.source
    }

    fn dataset_kind(&self) -> DatasetKind {
        self.kind
    }

    fn dataset_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.default_name())
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn compress(&self) -> bool {
        self.compress
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_source("source", &self.source)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_dataset_names("name", [self.dataset_name()])
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "covid-map-etl",
            "--kind",
            "geo",
            "--source",
            "data/prov.geojson",
            "--compress",
        ]);

        assert_eq!(config.kind, DatasetKind::Geo);
        assert_eq!(config.dataset_name(), "provinces");
        assert_eq!(config.output_path(), "./output");
        assert!(config.compress());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        let config = CliConfig::parse_from([
            "covid-map-etl",
            "--kind",
            "covid",
            "--source",
            "ftp://example.com/covid.json",
        ]);

        assert!(config.validate().is_err());
    }
}
