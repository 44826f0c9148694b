pub mod config;
pub mod core;
pub mod domain;
pub mod schema;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::BatchConfig};

pub use core::{etl::EtlEngine, pipeline::DatasetPipeline};
pub use domain::model::{Dataset, DatasetKind, Nullable};
pub use schema::{
    parse_covid_snapshot, parse_dataset, parse_geo_document, parse_hospital_record,
    parse_lab_record, ValidationError, ValidationReason,
};
pub use utils::error::{EtlError, Result};
