pub mod batch;
pub mod etl;
pub mod pipeline;
pub mod summary;

pub use crate::domain::model::{Dataset, DatasetSummary, EtlOutcome, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
