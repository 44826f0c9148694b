use crate::schema::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Source {url} answered with HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Schema validation failed at {0}")]
    SchemaError(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration `{field}`")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code the binaries use for a failure of this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::ZipError(_) | EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::SchemaError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a 404 on an optional feed is worth a warning, not a failure
            EtlError::HttpStatusError { status: 404, .. } => ErrorSeverity::Low,
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorSeverity::Medium,
            EtlError::ZipError(_) | EtlError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ApiError(_) => {
                "Check network connectivity and that the source URL is reachable, then retry".to_string()
            }
            EtlError::HttpStatusError { url, .. } => {
                format!("Verify that {} still publishes the dataset", url)
            }
            EtlError::SchemaError(e) => format!(
                "Fix the source document at `{}` ({}) or pick the matching --kind",
                e.path, e.reason
            ),
            EtlError::SerializationError(_) => {
                "Make sure the source is well-formed JSON".to_string()
            }
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => {
                "Re-run with --verbose to see which records were being processed".to_string()
            }
            EtlError::IoError(_) | EtlError::ZipError(_) => {
                "Check that the input exists and the output path is writable".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the command line flags or the batch TOML file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::SchemaError(e) => format!(
                "The dataset does not match its schema: {} at {}",
                e.reason, e.path
            ),
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => {
                format!("Could not download the dataset: {}", self)
            }
            EtlError::IoError(_) | EtlError::ZipError(_) => {
                format!("Could not read or write files: {}", self)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
