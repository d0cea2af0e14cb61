//! Error types shared across the loader, pipeline and renderers.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Schema mismatch at the raw record boundary.
///
/// Numeric coercion failures are not parse errors: they turn into sentinels
/// and are screened out later by the validity filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV is missing column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: ParseError,
    },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No valid items remain after filtering ({total} records read)")]
    EmptyDataset { total: usize },
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing backend failed: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
