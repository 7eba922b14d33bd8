pub mod config;
pub use config::{BinningConfig, BorderStyle, Config, DisplayConfig};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinscopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("malformed weights: {0}")]
    MalformedWeights(String),
    #[error("sample is empty: {0}")]
    EmptySample(String),
    #[error("invalid binning: {0}")]
    InvalidBinning(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BinscopeError>;

/// The binning handed back to the caller on confirm.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Binning {
    pub n_bins: usize,
    pub left: f64,
    pub right: f64,
}
