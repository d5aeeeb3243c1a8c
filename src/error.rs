//! Error types and handling for the upload pruner

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Custom result type for pruning operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for pruning operations
#[derive(Error, Debug)]
#[non_exhaustive]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Scanner error: {0}")]
    ScannerError(#[from] ScannerError),

    #[error("Cleaner error: {0}")]
    CleanerError(#[from] CleanerError),

    #[error("Report error: {0}")]
    ReportError(#[from] ReportError),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

// -------------------- Sub-Error Categories --------------------

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScannerError {
    #[error("Reference pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Cannot read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanerError {
    #[error("Cannot stat image {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot remove file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot remove directory {path}: {source}")]
    RemoveDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
