//! Errors for the fallible edges: persistence and export.
//!
//! Masking itself is total and has no error type.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to read or write persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid storage key {key:?}")]
    InvalidKey { key: String },

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("state store lock poisoned")]
    Poisoned,
}

/// Failure to encode or save an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("row {index} is not a JSON object")]
    NotARecord { index: usize },

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to save {filename}: {source}")]
    Save {
        filename: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid export filename {filename:?}")]
    InvalidFilename { filename: String },

    #[error("export sink lock poisoned")]
    Poisoned,
}
