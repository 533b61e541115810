//! # Plugcheck Core Storage Errors
//!
//! Defines [`StorageSystemError`], covering everything that can go wrong while
//! reading plugin jars, dependency info files and check configuration from
//! disk.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error during operation '{operation}' on '{path}': {source}")]
    Archive {
        path: PathBuf,
        operation: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Entry '{entry}' not found in archive '{archive}'")]
    EntryNotFound { archive: PathBuf, entry: String },

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),
}

// Helpers keep the path attached to every I/O and archive failure.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub fn archive(
        source: zip::result::ZipError,
        operation: impl Into<String>,
        path: PathBuf,
    ) -> Self {
        StorageSystemError::Archive {
            source,
            operation: operation.into(),
            path,
        }
    }
}
