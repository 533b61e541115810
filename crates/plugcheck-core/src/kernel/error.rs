//! # Plugcheck Core Errors
//!
//! Defines [`Error`], the crate-wide error enum, and the matching `Result`
//! alias. Each subsystem keeps its own typed error ([`StorageSystemError`],
//! [`IncludeError`], [`IdentityError`], [`DependencyError`], [`PolicyError`])
//! which folds into [`Error`] through `#[from]`, so callers can use `?` all
//! the way up to the CLI.
//!
//! Every variant is fatal for the check in progress. Only
//! [`Error::DependencyMismatch`] carries more than one finding: mismatches are
//! collected and reported together.
use std::error::Error as StdError;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::plugin_system::dependency::DependencyError;
use crate::plugin_system::error::{IncludeError, PolicyError};
use crate::plugin_system::identity::IdentityError;
use crate::storage::error::StorageSystemError;

/// Crate-wide error type
#[derive(Debug, ThisError)]
pub enum Error {
    /// Missing, ambiguous or misshapen descriptor structure
    #[error("Structural error: {message}")]
    Structural { message: String },

    /// A descriptor is not well-formed XML
    #[error("Parse error in '{document}': {source}")]
    Parse {
        document: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    #[error("Include resolution error: {0}")]
    IncludeResolution(#[from] IncludeError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Build and manifest disagree; one line per offending dependency
    #[error("Dependency mismatch between build and manifest: {}", .lines.join("; "))]
    DependencyMismatch { lines: Vec<String> },

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Invalid dependency declaration: {0}")]
    Dependency(#[from] DependencyError),

    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),
}

impl Error {
    pub fn structural(message: impl Into<String>) -> Self {
        Error::Structural {
            message: message.into(),
        }
    }

    pub fn parse(
        document: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Error::Parse {
            document: document.into(),
            source: Box::new(source),
        }
    }

    /// Human-readable diagnostic lines for this error.
    ///
    /// A dependency mismatch expands to one line per offending pair, every
    /// other error is a single line.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            Error::DependencyMismatch { lines } => lines.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = StdResult<T, Error>;
