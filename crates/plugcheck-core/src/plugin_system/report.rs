use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::kernel::error::Result;
use crate::plugin_system::dependency::Dependency;
use crate::plugin_system::identity::Identity;
use crate::storage::StorageSystemError;

/// Outcome of a successful check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub identity: Identity,

    /// Archive the descriptor was read from
    pub descriptor_archive: PathBuf,

    /// Entry path of the descriptor
    pub descriptor_path: String,

    /// Reconciled dependency set (manifest and build agree on it)
    pub dependencies: BTreeSet<Dependency>,
}

impl CheckReport {
    /// The machine-readable identity record, `kind:id`
    pub fn identity_record(&self) -> String {
        self.identity.to_string()
    }

    /// Write the identity record to `path`
    pub fn write_identity_record(&self, path: &Path) -> Result<()> {
        fs::write(path, self.identity_record())
            .map_err(|e| StorageSystemError::io(e, "write identity record", path.to_path_buf()))?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            StorageSystemError::SerializationError {
                format: "JSON".to_string(),
                source: Box::new(e),
            }
        })?;
        Ok(json)
    }
}
