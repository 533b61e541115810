use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json;
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::kernel::error::Result;
use crate::plugin_system::include::normalize_path;
use crate::storage::error::StorageSystemError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Caller-supplied data that tunes a check.
///
/// None of these lists has built-in content: which module ids count as
/// platform markers, and which plugins may ship `allow-bundled-update`, is
/// decided by whoever runs the check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckConfig {
    /// Module ids for always-available platform capabilities.
    /// Dropped from the manifest side before reconciliation.
    pub marker_modules: BTreeSet<String>,

    /// Plugin ids allowed to set `allow-bundled-update`. Empty exempts nobody.
    pub bundled_update_exempt: BTreeSet<String>,

    /// Entry paths whose content is supplied by another component at runtime.
    /// Kept as written; compared after path normalization.
    pub external_includes: BTreeSet<String>,
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
        })?;
        let data = fs::read_to_string(path)
            .map_err(|e| StorageSystemError::io(e, "read config", path.to_path_buf()))?;
        Self::deserialize(&data, format)
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let parsed = match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| {
                StorageSystemError::DeserializationError {
                    format: "JSON".to_string(),
                    source: Box::new(e),
                }
            }),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| {
                StorageSystemError::DeserializationError {
                    format: "YAML".to_string(),
                    source: Box::new(e),
                }
            }),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| {
                StorageSystemError::DeserializationError {
                    format: "TOML".to_string(),
                    source: Box::new(e),
                }
            }),
        };
        Ok(parsed?)
    }

    /// Add a marker module id
    pub fn marker_module(mut self, id: &str) -> Self {
        self.marker_modules.insert(id.to_string());
        self
    }

    /// Exempt a plugin id from the bundled-update policy
    pub fn bundled_update_exempt(mut self, id: &str) -> Self {
        self.bundled_update_exempt.insert(id.to_string());
        self
    }

    /// Declare an entry path as externally supplied
    pub fn external_include(mut self, path: &str) -> Self {
        self.external_includes.insert(path.trim().to_string());
        self
    }

    /// Merge with another config; lists are unioned
    pub fn merge(&mut self, other: CheckConfig) {
        self.marker_modules.extend(other.marker_modules);
        self.bundled_update_exempt.extend(other.bundled_update_exempt);
        self.external_includes.extend(other.external_includes);
    }

    pub fn is_marker_module(&self, id: &str) -> bool {
        self.marker_modules.contains(id)
    }

    /// Whether the entry at `path` is supplied externally.
    ///
    /// Both sides are normalized, so `/META-INF/a.xml`, `META-INF/./a.xml`
    /// and `META-INF/a.xml` all name the same entry.
    pub fn is_external_include(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.external_includes
            .iter()
            .any(|candidate| normalize_path(candidate.trim()) == path)
    }
}
