use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What is being checked, and what a dependency points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A whole plugin, described by `META-INF/plugin.xml`
    Plugin,
    /// A plugin content module, described by `<module-id>.xml`
    Module,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Plugin => "plugin",
            ComponentKind::Module => "module",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown component kind '{0}', expected 'plugin' or 'module'")]
pub struct UnknownKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "plugin" => Ok(ComponentKind::Plugin),
            "module" => Ok(ComponentKind::Module),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
