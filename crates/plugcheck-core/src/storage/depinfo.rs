use std::fs;
use std::path::Path;

use crate::kernel::error::Result;
use crate::plugin_system::dependency::{Dependency, DependencyError};
use crate::storage::error::StorageSystemError;

/// Read a build-side dependency info file.
///
/// The file holds exactly one non-blank `kind:id` line.
pub fn read_dependency_info(path: &Path) -> Result<Dependency> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageSystemError::io(e, "read dependency info", path.to_path_buf()))?;
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
    let line = lines.next().ok_or_else(|| {
        DependencyError::InvalidDeclaration(format!("'{}' is empty", path.display()))
    })?;
    if lines.next().is_some() {
        return Err(DependencyError::InvalidDeclaration(format!(
            "'{}' holds more than one dependency",
            path.display()
        ))
        .into());
    }
    Ok(line.parse::<Dependency>()?)
}

/// Read every dependency info file in order
pub fn read_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Dependency>> {
    paths
        .iter()
        .map(|p| read_dependency_info(p.as_ref()))
        .collect()
}
