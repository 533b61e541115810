use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::kernel::error::{Error, Result};
use crate::storage::archive::Archive;

/// How to treat a descriptor path that shows up in more than one archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestLookup {
    /// More than one hit is an ambiguous manifest
    Unique,
    /// The first archive wins
    FirstMatch,
}

/// The descriptor document found while indexing
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// Entry path of the descriptor
    pub path: String,
    /// Archive the descriptor was read from
    pub archive: PathBuf,
    /// Raw descriptor bytes
    pub bytes: Vec<u8>,
}

/// Maps every entry path to the first archive that contains it.
///
/// Built once per check and passed by reference to everything that needs to
/// look up included documents.
#[derive(Debug)]
pub struct ArchiveIndex {
    archives: Vec<Box<dyn Archive>>,
    entries: HashMap<String, usize>,
}

impl ArchiveIndex {
    /// Index `archives` in order and capture the descriptor at `manifest_path`.
    pub fn build(
        archives: Vec<Box<dyn Archive>>,
        manifest_path: &str,
        lookup: ManifestLookup,
    ) -> Result<(Self, LoadedManifest)> {
        let mut entries: HashMap<String, usize> = HashMap::new();
        let mut manifest_hits: Vec<usize> = Vec::new();

        for (position, archive) in archives.iter().enumerate() {
            let names = archive.entry_names()?;
            debug!("Indexing {} entries of '{}'", names.len(), archive.path().display());
            for name in names {
                if name.ends_with('/') {
                    continue;
                }
                if name == manifest_path {
                    manifest_hits.push(position);
                }
                if let Some(&first) = entries.get(&name) {
                    if first != position {
                        debug!(
                            "Entry '{}' in '{}' shadowed by '{}'",
                            name,
                            archive.path().display(),
                            archives[first].path().display()
                        );
                    }
                    continue;
                }
                entries.insert(name, position);
            }
        }

        let owner = match manifest_hits.as_slice() {
            [] => {
                return Err(Error::structural(format!(
                    "No descriptor '{}' found in {} archive(s)",
                    manifest_path,
                    archives.len()
                )));
            }
            [single] => *single,
            [first, ..] => {
                let locations = manifest_hits
                    .iter()
                    .map(|&i| archives[i].path().display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                match lookup {
                    ManifestLookup::Unique => {
                        return Err(Error::structural(format!(
                            "Ambiguous descriptor '{}' found in multiple archives: {}",
                            manifest_path, locations
                        )));
                    }
                    ManifestLookup::FirstMatch => {
                        warn!(
                            "Descriptor '{}' found in multiple archives ({}), using the first",
                            manifest_path, locations
                        );
                        *first
                    }
                }
            }
        };

        let bytes = archives[owner].read_entry(manifest_path)?;
        let manifest = LoadedManifest {
            path: manifest_path.to_string(),
            archive: archives[owner].path().to_path_buf(),
            bytes,
        };
        Ok((Self { archives, entries }, manifest))
    }

    /// Whether `path` is present in any archive
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// The archive recorded for `path`
    pub fn archive_for(&self, path: &str) -> Option<&dyn Archive> {
        self.entries
            .get(path)
            .map(|&position| self.archives[position].as_ref())
    }

    /// Read `path` from the archive recorded for it, if any
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.archive_for(path) {
            Some(archive) => archive.read_entry(path).map(Some),
            None => Ok(None),
        }
    }

    /// Archive paths in indexing order
    pub fn archive_paths(&self) -> impl Iterator<Item = &Path> {
        self.archives.iter().map(|a| a.path())
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
