use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;

/// A read-only container of named byte entries.
///
/// Entry names use `/` as separator and never start with one. Directory
/// markers end with `/`.
pub trait Archive: Debug {
    /// Location that identifies this archive in diagnostics
    fn path(&self) -> &Path;

    /// All entry names, in archive order
    fn entry_names(&self) -> Result<Vec<String>>;

    /// Read one entry fully into memory
    fn read_entry(&self, name: &str) -> Result<Vec<u8>>;
}

/// A jar (zip) file on disk.
///
/// The file is reopened for every call so no handle outlives a single read.
#[derive(Debug, Clone)]
pub struct JarArchive {
    path: PathBuf,
}

impl JarArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<ZipArchive<File>> {
        let file = File::open(&self.path)
            .map_err(|e| StorageSystemError::io(e, "open archive", self.path.clone()))?;
        let zip = ZipArchive::new(file)
            .map_err(|e| StorageSystemError::archive(e, "read central directory", self.path.clone()))?;
        Ok(zip)
    }
}

impl Archive for JarArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn entry_names(&self) -> Result<Vec<String>> {
        let zip = self.open()?;
        Ok(zip.file_names().map(str::to_string).collect())
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let mut zip = self.open()?;
        let mut entry = zip.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => StorageSystemError::EntryNotFound {
                archive: self.path.clone(),
                entry: name.to_string(),
            },
            other => StorageSystemError::archive(other, format!("read entry '{}'", name), self.path.clone()),
        })?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| StorageSystemError::io(e, format!("read entry '{}'", name), self.path.clone()))?;
        Ok(bytes)
    }
}

/// An archive held entirely in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    path: PathBuf,
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Add (or replace) an entry
    pub fn with_entry(mut self, name: &str, contents: impl Into<Vec<u8>>) -> Self {
        let contents = contents.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = contents,
            None => self.entries.push((name.to_string(), contents)),
        }
        self
    }

    /// Add a directory marker entry
    pub fn with_directory(self, name: &str) -> Self {
        let name = if name.ends_with('/') {
            name.to_string()
        } else {
            format!("{}/", name)
        };
        self.with_entry(&name, Vec::new())
    }
}

impl Archive for MemoryArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn entry_names(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, contents)| contents.clone())
            .ok_or_else(|| {
                StorageSystemError::EntryNotFound {
                    archive: self.path.clone(),
                    entry: name.to_string(),
                }
                .into()
            })
    }
}
