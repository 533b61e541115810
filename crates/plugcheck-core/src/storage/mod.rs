//! # Plugcheck Core Storage
//!
//! Everything the checker reads from disk: plugin jars ([`archive`]), the
//! entry-path index built over them ([`index`]), build-side dependency info
//! files ([`depinfo`]) and check configuration ([`config`]).
pub mod archive;
pub mod config;
pub mod depinfo;
pub mod error;
pub mod index;

/// Re-export key types
pub use archive::{Archive, JarArchive, MemoryArchive};
pub use config::{CheckConfig, ConfigFormat};
pub use error::StorageSystemError;
pub use index::{ArchiveIndex, LoadedManifest, ManifestLookup};
