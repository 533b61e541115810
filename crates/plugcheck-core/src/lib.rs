pub mod descriptor;
pub mod kernel;
pub mod plugin_system;
pub mod storage;

// Re-export key public types for the binary
pub use kernel::error::{Error, Result};
pub use plugin_system::{check, CheckReport, CheckRequest, ComponentKind, Dependency, Identity};
pub use storage::{Archive, CheckConfig, JarArchive, MemoryArchive};

// Cross-module tests and shared fixtures
#[cfg(test)]
mod tests;
