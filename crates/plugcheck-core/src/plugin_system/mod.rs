//! # Plugcheck Core Plugin System
//!
//! Checks that a plugin (or plugin content module) descriptor is consistent
//! with what the build says about it.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`include`]**: Expands XInclude directives using the archive index,
//!   recursively, into a fully resolved descriptor tree.
//! - **[`identity`]**: Determines the `kind:id` identity of the descriptor.
//! - **[`dependency`]**: Extracts the legacy `<depends>` and structured
//!   `<dependencies>` declarations as one set of (kind, id) pairs and
//!   reconciles it with the build-declared set.
//! - **[`policy`]**: Root-level policy flags such as `allow-bundled-update`.
//! - **[`checker`]**: The entry point ([`check`]) running all of the above.
//! - **[`report`]**: The result of a successful check ([`CheckReport`]) and
//!   the identity record written for the build.
//! - **[`kind`]**: [`ComponentKind`], plugin or module.
//! - **[`error`]**: [`IncludeError`](error::IncludeError) and
//!   [`PolicyError`](error::PolicyError).
pub mod checker;
pub mod dependency;
pub mod error;
pub mod identity;
pub mod include;
pub mod kind;
pub mod policy;
pub mod report;

pub use checker::{check, load_descriptor, CheckRequest, ResolvedDescriptor};
pub use dependency::{Dependency, DependencyDeclaration, DependencyReconciler, ReconciliationResult};
pub use identity::{extract_identity, Identity};
pub use include::IncludeResolver;
pub use kind::ComponentKind;
pub use report::CheckReport;
