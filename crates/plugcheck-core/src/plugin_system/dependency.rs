use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::descriptor::Element;
use crate::kernel::constants::{
    DEPENDENCIES_TAG, DEPENDS_TAG, MODULE_REF_ATTR, MODULE_REF_TAG, OPTIONAL_ATTR,
    PLUGIN_REF_ATTR, PLUGIN_REF_TAG,
};
use crate::kernel::error::{Error, Result};
use crate::plugin_system::kind::{ComponentKind, UnknownKind};

/// A dependency on a plugin or a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Dependency {
    pub kind: ComponentKind,
    pub id: String,
}

impl Dependency {
    pub fn plugin(id: &str) -> Self {
        Self {
            kind: ComponentKind::Plugin,
            id: id.to_string(),
        }
    }

    pub fn module(id: &str) -> Self {
        Self {
            kind: ComponentKind::Module,
            id: id.to_string(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Parses the `kind:id` form used by dependency info files
impl FromStr for Dependency {
    type Err = DependencyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (kind, id) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| DependencyError::InvalidDeclaration(format!("'{}' is not of the form kind:id", s)))?;
        let kind = kind.parse::<ComponentKind>()?;
        let id = id.trim();
        if id.is_empty() {
            return Err(DependencyError::InvalidDeclaration(format!("'{}' has an empty id", s)));
        }
        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }
}

/// A dependency as written in a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub dependency: Dependency,
    /// Optional declarations are not part of the reconciled set
    pub optional: bool,
}

#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("{0}")]
    InvalidDeclaration(String),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

/// Legacy `<depends>` declarations directly under the root
pub fn legacy_declarations(root: &Element) -> Result<Vec<DependencyDeclaration>> {
    root.children_named(DEPENDS_TAG)
        .map(|depends| {
            let id = depends.trimmed_text();
            if id.is_empty() {
                return Err(Error::structural(format!("<{}> without a plugin id", DEPENDS_TAG)));
            }
            Ok(DependencyDeclaration {
                dependency: Dependency::plugin(id),
                optional: depends.attr(OPTIONAL_ATTR) == Some("true"),
            })
        })
        .collect()
}

/// Structured declarations inside the single `<dependencies>` container.
///
/// More than one container is ambiguous: a runtime loader would only honour
/// one of them.
pub fn structured_declarations(root: &Element) -> Result<Vec<DependencyDeclaration>> {
    let containers: Vec<&Element> = root.children_named(DEPENDENCIES_TAG).collect();
    let container = match containers.as_slice() {
        [] => return Ok(Vec::new()),
        [single] => *single,
        many => {
            return Err(Error::structural(format!(
                "Descriptor has {} <{}> elements, at most one is allowed",
                many.len(),
                DEPENDENCIES_TAG
            )));
        }
    };

    let mut declarations = Vec::new();
    for reference in container.child_elements() {
        let dependency = if reference.is(PLUGIN_REF_TAG) {
            Dependency::plugin(required_attr(reference, PLUGIN_REF_ATTR)?)
        } else if reference.is(MODULE_REF_TAG) {
            Dependency::module(required_attr(reference, MODULE_REF_ATTR)?)
        } else {
            continue;
        };
        declarations.push(DependencyDeclaration {
            dependency,
            optional: false,
        });
    }
    Ok(declarations)
}

fn required_attr<'e>(element: &'e Element, name: &str) -> Result<&'e str> {
    match element.attr(name).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::structural(format!(
            "<{}> inside <{}> without a '{}' attribute",
            element.tag, DEPENDENCIES_TAG, name
        ))),
    }
}

/// The manifest-side dependency set.
///
/// Optional declarations are dropped, and so are plugin dependencies on
/// marker modules.
pub fn manifest_dependencies(
    root: &Element,
    marker_modules: &BTreeSet<String>,
) -> Result<BTreeSet<Dependency>> {
    let legacy = legacy_declarations(root)?;
    let structured = structured_declarations(root)?;
    debug!(
        "Descriptor declares {} legacy and {} structured dependencies",
        legacy.len(),
        structured.len()
    );

    Ok(legacy
        .into_iter()
        .chain(structured)
        .filter(|d| !d.optional)
        .map(|d| d.dependency)
        .filter(|d| !(d.kind == ComponentKind::Plugin && marker_modules.contains(&d.id)))
        .collect())
}

/// Both directions of the difference between build and manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// Declared by the build, absent from the manifest
    pub missing_from_manifest: BTreeSet<Dependency>,
    /// Declared by the manifest, absent from the build
    pub missing_from_build: BTreeSet<Dependency>,
}

impl ReconciliationResult {
    pub fn compute(manifest: &BTreeSet<Dependency>, build: &BTreeSet<Dependency>) -> Self {
        Self {
            missing_from_manifest: build.difference(manifest).cloned().collect(),
            missing_from_build: manifest.difference(build).cloned().collect(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.missing_from_manifest.is_empty() && self.missing_from_build.is_empty()
    }

    /// One line per offending dependency
    pub fn diagnostics(&self) -> Vec<String> {
        let from_manifest = self
            .missing_from_manifest
            .iter()
            .map(|d| format!("{} is declared in the build but missing from the manifest", d));
        let from_build = self
            .missing_from_build
            .iter()
            .map(|d| format!("{} is declared in the manifest but missing from the build", d));
        from_manifest.chain(from_build).collect()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_consistent() {
            Ok(())
        } else {
            Err(Error::DependencyMismatch {
                lines: self.diagnostics(),
            })
        }
    }
}

/// Compares a descriptor's dependencies with the build's
#[derive(Debug, Clone, Copy)]
pub struct DependencyReconciler<'a> {
    marker_modules: &'a BTreeSet<String>,
}

impl<'a> DependencyReconciler<'a> {
    pub fn new(marker_modules: &'a BTreeSet<String>) -> Self {
        Self { marker_modules }
    }

    /// Reconcile `root` against the build-declared dependencies.
    ///
    /// Structural problems are returned as errors straight away; a mismatch is
    /// reported through the returned [`ReconciliationResult`].
    pub fn reconcile(&self, root: &Element, build: &[Dependency]) -> Result<ReconciliationResult> {
        let manifest = manifest_dependencies(root, self.marker_modules)?;
        let build: BTreeSet<Dependency> = build.iter().cloned().collect();
        Ok(ReconciliationResult::compute(&manifest, &build))
    }
}
