use std::collections::BTreeSet;
use std::path::PathBuf;

use log::{debug, info};

use crate::descriptor::{parse_document, Element};
use crate::kernel::constants::{MODULE_MANIFEST_SUFFIX, PLUGIN_MANIFEST_PATH, ROOT_TAG};
use crate::kernel::error::{Error, Result};
use crate::plugin_system::dependency::{Dependency, DependencyReconciler};
use crate::plugin_system::identity::{extract_identity, IdentityError};
use crate::plugin_system::include::IncludeResolver;
use crate::plugin_system::kind::ComponentKind;
use crate::plugin_system::policy::check_bundled_update;
use crate::plugin_system::report::CheckReport;
use crate::storage::{Archive, ArchiveIndex, CheckConfig, ManifestLookup};

/// Everything a single check needs
#[derive(Debug)]
pub struct CheckRequest {
    pub kind: ComponentKind,
    /// Archives belonging to the plugin or module, in priority order
    pub archives: Vec<Box<dyn Archive>>,
    pub expected_id: Option<String>,
    pub build_dependencies: Vec<Dependency>,
    pub config: CheckConfig,
}

impl CheckRequest {
    pub fn new(kind: ComponentKind, archives: Vec<Box<dyn Archive>>) -> Self {
        Self {
            kind,
            archives,
            expected_id: None,
            build_dependencies: Vec::new(),
            config: CheckConfig::default(),
        }
    }

    pub fn expected_id(mut self, id: &str) -> Self {
        self.expected_id = Some(id.to_string());
        self
    }

    pub fn build_dependency(mut self, dependency: Dependency) -> Self {
        self.build_dependencies.push(dependency);
        self
    }

    pub fn config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }
}

/// A descriptor with every include directive resolved
#[derive(Debug, Clone)]
pub struct ResolvedDescriptor {
    pub root: Element,
    /// Entry path of the descriptor
    pub path: String,
    /// Archive the descriptor came from
    pub archive: PathBuf,
}

/// Where the descriptor for `kind` lives, and whether it must be unique
pub fn descriptor_location(
    kind: ComponentKind,
    expected_id: Option<&str>,
) -> Result<(String, ManifestLookup)> {
    match kind {
        ComponentKind::Plugin => Ok((PLUGIN_MANIFEST_PATH.to_string(), ManifestLookup::Unique)),
        ComponentKind::Module => {
            let id = expected_id.ok_or(IdentityError::MissingModuleId)?;
            Ok((format!("{}{}", id, MODULE_MANIFEST_SUFFIX), ManifestLookup::FirstMatch))
        }
    }
}

/// Index `archives`, parse the descriptor and resolve its includes.
pub fn load_descriptor(
    kind: ComponentKind,
    archives: Vec<Box<dyn Archive>>,
    expected_id: Option<&str>,
    config: &CheckConfig,
) -> Result<ResolvedDescriptor> {
    let (path, lookup) = descriptor_location(kind, expected_id)?;
    let (index, manifest) = ArchiveIndex::build(archives, &path, lookup)?;
    debug!(
        "Indexed {} entries, descriptor '{}' from '{}'",
        index.len(),
        manifest.path,
        manifest.archive.display()
    );

    let root = parse_document(&manifest.bytes, &manifest.path)?;
    if !root.is(ROOT_TAG) {
        return Err(Error::structural(format!(
            "Descriptor '{}' has root <{}>, expected <{}>",
            manifest.path, root.tag, ROOT_TAG
        )));
    }
    let root = IncludeResolver::new(&index, config).resolve_document(root, &manifest.path)?;

    Ok(ResolvedDescriptor {
        root,
        path: manifest.path,
        archive: manifest.archive,
    })
}

/// Run a complete check.
///
/// Stops at the first structural, parse, include, identity or policy
/// problem. Dependency mismatches are collected and returned together as
/// [`Error::DependencyMismatch`].
pub fn check(request: CheckRequest) -> Result<CheckReport> {
    let CheckRequest {
        kind,
        archives,
        expected_id,
        build_dependencies,
        config,
    } = request;

    let descriptor = load_descriptor(kind, archives, expected_id.as_deref(), &config)?;
    let identity = extract_identity(&descriptor.root, kind, expected_id.as_deref())?;
    debug!("Checking {}", identity);

    DependencyReconciler::new(&config.marker_modules)
        .reconcile(&descriptor.root, &build_dependencies)?
        .into_result()?;
    check_bundled_update(&descriptor.root, &identity, &config.bundled_update_exempt)?;

    let dependencies: BTreeSet<Dependency> = build_dependencies.into_iter().collect();
    info!("{} is consistent ({} dependencies)", identity, dependencies.len());
    Ok(CheckReport {
        identity,
        descriptor_archive: descriptor.archive,
        descriptor_path: descriptor.path,
        dependencies,
    })
}
