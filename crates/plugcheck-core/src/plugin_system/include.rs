//! XInclude resolution over an [`ArchiveIndex`].
//!
//! [`IncludeResolver::resolve`] rebuilds a sibling list with every directive
//! replaced by the nodes it designates. Included documents are parsed on
//! demand and resolved in turn relative to their own directory.
use log::debug;

use crate::descriptor::{parse_document, Element, IncludeDirective, Node};
use crate::kernel::constants::{EXTENSION_POINT_CONTAINERS, ROOT_TAG, XML_PARSE_MODE};
use crate::kernel::error::Result;
use crate::plugin_system::error::IncludeError;
use crate::storage::{ArchiveIndex, CheckConfig};

/// Where a sibling list sits in the descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Direct children of the root element
    Root,
    /// Children of an extension point container directly under the root
    Container(String),
    /// Anywhere else; the tag is the parent's
    Nested(String),
}

impl Location {
    /// Location of the children of `element`, itself a member of this list
    fn enter(&self, element: &Element) -> Location {
        match self {
            Location::Root
                if element.namespace.is_none()
                    && EXTENSION_POINT_CONTAINERS.contains(&element.tag.as_str()) =>
            {
                Location::Container(element.tag.clone())
            }
            _ => Location::Nested(element.tag.clone()),
        }
    }
}

/// Which part of an included document replaces the directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionScope {
    /// All children of the target's root
    RootChildren,
    /// All children of the target's matching containers under its root
    ContainerChildren(String),
}

impl SelectionScope {
    /// Canonical selector for this scope
    pub fn xpointer(&self) -> String {
        match self {
            SelectionScope::RootChildren => format!("xpointer(/{}/*)", ROOT_TAG),
            SelectionScope::ContainerChildren(container) => {
                format!("xpointer(/{}/{}/*)", ROOT_TAG, container)
            }
        }
    }

    fn select(&self, target: Element) -> Vec<Node> {
        if !target.is(ROOT_TAG) {
            return Vec::new();
        }
        match self {
            SelectionScope::RootChildren => target.children,
            SelectionScope::ContainerChildren(container) => target
                .children
                .into_iter()
                .filter_map(|node| match node {
                    Node::Element(element) if element.is(container) => Some(element.children),
                    _ => None,
                })
                .flatten()
                .collect(),
        }
    }
}

/// Resolves include directives against one archive index
#[derive(Debug, Clone, Copy)]
pub struct IncludeResolver<'a> {
    index: &'a ArchiveIndex,
    config: &'a CheckConfig,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(index: &'a ArchiveIndex, config: &'a CheckConfig) -> Self {
        Self { index, config }
    }

    /// Resolve every directive under `root`, a document stored at `document_path`.
    pub fn resolve_document(&self, mut root: Element, document_path: &str) -> Result<Element> {
        let children = std::mem::take(&mut root.children);
        root.children = self.resolve(children, &Location::Root, parent_dir(document_path))?;
        Ok(root)
    }

    /// Build a new sibling list with every directive expanded.
    ///
    /// `cwd` is the archive directory relative hrefs are resolved against.
    pub fn resolve(&self, children: Vec<Node>, location: &Location, cwd: &str) -> Result<Vec<Node>> {
        let mut resolved = Vec::with_capacity(children.len());
        for node in children {
            match node {
                Node::Element(mut element) => {
                    let inner = location.enter(&element);
                    let grandchildren = std::mem::take(&mut element.children);
                    element.children = self.resolve(grandchildren, &inner, cwd)?;
                    resolved.push(Node::Element(element));
                }
                Node::Include(directive) => {
                    let mut spliced = self.expand(&directive, location, cwd)?;
                    if let (Some(tail), Some(last)) = (directive.tail.as_deref(), spliced.last_mut()) {
                        last.append_tail(tail);
                    }
                    resolved.extend(spliced);
                }
            }
        }
        Ok(resolved)
    }

    fn expand(&self, directive: &IncludeDirective, location: &Location, cwd: &str) -> Result<Vec<Node>> {
        let href_label = directive.href.as_deref().unwrap_or("<missing>");

        let scope = match location {
            Location::Root => SelectionScope::RootChildren,
            Location::Container(container) => SelectionScope::ContainerChildren(container.clone()),
            Location::Nested(parent) => {
                return Err(IncludeError::UnsupportedLocation {
                    parent: parent.clone(),
                    href: href_label.to_string(),
                }
                .into());
            }
        };
        if let Some(xpointer) = directive.xpointer.as_deref() {
            let expected = scope.xpointer();
            if xpointer.trim() != expected {
                return Err(IncludeError::SelectorMismatch {
                    href: href_label.to_string(),
                    xpointer: xpointer.to_string(),
                    expected,
                }
                .into());
            }
        }
        if directive.parse != XML_PARSE_MODE {
            return Err(IncludeError::UnsupportedParseMode {
                href: href_label.to_string(),
                parse: directive.parse.clone(),
            }
            .into());
        }

        let href = directive.href.as_deref().ok_or(IncludeError::MissingHref)?;
        let path = self.resolve_href(href, cwd);

        if self.config.is_external_include(&path) {
            debug!("Include '{}' is supplied externally, skipping", path);
            return Ok(Vec::new());
        }
        if directive.fallback {
            debug!("Include '{}' has a fallback, skipping", path);
            return Ok(Vec::new());
        }

        let bytes = self.index.read(&path)?.ok_or_else(|| IncludeError::TargetNotFound {
            href: href.to_string(),
            path: path.clone(),
        })?;
        let target = parse_document(&bytes, &path)?;
        let selected = scope.select(target);
        if selected.is_empty() {
            return Err(IncludeError::EmptySelection {
                href: href.to_string(),
                path,
                xpointer: scope.xpointer(),
            }
            .into());
        }
        debug!("Include '{}' contributes {} node(s)", path, selected.len());

        self.resolve(selected, location, parent_dir(&path))
    }

    /// Turn an href into an index key
    pub fn resolve_href(&self, href: &str, cwd: &str) -> String {
        if let Some(absolute) = href.strip_prefix('/') {
            return normalize_path(absolute);
        }
        if self.index.contains(href) {
            return href.to_string();
        }
        if cwd.is_empty() {
            normalize_path(href)
        } else {
            normalize_path(&format!("{}/{}", cwd, href))
        }
    }
}

/// Directory part of an entry path, `""` at the archive root
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

/// Collapse empty, `.` and `..` segments
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
