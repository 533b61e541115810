//! # Plugcheck Core Plugin System Errors
//!
//! Errors raised while assembling and checking a descriptor that have no
//! better home: [`IncludeError`] for XInclude resolution and [`PolicyError`]
//! for root-level policy flags. Identity and dependency errors live next to
//! their extractors.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncludeError {
    #[error("Include of '{href}' inside <{parent}> is not supported; includes may only appear under the root or an extension point container")]
    UnsupportedLocation { parent: String, href: String },

    #[error("Include of '{href}' uses selector '{xpointer}', expected '{expected}'")]
    SelectorMismatch {
        href: String,
        xpointer: String,
        expected: String,
    },

    #[error("Include of '{href}' uses unsupported parse mode '{parse}'")]
    UnsupportedParseMode { href: String, parse: String },

    #[error("Include directive without href")]
    MissingHref,

    #[error("Included document '{href}' not found (resolved to '{path}')")]
    TargetNotFound { href: String, path: String },

    #[error("Selector '{xpointer}' matched nothing in '{path}' (included as '{href}')")]
    EmptySelection {
        href: String,
        path: String,
        xpointer: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Plugin '{id}' sets allow-bundled-update=\"{value}\" but is not allowed to")]
    BundledUpdateNotAllowed { id: String, value: String },
}
