use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::descriptor::Element;
use crate::kernel::constants::{ID_TAG, NAME_TAG};
use crate::plugin_system::kind::ComponentKind;

/// The plugin or module under check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    pub kind: ComponentKind,
    pub id: String,
}

impl Identity {
    pub fn new(kind: ComponentKind, id: &str) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

/// Renders as the identity record, `kind:id`
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Descriptor declares neither <id> nor <name>")]
    NoCandidates,

    #[error("Descriptor declares {} <id> elements: {}", .0.len(), .0.join(", "))]
    MultipleIds(Vec<String>),

    #[error("Descriptor declares no <id> and {} <name> elements: {}", .0.len(), .0.join(", "))]
    MultipleNames(Vec<String>),

    #[error("Descriptor <{0}> is empty")]
    Blank(String),

    #[error("Expected id '{expected}' but the descriptor declares '{found}'")]
    Mismatch { expected: String, found: String },

    #[error("Module checks need an expected module id")]
    MissingModuleId,
}

/// Determine the identity of a resolved descriptor.
///
/// Modules do not declare their own id, so for [`ComponentKind::Module`] the
/// expected id is the identity. Plugins use their single `<id>`, or their
/// single `<name>` when no `<id>` exists.
pub fn extract_identity(
    root: &Element,
    kind: ComponentKind,
    expected_id: Option<&str>,
) -> Result<Identity, IdentityError> {
    let id = match kind {
        ComponentKind::Module => expected_id.ok_or(IdentityError::MissingModuleId)?.to_string(),
        ComponentKind::Plugin => declared_id(root)?,
    };
    if let Some(expected) = expected_id {
        if expected != id {
            return Err(IdentityError::Mismatch {
                expected: expected.to_string(),
                found: id,
            });
        }
    }
    Ok(Identity { kind, id })
}

/// The id a plugin descriptor declares for itself
pub fn declared_id(root: &Element) -> Result<String, IdentityError> {
    let ids: Vec<&Element> = root.children_named(ID_TAG).collect();
    match ids.as_slice() {
        [single] => return non_blank(single, ID_TAG),
        [] => {}
        many => {
            return Err(IdentityError::MultipleIds(
                many.iter().map(|e| e.trimmed_text().to_string()).collect(),
            ));
        }
    }

    let names: Vec<&Element> = root.children_named(NAME_TAG).collect();
    match names.as_slice() {
        [single] => non_blank(single, NAME_TAG),
        [] => Err(IdentityError::NoCandidates),
        many => Err(IdentityError::MultipleNames(
            many.iter().map(|e| e.trimmed_text().to_string()).collect(),
        )),
    }
}

fn non_blank(element: &Element, tag: &str) -> Result<String, IdentityError> {
    match element.trimmed_text() {
        "" => Err(IdentityError::Blank(tag.to_string())),
        text => Ok(text.to_string()),
    }
}
