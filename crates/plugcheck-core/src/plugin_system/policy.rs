use std::collections::BTreeSet;

use crate::descriptor::Element;
use crate::kernel::constants::{ALLOW_BUNDLED_UPDATE_ATTR, ALLOW_BUNDLED_UPDATE_DEFAULT};
use crate::plugin_system::error::PolicyError;
use crate::plugin_system::identity::Identity;

/// Only exempt plugins may change `allow-bundled-update` from its default.
pub fn check_bundled_update(
    root: &Element,
    identity: &Identity,
    exempt: &BTreeSet<String>,
) -> Result<(), PolicyError> {
    match root.attr(ALLOW_BUNDLED_UPDATE_ATTR) {
        Some(value) if value != ALLOW_BUNDLED_UPDATE_DEFAULT && !exempt.contains(&identity.id) => {
            Err(PolicyError::BundledUpdateNotAllowed {
                id: identity.id.clone(),
                value: value.to_string(),
            })
        }
        _ => Ok(()),
    }
}
