/// Root tag every plugin and module descriptor must carry
pub const ROOT_TAG: &str = "idea-plugin";

/// Location of the plugin descriptor inside a plugin jar
pub const PLUGIN_MANIFEST_PATH: &str = "META-INF/plugin.xml";

/// Suffix appended to a module id to locate the module descriptor
pub const MODULE_MANIFEST_SUFFIX: &str = ".xml";

/// XInclude namespace
pub const XINCLUDE_NAMESPACE: &str = "http://www.w3.org/2001/XInclude";

/// XInclude directive tag
pub const INCLUDE_TAG: &str = "include";

/// XInclude fallback marker tag
pub const FALLBACK_TAG: &str = "fallback";

/// The only supported XInclude parse mode
pub const XML_PARSE_MODE: &str = "xml";

/// Containers directly under the root that may hold include directives
pub const EXTENSION_POINT_CONTAINERS: &[&str] = &["extensionPoints"];

/// Identity element
pub const ID_TAG: &str = "id";

/// Identity fallback element
pub const NAME_TAG: &str = "name";

/// Legacy single-tag dependency
pub const DEPENDS_TAG: &str = "depends";

/// Attribute marking a legacy dependency as optional
pub const OPTIONAL_ATTR: &str = "optional";

/// Structured dependency container
pub const DEPENDENCIES_TAG: &str = "dependencies";

/// Structured plugin reference and its id attribute
pub const PLUGIN_REF_TAG: &str = "plugin";
pub const PLUGIN_REF_ATTR: &str = "id";

/// Structured module reference and its id attribute
pub const MODULE_REF_TAG: &str = "module";
pub const MODULE_REF_ATTR: &str = "name";

/// Root attribute controlling updates of bundled plugins
pub const ALLOW_BUNDLED_UPDATE_ATTR: &str = "allow-bundled-update";

/// Default value of [`ALLOW_BUNDLED_UPDATE_ATTR`]
pub const ALLOW_BUNDLED_UPDATE_DEFAULT: &str = "false";

/// Environment variable holding the log filter for the binary
pub const LOG_ENV_VAR: &str = "PLUGCHECK_LOG";
