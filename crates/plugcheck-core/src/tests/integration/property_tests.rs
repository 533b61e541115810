#![cfg(test)]

use crate::descriptor::{parse_document, Node};
use crate::kernel::constants::PLUGIN_MANIFEST_PATH;
use crate::plugin_system::include::{IncludeResolver, Location};
use crate::plugin_system::{load_descriptor, ComponentKind};
use crate::storage::{ArchiveIndex, CheckConfig, ManifestLookup};
use crate::tests::integration::common::{boxed_jar, plugin_jar, plugin_xml};

const PLAIN_BODY: &str = r#"
    <id>com.x</id>
    <name>X</name>
    <depends optional="true" config-file="x-java.xml">com.intellij.java</depends>
    <extensions defaultExtensionNs="com.intellij"><applicationService serviceImplementation="X"/></extensions>
"#;

#[test]
fn test_resolution_without_directives_is_noop() {
    let parsed = parse_document(plugin_xml(PLAIN_BODY).as_bytes(), PLUGIN_MANIFEST_PATH).unwrap();
    let resolved = load_descriptor(
        ComponentKind::Plugin,
        vec![plugin_jar(PLAIN_BODY)],
        None,
        &CheckConfig::default(),
    )
    .unwrap();

    assert_eq!(resolved.root, parsed);
}

#[test]
fn test_resolution_is_idempotent() {
    let main = plugin_xml(r#"<xi:include href="/META-INF/B.xml"/><depends>com.y</depends>"#);
    let archives = || {
        vec![boxed_jar(
            "plugin.jar",
            &[
                ("META-INF/plugin.xml", main.as_str()),
                ("META-INF/B.xml", "<idea-plugin><id>com.bar</id></idea-plugin>"),
            ],
        )]
    };
    let config = CheckConfig::default();
    let once = load_descriptor(ComponentKind::Plugin, archives(), None, &config).unwrap();
    assert!(!once.root.has_includes());

    let (index, _) = ArchiveIndex::build(archives(), PLUGIN_MANIFEST_PATH, ManifestLookup::Unique).unwrap();
    let resolver = IncludeResolver::new(&index, &config);
    let twice = resolver
        .resolve(once.root.children.clone(), &Location::Root, "META-INF")
        .unwrap();

    assert_eq!(twice, once.root.children);
}

#[test]
fn test_resolution_is_deterministic() {
    let main = plugin_xml(
        r#"<xi:include href="a.xml"/><extensionPoints><xi:include href="/META-INF/eps.xml" xpointer="xpointer(/idea-plugin/extensionPoints/*)"/></extensionPoints>"#,
    );
    let build = || {
        vec![
            boxed_jar("plugin.jar", &[("META-INF/plugin.xml", main.as_str())]),
            boxed_jar(
                "parts.jar",
                &[
                    ("META-INF/a.xml", "<idea-plugin><id>com.a</id><depends>com.b</depends></idea-plugin>"),
                    (
                        "META-INF/eps.xml",
                        r#"<idea-plugin><extensionPoints><extensionPoint name="x"/><extensionPoint name="y"/></extensionPoints></idea-plugin>"#,
                    ),
                ],
            ),
        ]
    };
    let config = CheckConfig::default();
    let first = load_descriptor(ComponentKind::Plugin, build(), None, &config).unwrap();
    let second = load_descriptor(ComponentKind::Plugin, build(), None, &config).unwrap();

    assert_eq!(first.root, second.root);
}

#[test]
fn test_included_id_appears_in_resolved_tree() {
    let jar = boxed_jar(
        "plugin.jar",
        &[
            (
                "META-INF/plugin.xml",
                r#"<idea-plugin xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="/META-INF/B.xml"/></idea-plugin>"#,
            ),
            ("META-INF/B.xml", "<idea-plugin><id>com.bar</id></idea-plugin>"),
        ],
    );
    let resolved = load_descriptor(ComponentKind::Plugin, vec![jar], None, &CheckConfig::default()).unwrap();

    let ids: Vec<&str> = resolved
        .root
        .children_named("id")
        .map(|e| e.trimmed_text())
        .collect();
    assert_eq!(ids, vec!["com.bar"]);
    assert!(resolved.root.children.iter().all(|n| matches!(n, Node::Element(_))));
}
