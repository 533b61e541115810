#![cfg(test)]

use crate::kernel::error::Error;
use crate::plugin_system::dependency::Dependency;
use crate::plugin_system::identity::IdentityError;
use crate::plugin_system::error::{IncludeError, PolicyError};
use crate::plugin_system::{check, CheckRequest, ComponentKind};
use crate::storage::{Archive, CheckConfig, JarArchive};
use crate::tests::integration::common::{boxed_jar, plugin_jar, plugin_xml, write_zip};

#[test]
fn test_minimal_plugin_passes() {
    let request = CheckRequest::new(ComponentKind::Plugin, vec![plugin_jar("<id>com.x</id>")])
        .expected_id("com.x");

    let report = check(request).expect("check should pass");
    assert_eq!(report.identity_record(), "plugin:com.x");
    assert_eq!(report.descriptor_path, "META-INF/plugin.xml");
    assert!(report.dependencies.is_empty());
}

#[test]
fn test_optional_legacy_dependency_is_ignored() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar(r#"<id>com.x</id><depends optional="true">com.y</depends>"#)],
    );
    assert!(check(request).is_ok());
}

#[test]
fn test_undeclared_manifest_dependency_fails() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar("<id>com.x</id><depends>com.z</depends>")],
    );

    match check(request) {
        Err(Error::DependencyMismatch { lines }) => {
            assert_eq!(
                lines,
                vec!["plugin:com.z is declared in the manifest but missing from the build".to_string()]
            );
        }
        other => panic!("Expected a dependency mismatch, got {:?}", other),
    }
}

#[test]
fn test_mismatches_are_reported_together() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar(
            r#"<id>com.x</id><depends>com.z</depends>
               <dependencies><module name="intellij.x.core"/></dependencies>"#,
        )],
    )
    .build_dependency(Dependency::plugin("com.built"))
    .build_dependency(Dependency::module("intellij.x.core"));

    let err = check(request).unwrap_err();
    assert_eq!(
        err.diagnostics(),
        vec![
            "plugin:com.built is declared in the build but missing from the manifest".to_string(),
            "plugin:com.z is declared in the manifest but missing from the build".to_string(),
        ]
    );
}

#[test]
fn test_marker_modules_are_excluded_from_manifest_side() {
    let body = "<id>com.x</id><depends>com.intellij.modules.platform</depends><depends>com.y</depends>";
    let config = CheckConfig::new().marker_module("com.intellij.modules.platform");
    let request = CheckRequest::new(ComponentKind::Plugin, vec![plugin_jar(body)])
        .build_dependency(Dependency::plugin("com.y"))
        .config(config);

    let report = check(request).expect("marker module should be ignored");
    assert_eq!(report.dependencies.len(), 1);
}

#[test]
fn test_marker_modules_stay_on_build_side() {
    let config = CheckConfig::new().marker_module("com.intellij.modules.platform");
    let request = CheckRequest::new(ComponentKind::Plugin, vec![plugin_jar("<id>com.x</id>")])
        .build_dependency(Dependency::plugin("com.intellij.modules.platform"))
        .config(config);

    assert!(matches!(check(request), Err(Error::DependencyMismatch { .. })));
}

#[test]
fn test_plugin_identity_falls_back_to_name() {
    let request = CheckRequest::new(ComponentKind::Plugin, vec![plugin_jar("<name>the_name</name>")]);
    let report = check(request).unwrap();
    assert_eq!(report.identity.id, "the_name");
}

#[test]
fn test_expected_id_mismatch_fails() {
    let request = CheckRequest::new(ComponentKind::Plugin, vec![plugin_jar("<id>com.x</id>")])
        .expected_id("com.other");
    assert!(matches!(
        check(request),
        Err(Error::Identity(IdentityError::Mismatch { .. }))
    ));
}

#[test]
fn test_duplicate_ids_fail_regardless_of_dependencies() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar("<id>a</id><id>b</id><depends>com.z</depends>")],
    );
    assert!(matches!(
        check(request),
        Err(Error::Identity(IdentityError::MultipleIds(_)))
    ));
}

#[test]
fn test_wrong_root_tag_is_structural() {
    let jar = boxed_jar("plugin.jar", &[("META-INF/plugin.xml", "<plugin><id>x</id></plugin>")]);
    let request = CheckRequest::new(ComponentKind::Plugin, vec![jar]);
    assert!(matches!(check(request), Err(Error::Structural { .. })));
}

#[test]
fn test_descriptor_in_two_jars_is_ambiguous() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar("<id>a</id>"), plugin_jar("<id>a</id>")],
    );
    match check(request) {
        Err(Error::Structural { message }) => assert!(message.contains("Ambiguous")),
        other => panic!("Expected structural error, got {:?}", other),
    }
}

#[test]
fn test_no_descriptor_is_structural() {
    let jar = boxed_jar("lib.jar", &[("com/x/A.class", "")]);
    let request = CheckRequest::new(ComponentKind::Plugin, vec![jar]);
    assert!(matches!(check(request), Err(Error::Structural { .. })));
}

#[test]
fn test_malformed_descriptor_is_parse_error() {
    let jar = boxed_jar("plugin.jar", &[("META-INF/plugin.xml", "<idea-plugin><id>x</idea-plugin>")]);
    let request = CheckRequest::new(ComponentKind::Plugin, vec![jar]);
    assert!(matches!(check(request), Err(Error::Parse { .. })));
}

#[test]
fn test_module_identity_comes_from_expected_id() {
    let module_xml = plugin_xml(r#"<dependencies><plugin id="com.x"/></dependencies>"#);
    let jar = boxed_jar("intellij.x.ui.jar", &[("intellij.x.ui.xml", &module_xml)]);
    let request = CheckRequest::new(ComponentKind::Module, vec![jar])
        .expected_id("intellij.x.ui")
        .build_dependency(Dependency::plugin("com.x"));

    let report = check(request).expect("module check should pass");
    assert_eq!(report.identity_record(), "module:intellij.x.ui");
}

#[test]
fn test_module_descriptor_may_appear_twice() {
    let module_xml = plugin_xml("");
    let first = boxed_jar("a.jar", &[("intellij.x.ui.xml", &module_xml)]);
    let second = boxed_jar("b.jar", &[("intellij.x.ui.xml", &module_xml)]);
    let request = CheckRequest::new(ComponentKind::Module, vec![first, second]).expected_id("intellij.x.ui");
    assert!(check(request).is_ok());
}

#[test]
fn test_module_check_without_id_fails() {
    let request = CheckRequest::new(ComponentKind::Module, vec![plugin_jar("")]);
    assert!(matches!(
        check(request),
        Err(Error::Identity(IdentityError::MissingModuleId))
    ));
}

#[test]
fn test_bundled_update_requires_exemption() {
    let jar = boxed_jar(
        "plugin.jar",
        &[(
            "META-INF/plugin.xml",
            r#"<idea-plugin allow-bundled-update="true"><id>com.x</id></idea-plugin>"#,
        )],
    );
    let request = CheckRequest::new(ComponentKind::Plugin, vec![jar]);
    assert!(matches!(
        check(request),
        Err(Error::Policy(PolicyError::BundledUpdateNotAllowed { .. }))
    ));
}

#[test]
fn test_bundled_update_allowed_for_exempt_plugin() {
    let jar = boxed_jar(
        "plugin.jar",
        &[(
            "META-INF/plugin.xml",
            r#"<idea-plugin allow-bundled-update="true"><id>com.x</id></idea-plugin>"#,
        )],
    );
    let request = CheckRequest::new(ComponentKind::Plugin, vec![jar])
        .config(CheckConfig::new().bundled_update_exempt("com.x"));
    assert!(check(request).is_ok());
}

#[test]
fn test_missing_include_target_fails() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar(r#"<id>com.x</id><xi:include href="/META-INF/missing.xml"/>"#)],
    );
    assert!(matches!(
        check(request),
        Err(Error::IncludeResolution(IncludeError::TargetNotFound { .. }))
    ));
}

#[test]
fn test_external_include_is_accepted() {
    let request = CheckRequest::new(
        ComponentKind::Plugin,
        vec![plugin_jar(r#"<id>com.x</id><xi:include href="/META-INF/elsewhere.xml"/>"#)],
    )
    .config(CheckConfig::new().external_include("/META-INF/elsewhere.xml"));
    assert!(check(request).is_ok());
}

#[test]
fn test_check_reads_real_jars() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let main = write_zip(
        dir.path(),
        "main.jar",
        &[
            ("META-INF/", ""),
            (
                "META-INF/plugin.xml",
                &plugin_xml(r#"<xi:include href="core.xml" xpointer="xpointer(/idea-plugin/*)"/>"#),
            ),
        ],
    );
    let core = write_zip(
        dir.path(),
        "core.jar",
        &[(
            "META-INF/core.xml",
            "<idea-plugin><id>com.jar</id><depends>com.dep</depends></idea-plugin>",
        )],
    );
    let archives: Vec<Box<dyn Archive>> = vec![Box::new(JarArchive::new(main)), Box::new(JarArchive::new(core))];
    let request = CheckRequest::new(ComponentKind::Plugin, archives)
        .expected_id("com.jar")
        .build_dependency(Dependency::plugin("com.dep"));

    let report = check(request).expect("check over jars should pass");
    assert_eq!(report.identity_record(), "plugin:com.jar");
    assert!(report.descriptor_archive.ends_with("main.jar"));
}
