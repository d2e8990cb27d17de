//! Composition, audits and definition of the shipped components.

use std::sync::Arc;

use feed_styles::assets::bundle_manifest;
use feed_styles::registry::{RecordingHost, Registry};
use feed_styles::{RegistryError, partials, post};
use stylecomp::asset::BundleManifest;
use stylecomp::audit::{AuditReport, composition_order, variant_conflicts};
use stylecomp::theme::{Theme, TokenCatalog};
use stylecomp::{RuleOrigin, StyleError};

#[test]
fn composition_is_byte_identical() {
    let manifest = bundle_manifest("/static");
    let first = post::compose(&manifest).unwrap();
    let second = post::compose(&manifest).unwrap();
    assert_eq!(first.css(), second.css());
    assert_eq!(first, second);
}

#[test]
fn partials_precede_local_rules_in_declared_order() {
    let sheet = post::compose(&bundle_manifest("/static")).unwrap();
    assert_eq!(sheet.partial_ids(), partials::ALL);
    assert!(composition_order(&sheet).is_empty());

    let first_local = sheet
        .rules()
        .iter()
        .position(|r| r.origin == RuleOrigin::Local)
        .unwrap();
    assert!(
        sheet.rules()[..first_local]
            .iter()
            .all(|r| matches!(r.origin, RuleOrigin::Partial(_)))
    );

    let css = sheet.css();
    let buttons = css.find("/* partial: styles/buttons */").unwrap();
    let inputs = css.find("/* partial: styles/inputs */").unwrap();
    let local = css.find("/* local */").unwrap();
    assert!(buttons < inputs && inputs < local);
}

#[test]
fn shipped_styles_pass_every_audit() {
    let sheet = post::compose(&bundle_manifest("/static")).unwrap();
    for theme in Theme::standard_themes().values() {
        let report = AuditReport::run(&sheet, &TokenCatalog::from_theme(theme));
        assert!(report.is_clean(), "{report}");
    }
    assert!(variant_conflicts(sheet.rules()).is_empty());
}

#[test]
fn spinner_url_is_resolved_against_the_module() {
    let sheet = post::compose(&bundle_manifest("https://cdn.example.test/feed")).unwrap();
    assert!(
        sheet
            .css()
            .contains("url(\"https://cdn.example.test/feed/feed-styles/assets/spinner.svg\")")
    );
}

#[test]
fn missing_spinner_fails_composition() {
    let err = post::compose(&BundleManifest::new("/static")).unwrap_err();
    match err {
        StyleError::AssetNotFound { path, module } => {
            assert_eq!(path, "feed-styles/assets/spinner.svg");
            assert_eq!(module, post::MODULE);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn defining_twice_attaches_once() {
    let manifest = bundle_manifest("/static");
    let mut registry = Registry::new(RecordingHost::default());
    feed_styles::define_all(&mut registry, &manifest).unwrap();
    feed_styles::define_all(&mut registry, &manifest).unwrap();
    assert!(registry.is_defined(post::ID));

    let host = registry.into_host();
    assert_eq!(host.attached.len(), 1);
    let (id, attached) = &host.attached[0];
    assert_eq!(id, post::ID);

    let shared = post::definition().stylesheet(&manifest).unwrap();
    assert!(Arc::ptr_eq(attached, &shared));
}

#[test]
fn registry_reports_composition_failure() {
    fn compose_broken(
        assets: &dyn stylecomp::asset::AssetPipeline,
    ) -> stylecomp::Result<stylecomp::CompositeStylesheet> {
        stylecomp::CompositeBuilder::new("broken", stylecomp::asset::ModuleLocation::new("x.rs"))
            .local(stylecomp::template::Template::new().text(".a { color: }"))
            .build(assets)
    }
    static BROKEN: stylecomp::ComponentDefinition =
        stylecomp::ComponentDefinition::new("x-broken", compose_broken);

    let mut registry = Registry::new(RecordingHost::default());
    let err = registry
        .define(&BROKEN, &bundle_manifest("/static"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Compose {
            source: StyleError::InvalidSyntax(_),
            ..
        }
    ));
    assert!(registry.host().attached.is_empty());
}

#[test]
fn vocabulary_names_every_driver() {
    let lines: Vec<String> = post::vocabulary()
        .iter()
        .map(|(axis, driver)| format!("{axis}: {driver}"))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r#"
    render-context: host attribute `render-mode="reply"`
    read-state: class `unread` on `.post`
    nesting: host attribute `in-community`
    chrome-density: host attribute `noborders`
    thumbnail-presence: host attribute `nothumb`
    thread-position: host class `parent-post`
    thread-position: host class `child-post`
    "#);
}
