//! Integration tests for composite assembly.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use stylecomp::asset::{AssetPipeline, BundleManifest, ModuleLocation};
use stylecomp::audit::{AuditReport, composition_order};
use stylecomp::template::Template;
use stylecomp::theme::{Theme, TokenCatalog};
use stylecomp::{
    CompositeBuilder, CompositeStylesheet, ComponentDefinition, PartialStylesheet, Result,
    RuleOrigin, StyleError,
};

fn partials() -> (PartialStylesheet, PartialStylesheet) {
    let p1 = PartialStylesheet::parse(
        "styles/reset",
        ".reset-a { margin: 0; } .reset-b { padding: 0; }",
    )
    .unwrap();
    let p2 = PartialStylesheet::parse(
        "styles/buttons",
        ".btn { cursor: pointer; } .btn:hover { background: var(--accent-color); }",
    )
    .unwrap();
    (p1, p2)
}

/// Counts resolutions and serves every asset from a fixed base.
struct CountingAssets {
    calls: Cell<usize>,
}

impl AssetPipeline for CountingAssets {
    fn resolve_asset_url(&self, relative: &str, module: &ModuleLocation) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        let path = stylecomp::asset::join_module_path(relative, module)?;
        Ok(format!("/static/{path}"))
    }
}

#[test]
fn building_twice_is_byte_identical() {
    let (p1, p2) = partials();
    let builder = CompositeBuilder::new("card", ModuleLocation::new("src/card/card.js"))
        .partial(&p1)
        .partial(&p2)
        .local(Template::new().text(".card { display: block; }"));

    let first = builder.build(&BundleManifest::default()).unwrap();
    let second = builder.build(&BundleManifest::default()).unwrap();
    assert_eq!(first.css(), second.css());
    assert_eq!(first, second);
}

#[test]
fn partial_rules_keep_declared_order() {
    let (p1, p2) = partials();
    let composite = CompositeBuilder::new("card", ModuleLocation::new("src/card/card.js"))
        .partial(&p1)
        .partial(&p2)
        .local(Template::new().text(".card { display: block; }"))
        .build(&BundleManifest::default())
        .unwrap();

    let position = |origin: RuleOrigin| -> Vec<usize> {
        composite
            .rules()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.origin == origin)
            .map(|(i, _)| i)
            .collect()
    };
    let first = position(RuleOrigin::Partial("styles/reset".into()));
    let second = position(RuleOrigin::Partial("styles/buttons".into()));
    let local = position(RuleOrigin::Local);

    assert!(first.iter().max() < second.iter().min());
    assert!(second.iter().max() < local.iter().min());
    assert!(composition_order(&composite).is_empty());

    let css = composite.css();
    assert!(css.find(".reset-b").unwrap() < css.find(".btn {").unwrap());
}

#[test]
fn reversing_partials_reverses_output() {
    let (p1, p2) = partials();
    let composite = CompositeBuilder::new("card", ModuleLocation::new("src/card/card.js"))
        .partial(&p2)
        .partial(&p1)
        .build(&BundleManifest::default())
        .unwrap();
    assert_eq!(composite.partial_ids(), ["styles/buttons", "styles/reset"]);
    assert_eq!(composite.rules()[0].rule.selectors.to_string(), ".btn");
}

#[test]
fn assets_resolve_once_per_build_relative_to_module() {
    let assets = CountingAssets {
        calls: Cell::new(0),
    };
    let composite = CompositeBuilder::new("card", ModuleLocation::new("src/components/card/card.js"))
        .local(
            Template::new()
                .text(".spinner { background-image: ")
                .asset("../../img/spinner.gif")
                .text("; }"),
        )
        .build(&assets)
        .unwrap();

    assert_eq!(assets.calls.get(), 1);
    assert_eq!(
        composite.rules()[0].rule.declarations()[0].value,
        r#"url("/static/src/img/spinner.gif")"#
    );
}

#[test]
fn missing_asset_fails_the_build() {
    let result = CompositeBuilder::new("card", ModuleLocation::new("src/card/card.js"))
        .local(Template::new().text(".x { background: ").asset("./gone.png").text("; }"))
        .build(&BundleManifest::new("/static"));
    match result {
        Err(StyleError::AssetNotFound { path, module }) => {
            assert_eq!(path, "src/card/gone.png");
            assert_eq!(module, "src/card/card.js");
        }
        other => panic!("expected AssetNotFound, got {other:?}"),
    }
}

static COMPOSE_CALLS: AtomicUsize = AtomicUsize::new(0);

fn compose_card(assets: &dyn AssetPipeline) -> Result<CompositeStylesheet> {
    COMPOSE_CALLS.fetch_add(1, Ordering::SeqCst);
    CompositeBuilder::new("card", ModuleLocation::new("src/card/card.js"))
        .local(Template::new().text(".card { display: block; }"))
        .build(assets)
}

static CARD: ComponentDefinition = ComponentDefinition::new("x-card", compose_card);

#[test]
fn definition_composes_once_and_shares() {
    let manifest = BundleManifest::default();
    let a = CARD.stylesheet(&manifest).unwrap();
    let b = CARD.stylesheet(&manifest).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(COMPOSE_CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn audit_reports_literal_colors_in_local_rules() {
    let composite = CompositeBuilder::new("card", ModuleLocation::new("src/card/card.js"))
        .local(Template::new().text(".card { border: 1px solid #ddd; color: var(--text-color--default); }"))
        .build(&BundleManifest::default())
        .unwrap();
    let report = AuditReport::run(&composite, &TokenCatalog::from_theme(&Theme::light()));
    assert_eq!(report.findings.len(), 1, "{report}");
    assert!(report.to_string().contains("#ddd"));
}
