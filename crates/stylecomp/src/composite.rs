//! Composite component stylesheets.
//!
//! A composite is the fully assembled stylesheet of one visual component:
//! the partials it imports, in the order they were listed, followed by the
//! component-local block (base rules, then the variant layer). The local
//! block always comes last so a component can override any partial rule by
//! matching its specificity.
//!
//! Composites are built once per [`ComponentDefinition`] and shared by
//! every instance through an `Arc`.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use crate::asset::{AssetPipeline, ModuleLocation};
use crate::audit;
use crate::error::{Result, StyleError};
use crate::parser::cascade::{CascadedStyle, ElementMeta, compute_style, matched_rules};
use crate::parser::{Rule, StyleSheet, parse_stylesheet};
use crate::partial::PartialStylesheet;
use crate::template::Template;
use crate::variant::VariantTable;

/// Where a rule in a composite came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleOrigin {
    /// A partial, by id.
    Partial(String),
    /// The component's own base rules.
    Local,
    /// A variant axis, by name.
    Variant(String),
}

impl fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOrigin::Partial(id) => write!(f, "partial: {id}"),
            RuleOrigin::Local => f.write_str("local"),
            RuleOrigin::Variant(axis) => write!(f, "variant: {axis}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedRule {
    pub rule: Rule,
    pub origin: RuleOrigin,
}

/// The assembled, immutable stylesheet of one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeStylesheet {
    name: String,
    module: ModuleLocation,
    partial_ids: Vec<String>,
    rules: Vec<SourcedRule>,
    sheet: StyleSheet,
    css: String,
}

impl CompositeStylesheet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &ModuleLocation {
        &self.module
    }

    /// Ids of the imported partials, in composition order.
    pub fn partial_ids(&self) -> &[String] {
        &self.partial_ids
    }

    pub fn rules(&self) -> &[SourcedRule] {
        &self.rules
    }

    /// The rules as a plain stylesheet, index-aligned with [`rules`](Self::rules).
    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    /// Final rule text handed to the host runtime.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Cascaded declarations for an element of this component.
    pub fn compute(&self, element: &ElementMeta, ancestors: &[ElementMeta]) -> CascadedStyle {
        compute_style(element, ancestors, &self.sheet)
    }

    /// Names of the variant axes with at least one rule matching the element.
    pub fn matching_axes(&self, element: &ElementMeta, ancestors: &[ElementMeta]) -> Vec<&str> {
        let mut axes: Vec<&str> = Vec::new();
        for matched in matched_rules(element, ancestors, &self.sheet) {
            if let RuleOrigin::Variant(axis) = &self.rules[matched.source_order].origin {
                if !axes.contains(&axis.as_str()) {
                    axes.push(axis.as_str());
                }
            }
        }
        axes
    }
}

/// Assembles a [`CompositeStylesheet`].
///
/// ```
/// use stylecomp::asset::{BundleManifest, ModuleLocation};
/// use stylecomp::composite::CompositeBuilder;
/// use stylecomp::partial::PartialStylesheet;
/// use stylecomp::template::Template;
///
/// let buttons = PartialStylesheet::parse("styles/buttons", "button { cursor: pointer; }").unwrap();
/// let composite = CompositeBuilder::new("badge", ModuleLocation::new("src/badge.js"))
///     .partial(&buttons)
///     .local(Template::new().text(".badge { display: inline-block; }"))
///     .build(&BundleManifest::default())
///     .unwrap();
///
/// assert_eq!(composite.rules().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CompositeBuilder<'a> {
    name: String,
    module: ModuleLocation,
    partials: Vec<&'a PartialStylesheet>,
    local: Template<'a>,
    variants: VariantTable,
}

impl<'a> CompositeBuilder<'a> {
    pub fn new(name: &str, module: ModuleLocation) -> Self {
        Self {
            name: name.to_string(),
            module,
            partials: Vec::new(),
            local: Template::new(),
            variants: VariantTable::new(),
        }
    }

    /// Appends a partial. Partials are inlined in the order added.
    pub fn partial(mut self, partial: &'a PartialStylesheet) -> Self {
        self.partials.push(partial);
        self
    }

    pub fn local(mut self, template: Template<'a>) -> Self {
        self.local = template;
        self
    }

    pub fn variants(mut self, table: VariantTable) -> Self {
        self.variants = table;
        self
    }

    /// Builds the composite. Assets in the local template are resolved
    /// here, once each. Fails on syntax errors, missing assets and variant
    /// axes that conflict at equal specificity.
    pub fn build(&self, assets: &dyn AssetPipeline) -> Result<CompositeStylesheet> {
        let mut rules = Vec::new();

        for partial in &self.partials {
            rules.extend(partial.rules().iter().cloned().map(|rule| SourcedRule {
                rule,
                origin: RuleOrigin::Partial(partial.id().to_string()),
            }));
        }

        if !self.local.is_empty() {
            let source = self.local.render(&self.module, assets)?;
            let local = parse_stylesheet(&source)?;
            rules.extend(local.rules.into_iter().map(|rule| SourcedRule {
                rule,
                origin: RuleOrigin::Local,
            }));
        }

        for compiled in self.variants.compile()? {
            rules.push(SourcedRule {
                rule: compiled.rule,
                origin: RuleOrigin::Variant(compiled.axis.to_string()),
            });
        }

        if let Some(conflict) = audit::variant_conflicts(&rules).into_iter().next() {
            return Err(StyleError::VariantConflict {
                first: conflict.first_axis,
                second: conflict.second_axis,
                property: conflict.property,
                subject: conflict.subject,
            });
        }

        let sheet = StyleSheet {
            rules: rules.iter().map(|r| r.rule.clone()).collect(),
        };
        let css = render_css(&rules);

        log::debug!(
            "composed {}: {} partials, {} rules, {} bytes",
            self.name,
            self.partials.len(),
            rules.len(),
            css.len()
        );

        Ok(CompositeStylesheet {
            name: self.name.clone(),
            module: self.module.clone(),
            partial_ids: self.partials.iter().map(|p| p.id().to_string()).collect(),
            rules,
            sheet,
            css,
        })
    }
}

/// Rule text with a banner comment at each change of origin.
fn render_css(rules: &[SourcedRule]) -> String {
    let mut out = String::new();
    let mut current: Option<&RuleOrigin> = None;
    for sourced in rules {
        if current != Some(&sourced.origin) {
            out.push_str(&format!("/* {} */\n", sourced.origin));
            current = Some(&sourced.origin);
        }
        out.push_str(&sourced.rule.to_string());
        out.push('\n');
    }
    out
}

/// A component definition whose stylesheet is composed on first access and
/// cached for the life of the definition.
pub struct ComponentDefinition {
    id: &'static str,
    compose: fn(&dyn AssetPipeline) -> Result<CompositeStylesheet>,
    cell: OnceCell<Arc<CompositeStylesheet>>,
}

impl ComponentDefinition {
    pub const fn new(
        id: &'static str,
        compose: fn(&dyn AssetPipeline) -> Result<CompositeStylesheet>,
    ) -> Self {
        Self {
            id,
            compose,
            cell: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the cached composite, composing it on first call. A failed
    /// composition is not cached, so the error is reported on every access.
    pub fn stylesheet(&self, assets: &dyn AssetPipeline) -> Result<Arc<CompositeStylesheet>> {
        self.cell
            .get_or_try_init(|| {
                log::debug!("composing stylesheet for <{}>", self.id);
                (self.compose)(assets).map(Arc::new)
            })
            .cloned()
    }

    pub fn is_composed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("id", &self.id)
            .field("composed", &self.is_composed())
            .finish()
    }
}
