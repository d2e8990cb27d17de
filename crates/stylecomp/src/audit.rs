//! Static audits over composed stylesheets.
//!
//! CSS has no compile-time checker for the properties a composite relies
//! on, so these checks run over the assembled rules instead:
//!
//! - **Order**: partials appear in declared order, the local block last
//! - **Token purity**: no literal color, and no spacing literal that a
//!   spacing token already names
//! - **Variant independence**: no two axes set the same property (shorthand
//!   families included) on the same element at equal specificity with
//!   different values

use std::fmt;

use crate::composite::{CompositeStylesheet, RuleOrigin, SourcedRule};
pub use crate::parser::shorthand::properties_overlap;
use crate::parser::{Specificity, SubjectKey};
use crate::parser::values::{color_literals, is_length, strip_resolution_boundaries};
use crate::theme::TokenCatalog;

fn is_spacing_property(property: &str) -> bool {
    property.starts_with("margin") || property.starts_with("padding") || property.ends_with("gap")
}

fn normalize_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Two axes setting one property on one element at equal specificity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub first_axis: String,
    pub second_axis: String,
    pub property: String,
    pub subject: String,
    pub specificity: Specificity,
    pub first_value: String,
    pub second_value: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` ({}) and `{}` ({}) both set `{}` on `{}` at {}",
            self.first_axis,
            self.first_value,
            self.second_axis,
            self.second_value,
            self.property,
            self.subject,
            self.specificity
        )
    }
}

struct AxisDeclaration<'a> {
    axis: &'a str,
    subject: String,
    key: SubjectKey,
    specificity: Specificity,
    property: &'a str,
    value: String,
}

/// Finds every pair of variant axes whose declarations on the same element
/// overlap at equal specificity with different values. Identical values are
/// an idempotent union and are not reported.
///
/// Two subjects are the same element when they share a type, id or class
/// and neither names a different type or id, regardless of the order the
/// compound lists them in.
pub fn variant_conflicts(rules: &[SourcedRule]) -> Vec<Conflict> {
    let mut entries = Vec::new();
    for sourced in rules {
        let RuleOrigin::Variant(axis) = &sourced.origin else {
            continue;
        };
        for complex in &sourced.rule.selectors.selectors {
            let Some(compound) = complex.subject() else {
                continue;
            };
            let key = compound.subject_key();
            for decl in sourced.rule.declarations() {
                entries.push(AxisDeclaration {
                    axis,
                    subject: compound.to_string(),
                    key: key.clone(),
                    specificity: complex.specificity(),
                    property: &decl.property,
                    value: normalize_value(&decl.value),
                });
            }
        }
    }

    let mut conflicts: Vec<Conflict> = Vec::new();
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            if a.axis == b.axis
                || !a.key.may_overlap(&b.key)
                || a.specificity != b.specificity
                || !properties_overlap(a.property, b.property)
                || a.value == b.value
            {
                continue;
            }
            let conflict = Conflict {
                first_axis: a.axis.to_string(),
                second_axis: b.axis.to_string(),
                property: a.property.to_string(),
                subject: a.subject.clone(),
                specificity: a.specificity,
                first_value: a.value.clone(),
                second_value: b.value.clone(),
            };
            if !conflicts.contains(&conflict) {
                conflicts.push(conflict);
            }
        }
    }
    conflicts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A rule sits in the wrong segment of the composite.
    OutOfOrder { index: usize, origin: RuleOrigin },
    LiteralColor {
        selector: String,
        property: String,
        literal: String,
    },
    LiteralSpacing {
        selector: String,
        property: String,
        literal: String,
        token: String,
    },
    VariantConflict(Conflict),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::OutOfOrder { index, origin } => {
                write!(f, "rule #{index} from {origin} is out of composition order")
            }
            Finding::LiteralColor {
                selector,
                property,
                literal,
            } => write!(f, "{selector} {{ {property} }} uses literal color {literal}"),
            Finding::LiteralSpacing {
                selector,
                property,
                literal,
                token,
            } => write!(
                f,
                "{selector} {{ {property} }} uses {literal} where var(--{token}) exists"
            ),
            Finding::VariantConflict(conflict) => write!(f, "variant conflict: {conflict}"),
        }
    }
}

/// Checks that rules appear as: each declared partial in order, then local
/// rules, then variant rules.
pub fn composition_order(composite: &CompositeStylesheet) -> Vec<Finding> {
    let rank = |origin: &RuleOrigin| -> Option<usize> {
        match origin {
            RuleOrigin::Partial(id) => composite.partial_ids().iter().position(|p| p == id),
            RuleOrigin::Local => Some(composite.partial_ids().len()),
            RuleOrigin::Variant(_) => Some(composite.partial_ids().len() + 1),
        }
    };

    let mut findings = Vec::new();
    let mut highest = 0;
    for (index, sourced) in composite.rules().iter().enumerate() {
        match rank(&sourced.origin) {
            Some(r) if r >= highest => highest = r,
            _ => findings.push(Finding::OutOfOrder {
                index,
                origin: sourced.origin.clone(),
            }),
        }
    }
    findings
}

/// Scans declarations for values that should have been tokens.
/// Custom property declarations (`--name: value`) define tokens and are
/// skipped.
pub fn token_purity(rules: &[SourcedRule], catalog: &TokenCatalog) -> Vec<Finding> {
    let mut findings = Vec::new();
    for sourced in rules {
        let selector = sourced.rule.selectors.to_string();
        for decl in sourced.rule.declarations() {
            if decl.property.starts_with("--") {
                continue;
            }

            if catalog.has_color_tokens() {
                for literal in color_literals(&decl.value) {
                    findings.push(Finding::LiteralColor {
                        selector: selector.clone(),
                        property: decl.property.clone(),
                        literal,
                    });
                }
            }

            if is_spacing_property(&decl.property) {
                let literals = strip_resolution_boundaries(&decl.value);
                for word in literals.split_whitespace().filter(|w| is_length(w)) {
                    if let Some(token) = catalog.spacing_token_for(word) {
                        findings.push(Finding::LiteralSpacing {
                            selector: selector.clone(),
                            property: decl.property.clone(),
                            literal: word.to_string(),
                            token: token.to_string(),
                        });
                    }
                }
            }
        }
    }
    findings
}

/// Aggregated results of every audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn run(composite: &CompositeStylesheet, catalog: &TokenCatalog) -> Self {
        let mut findings = composition_order(composite);
        findings.extend(token_purity(composite.rules(), catalog));
        findings.extend(
            variant_conflicts(composite.rules())
                .into_iter()
                .map(Finding::VariantConflict),
        );
        Self { findings }
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.findings.is_empty() {
            return f.write_str("clean");
        }
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        Ok(())
    }
}
