//! Nested rule flattening.
//!
//! Partials may be authored with SCSS-style nesting, and the variant layer
//! uses the same mechanism to attach a rule to its axis condition.
//!
//! ```css
//! .post {
//!     display: grid;
//!     &.unread { background: var(--bg-color--unread); }
//!     .arrow { top: 14px; }
//! }
//! ```
//!
//! flattens to:
//!
//! ```css
//! .post { display: grid; }
//! .post.unread { background: var(--bg-color--unread); }
//! .post .arrow { top: 14px; }
//! ```
//!
//! - `&` is replaced by the parent selector
//! - `&.class` appends to the parent's last compound selector
//! - `& > child` creates a child combinator from the parent
//! - Nested without `&` implies a descendant combinator
//!
//! A parent rule's own declarations are emitted before its nested rules,
//! so source order inside a block is preserved as written.

use crate::parser::stylesheet::{
    Combinator, ComplexSelector, Rule, RuleItem, Selector, SelectorList, StyleSheet,
};

/// Flattens a list of potentially nested rules into a flat stylesheet.
pub fn flatten_stylesheet(raw_rules: Vec<Rule>) -> StyleSheet {
    let mut flat_rules = Vec::new();
    for rule in raw_rules {
        flatten_rule(&rule, &mut flat_rules);
    }
    StyleSheet { rules: flat_rules }
}

/// Flattens `rule` as if it were nested inside `parent`.
pub fn flatten_under(parent: &SelectorList, rule: &Rule) -> Vec<Rule> {
    let mut merged = rule.clone();
    merged.selectors = SelectorList::new(combine_selectors(
        &parent.selectors,
        &rule.selectors.selectors,
    ));
    let mut out = Vec::new();
    flatten_rule(&merged, &mut out);
    out
}

fn flatten_rule(rule: &Rule, output: &mut Vec<Rule>) {
    let current_decls: Vec<RuleItem> = rule
        .items
        .iter()
        .filter(|i| matches!(i, RuleItem::Declaration(_)))
        .cloned()
        .collect();

    if !current_decls.is_empty() {
        output.push(Rule {
            selectors: rule.selectors.clone(),
            items: current_decls,
        });
    }

    for item in &rule.items {
        if let RuleItem::NestedRule(nested) = item {
            let combined =
                combine_selectors(&rule.selectors.selectors, &nested.selectors.selectors);

            let mut merged = nested.clone();
            merged.selectors = SelectorList::new(combined);
            flatten_rule(&merged, output);
        }
    }
}

fn combine_selectors(
    parents: &[ComplexSelector],
    children: &[ComplexSelector],
) -> Vec<ComplexSelector> {
    let mut combined = Vec::new();
    for p in parents {
        for c in children {
            let mut p_parts = p.parts.clone();
            let c_parts = &c.parts;

            if let Some(first_c_part) = c_parts.first() {
                let has_parent_ref = first_c_part
                    .compound
                    .selectors
                    .iter()
                    .any(|s| matches!(s, Selector::Parent));

                if has_parent_ref {
                    // &.card: merge into the parent's last compound
                    if let Some(last_p_part) = p_parts.last_mut() {
                        for s in &first_c_part.compound.selectors {
                            if !matches!(s, Selector::Parent) {
                                last_p_part.compound.selectors.push(s.clone());
                            }
                        }
                        last_p_part.combinator = first_c_part.combinator;
                    }
                    p_parts.extend(c_parts.iter().skip(1).cloned());
                } else {
                    // .arrow: descendant of the parent
                    if let Some(last) = p_parts.last_mut() {
                        if matches!(last.combinator, Combinator::None) {
                            last.combinator = Combinator::Descendant;
                        }
                    }
                    p_parts.extend(c_parts.iter().cloned());
                }
            }
            combined.push(ComplexSelector::new(p_parts));
        }
    }
    combined
}
