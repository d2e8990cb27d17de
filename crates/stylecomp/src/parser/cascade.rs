//! Selector matching and the cascade.
//!
//! This module answers "which rules of a stylesheet apply to this element,
//! and which declaration wins for each property":
//!
//! - [`compute_style`]: cascaded declarations for one element
//! - [`matched_rules`]: the rules whose selectors match, in source order
//! - [`ElementMeta`]: element metadata for selector matching
//! - [`ElementStates`]: bitflags for pseudo-class states
//!
//! ## Cascade Algorithm
//!
//! 1. Find all rules with a selector matching the element
//! 2. Order declarations by importance, then specificity, then source order
//! 3. Apply in order, later declarations overriding earlier ones. A
//!    shorthand resets the longhands it covers and, when its value can be
//!    split, sets them from its components
//!
//! Token references are left untouched; see [`crate::theme::paint`].
//!
//! ## Shadow scoping
//!
//! Component stylesheets are scoped to a shadow tree. Plain selectors never
//! match the shadow host, and `:host(...)` only matches the host. The host
//! is passed as the outermost entry of the ancestor chain.

use bitflags::bitflags;
use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::parser::shorthand;
use crate::parser::{
    Combinator, ComplexSelector, CompoundSelector, Rule, Selector, SelectorPart, Specificity,
    StyleSheet,
};

bitflags! {
    /// Bitflags representing element pseudo-class states.
    ///
    /// # Example
    ///
    /// ```
    /// use stylecomp::parser::cascade::ElementStates;
    ///
    /// let mut states = ElementStates::empty();
    /// states |= ElementStates::HOVER;
    ///
    /// assert!(states.contains(ElementStates::HOVER));
    /// assert!(!states.contains(ElementStates::FOCUS));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementStates: u16 {
        /// Element has keyboard focus
        const FOCUS    = 0b0000_0001;
        /// Pointer is over the element
        const HOVER    = 0b0000_0010;
        /// Element is being pressed
        const ACTIVE   = 0b0000_0100;
        /// Element is disabled
        const DISABLED = 0b0000_1000;
    }
}

/// Metadata about an element used for selector matching.
#[derive(Clone, Debug, Default)]
pub struct ElementMeta {
    /// Tag name, e.g. `div` or `feed-post`.
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub states: ElementStates,
    /// True for the shadow host of the component being styled.
    pub is_host: bool,
}

impl ElementMeta {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    /// Creates a shadow host element.
    pub fn host(tag: &'static str) -> Self {
        Self {
            tag,
            is_host: true,
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets an attribute. Boolean attributes use an empty value.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_state(mut self, state: ElementStates) -> Self {
        self.states |= state;
        self
    }

    /// Checks if this element matches a simple selector.
    pub fn matches_selector(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Type(name) => self.tag.eq_ignore_ascii_case(name),
            Selector::Id(id) => self.id.as_ref() == Some(id),
            Selector::Class(class) => self.classes.contains(class),
            Selector::Universal => true,
            Selector::PseudoClass(name) => match name.as_str() {
                "focus" => self.states.contains(ElementStates::FOCUS),
                "hover" => self.states.contains(ElementStates::HOVER),
                "active" => self.states.contains(ElementStates::ACTIVE),
                "disabled" => self.states.contains(ElementStates::DISABLED),
                _ => false,
            },
            Selector::Attribute(name, None) => self.attributes.contains_key(name),
            Selector::Attribute(name, Some(value)) => self.attributes.get(name) == Some(value),
            Selector::Host(arg) => {
                self.is_host
                    && arg
                        .as_ref()
                        .is_none_or(|c| c.selectors.iter().all(|s| self.matches_selector(s)))
            }
            // Pseudo-elements style generated boxes, never the element itself
            Selector::PseudoElement(_) => false,
            Selector::Parent => false, // Handled by the nesting flattener
        }
    }

    /// Checks a compound selector, honouring shadow scoping.
    pub fn matches_compound(&self, compound: &CompoundSelector) -> bool {
        let targets_host = compound
            .selectors
            .iter()
            .any(|s| matches!(s, Selector::Host(_)));
        if targets_host != self.is_host {
            return false;
        }
        compound.selectors.iter().all(|s| self.matches_selector(s))
    }

    /// Checks if this element matches a complex selector given its ancestors.
    /// Ancestors are ordered from immediate parent to the shadow host.
    pub fn matches_complex(&self, complex: &ComplexSelector, ancestors: &[ElementMeta]) -> bool {
        let Some((subject, rest)) = complex.parts.split_last() else {
            return false;
        };
        self.matches_compound(&subject.compound) && match_ancestors(rest, ancestors)
    }
}

fn match_ancestors(parts: &[SelectorPart], ancestors: &[ElementMeta]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };

    match last.combinator {
        Combinator::Child => ancestors.first().is_some_and(|parent| {
            parent.matches_compound(&last.compound) && match_ancestors(rest, &ancestors[1..])
        }),
        Combinator::Descendant | Combinator::None => {
            (0..ancestors.len()).any(|i| {
                ancestors[i].matches_compound(&last.compound)
                    && match_ancestors(rest, &ancestors[i + 1..])
            })
        }
        // Siblings are not part of the ancestor chain
        Combinator::AdjacentSibling | Combinator::GeneralSibling => false,
    }
}

/// A rule that matched an element, bundled with its priority information.
#[derive(Debug, Clone, Copy)]
pub struct MatchedRule<'a> {
    /// Highest specificity among the rule's matching selectors.
    pub specificity: Specificity,
    pub source_order: usize,
    pub rule: &'a Rule,
}

/// Finds the rules whose selector list matches the element, in source order.
pub fn matched_rules<'a>(
    element: &ElementMeta,
    ancestors: &[ElementMeta],
    stylesheet: &'a StyleSheet,
) -> Vec<MatchedRule<'a>> {
    stylesheet
        .rules
        .iter()
        .enumerate()
        .filter_map(|(idx, rule)| {
            rule.selectors
                .selectors
                .iter()
                .filter(|complex| element.matches_complex(complex, ancestors))
                .map(|complex| complex.specificity())
                .max()
                .map(|specificity| MatchedRule {
                    specificity,
                    source_order: idx,
                    rule,
                })
        })
        .collect()
}

/// The winning declaration for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadedValue {
    pub value: String,
    pub important: bool,
    pub specificity: Specificity,
    /// Index of the rule the value came from.
    pub source_order: usize,
}

/// Cascaded declarations for one element, keyed by property name.
///
/// A shorthand is kept under its own name next to the longhands it set, so
/// `margin` and `margin-left` can both be read. Longhands of a shorthand
/// whose value holds a token reference are absent until paint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadedStyle {
    pub properties: IndexMap<String, CascadedValue>,
}

impl CascadedStyle {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(|v| v.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// The core cascade function.
pub fn compute_style(
    element: &ElementMeta,
    ancestors: &[ElementMeta],
    stylesheet: &StyleSheet,
) -> CascadedStyle {
    let matched = matched_rules(element, ancestors, stylesheet);

    let mut candidates = Vec::new();
    for m in &matched {
        for (decl_idx, decl) in m.rule.declarations().into_iter().enumerate() {
            candidates.push(((decl.important, m.specificity, m.source_order, decl_idx), decl, m));
        }
    }

    // Importance, then specificity, then source order: later entries win
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut computed = CascadedStyle::default();
    for (_, decl, m) in candidates {
        let cascaded = |value: String| CascadedValue {
            value,
            important: decl.important,
            specificity: m.specificity,
            source_order: m.source_order,
        };
        for longhand in shorthand::covered_longhands(&decl.property) {
            computed.properties.shift_remove(longhand);
        }
        if let Some(longhands) = shorthand::expand(&decl.property, &decl.value) {
            for (longhand, value) in longhands {
                computed.properties.insert(longhand.to_string(), cascaded(value));
            }
        }
        computed
            .properties
            .insert(decl.property.clone(), cascaded(decl.value.clone()));
    }

    log::trace!(
        "cascade for <{}>: {} rules matched, {} properties",
        element.tag,
        matched.len(),
        computed.properties.len()
    );
    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_stylesheet;

    #[test]
    fn test_host_attribute_rule_overrides_base_rule() {
        let css = r#"
.thumb {
    top: 10px;
}

:host([in-community]) .thumb {
    top: 26px;
}
"#;

        let stylesheet = parse_stylesheet(css).expect("Failed to parse CSS");
        let host = ElementMeta::host("feed-post").with_attr("in-community", "");
        let post = ElementMeta::new("div").with_class("post");
        let thumb = ElementMeta::new("img").with_class("thumb");

        let style = compute_style(&thumb, &[post.clone(), host], &stylesheet);
        assert_eq!(style.get("top"), Some("26px"));

        let bare_host = ElementMeta::host("feed-post");
        let style = compute_style(&thumb, &[post, bare_host], &stylesheet);
        assert_eq!(style.get("top"), Some("10px"));
    }

    #[test]
    fn test_shorthand_sets_its_longhands() {
        let css = r#"
.composer {
    margin: 0 12px 8px;
}

:host([noborders]) .composer {
    margin-left: -34px;
}

.post {
    border: 1px solid #ccc;
}

:host([noborders]) .post {
    border: none;
}
"#;
        let stylesheet = parse_stylesheet(css).unwrap();
        let composer = ElementMeta::new("div").with_class("composer");
        let post = ElementMeta::new("div").with_class("post");

        let bare = [ElementMeta::host("feed-post")];
        let style = compute_style(&composer, &bare, &stylesheet);
        assert_eq!(style.get("margin-left"), Some("12px"));
        assert_eq!(style.get("margin-bottom"), Some("8px"));
        assert_eq!(compute_style(&post, &bare, &stylesheet).get("border-top"), Some("1px solid #ccc"));

        let noborders = [ElementMeta::host("feed-post").with_attr("noborders", "")];
        let style = compute_style(&composer, &noborders, &stylesheet);
        assert_eq!(style.get("margin"), Some("0 12px 8px"));
        assert_eq!(style.get("margin-left"), Some("-34px"));
        assert_eq!(style.get("margin-right"), Some("12px"));
        let style = compute_style(&post, &noborders, &stylesheet);
        assert_eq!(style.get("border-top"), Some("none"));
        assert_eq!(style.get("border-left"), Some("none"));
    }

    #[test]
    fn test_winning_shorthand_resets_earlier_longhands() {
        let css = ".post { padding-left: 20px; border-top-color: red; } .post.card { padding: 4px; border: 0 solid var(--x); }";
        let stylesheet = parse_stylesheet(css).unwrap();
        let post = ElementMeta::new("div").with_class("post").with_class("card");
        let style = compute_style(&post, &[], &stylesheet);

        assert_eq!(style.get("padding-left"), Some("4px"));
        assert_eq!(style.get("border"), Some("0 solid var(--x)"));
        // token values are not split
        assert_eq!(style.get("border-top"), None);
        assert_eq!(style.get("border-top-color"), None);
    }

    #[test]
    fn test_plain_selectors_never_match_host() {
        let stylesheet = parse_stylesheet("feed-post { display: none; }").unwrap();
        let host = ElementMeta::host("feed-post");
        assert!(compute_style(&host, &[], &stylesheet).is_empty());
    }

    #[test]
    fn test_important_beats_specificity() {
        let css = ".post.card { margin: 0; } .post { margin: 4px !important; }";
        let stylesheet = parse_stylesheet(css).unwrap();
        let post = ElementMeta::new("div").with_class("post").with_class("card");
        let style = compute_style(&post, &[], &stylesheet);
        assert_eq!(style.get("margin"), Some("4px"));
    }

    #[test]
    fn test_child_combinator_requires_direct_parent() {
        let stylesheet = parse_stylesheet(".post > .thumb { top: 1px; }").unwrap();
        let thumb = ElementMeta::new("img").with_class("thumb");
        let wrapper = ElementMeta::new("div").with_class("wrapper");
        let post = ElementMeta::new("div").with_class("post");

        assert!(compute_style(&thumb, &[post.clone()], &stylesheet).get("top").is_some());
        assert!(compute_style(&thumb, &[wrapper, post], &stylesheet).get("top").is_none());
    }
}
