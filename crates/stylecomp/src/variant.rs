//! The variant selector layer.
//!
//! A variant axis is an independent dimension of presentation (read state,
//! nesting, chrome density, ...) selected by an attribute or class on a
//! component instance. Axes are declared as data: each case names the
//! driver that activates it and the rules that apply while it is active.
//! Rule selectors are written relative to the driver's condition, with the
//! same nesting semantics as `&` in a stylesheet:
//!
//! ```
//! use stylecomp::variant::{VariantAxis, VariantDriver, VariantRule};
//!
//! let axis = VariantAxis::new("thumbnail-presence").case(
//!     VariantDriver::host_attribute("nothumb"),
//!     vec![
//!         VariantRule::new(".post").set("display", "block"),
//!         VariantRule::new(".thumb, .arrow").set("display", "none"),
//!     ],
//! );
//!
//! let rules = axis.compile().unwrap();
//! assert_eq!(
//!     rules[1].rule.selectors.to_string(),
//!     ":host([nothumb]) .thumb, :host([nothumb]) .arrow"
//! );
//! ```
//!
//! There is no state kept between evaluations: which rules apply is a pure
//! function of the instance's current attributes and classes, and an
//! unrecognised value simply activates nothing.

use std::fmt;

use crate::error::{Result, StyleError};
use crate::parser::{
    Declaration, Rule, RuleItem, SelectorList, flatten_under, parse_selector_list,
};

/// What activates a variant case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantDriver {
    /// `:host([name])` or `:host([name="value"])`.
    HostAttribute {
        name: &'static str,
        value: Option<&'static str>,
    },
    /// `:host(.class)`.
    HostClass(&'static str),
    /// A class toggled on an element inside the component, `.post.unread`.
    ElementClass {
        element: &'static str,
        class: &'static str,
    },
}

impl VariantDriver {
    pub fn host_attribute(name: &'static str) -> Self {
        VariantDriver::HostAttribute { name, value: None }
    }

    pub fn host_attribute_value(name: &'static str, value: &'static str) -> Self {
        VariantDriver::HostAttribute {
            name,
            value: Some(value),
        }
    }

    pub fn host_class(class: &'static str) -> Self {
        VariantDriver::HostClass(class)
    }

    pub fn element_class(element: &'static str, class: &'static str) -> Self {
        VariantDriver::ElementClass { element, class }
    }

    /// The selector the case's rules are nested under.
    pub fn condition(&self) -> String {
        match self {
            VariantDriver::HostAttribute { name, value: None } => format!(":host([{name}])"),
            VariantDriver::HostAttribute {
                name,
                value: Some(value),
            } => format!(":host([{name}=\"{value}\"])"),
            VariantDriver::HostClass(class) => format!(":host(.{class})"),
            VariantDriver::ElementClass { element, class } => format!(".{element}.{class}"),
        }
    }
}

impl fmt::Display for VariantDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantDriver::HostAttribute { name, value: None } => {
                write!(f, "host attribute `{name}`")
            }
            VariantDriver::HostAttribute {
                name,
                value: Some(value),
            } => write!(f, "host attribute `{name}=\"{value}\"`"),
            VariantDriver::HostClass(class) => write!(f, "host class `{class}`"),
            VariantDriver::ElementClass { element, class } => {
                write!(f, "class `{class}` on `.{element}`")
            }
        }
    }
}

/// One selector and the declarations it sets while its case is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRule {
    pub selector: &'static str,
    pub declarations: Vec<Declaration>,
}

impl VariantRule {
    pub fn new(selector: &'static str) -> Self {
        Self {
            selector,
            declarations: Vec::new(),
        }
    }

    /// Adds a declaration. Values may be plain text or a
    /// [`StyleToken`](crate::theme::StyleToken).
    pub fn set(mut self, property: &str, value: impl fmt::Display) -> Self {
        self.declarations
            .push(Declaration::new(property, value.to_string()));
        self
    }

    /// Adds an `!important` declaration, for the rare rule that has to win
    /// over a partial regardless of specificity.
    pub fn set_important(mut self, property: &str, value: impl fmt::Display) -> Self {
        self.declarations
            .push(Declaration::new(property, value.to_string()).important());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCase {
    pub driver: VariantDriver,
    pub rules: Vec<VariantRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAxis {
    pub name: &'static str,
    pub cases: Vec<VariantCase>,
}

/// A flat rule generated from an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledVariantRule {
    pub axis: &'static str,
    pub driver: VariantDriver,
    pub rule: Rule,
}

impl VariantAxis {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, driver: VariantDriver, rules: Vec<VariantRule>) -> Self {
        self.cases.push(VariantCase { driver, rules });
        self
    }

    /// Generates the flat rules for every case, in declaration order.
    pub fn compile(&self) -> Result<Vec<CompiledVariantRule>> {
        let mut out = Vec::new();
        for case in &self.cases {
            let condition = parse_full_selector_list(&case.driver.condition())?;
            for variant_rule in &case.rules {
                let selectors = parse_full_selector_list(variant_rule.selector)?;
                let items = variant_rule
                    .declarations
                    .iter()
                    .cloned()
                    .map(RuleItem::Declaration)
                    .collect();
                let relative = Rule::new(selectors, items);

                for rule in flatten_under(&condition, &relative) {
                    out.push(CompiledVariantRule {
                        axis: self.name,
                        driver: case.driver,
                        rule,
                    });
                }
            }
        }
        Ok(out)
    }
}

/// The declared axes of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTable {
    axes: Vec<VariantAxis>,
}

impl VariantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, axis: VariantAxis) -> Self {
        self.axes.push(axis);
        self
    }

    pub fn axes(&self) -> &[VariantAxis] {
        &self.axes
    }

    pub fn compile(&self) -> Result<Vec<CompiledVariantRule>> {
        let mut out = Vec::new();
        for axis in &self.axes {
            out.extend(axis.compile()?);
        }
        Ok(out)
    }

    /// The attribute/class vocabulary callers set to select presentation,
    /// as `(axis, driver)` pairs.
    pub fn vocabulary(&self) -> Vec<(&'static str, VariantDriver)> {
        self.axes
            .iter()
            .flat_map(|axis| axis.cases.iter().map(move |case| (axis.name, case.driver)))
            .collect()
    }
}

fn parse_full_selector_list(source: &str) -> Result<SelectorList> {
    match parse_selector_list(source) {
        Ok((rest, list)) if rest.trim().is_empty() => Ok(list),
        Ok((rest, _)) => Err(StyleError::InvalidSyntax(format!(
            "unexpected `{rest}` in selector `{source}`"
        ))),
        Err(e) => Err(StyleError::InvalidSyntax(format!(
            "invalid selector `{source}`: {e}"
        ))),
    }
}
