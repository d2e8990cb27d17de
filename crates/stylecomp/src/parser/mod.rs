//! CSS parsing and stylesheet data structures.
//!
//! - [`parse_stylesheet`]: Main entry point for parsing stylesheet source
//! - [`StyleSheet`]: A complete, flattened stylesheet
//! - [`Rule`]: A rule with selectors and declarations
//! - [`Declaration`]: A property-value pair like `display: none`
//! - Selector types: [`Selector`], [`CompoundSelector`], [`ComplexSelector`]
//!
//! ## Submodules
//!
//! - [`cascade`]: Selector matching and cascaded values for an element
//! - [`selectors`]: Selector parsing (type, class, id, attributes, `:host`, combinators)
//! - [`stylesheet`]: Core data structures and their serialization
//! - [`values`]: Value scanning, token references and literal detection
//! - [`flatten`]: Nested rule flattening (`&` parent selector)
//! - [`shorthand`]: Shorthand families and their expansion
//!
//! ## Example
//!
//! ```rust
//! use stylecomp::parser::{parse_stylesheet, Selector};
//!
//! let stylesheet = parse_stylesheet(":host([nothumb]) .thumb { display: none; }").unwrap();
//! let rule = &stylesheet.rules[0];
//!
//! assert_eq!(
//!     rule.selectors.selectors[0].parts[1].compound.selectors[0],
//!     Selector::Class("thumb".to_string())
//! );
//! ```

pub mod cascade;
pub mod flatten;
pub mod selectors;
pub mod shorthand;
pub mod stylesheet;
pub mod values;

pub use crate::parser::flatten::{flatten_stylesheet, flatten_under};
pub use crate::parser::stylesheet::{
    Combinator, ComplexSelector, CompoundSelector, Declaration, Rule, RuleItem, Selector,
    SelectorList, SelectorPart, Specificity, StyleSheet, SubjectKey,
};

use crate::parser::selectors::parse_complex_selector;
use crate::parser::values::{parse_ident, scan_value};
use crate::StyleError;

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

/// Parses a full stylesheet: strips comments, parses rules and flattens
/// nesting.
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet, StyleError> {
    let clean_source = strip_comments(source);

    let (remaining, raw_rules) =
        many0(parse_rule)(&clean_source).map_err(|e| StyleError::InvalidSyntax(e.to_string()))?;

    if !remaining.trim().is_empty() {
        return Err(StyleError::InvalidSyntax(format!(
            "Unexpected tokens at end of stylesheet: {}",
            excerpt(remaining.trim())
        )));
    }

    Ok(flatten_stylesheet(raw_rules))
}

/// Parses a rule (e.g., ".post { display: grid; }"), possibly with nested rules.
pub fn parse_rule(input: &str) -> IResult<&str, Rule> {
    let (input, _) = multispace0(input)?;
    let (input, selectors) = parse_selector_list(input)?;
    let (input, _) = multispace0(input)?;

    let (input, items) = delimited(
        char('{'),
        parse_rule_items,
        preceded(multispace0, char('}')),
    )(input)?;

    Ok((input, Rule::new(selectors, items)))
}

/// Parses either a nested rule (&.unread { ... }) or a declaration (color: red)
fn parse_rule_items(input: &str) -> IResult<&str, Vec<RuleItem>> {
    many0(alt((
        map(parse_rule, RuleItem::NestedRule),
        map(parse_declaration, RuleItem::Declaration),
    )))(input)
}

/// Parses a comma-separated list of selectors (e.g., ".thumb, .arrow").
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_complex_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_complex_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

/// Parses multiple declarations inside a block.
pub fn parse_declarations(input: &str) -> IResult<&str, Vec<Declaration>> {
    many0(parse_declaration)(input)
}

/// Parses one `property: value [!important];` declaration.
pub fn parse_declaration(input: &str) -> IResult<&str, Declaration> {
    let (input, _) = multispace0(input)?;
    let (input, property) = parse_ident(input)?;
    let (input, _) = tuple((multispace0, char(':'), multispace0))(input)?;
    let (input, raw_value) = scan_value(input)?;

    let mut value = raw_value.trim();
    let mut important = false;
    if let Some(stripped) = value.strip_suffix("!important") {
        value = stripped.trim_end();
        important = true;
    }

    if value.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let (input, _) = multispace0(input)?;
    let (input, _) = opt(char(';'))(input)?;
    Ok((
        input,
        Declaration {
            property: property.to_string(),
            value: value.to_string(),
            important,
        },
    ))
}

/// Removes `/* ... */` comments. Comment markers inside quoted strings are
/// left alone.
pub fn strip_comments(source: &str) -> String {
    let mut clean_source = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            clean_source.push(c);
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
            clean_source.push(c);
            continue;
        }
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            while let Some(inner) = chars.next() {
                if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    break;
                }
            }
            continue;
        }
        clean_source.push(c);
    }

    clean_source
}

fn excerpt(input: &str) -> String {
    let line = input.lines().next().unwrap_or_default();
    if line.starts_with('@') {
        format!("{line} (at-rules are not supported)")
    } else {
        line.to_string()
    }
}
