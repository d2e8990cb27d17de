//! Value scanning for declarations.
//!
//! Declaration values are kept as verbatim text. This module provides the
//! scanners that find where a value ends and the helpers that look inside
//! it:
//!
//! - Identifiers: property names, type selectors, class names
//! - Value extent: balanced parentheses and quotes, ending at `;` or `}`
//! - Token references: `var(--name)` and `var(--name, fallback)`
//! - Literal detection: hex, `rgb()`/`rgba()`/`hsl()`/`hsla()` and named colors

use nom::{IResult, bytes::complete::take_while1};
use phf::phf_set;

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
///
/// Identifiers are used for property names, type selectors, class names, etc.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Consumes a declaration value up to (not including) the terminating `;`
/// or `}`. Separators inside parentheses or quotes do not terminate the
/// value, so `url("a;b")` survives intact.
pub fn scan_value(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';' | '}') if depth == 0 => {
                if i == 0 {
                    return Err(nom::Err::Error(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::TakeUntil,
                    )));
                }
                return Ok((&input[i..], &input[..i]));
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}

/// A `var(--name[, fallback])` reference found inside a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenReference {
    /// Token name without the leading `--`.
    pub name: String,
    pub fallback: Option<String>,
    /// Byte range of the whole `var(...)` expression in the value.
    pub span: std::ops::Range<usize>,
}

/// Finds every top-level `var(...)` reference in a value, in order.
pub fn token_references(value: &str) -> Vec<TokenReference> {
    let mut refs = Vec::new();
    for (start, end) in function_spans(value, "var") {
        let inner = &value[start + "var(".len()..end - 1];
        let (name, fallback) = match split_top_level_comma(inner) {
            Some((name, fallback)) => (name.trim(), Some(fallback.trim().to_string())),
            None => (inner.trim(), None),
        };
        let name = name.trim_start_matches("--").to_string();
        refs.push(TokenReference {
            name,
            fallback,
            span: start..end,
        });
    }
    refs
}

/// Returns the value with every `var(...)` and `url(...)` expression
/// removed. What remains is the part of the value that is written as
/// literals.
pub fn strip_resolution_boundaries(value: &str) -> String {
    let mut spans: Vec<(usize, usize)> = function_spans(value, "var");
    spans.extend(function_spans(value, "url"));
    spans.sort_unstable();

    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;
    for (start, end) in spans {
        if start < cursor {
            continue;
        }
        out.push_str(&value[cursor..start]);
        out.push(' ');
        cursor = end;
    }
    out.push_str(&value[cursor..]);
    out
}

/// Byte spans `(start, end)` of every top-level `name(...)` call, where
/// `end` is one past the closing parenthesis. Unbalanced calls are ignored.
fn function_spans(value: &str, name: &str) -> Vec<(usize, usize)> {
    let needle = format!("{name}(");
    let bytes = value.as_bytes();
    let mut spans = Vec::new();
    let mut search = 0;

    while let Some(found) = value[search..].find(&needle) {
        let start = search + found;
        let boundary = start == 0 || !is_ident_byte(bytes[start - 1]);
        if !boundary {
            search = start + needle.len();
            continue;
        }

        let mut depth = 0usize;
        let mut end = None;
        for (i, c) in value[start + name.len()..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(start + name.len() + i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        match end {
            Some(end) => {
                spans.push((start, end));
                search = end;
            }
            None => break,
        }
    }
    spans
}

/// Splits a value on whitespace outside parentheses and quotes:
/// `0 0 calc(1px + 2px)` has three components.
pub fn split_top_level_whitespace(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start: Option<usize> = None;

    for (i, c) in value.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        parts.push(&value[s..]);
    }
    parts
}

fn split_top_level_comma(input: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some((&input[..i], &input[i + 1..])),
            _ => {}
        }
    }
    None
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

static NAMED_COLORS: phf::Set<&'static str> = phf_set! {
    "black", "white", "red", "green", "blue", "yellow", "orange", "purple",
    "pink", "gray", "grey", "silver", "maroon", "navy", "teal", "olive",
    "lime", "aqua", "cyan", "magenta", "fuchsia", "brown", "gold", "indigo",
    "violet", "crimson", "coral", "salmon", "tomato", "khaki", "beige",
    "ivory", "lavender", "plum", "orchid", "tan", "chocolate", "firebrick",
    "darkgray", "darkgrey", "lightgray", "lightgrey", "dimgray", "dimgrey",
    "whitesmoke", "gainsboro", "aliceblue", "steelblue", "skyblue",
};

/// Lists the literal colors written in a value, ignoring anything inside
/// `var(...)` or `url(...)`.
///
/// `transparent`, `currentColor` and `inherit` are keywords rather than
/// design values and are never reported.
pub fn color_literals(value: &str) -> Vec<String> {
    let stripped = strip_resolution_boundaries(value);
    let mut found = Vec::new();

    for func in ["rgba", "rgb", "hsla", "hsl"] {
        for (start, end) in function_spans(&stripped, func) {
            found.push(stripped[start..end].to_string());
        }
    }

    for word in stripped.split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')') {
        if is_hex_color(word) || NAMED_COLORS.contains(word.to_ascii_lowercase().as_str()) {
            found.push(word.to_string());
        }
    }
    found
}

fn is_hex_color(word: &str) -> bool {
    match word.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Returns true when the value is a single CSS length or percentage
/// (`10px`, `1.5em`, `-4px`, `50%`).
pub fn is_length(value: &str) -> bool {
    let value = value.trim();
    let digits_end = value
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(value.len());

    if digits_end == 0 || value[..digits_end].parse::<f64>().is_err() {
        return false;
    }
    matches!(
        &value[digits_end..],
        "px" | "em" | "rem" | "%" | "vw" | "vh" | "ch" | "pt"
    )
}
