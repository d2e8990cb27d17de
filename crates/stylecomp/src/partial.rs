//! Partial stylesheets.
//!
//! A partial is a reusable, independently meaningful block of rules
//! (buttons, inputs, tooltips) with a stable identity, its import path.
//! Partials are immutable once built and are usually declared with the
//! [`partial!`](crate::partial!) macro, which builds each one on first
//! access and keeps it for the life of the process.

use std::path::Path;

use crate::asset::{ModuleLocation, NoAssets};
use crate::error::Result;
use crate::parser::{Rule, StyleSheet, parse_stylesheet};
use crate::template::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialStylesheet {
    id: String,
    sheet: StyleSheet,
    css: String,
}

impl PartialStylesheet {
    /// Parses a partial from stylesheet source.
    pub fn parse(id: &str, source: &str) -> Result<Self> {
        let sheet = parse_stylesheet(source)?;
        let css = sheet.to_css();
        log::debug!("partial {id}: {} rules", sheet.rules.len());
        Ok(Self {
            id: id.to_string(),
            sheet,
            css,
        })
    }

    /// Builds a partial from a template that may embed other partials.
    ///
    /// Partials cannot reference bundled assets; an asset segment fails
    /// with [`StyleError::AssetNotFound`](crate::StyleError::AssetNotFound).
    pub fn from_template(id: &str, template: &Template<'_>) -> Result<Self> {
        let source = template.render(&ModuleLocation::new(id), &NoAssets)?;
        Self::parse(id, &source)
    }

    /// Reads and parses a partial from a file on disk.
    pub fn from_file(id: &str, path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(id, &source)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn rules(&self) -> &[Rule] {
        &self.sheet.rules
    }

    /// Canonical rule text, used when the partial is embedded.
    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Declares a lazily built partial.
///
/// The generated function returns the same `&'static` partial on every
/// call. A syntax error in the source is returned on each access instead of
/// panicking.
///
/// ```
/// stylecomp::partial! {
///     /// Badge styles.
///     pub fn badges() = ("styles/badges", ".badge { display: inline-block; }");
/// }
///
/// let first = badges().unwrap();
/// let second = badges().unwrap();
/// assert!(std::ptr::eq(first, second));
/// assert_eq!(first.id(), "styles/badges");
/// ```
#[macro_export]
macro_rules! partial {
    ($(#[$meta:meta])* $vis:vis fn $name:ident() = ($id:expr, $source:expr);) => {
        $(#[$meta])*
        $vis fn $name() -> $crate::Result<&'static $crate::partial::PartialStylesheet> {
            static CELL: $crate::__private::OnceCell<$crate::partial::PartialStylesheet> =
                $crate::__private::OnceCell::new();
            CELL.get_or_try_init(|| $crate::partial::PartialStylesheet::parse($id, $source))
        }
    };
}
