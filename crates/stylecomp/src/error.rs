//! Error types for stylesheet parsing and composition.
//!
//! Every variant here is a build-time failure: they surface while a partial
//! or composite stylesheet is being constructed. Selector matching and
//! paint-time token resolution never fail.

use thiserror::Error;

/// Errors that can occur while parsing or composing stylesheets.
///
/// # Examples
///
/// ```rust
/// use stylecomp::parser::parse_stylesheet;
///
/// // Missing value after the colon
/// let result = parse_stylesheet(".post { color: }");
/// assert!(result.is_err());
/// ```
#[derive(Error, Debug)]
pub enum StyleError {
    /// Invalid CSS syntax was encountered during parsing.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("CSS syntax error: {0}")]
    InvalidSyntax(String),

    /// A referenced asset is not part of the bundle.
    #[error("asset `{path}` referenced from `{module}` does not exist in the bundle")]
    AssetNotFound { path: String, module: String },

    /// An asset path escapes the bundle root or is otherwise malformed.
    #[error("invalid asset path `{path}` referenced from `{module}`")]
    InvalidAssetPath { path: String, module: String },

    /// Two variant axes declare the same property on the same element at
    /// equal specificity with different values.
    #[error(
        "variant axes `{first}` and `{second}` both set `{property}` on `{subject}` at equal specificity"
    )]
    VariantConflict {
        first: String,
        second: String,
        property: String,
        subject: String,
    },

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StyleError>;
