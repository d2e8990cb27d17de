//! Style tokens and the token environment.
//!
//! Stylesheets never contain resolved design values. They reference tokens
//! symbolically as CSS custom properties, `var(--text-color--default)`, and
//! the page's active [`Theme`] supplies the values when the browser paints.
//!
//! ## Standard Tokens
//!
//! | Token                     | Role                                  |
//! |---------------------------|---------------------------------------|
//! | `text-color--default`     | Body text                             |
//! | `text-color--pale`        | Secondary text, timestamps            |
//! | `bg-color--default`       | Card background                       |
//! | `bg-color--unread`        | Highlight for unread posts            |
//! | `border-color--default`   | Card border and arrow                 |
//! | `border-color--unread`    | Arrow border on unread posts          |
//! | `halo-color--unread`      | Outward glow around unread cards      |
//! | `accent-color`            | Buttons and links                     |
//! | `accent-text-color`       | Text drawn on the accent color        |
//! | `tooltip-bg-color`        | Tooltip background                    |
//! | `tooltip-text-color`      | Tooltip text                          |
//! | `shadow-color`            | Drop shadows                          |
//! | `post-gap`                | Space between feed cards              |
//! | `post-gap--tight`         | Space between highlighted cards       |
//!
//! Switching the page theme repaints every component consistently because
//! nothing downstream has captured a resolved value.

use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;

use crate::parser::cascade::CascadedStyle;
use crate::parser::values::{color_literals, is_length, token_references};

/// A named symbolic reference to a design value.
///
/// Displays as the `var(...)` expression used in stylesheet text.
///
/// ```
/// use stylecomp::theme::StyleToken;
///
/// let token = StyleToken::new("bg-color--unread");
/// assert_eq!(token.to_string(), "var(--bg-color--unread)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleToken(&'static str);

impl StyleToken {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var(--{})", self.0)
    }
}

/// Read-only token resolution supplied by the surrounding page.
pub trait TokenEnvironment {
    /// Resolves a token name (without the leading `--`) to a value.
    fn resolve(&self, name: &str) -> Option<&str>;
}

/// A named set of token values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    pub tokens: IndexMap<String, String>,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new(name: &str, dark: bool) -> Self {
        Self {
            name: name.to_string(),
            dark,
            tokens: IndexMap::new(),
        }
    }

    /// Builder method to set one token.
    pub fn with_token(mut self, name: &str, value: &str) -> Self {
        self.tokens.insert(name.to_string(), value.to_string());
        self
    }

    pub fn light() -> Self {
        Self::new("light", false)
            .with_token("text-color--default", "#1c1c1c")
            .with_token("text-color--pale", "#7c7c7c")
            .with_token("bg-color--default", "#ffffff")
            .with_token("bg-color--unread", "#fff8e1")
            .with_token("border-color--default", "#d6d6d6")
            .with_token("border-color--unread", "#f5c26b")
            .with_token("halo-color--unread", "rgba(245, 194, 107, 0.45)")
            .with_token("accent-color", "#2f6fde")
            .with_token("accent-text-color", "#ffffff")
            .with_token("tooltip-bg-color", "#2b2b2b")
            .with_token("tooltip-text-color", "#f2f2f2")
            .with_token("shadow-color", "rgba(0, 0, 0, 0.18)")
            .with_token("post-gap", "10px")
            .with_token("post-gap--tight", "6px")
    }

    pub fn dark() -> Self {
        Self::new("dark", true)
            .with_token("text-color--default", "#e4e4e4")
            .with_token("text-color--pale", "#9a9a9a")
            .with_token("bg-color--default", "#1b1b1b")
            .with_token("bg-color--unread", "#2a2416")
            .with_token("border-color--default", "#3a3a3a")
            .with_token("border-color--unread", "#b8862e")
            .with_token("halo-color--unread", "rgba(184, 134, 46, 0.5)")
            .with_token("accent-color", "#5b92f0")
            .with_token("accent-text-color", "#0d0d0d")
            .with_token("tooltip-bg-color", "#e6e6e6")
            .with_token("tooltip-text-color", "#141414")
            .with_token("shadow-color", "rgba(0, 0, 0, 0.6)")
            .with_token("post-gap", "10px")
            .with_token("post-gap--tight", "6px")
    }

    /// Returns the built-in themes keyed by name.
    pub fn standard_themes() -> BTreeMap<String, Theme> {
        [Self::light(), Self::dark()]
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect()
    }

    /// The page-level `:root` block declaring every token as a custom
    /// property.
    pub fn to_css(&self) -> String {
        let mut out = String::from(":root {\n");
        for (name, value) in &self.tokens {
            out.push_str(&format!("  --{name}: {value};\n"));
        }
        out.push_str("}\n");
        out
    }
}

impl TokenEnvironment for Theme {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }
}

/// Substitutes every `var(--name[, fallback])` in `value`.
///
/// Resolution order is the environment, then the fallback (itself painted),
/// then `unset`. Painting never fails: an unresolvable token degrades the
/// same way a browser would.
pub fn paint(value: &str, env: &dyn TokenEnvironment) -> String {
    let refs = token_references(value);
    if refs.is_empty() {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;
    for r in refs {
        out.push_str(&value[cursor..r.span.start]);
        match (env.resolve(&r.name), &r.fallback) {
            (Some(resolved), _) => out.push_str(resolved),
            (None, Some(fallback)) => out.push_str(&paint(fallback, env)),
            (None, None) => {
                log::warn!("token `--{}` is not defined by the active theme", r.name);
                out.push_str("unset");
            }
        }
        cursor = r.span.end;
    }
    out.push_str(&value[cursor..]);
    out
}

/// Paints every cascaded property of an element.
pub fn paint_style(style: &CascadedStyle, env: &dyn TokenEnvironment) -> IndexMap<String, String> {
    style
        .properties
        .iter()
        .map(|(property, cascaded)| (property.clone(), paint(&cascaded.value, env)))
        .collect()
}

/// The role a token plays, derived from its reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Color,
    Spacing,
    Other,
}

/// Token roles derived from a reference theme, used by the token purity
/// audit to decide which literals should have been tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    roles: IndexMap<String, (TokenRole, String)>,
}

impl TokenCatalog {
    pub fn from_theme(theme: &Theme) -> Self {
        let roles = theme
            .tokens
            .iter()
            .map(|(name, value)| {
                let role = if !color_literals(value).is_empty() {
                    TokenRole::Color
                } else if is_length(value) {
                    TokenRole::Spacing
                } else {
                    TokenRole::Other
                };
                (name.clone(), (role, value.clone()))
            })
            .collect();
        Self { roles }
    }

    pub fn role(&self, name: &str) -> Option<TokenRole> {
        self.roles.get(name).map(|(role, _)| *role)
    }

    pub fn has_color_tokens(&self) -> bool {
        self.roles.values().any(|(role, _)| *role == TokenRole::Color)
    }

    /// Returns the spacing token whose reference value equals `literal`.
    pub fn spacing_token_for(&self, literal: &str) -> Option<&str> {
        self.roles
            .iter()
            .find(|(_, (role, value))| *role == TokenRole::Spacing && value == literal)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_resolves_tokens_in_place() {
        let theme = Theme::light();
        assert_eq!(
            paint("1px solid var(--border-color--default)", &theme),
            "1px solid #d6d6d6"
        );
    }

    #[test]
    fn paint_falls_back_then_unsets() {
        let theme = Theme::new("empty", false).with_token("accent-color", "#000");
        assert_eq!(paint("var(--missing, var(--accent-color))", &theme), "#000");
        assert_eq!(paint("var(--missing)", &theme), "unset");
    }

    #[test]
    fn theme_switch_repaints_same_value_text() {
        let value = "var(--bg-color--unread)";
        assert_ne!(paint(value, &Theme::light()), paint(value, &Theme::dark()));
    }

    #[test]
    fn catalog_classifies_roles() {
        let catalog = TokenCatalog::from_theme(&Theme::light());
        assert_eq!(catalog.role("accent-color"), Some(TokenRole::Color));
        assert_eq!(catalog.role("halo-color--unread"), Some(TokenRole::Color));
        assert_eq!(catalog.role("post-gap"), Some(TokenRole::Spacing));
        assert_eq!(catalog.spacing_token_for("6px"), Some("post-gap--tight"));
        assert_eq!(catalog.spacing_token_for("7px"), None);
    }

    #[test]
    fn to_css_declares_custom_properties() {
        let theme = Theme::new("t", false).with_token("post-gap", "10px");
        assert_eq!(theme.to_css(), ":root {\n  --post-gap: 10px;\n}\n");
    }
}
