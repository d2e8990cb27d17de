//! # stylecomp - scoped component style composition
//!
//! Builds the stylesheet of a web component from reusable partials,
//! component-local rules and a declarative table of variant axes, and
//! checks the result statically.
//!
//! - **Partials**: immutable, reusable rule blocks with a stable id
//! - **Composites**: partials in order, then local rules, built once per
//!   component definition and shared
//! - **Variants**: attribute- and class-driven selector rules generated
//!   from data, audited for specificity conflicts
//! - **Tokens**: design values referenced as `var(--name)` and resolved by
//!   the page theme at paint time
//! - **Assets**: bundled file URLs resolved once, relative to the module
//!
//! ## Quick Start
//!
//! ```rust
//! use stylecomp::asset::{BundleManifest, ModuleLocation};
//! use stylecomp::composite::CompositeBuilder;
//! use stylecomp::parser::cascade::ElementMeta;
//! use stylecomp::template::Template;
//! use stylecomp::variant::{VariantAxis, VariantDriver, VariantRule, VariantTable};
//!
//! let composite = CompositeBuilder::new("card", ModuleLocation::new("src/card.js"))
//!     .local(Template::new().text(".card { padding: 8px; }"))
//!     .variants(VariantTable::new().axis(VariantAxis::new("compact").case(
//!         VariantDriver::host_attribute("compact"),
//!         vec![VariantRule::new(".card").set("padding", "2px")],
//!     )))
//!     .build(&BundleManifest::default())
//!     .unwrap();
//!
//! let card = ElementMeta::new("div").with_class("card");
//! let host = ElementMeta::host("x-card").with_attr("compact", "");
//! assert_eq!(composite.compute(&card, &[host]).get("padding"), Some("2px"));
//! ```
//!
//! ## Selectors
//!
//! - Type, class, id and universal selectors
//! - Attributes: `[noborders]`, `[render-mode="reply"]`
//! - Shadow host: `:host`, `:host(.parent-post)`
//! - Pseudo-classes `:hover`, `:focus`, `:active`, `:disabled`; pseudo-elements `::before`
//! - Combinators: descendant, `>`, `+`, `~`
//! - Nesting with `&`
//!
//! ## Not Supported
//!
//! - At-rules (`@media`, `@keyframes`)
//! - Functional pseudo-classes other than `:host(...)`

pub mod asset;
pub mod audit;
pub mod composite;
pub mod error;
pub mod parser;
pub mod partial;
pub mod template;
pub mod theme;
pub mod variant;

pub use composite::{CompositeBuilder, CompositeStylesheet, ComponentDefinition, RuleOrigin};
pub use error::{Result, StyleError};
pub use parser::cascade::{ElementMeta, ElementStates};
pub use partial::PartialStylesheet;
pub use theme::{StyleToken, Theme, TokenEnvironment};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}
