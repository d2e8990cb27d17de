//! Style modules for the feed UI.
//!
//! Shared partials (buttons, inputs, tooltips, spinner), the `<feed-post>`
//! composite with its variant axes, and the registry that hands composed
//! stylesheets to the custom-element runtime.
//!
//! ```
//! use feed_styles::assets::bundle_manifest;
//! use feed_styles::registry::{RecordingHost, Registry};
//!
//! let mut registry = Registry::new(RecordingHost::default());
//! let sheet = registry
//!     .define(feed_styles::post::definition(), &bundle_manifest("/static"))
//!     .unwrap();
//! assert!(sheet.css().contains("/static/feed-styles/assets/spinner.svg"));
//! ```

pub mod assets;
pub mod error;
pub mod log_init;
pub mod partials;
pub mod post;
pub mod registry;
pub mod tokens;

pub use error::{RegistryError, Result};
pub use registry::{Registry, StyleHost};

/// Every component definition in this crate.
pub fn definitions() -> [&'static stylecomp::ComponentDefinition; 1] {
    [post::definition()]
}

/// Defines every component on the registry's host.
pub fn define_all<H: StyleHost>(
    registry: &mut Registry<H>,
    assets: &dyn stylecomp::asset::AssetPipeline,
) -> Result<()> {
    for definition in definitions() {
        registry.define(definition, assets)?;
    }
    Ok(())
}
