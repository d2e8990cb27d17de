//! Scoped style composition for the feed UI.
//!
//! Re-exports the composition engine ([`stylecomp`]) and the application's
//! style modules ([`feed_styles`]), and wires them to a host runtime.
//!
//! ```
//! use feedstyle::feed_styles::assets::bundle_manifest;
//! use feedstyle::feed_styles::registry::RecordingHost;
//!
//! let registry = feedstyle::install(RecordingHost::default(), &bundle_manifest("/static"), None)
//!     .unwrap();
//! assert_eq!(registry.host().attached.len(), 1);
//! ```

pub mod error;

pub use error::{FeedStyleError, Result};
pub use feed_styles;
pub use stylecomp;

use feed_styles::{Registry, StyleHost};
use stylecomp::asset::AssetPipeline;
use stylecomp::audit::AuditReport;
use stylecomp::theme::{Theme, TokenCatalog};

/// Optionally routes logging to `log_path`, then defines every component on
/// `host`.
pub fn install<H: StyleHost>(
    host: H,
    assets: &dyn AssetPipeline,
    log_path: Option<&str>,
) -> Result<Registry<H>> {
    if let Some(path) = log_path {
        feed_styles::log_init::init_logger(path)?;
    }

    let mut registry = Registry::new(host);
    feed_styles::define_all(&mut registry, assets)?;
    Ok(registry)
}

/// Audits every component's stylesheet against the tokens of `theme`.
pub fn audit(
    assets: &dyn AssetPipeline,
    theme: &Theme,
) -> Result<Vec<(&'static str, AuditReport)>> {
    let catalog = TokenCatalog::from_theme(theme);
    feed_styles::definitions()
        .into_iter()
        .map(|definition| {
            let sheet = definition.stylesheet(assets)?;
            Ok((definition.id(), AuditReport::run(&sheet, &catalog)))
        })
        .collect()
}
