//! Files bundled with the style modules.

use stylecomp::asset::BundleManifest;

/// Source-tree paths of every file the bundler emits for these modules.
pub const BUNDLED: &[&str] = &["feed-styles/assets/spinner.svg"];

/// A manifest of the bundled files, served from `public_base`.
pub fn bundle_manifest(public_base: &str) -> BundleManifest {
    BUNDLED
        .iter()
        .fold(BundleManifest::new(public_base), |manifest, path| {
            manifest.with_file(*path)
        })
}
