//! Build-time asset URL resolution.
//!
//! A stylesheet that needs a bundled image (a spinner, an icon) references
//! it relative to the stylesheet module's own location. The URL is resolved
//! once, while the composite is being built, and embedded as a literal in
//! the rule text, so the composed stylesheet is relocatable with its module
//! and never resolves anything per instance.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Result, StyleError};

/// Location of a stylesheet module inside the source tree, e.g.
/// `src/components/post/post-styles.js`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleLocation(String);

impl ModuleLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory segments containing the module.
    fn directory(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.0.split('/').filter(|s| !s.is_empty()).collect();
        segments.pop();
        segments
    }
}

impl fmt::Display for ModuleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The build pipeline's asset resolution, consumed once per asset
/// reference at composition time.
pub trait AssetPipeline {
    fn resolve_asset_url(&self, relative: &str, module: &ModuleLocation) -> Result<String>;
}

/// Joins `relative` onto the module's directory and normalises `.` and
/// `..` segments. Paths escaping the source root are rejected.
pub fn join_module_path(relative: &str, module: &ModuleLocation) -> Result<String> {
    let invalid = || StyleError::InvalidAssetPath {
        path: relative.to_string(),
        module: module.to_string(),
    };

    if relative.is_empty() || relative.starts_with('/') || relative.contains("://") {
        return Err(invalid());
    }

    let mut segments = module.directory();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop().ok_or_else(invalid)?;
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(invalid());
    }
    Ok(segments.join("/"))
}

/// The set of files the bundler emits, plus the public URL they are served
/// from.
#[derive(Debug, Clone, Default)]
pub struct BundleManifest {
    public_base: String,
    files: BTreeSet<String>,
}

impl BundleManifest {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into(),
            files: BTreeSet::new(),
        }
    }

    /// Builder method to register a bundled file by its source-tree path.
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }
}

impl AssetPipeline for BundleManifest {
    fn resolve_asset_url(&self, relative: &str, module: &ModuleLocation) -> Result<String> {
        let path = join_module_path(relative, module)?;
        if !self.contains(&path) {
            return Err(StyleError::AssetNotFound {
                path,
                module: module.to_string(),
            });
        }

        let url = format!("{}/{}", self.public_base.trim_end_matches('/'), path);
        log::debug!("resolved asset {relative} from {module} to {url}");
        Ok(url)
    }
}

/// Pipeline for templates that must not reference bundled files. Every
/// lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetPipeline for NoAssets {
    fn resolve_asset_url(&self, relative: &str, module: &ModuleLocation) -> Result<String> {
        Err(StyleError::AssetNotFound {
            path: relative.to_string(),
            module: module.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module() -> ModuleLocation {
        ModuleLocation::new("src/components/post/post-styles.js")
    }

    #[test]
    fn joins_relative_to_module_directory() {
        assert_eq!(
            join_module_path("../../img/spinner.gif", &module()).unwrap(),
            "src/img/spinner.gif"
        );
        assert_eq!(
            join_module_path("./arrow.svg", &module()).unwrap(),
            "src/components/post/arrow.svg"
        );
    }

    #[test]
    fn rejects_paths_escaping_the_root() {
        let err = join_module_path("../../../../etc/passwd", &module()).unwrap_err();
        assert!(matches!(err, StyleError::InvalidAssetPath { .. }));
        assert!(join_module_path("/abs.gif", &module()).is_err());
    }

    #[test]
    fn manifest_rejects_missing_assets() {
        let manifest = BundleManifest::new("https://cdn.example.test/static/");
        let err = manifest
            .resolve_asset_url("../../img/spinner.gif", &module())
            .unwrap_err();
        assert!(matches!(err, StyleError::AssetNotFound { .. }));

        let manifest = manifest.with_file("src/img/spinner.gif");
        assert_eq!(
            manifest
                .resolve_asset_url("../../img/spinner.gif", &module())
                .unwrap(),
            "https://cdn.example.test/static/src/img/spinner.gif"
        );
    }
}
