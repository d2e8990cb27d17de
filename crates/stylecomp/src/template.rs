//! Stylesheet templates.
//!
//! A template is an ordered list of segments rendered into stylesheet
//! source: literal CSS text, embedded partials, and bundled asset URLs.
//! Embedding a partial reproduces its rules verbatim, in order, at the
//! embedding point.

use crate::asset::{AssetPipeline, ModuleLocation};
use crate::error::{Result, StyleError};
use crate::partial::PartialStylesheet;

#[derive(Debug, Clone)]
pub enum Segment<'a> {
    Text(&'a str),
    Partial(&'a PartialStylesheet),
    /// A bundled file, relative to the template's module. Renders as
    /// `url("<resolved>")`. A resolved URL that cannot sit inside the quotes
    /// unescaped is an [`StyleError::InvalidAssetPath`].
    Asset(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.segments.push(Segment::Text(text));
        self
    }

    pub fn partial(mut self, partial: &'a PartialStylesheet) -> Self {
        self.segments.push(Segment::Partial(partial));
        self
    }

    pub fn asset(mut self, relative: &'a str) -> Self {
        self.segments.push(Segment::Asset(relative));
        self
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the template to stylesheet source. Each asset segment is
    /// resolved exactly once per render.
    pub fn render(&self, module: &ModuleLocation, assets: &dyn AssetPipeline) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Partial(partial) => {
                    out.push('\n');
                    out.push_str(partial.css());
                    out.push('\n');
                }
                Segment::Asset(relative) => {
                    let url = assets.resolve_asset_url(relative, module)?;
                    if url.contains(['"', '\\', '\n', '\r']) {
                        return Err(StyleError::InvalidAssetPath {
                            path: url,
                            module: module.to_string(),
                        });
                    }
                    out.push_str(&format!("url(\"{url}\")"));
                }
            }
        }
        Ok(out)
    }
}
