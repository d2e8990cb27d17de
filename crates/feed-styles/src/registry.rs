//! Component definition against the host runtime.
//!
//! The custom-element runtime is outside this crate; it is reached through
//! [`StyleHost`], which receives each component's composite exactly once.

use std::collections::BTreeSet;
use std::sync::Arc;

use stylecomp::asset::AssetPipeline;
use stylecomp::{ComponentDefinition, CompositeStylesheet};

use crate::error::{RegistryError, Result};

/// The runtime that adopts composed stylesheets into component shadow roots.
pub trait StyleHost {
    fn attach_stylesheet(
        &mut self,
        definition_id: &str,
        sheet: Arc<CompositeStylesheet>,
    ) -> Result<()>;
}

/// Defines components on a host, attaching each stylesheet once.
#[derive(Debug)]
pub struct Registry<H: StyleHost> {
    host: H,
    defined: BTreeSet<&'static str>,
}

impl<H: StyleHost> Registry<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            defined: BTreeSet::new(),
        }
    }

    /// Composes (or reuses) the definition's stylesheet and attaches it to
    /// the host. Defining the same component again returns the shared
    /// stylesheet without attaching a second time.
    pub fn define(
        &mut self,
        definition: &'static ComponentDefinition,
        assets: &dyn AssetPipeline,
    ) -> Result<Arc<CompositeStylesheet>> {
        let id = definition.id();
        let sheet = definition
            .stylesheet(assets)
            .map_err(|source| RegistryError::Compose {
                definition: id.to_string(),
                source,
            })?;

        if self.defined.contains(id) {
            log::debug!("<{id}> is already defined");
            return Ok(sheet);
        }

        self.host.attach_stylesheet(id, Arc::clone(&sheet))?;
        self.defined.insert(id);
        log::debug!("defined <{id}> ({} rules)", sheet.rules().len());
        Ok(sheet)
    }

    pub fn is_defined(&self, id: &str) -> bool {
        self.defined.contains(id)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

/// A host that records what it was given.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub attached: Vec<(String, Arc<CompositeStylesheet>)>,
}

impl StyleHost for RecordingHost {
    fn attach_stylesheet(
        &mut self,
        definition_id: &str,
        sheet: Arc<CompositeStylesheet>,
    ) -> Result<()> {
        self.attached.push((definition_id.to_string(), sheet));
        Ok(())
    }
}
