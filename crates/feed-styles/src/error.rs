use stylecomp::StyleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to compose <{definition}>: {source}")]
    Compose {
        definition: String,
        #[source]
        source: StyleError,
    },

    #[error("host rejected stylesheet for <{definition}>: {reason}")]
    Attach { definition: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
