use feed_styles::RegistryError;
use log::SetLoggerError;
use stylecomp::StyleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedStyleError {
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Logger error: {0}")]
    Logger(#[from] SetLoggerError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, FeedStyleError>;
