//! Error types for the viewer.

use buildup_catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Catalog and selection disagree; the previous rendering is kept.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The configuration document is malformed.
    #[error("invalid viewer configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parses but describes no drawable view.
    #[error("invalid viewer configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
