//! Error types for catalog lookups.

use thiserror::Error;

use crate::Family;

/// Errors raised by the material catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A selection referenced a key that the family does not contain.
    #[error("unknown {family} key: {key:?}")]
    UnknownKey {
        /// Family that was searched.
        family: Family,
        /// Key as it was supplied.
        key: String,
    },

    /// An entry that must have a nominal thickness has none.
    #[error("catalog entry {0:?} has no nominal thickness")]
    MissingThickness(String),

    /// An entry's nominal thickness is negative or not a number.
    #[error("catalog entry {id:?} has invalid thickness {thickness}")]
    InvalidThickness {
        /// Entry id.
        id: String,
        /// Offending value.
        thickness: f64,
    },

    /// An entry is filed under a key other than its own id.
    #[error("{family} entry under key {key:?} has id {id:?}")]
    KeyMismatch {
        /// Family of the table.
        family: Family,
        /// Key the entry is filed under.
        key: &'static str,
        /// Id the entry carries.
        id: String,
    },

    /// A display colour is not a `#rrggbb` string.
    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// The catalog document could not be parsed.
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
