//! Error type shared by the display crates.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("world scale must be positive, got {value}")]
    ScaleOutOfRange { value: f64 },

    #[error("unknown ship class {0:?}")]
    UnknownShipClass(String),

    #[error("invalid catalog: {0}")]
    Catalog(String),
}
