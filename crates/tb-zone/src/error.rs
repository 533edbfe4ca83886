//! Zone-subsystem error type.

use thiserror::Error;

/// Errors produced by `tb-zone`.  Only construction and loading can fail;
/// classification is total.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone parse error: {0}")]
    Parse(String),

    #[error("zone {name:?} has an invalid shape: {reason}")]
    InvalidShape { name: String, reason: String },

    #[error("{0} zones exceed the ZoneId range")]
    TooManyZones(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
