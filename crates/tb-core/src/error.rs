//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert `TbError` into
//! them via `From` or wrap it as one variant.

use thiserror::Error;

/// The top-level error type for `tb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TbError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `tb-*` crates.
pub type TbResult<T> = Result<T, TbError>;
