//! Detector error type.

use thiserror::Error;

use tb_core::TbError;

/// Errors produced by `tb-detect`.  Raised only when building detectors from
/// configuration; sampling never fails.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid detector configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] TbError),
}

pub type DetectResult<T> = Result<T, DetectError>;
