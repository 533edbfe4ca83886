use thiserror::Error;

use tb_core::TbError;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("run configuration error: {0}")]
    Config(String),

    #[error("a runner needs at least one behavior")]
    NoBehaviors,

    #[error(transparent)]
    Core(#[from] TbError),
}

pub type SchedResult<T> = Result<T, SchedError>;

/// Failure reported by a [`NotificationSink`][crate::NotificationSink].
/// Always logged and dropped; never reaches the run loop.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);
