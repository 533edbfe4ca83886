use thiserror::Error;

use tb_core::TbError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error(transparent)]
    Core(#[from] TbError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
