use thiserror::Error;

use crate::matching::MatchKey;

#[derive(Debug, Error, PartialEq)]
pub enum ApprovalError {
    #[error("no match {key} in the current run")]
    UnknownMatch { key: MatchKey },

    #[error("approval threshold {value} must be within [0, 1]")]
    InvalidThreshold { value: f32 },
}

pub type ApprovalResult<T> = Result<T, ApprovalError>;
