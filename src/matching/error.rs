use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MatchingError {
    #[error("top_n must be at least 1")]
    ZeroTopN,

    #[error("min_score {value} must be within [0, 1]")]
    InvalidMinScore { value: f32 },
}

pub type MatchingResult<T> = Result<T, MatchingError>;
