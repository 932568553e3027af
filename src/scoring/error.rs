use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("category bonus {value} must be within [0, 1]")]
    InvalidBonus { value: f32 },
}
