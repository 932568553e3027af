//! Requirement-to-service scoring.
//!
//! [`MatchScorer`] turns a pair of vectors plus their categories into a
//! [`ScoreBreakdown`]: cosine similarity, an optional category bonus, and the
//! clamped final score. The reasoning text comes from [`MatchTier`] and depends
//! on the final score alone, so it can always be regenerated and is never fed
//! back into ranking.

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::MatchScorer;
pub use types::{MatchTier, ScoreBreakdown};
