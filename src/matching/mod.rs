//! Ranking of catalog services per requirement.
//!
//! For each requirement: build its document, vectorize it, score it against
//! every service, drop scores below `min_score`, sort by `final_score`
//! descending (ties by service id ascending) and keep the first `top_n`.
//!
//! An empty result for a requirement is a legitimate "no coverage" outcome and
//! is reported as [`RequirementOutcome::NoCoverage`], not as an error.

pub mod error;
pub mod matcher;
pub mod types;


pub use error::{MatchingError, MatchingResult};
pub use matcher::{Matcher, match_all};
pub use types::{Match, MatchKey, MatchOptions, MatchRun, RequirementOutcome, SkipReason};
