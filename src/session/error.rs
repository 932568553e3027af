use thiserror::Error;

use crate::approval::ApprovalError;
use crate::catalog::CatalogError;
use crate::export::ExportError;
use crate::matching::MatchingError;
use crate::scoring::ScoringError;

/// Errors raised by [`MatchingSession`](super::MatchingSession).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("matching error: {0}")]
    Matching(#[from] MatchingError),

    #[error("approval error: {0}")]
    Approval(#[from] ApprovalError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// The caller gave up on a run before it was published.
    #[error("matching run was cancelled before it was published")]
    Cancelled,

    /// An operation needs a completed run and none exists yet.
    #[error("no matching run has completed in this session")]
    NoRun,
}

pub type SessionResult<T> = Result<T, SessionError>;
