use std::path::PathBuf;

use thiserror::Error;

/// Fatal catalog load failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not a JSON array of objects.
    #[error("malformed catalog source: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Every entry failed validation (or the source was empty).
    #[error("service catalog has no valid entries ({rejected} rejected)")]
    EmptyCatalog { rejected: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Why a single catalog entry was excluded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryRejection {
    #[error("entry could not be parsed: {0}")]
    Unparseable(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' is blank")]
    BlankField(&'static str),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("successRate {0} is outside [0, 1]")]
    SuccessRateOutOfRange(f64),

    #[error("pastProjects {0} is negative")]
    NegativePastProjects(i64),

    #[error("capabilities list is empty")]
    EmptyCapabilities,

    #[error("tags set is empty")]
    EmptyTags,

    #[error("duplicate service id '{0}'")]
    DuplicateId(String),
}
