//! Tender library crate (used by the server and integration tests).
//!
//! Ranks a service catalog against RFP requirements with TF-IDF cosine
//! similarity, tracks approval decisions on the suggested matches and reports
//! per-category coverage.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`ServiceCatalog`], [`ServiceCatalogEntry`] - Validated service offerings
//! - [`Requirement`], [`Category`] - Extracted RFP requirements
//! - [`Match`], [`MatchOptions`], [`MatchRun`] - Ranked output
//!
//! ## Pipeline
//! - [`build_document`] - Vectorizer input text
//! - [`TfIdfVectorizer`], [`VectorSpace`] - TF-IDF space fitted on the catalog
//! - [`MatchScorer`] - Cosine similarity plus category bonus
//! - [`Matcher`] - Ranking, filtering and top-N truncation
//! - [`aggregate`] - Per-category coverage
//! - [`ApprovalTracker`] - Approval state machine
//!
//! ## Session & Service
//! - [`MatchingSession`] - Catalog, space and tracker for one engagement
//! - [`ExportSnapshot`] - JSON snapshot of a run
//! - [`gateway`] - Axum HTTP surface
//! - [`Config`] - `TENDER_*` environment configuration

pub mod approval;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod document;
pub mod export;
pub mod gateway;
pub mod hashing;
pub mod matching;
pub mod model;
pub mod scoring;
pub mod session;
pub mod vectorizer;

#[cfg(test)]
mod testing;

pub use approval::{
    ApprovalError, ApprovalResult, ApprovalStatus, ApprovalSummary, ApprovalTracker, Decision,
    DecisionSource,
};
pub use catalog::{
    CatalogError, CatalogLoad, CatalogResult, CatalogSummary, CatalogValidationWarning,
    EntryRejection, ServiceCatalog, ServiceCatalogEntry,
};
pub use config::{Config, ConfigError};
pub use constants::{
    CATEGORY_BONUS, DEFAULT_APPROVAL_THRESHOLD, DEFAULT_MAX_FEATURES, DEFAULT_MIN_SCORE,
    DEFAULT_TOP_N, GOOD_MATCH_THRESHOLD, PARTIAL_MATCH_THRESHOLD, STRONG_MATCH_THRESHOLD,
};
pub use coverage::{CategoryCoverage, CoverageReport, aggregate};
pub use document::{DocumentSource, build_document};
pub use export::{ExportError, ExportSnapshot, ExportedRun};
pub use hashing::{digest_hex, fingerprint_documents, hash_document};
pub use matching::{
    Match, MatchKey, MatchOptions, MatchRun, Matcher, MatchingError, MatchingResult,
    RequirementOutcome, SkipReason, match_all,
};
pub use model::{Category, CategoryParseError, Requirement};
pub use scoring::{MatchScorer, MatchTier, ScoreBreakdown, ScoringError};
pub use session::{MatchingSession, SessionError, SessionResult, SessionRun, SessionSettings};
pub use vectorizer::{
    SparseVector, TfIdfVectorizer, VectorSpace, VectorizerConfig, cosine_similarity,
};
