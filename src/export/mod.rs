//! Serializable snapshots of a session's current run.
//!
//! A snapshot carries the catalog fingerprint and a digest of the match list so
//! a consumer can tell which catalog and which ranking it was built from.
//! Field names are camelCase and scores are plain floats.


use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::approval::{ApprovalSummary, Decision};
use crate::coverage::CoverageReport;
use crate::hashing::digest_hex;
use crate::matching::{Match, MatchOptions, RequirementOutcome};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// The run-specific part of a snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedRun {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub options: MatchOptions,
    pub matches: Vec<Match>,
    pub outcomes: Vec<RequirementOutcome>,
    pub coverage: CoverageReport,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub session_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub catalog_fingerprint: String,
    #[serde(flatten)]
    pub run: ExportedRun,
    /// Every recorded decision, including ones for pairs absent from this run.
    pub decisions: Vec<Decision>,
    pub approval_summary: ApprovalSummary,
    /// BLAKE3 hex digest of the serialized `matches` array.
    pub match_digest: String,
}

impl ExportSnapshot {
    pub fn capture(
        session_id: Uuid,
        catalog_fingerprint: impl Into<String>,
        run: ExportedRun,
        decisions: Vec<Decision>,
        approval_summary: ApprovalSummary,
    ) -> ExportResult<Self> {
        let match_digest = match_digest(&run.matches)?;
        Ok(Self {
            session_id,
            generated_at: Utc::now(),
            catalog_fingerprint: catalog_fingerprint.into(),
            run,
            decisions,
            approval_summary,
            match_digest,
        })
    }

    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Approved matches in run order.
    pub fn approved(&self) -> impl Iterator<Item = &Match> {
        self.run
            .matches
            .iter()
            .filter(|m| m.approval_status == crate::approval::ApprovalStatus::Approved)
    }
}

/// Digest of a match list; identical lists always produce identical digests.
pub fn match_digest(matches: &[Match]) -> ExportResult<String> {
    let bytes = serde_json::to_vec(matches)?;
    Ok(digest_hex(&bytes))
}
