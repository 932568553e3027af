use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::MatchKey;

/// Approval state of a match.
///
/// `Suggested` is the initial state. Users may move between any two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[default]
    Suggested,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Suggested => "Suggested",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who made a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Explicit user action; bulk operations never override it.
    Manual,
    /// `approve_above_threshold`.
    Bulk,
}

/// A recorded decision for one match key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    #[serde(flatten)]
    pub key: MatchKey,
    pub status: ApprovalStatus,
    pub source: DecisionSource,
    pub decided_at: DateTime<Utc>,
}

/// Match counts per status in the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalSummary {
    pub suggested: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ApprovalSummary {
    pub fn total(&self) -> usize {
        self.suggested + self.approved + self.rejected
    }
}
