use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::approval::ApprovalStatus;
use crate::constants::{BEST_MATCH_TOP_N, DEFAULT_MIN_SCORE, DEFAULT_TOP_N, is_unit_interval};
use crate::scoring::{MatchTier, ScoreBreakdown};

use super::error::{MatchingError, MatchingResult};

/// Identity of a match: the `(requirement, service)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchKey {
    pub requirement_id: String,
    pub service_id: String,
}

impl MatchKey {
    pub fn new(requirement_id: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            requirement_id: requirement_id.into(),
            service_id: service_id.into(),
        }
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.requirement_id, self.service_id)
    }
}

/// A scored requirement-to-service pairing.
///
/// `reasoning` is not stored; it is derived from `final_score` on demand and
/// included when serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub requirement_id: String,
    pub service_id: String,
    pub raw_score: f32,
    pub category_bonus_applied: bool,
    pub final_score: f32,
    pub approval_status: ApprovalStatus,
}

impl Match {
    pub fn from_breakdown(
        requirement_id: impl Into<String>,
        service_id: impl Into<String>,
        breakdown: ScoreBreakdown,
    ) -> Self {
        Self {
            requirement_id: requirement_id.into(),
            service_id: service_id.into(),
            raw_score: breakdown.raw_score,
            category_bonus_applied: breakdown.category_bonus_applied,
            final_score: breakdown.final_score,
            approval_status: ApprovalStatus::Suggested,
        }
    }

    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.requirement_id, &self.service_id)
    }

    pub fn is_key(&self, key: &MatchKey) -> bool {
        self.requirement_id == key.requirement_id && self.service_id == key.service_id
    }

    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.final_score)
    }

    pub fn reasoning(&self) -> &'static str {
        self.tier().label()
    }
}

impl Serialize for Match {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Match", 7)?;
        s.serialize_field("requirementId", &self.requirement_id)?;
        s.serialize_field("serviceId", &self.service_id)?;
        s.serialize_field("rawScore", &self.raw_score)?;
        s.serialize_field("categoryBonusApplied", &self.category_bonus_applied)?;
        s.serialize_field("finalScore", &self.final_score)?;
        s.serialize_field("reasoning", self.reasoning())?;
        s.serialize_field("approvalStatus", &self.approval_status)?;
        s.end()
    }
}

/// Ranking parameters for one matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    pub top_n: usize,
    pub min_score: f32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl MatchOptions {
    pub fn new(top_n: usize, min_score: f32) -> Self {
        Self { top_n, min_score }
    }

    /// Single best match per requirement, as used for coverage.
    pub fn best_match(min_score: f32) -> Self {
        Self {
            top_n: BEST_MATCH_TOP_N,
            min_score,
        }
    }

    pub fn validate(&self) -> MatchingResult<()> {
        if self.top_n == 0 {
            return Err(MatchingError::ZeroTopN);
        }
        if !is_unit_interval(self.min_score) {
            return Err(MatchingError::InvalidMinScore {
                value: self.min_score,
            });
        }
        Ok(())
    }
}

/// Why a requirement was left out of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BlankDescription,
    DuplicateId,
}

/// Per-requirement result of a run.
///
/// `NoCoverage` means scoring succeeded but nothing cleared `min_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequirementOutcome {
    #[serde(rename_all = "camelCase")]
    Matched { requirement_id: String, count: usize },
    #[serde(rename_all = "camelCase")]
    NoCoverage { requirement_id: String },
    #[serde(rename_all = "camelCase")]
    Skipped {
        requirement_id: String,
        reason: SkipReason,
    },
}

impl RequirementOutcome {
    pub fn requirement_id(&self) -> &str {
        match self {
            RequirementOutcome::Matched { requirement_id, .. }
            | RequirementOutcome::NoCoverage { requirement_id }
            | RequirementOutcome::Skipped { requirement_id, .. } => requirement_id,
        }
    }

    pub fn is_covered(&self) -> bool {
        matches!(self, RequirementOutcome::Matched { .. })
    }
}

/// Output of [`Matcher::match_all`](super::Matcher::match_all).
///
/// Requirements appear in input order; each requirement's matches in rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRun {
    pub matches: Vec<Match>,
    pub outcomes: Vec<RequirementOutcome>,
}

impl MatchRun {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches_for<'a>(&'a self, requirement_id: &'a str) -> impl Iterator<Item = &'a Match> {
        self.matches
            .iter()
            .filter(move |m| m.requirement_id == requirement_id)
    }

    pub fn outcome(&self, requirement_id: &str) -> Option<&RequirementOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.requirement_id() == requirement_id)
    }

    /// Requirements that were scored but have no surviving match.
    pub fn uncovered(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|o| match o {
            RequirementOutcome::NoCoverage { requirement_id } => Some(requirement_id.as_str()),
            _ => None,
        })
    }
}
