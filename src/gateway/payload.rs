//! Request and response bodies for the `/v1` endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::approval::{ApprovalStatus, ApprovalSummary};
use crate::constants::is_unit_interval;
use crate::matching::{Match, MatchOptions};
use crate::model::Requirement;

use super::error::GatewayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub min_score: Option<f32>,
}

impl MatchRequest {
    /// Rejects confidences that are not finite values in `[0, 1]`.
    pub fn validate(&self) -> Result<(), GatewayError> {
        match self
            .requirements
            .iter()
            .find(|r| !is_unit_interval(r.confidence))
        {
            Some(r) => Err(GatewayError::InvalidRequest(format!(
                "requirement '{}': confidence must be within [0, 1], got {}",
                r.id, r.confidence
            ))),
            None => Ok(()),
        }
    }

    /// Per-request overrides on top of the session defaults.
    pub fn options(&self, defaults: MatchOptions) -> MatchOptions {
        MatchOptions {
            top_n: self.top_n.unwrap_or(defaults.top_n),
            min_score: self.min_score.unwrap_or(defaults.min_score),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: ApprovalStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkApproveRequest {
    #[serde(default)]
    pub threshold: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedQuery {
    #[serde(default)]
    pub min_score: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    pub matches: Vec<Match>,
    pub summary: ApprovalSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApproveResponse {
    pub threshold: f32,
    pub approved: usize,
    pub summary: ApprovalSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedResponse {
    pub min_score: f32,
    pub matches: Vec<Match>,
}
