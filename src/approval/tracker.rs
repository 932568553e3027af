use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::constants::is_unit_interval;
use crate::matching::{Match, MatchKey};

use super::error::{ApprovalError, ApprovalResult};
use super::types::{ApprovalStatus, ApprovalSummary, Decision, DecisionSource};

/// Canonical approval state for one matching session.
///
/// Decisions are keyed by `(requirement_id, service_id)` and outlive any single
/// run: [`sync`](Self::sync) re-applies them to freshly computed matches.
/// Every operation takes the internal lock for its whole duration, so a bulk
/// approval and an individual toggle never interleave.
#[derive(Debug, Default)]
pub struct ApprovalTracker {
    inner: Mutex<TrackerState>,
}

#[derive(Debug, Default)]
struct TrackerState {
    current: Vec<Match>,
    decisions: HashMap<MatchKey, Decision>,
}

impl TrackerState {
    fn position(&self, key: &MatchKey) -> Option<usize> {
        self.current.iter().position(|m| m.is_key(key))
    }

    fn record(&mut self, key: MatchKey, status: ApprovalStatus, source: DecisionSource) {
        self.decisions.insert(
            key.clone(),
            Decision {
                key,
                status,
                source,
                decided_at: Utc::now(),
            },
        );
    }
}

impl ApprovalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current match set, carrying prior decisions over.
    ///
    /// Pairs without a decision start as `Suggested`. Decisions for pairs that
    /// are absent from this run are kept and reapply if the pair comes back.
    pub fn sync(&self, matches: impl IntoIterator<Item = Match>) -> Vec<Match> {
        let mut state = self.inner.lock();

        let current: Vec<Match> = matches
            .into_iter()
            .map(|mut m| {
                m.approval_status = state
                    .decisions
                    .get(&m.key())
                    .map(|d| d.status)
                    .unwrap_or_default();
                m
            })
            .collect();

        let carried = current
            .iter()
            .filter(|m| m.approval_status != ApprovalStatus::Suggested)
            .count();
        debug!(
            matches = current.len(),
            carried_decisions = carried,
            "Approval tracker synced"
        );

        state.current = current.clone();
        current
    }

    /// Records an explicit user decision.
    pub fn set_status(&self, key: &MatchKey, status: ApprovalStatus) -> ApprovalResult<Match> {
        let mut state = self.inner.lock();
        let idx = state
            .position(key)
            .ok_or_else(|| ApprovalError::UnknownMatch { key: key.clone() })?;

        state.current[idx].approval_status = status;
        state.record(key.clone(), status, DecisionSource::Manual);

        debug!(key = %key, status = %status, "Manual approval decision");
        Ok(state.current[idx].clone())
    }

    /// Approves every `Suggested` match scoring at least `threshold`.
    ///
    /// Matches carrying a manual decision (including a manual reset to
    /// `Suggested`) are left alone, as are `Approved` and `Rejected` ones.
    /// Returns the number of matches changed.
    pub fn approve_above_threshold(&self, threshold: f32) -> ApprovalResult<usize> {
        if !is_unit_interval(threshold) {
            return Err(ApprovalError::InvalidThreshold { value: threshold });
        }

        let mut state = self.inner.lock();
        let targets: Vec<usize> = state
            .current
            .iter()
            .enumerate()
            .filter(|(_, m)| {
                m.approval_status == ApprovalStatus::Suggested
                    && m.final_score >= threshold
                    && !matches!(
                        state.decisions.get(&m.key()),
                        Some(Decision {
                            source: DecisionSource::Manual,
                            ..
                        })
                    )
            })
            .map(|(i, _)| i)
            .collect();

        for &idx in &targets {
            state.current[idx].approval_status = ApprovalStatus::Approved;
            let key = state.current[idx].key();
            state.record(key, ApprovalStatus::Approved, DecisionSource::Bulk);
        }

        info!(threshold, approved = targets.len(), "Bulk approval applied");
        Ok(targets.len())
    }

    /// Approved matches of the current run with `final_score >= min_score`.
    ///
    /// Sorted by `final_score` descending, then by key. This is the read
    /// interface for proposal drafting.
    pub fn approved_matches(&self, min_score: f32) -> Vec<Match> {
        let state = self.inner.lock();
        let mut approved: Vec<Match> = state
            .current
            .iter()
            .filter(|m| m.approval_status == ApprovalStatus::Approved && m.final_score >= min_score)
            .cloned()
            .collect();
        approved.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| a.requirement_id.cmp(&b.requirement_id))
                .then_with(|| a.service_id.cmp(&b.service_id))
        });
        approved
    }

    /// Status of a match in the current run.
    pub fn status(&self, key: &MatchKey) -> Option<ApprovalStatus> {
        let state = self.inner.lock();
        state.position(key).map(|i| state.current[i].approval_status)
    }

    /// Current run with statuses applied, in run order.
    pub fn matches(&self) -> Vec<Match> {
        self.inner.lock().current.clone()
    }

    pub fn summary(&self) -> ApprovalSummary {
        let state = self.inner.lock();
        state
            .current
            .iter()
            .fold(ApprovalSummary::default(), |mut acc, m| {
                match m.approval_status {
                    ApprovalStatus::Suggested => acc.suggested += 1,
                    ApprovalStatus::Approved => acc.approved += 1,
                    ApprovalStatus::Rejected => acc.rejected += 1,
                }
                acc
            })
    }

    /// All recorded decisions, including dormant ones, sorted by key.
    pub fn decisions(&self) -> Vec<Decision> {
        let state = self.inner.lock();
        let mut decisions: Vec<Decision> = state.decisions.values().cloned().collect();
        decisions.sort_by(|a, b| a.key.cmp(&b.key));
        decisions
    }
}
