//! One matching session: a loaded catalog, its fitted space and the approval
//! state of the most recent run.
//!
//! A session is constructed explicitly and passed to whoever needs it (the
//! HTTP gateway keeps one behind an `Arc`). Re-running matching re-syncs the
//! tracker so prior decisions survive re-computation.

pub mod error;


pub use error::{SessionError, SessionResult};

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::approval::{ApprovalStatus, ApprovalSummary, ApprovalTracker};
use crate::catalog::{CatalogLoad, CatalogSummary, CatalogValidationWarning, ServiceCatalog};
use crate::constants::{CATEGORY_BONUS, DEFAULT_APPROVAL_THRESHOLD};
use crate::coverage::{CoverageReport, aggregate};
use crate::export::{ExportSnapshot, ExportedRun};
use crate::matching::{Match, MatchKey, MatchOptions, Matcher, RequirementOutcome};
use crate::model::Requirement;
use crate::scoring::MatchScorer;
use crate::vectorizer::VectorizerConfig;

/// Tunables fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub vectorizer: VectorizerConfig,
    pub category_bonus: f32,
    /// Used when a run does not supply its own options.
    pub options: MatchOptions,
    /// Used when a bulk approval does not supply its own threshold.
    pub approval_threshold: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            category_bonus: CATEGORY_BONUS,
            options: MatchOptions::default(),
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

/// Result of [`MatchingSession::run`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRun {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub options: MatchOptions,
    /// Ranked matches with carried-over approval statuses applied.
    pub matches: Vec<Match>,
    pub outcomes: Vec<RequirementOutcome>,
    pub coverage: CoverageReport,
}

#[derive(Debug, Clone)]
struct RunSnapshot {
    run_id: Uuid,
    completed_at: DateTime<Utc>,
    options: MatchOptions,
    outcomes: Vec<RequirementOutcome>,
    coverage: CoverageReport,
}

#[derive(Debug)]
pub struct MatchingSession {
    id: Uuid,
    matcher: Matcher,
    warnings: Vec<CatalogValidationWarning>,
    settings: SessionSettings,
    tracker: ApprovalTracker,
    last_run: RwLock<Option<RunSnapshot>>,
}

impl MatchingSession {
    /// Fits the vector space over a loaded catalog.
    pub fn new(load: CatalogLoad, settings: SessionSettings) -> SessionResult<Self> {
        settings.options.validate()?;
        let scorer = MatchScorer::new(settings.category_bonus)?;

        let CatalogLoad { catalog, warnings } = load;
        let matcher = Matcher::fit(Arc::new(catalog), settings.vectorizer, scorer);
        let id = Uuid::new_v4();

        info!(
            session_id = %id,
            services = matcher.catalog().len(),
            vocabulary = matcher.space().dimension(),
            degenerate = matcher.space().is_degenerate(),
            "Matching session ready"
        );

        Ok(Self {
            id,
            matcher,
            warnings,
            settings,
            tracker: ApprovalTracker::new(),
            last_run: RwLock::new(None),
        })
    }

    /// Loads the catalog file and builds a session over it.
    pub fn from_path(path: impl AsRef<Path>, settings: SessionSettings) -> SessionResult<Self> {
        let load = ServiceCatalog::load_from_path(path)?;
        Self::new(load, settings)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        self.matcher.catalog()
    }

    pub fn warnings(&self) -> &[CatalogValidationWarning] {
        &self.warnings
    }

    pub fn catalog_summary(&self) -> CatalogSummary<'_> {
        CatalogSummary {
            fingerprint: self.catalog().fingerprint(),
            entries: self.catalog().entries(),
            warnings: &self.warnings,
        }
    }

    /// Ready when the vector space can tell services apart.
    pub fn is_ready(&self) -> bool {
        !self.catalog().is_empty() && !self.matcher.space().is_degenerate()
    }

    /// Matches `requirements` and makes the result the session's current run.
    ///
    /// Coverage is computed from each requirement's top-ranked match, which is
    /// the same set a `top_n = 1` pass with the same `min_score` would return.
    pub fn run(
        &self,
        requirements: &[Requirement],
        options: Option<MatchOptions>,
    ) -> SessionResult<SessionRun> {
        self.run_unless_cancelled(requirements, options, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), but publishes nothing once `cancelled` is set.
    ///
    /// The flag is checked under the run lock, so a cancelled run never
    /// replaces the current run or touches the tracker.
    pub fn run_unless_cancelled(
        &self,
        requirements: &[Requirement],
        options: Option<MatchOptions>,
        cancelled: &AtomicBool,
    ) -> SessionResult<SessionRun> {
        let options = options.unwrap_or(self.settings.options);
        let run = self.matcher.match_all(requirements, &options)?;

        // Outcomes are in input order, one per requirement. Skipped ones
        // (blank or repeated ids) take no part in coverage.
        let scored: Vec<Requirement> = requirements
            .iter()
            .zip(&run.outcomes)
            .filter(|(_, o)| !matches!(o, RequirementOutcome::Skipped { .. }))
            .map(|(r, _)| r.clone())
            .collect();
        let best: Vec<Match> = scored
            .iter()
            .filter_map(|r| run.matches_for(&r.id).next().cloned())
            .collect();
        let coverage = aggregate(&best, &scored);

        let run_id = Uuid::new_v4();
        let completed_at = Utc::now();

        // Held across the tracker sync so concurrent runs publish atomically.
        let mut last_run = self.last_run.write();
        if cancelled.load(Ordering::Acquire) {
            warn!(session_id = %self.id, run_id = %run_id, "Run cancelled before publishing");
            return Err(SessionError::Cancelled);
        }
        let matches = self.tracker.sync(run.matches);

        *last_run = Some(RunSnapshot {
            run_id,
            completed_at,
            options,
            outcomes: run.outcomes.clone(),
            coverage: coverage.clone(),
        });

        info!(
            session_id = %self.id,
            run_id = %run_id,
            requirements = requirements.len(),
            matches = matches.len(),
            "Session run recorded"
        );

        Ok(SessionRun {
            run_id,
            completed_at,
            options,
            matches,
            outcomes: run.outcomes,
            coverage,
        })
    }

    pub fn has_run(&self) -> bool {
        self.last_run.read().is_some()
    }

    /// Matches of the current run with current statuses; empty before any run.
    pub fn matches(&self) -> Vec<Match> {
        self.tracker.matches()
    }

    /// Best-match coverage of the current run; empty before any run.
    pub fn coverage(&self) -> CoverageReport {
        self.last_run
            .read()
            .as_ref()
            .map(|r| r.coverage.clone())
            .unwrap_or_default()
    }

    pub fn outcomes(&self) -> Vec<RequirementOutcome> {
        self.last_run
            .read()
            .as_ref()
            .map(|r| r.outcomes.clone())
            .unwrap_or_default()
    }

    pub fn set_status(&self, key: &MatchKey, status: ApprovalStatus) -> SessionResult<Match> {
        Ok(self.tracker.set_status(key, status)?)
    }

    /// Bulk approval; `None` uses the session's configured threshold.
    pub fn approve_above_threshold(&self, threshold: Option<f32>) -> SessionResult<usize> {
        let threshold = threshold.unwrap_or(self.settings.approval_threshold);
        Ok(self.tracker.approve_above_threshold(threshold)?)
    }

    pub fn approved_matches(&self, min_score: f32) -> Vec<Match> {
        self.tracker.approved_matches(min_score)
    }

    pub fn approval_summary(&self) -> ApprovalSummary {
        self.tracker.summary()
    }

    /// Snapshot of the current run and every recorded decision.
    pub fn export(&self) -> SessionResult<ExportSnapshot> {
        let last_run = self.last_run.read();
        let run = last_run.as_ref().ok_or(SessionError::NoRun)?;

        let exported = ExportedRun {
            run_id: run.run_id,
            completed_at: run.completed_at,
            options: run.options,
            matches: self.tracker.matches(),
            outcomes: run.outcomes.clone(),
            coverage: run.coverage.clone(),
        };
        Ok(ExportSnapshot::capture(
            self.id,
            self.catalog().fingerprint(),
            exported,
            self.tracker.decisions(),
            self.tracker.summary(),
        )?)
    }

    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run.read().as_ref().map(|r| r.run_id)
    }

    pub fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        self.last_run.read().as_ref().map(|r| r.completed_at)
    }
}
