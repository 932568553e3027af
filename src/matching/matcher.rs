use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{ServiceCatalog, ServiceCatalogEntry};
use crate::document::build_document;
use crate::model::Requirement;
use crate::scoring::MatchScorer;
use crate::vectorizer::{SparseVector, TfIdfVectorizer, VectorSpace, VectorizerConfig};

use super::error::MatchingResult;
use super::types::{Match, MatchOptions, MatchRun, RequirementOutcome, SkipReason};

/// Ranks catalog services against requirements.
///
/// Holds the catalog and its fitted space behind `Arc`s together with the
/// pre-transformed service vectors. All methods take `&self`; a `Matcher` can
/// be shared between threads without locking.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<ServiceCatalog>,
    space: Arc<VectorSpace>,
    service_vectors: Arc<Vec<SparseVector>>,
    scorer: MatchScorer,
}

impl Matcher {
    pub fn new(catalog: Arc<ServiceCatalog>, space: Arc<VectorSpace>, scorer: MatchScorer) -> Self {
        let service_vectors = catalog
            .iter()
            .map(|entry| space.transform(&build_document(entry)))
            .collect();
        Self {
            catalog,
            space,
            service_vectors: Arc::new(service_vectors),
            scorer,
        }
    }

    /// Fits a fresh vector space over the catalog documents.
    pub fn fit(catalog: Arc<ServiceCatalog>, config: VectorizerConfig, scorer: MatchScorer) -> Self {
        let space = TfIdfVectorizer::new(config).fit(&catalog.documents());
        Self::new(catalog, Arc::new(space), scorer)
    }

    pub fn catalog(&self) -> &Arc<ServiceCatalog> {
        &self.catalog
    }

    pub fn space(&self) -> &Arc<VectorSpace> {
        &self.space
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Ranked matches for a single requirement.
    pub fn match_requirement(&self, requirement: &Requirement, options: &MatchOptions) -> Vec<Match> {
        rank_requirement(
            requirement,
            self.catalog.entries(),
            &self.service_vectors,
            &self.space,
            &self.scorer,
            options,
        )
    }

    /// Scores every requirement against the whole catalog.
    pub fn match_all(
        &self,
        requirements: &[Requirement],
        options: &MatchOptions,
    ) -> MatchingResult<MatchRun> {
        options.validate()?;

        if requirements.is_empty() {
            debug!("No requirements supplied; nothing to match");
            return Ok(MatchRun::default());
        }

        let mut run = MatchRun::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(requirements.len());

        for requirement in requirements {
            if !seen.insert(requirement.id.as_str()) {
                debug!(requirement_id = %requirement.id, "Skipping duplicate requirement id");
                run.outcomes.push(RequirementOutcome::Skipped {
                    requirement_id: requirement.id.clone(),
                    reason: SkipReason::DuplicateId,
                });
                continue;
            }
            if requirement.description.trim().is_empty() {
                debug!(requirement_id = %requirement.id, "Skipping requirement with blank description");
                run.outcomes.push(RequirementOutcome::Skipped {
                    requirement_id: requirement.id.clone(),
                    reason: SkipReason::BlankDescription,
                });
                continue;
            }

            let matches = self.match_requirement(requirement, options);
            debug!(
                requirement_id = %requirement.id,
                category = %requirement.category,
                matches = matches.len(),
                top_score = matches.first().map(|m| m.final_score).unwrap_or(0.0),
                "Requirement matched"
            );

            run.outcomes.push(if matches.is_empty() {
                RequirementOutcome::NoCoverage {
                    requirement_id: requirement.id.clone(),
                }
            } else {
                RequirementOutcome::Matched {
                    requirement_id: requirement.id.clone(),
                    count: matches.len(),
                }
            });
            run.matches.extend(matches);
        }

        info!(
            requirements = requirements.len(),
            services = self.catalog.len(),
            matches = run.matches.len(),
            uncovered = run.uncovered().count(),
            top_n = options.top_n,
            min_score = options.min_score,
            "Matching run complete"
        );

        Ok(run)
    }
}

/// One-shot matching without a prepared [`Matcher`].
///
/// Service vectors are transformed on every call; prefer [`Matcher`] when the
/// same catalog is matched repeatedly.
pub fn match_all(
    requirements: &[Requirement],
    catalog: &ServiceCatalog,
    space: &VectorSpace,
    scorer: &MatchScorer,
    options: &MatchOptions,
) -> MatchingResult<MatchRun> {
    let matcher = Matcher::new(
        Arc::new(catalog.clone()),
        Arc::new(space.clone()),
        *scorer,
    );
    matcher.match_all(requirements, options)
}

fn rank_requirement(
    requirement: &Requirement,
    services: &[ServiceCatalogEntry],
    service_vectors: &[SparseVector],
    space: &VectorSpace,
    scorer: &MatchScorer,
    options: &MatchOptions,
) -> Vec<Match> {
    let requirement_vector = space.transform(&build_document(requirement));

    let mut matches: Vec<Match> = services
        .iter()
        .zip(service_vectors)
        .map(|(service, service_vector)| {
            let breakdown = scorer.score(
                &requirement_vector,
                requirement.category,
                service_vector,
                service.category,
            );
            Match::from_breakdown(&requirement.id, &service.id, breakdown)
        })
        .filter(|m| m.final_score >= options.min_score)
        .collect();

    matches.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then_with(|| a.service_id.cmp(&b.service_id))
    });
    matches.truncate(options.top_n);
    matches
}
