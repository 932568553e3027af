use tracing::trace;

use crate::constants::CATEGORY_BONUS;
use crate::model::Category;
use crate::vectorizer::{SparseVector, cosine_similarity};

use super::error::ScoringError;
use super::types::ScoreBreakdown;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScorer {
    category_bonus: f32,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self {
            category_bonus: CATEGORY_BONUS,
        }
    }
}

impl MatchScorer {
    pub fn new(category_bonus: f32) -> Result<Self, ScoringError> {
        if !crate::constants::is_unit_interval(category_bonus) {
            return Err(ScoringError::InvalidBonus {
                value: category_bonus,
            });
        }
        Ok(Self { category_bonus })
    }

    pub fn category_bonus(&self) -> f32 {
        self.category_bonus
    }

    pub fn score(
        &self,
        requirement: &SparseVector,
        requirement_category: Category,
        service: &SparseVector,
        service_category: Category,
    ) -> ScoreBreakdown {
        let raw_score = cosine_similarity(requirement, service);
        let category_bonus_applied = requirement_category == service_category;

        let final_score = if category_bonus_applied {
            (raw_score + self.category_bonus).min(1.0)
        } else {
            raw_score
        };

        trace!(
            raw_score,
            category_bonus_applied,
            final_score,
            "Scored requirement against service"
        );

        ScoreBreakdown {
            raw_score,
            category_bonus_applied,
            final_score,
        }
    }
}
