//! Per-category coverage reporting.
//!
//! Coverage is the mean `final_score` of the matches belonging to each
//! requirement category. A category that has requirements but no surviving
//! match reports [`CategoryCoverage::average_score`] as `None` ("no data"),
//! never `0.0`.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::matching::Match;
use crate::model::{Category, Requirement};

/// Coverage of one requirement category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCoverage {
    pub category: Category,
    /// `None` when no match survived for any requirement in the category.
    pub average_score: Option<f32>,
    pub requirement_count: usize,
    pub match_count: usize,
}

impl CategoryCoverage {
    pub fn has_data(&self) -> bool {
        self.average_score.is_some()
    }
}

/// Coverage for every category that has at least one requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub categories: Vec<CategoryCoverage>,
}

impl CoverageReport {
    pub fn get(&self, category: Category) -> Option<&CategoryCoverage> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Average score for `category`; `None` if absent or without data.
    pub fn average(&self, category: Category) -> Option<f32> {
        self.get(category).and_then(|c| c.average_score)
    }

    /// Categories with no data or an average below `threshold`.
    pub fn gaps(&self, threshold: f32) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|c| c.average_score.is_none_or(|avg| avg < threshold))
            .map(|c| c.category)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Groups matches by their requirement's category and averages `final_score`.
///
/// Matches whose requirement id is not in `requirements` are ignored. When an
/// id repeats, its first occurrence decides the category.
pub fn aggregate(matches: &[Match], requirements: &[Requirement]) -> CoverageReport {
    let mut category_of: HashMap<&str, Category> = HashMap::with_capacity(requirements.len());
    for r in requirements {
        category_of.entry(r.id.as_str()).or_insert(r.category);
    }

    #[derive(Default)]
    struct Bucket {
        requirements: usize,
        matches: usize,
        total: f64,
    }

    let mut buckets: BTreeMap<Category, Bucket> = BTreeMap::new();
    for category in category_of.values() {
        buckets.entry(*category).or_default().requirements += 1;
    }

    for m in matches {
        match category_of.get(m.requirement_id.as_str()) {
            Some(category) => {
                let bucket = buckets.entry(*category).or_default();
                bucket.matches += 1;
                bucket.total += f64::from(m.final_score);
            }
            None => debug!(
                requirement_id = %m.requirement_id,
                "Ignoring match for unknown requirement in coverage"
            ),
        }
    }

    let categories = buckets
        .into_iter()
        .map(|(category, bucket)| CategoryCoverage {
            category,
            average_score: (bucket.matches > 0)
                .then(|| (bucket.total / bucket.matches as f64) as f32),
            requirement_count: bucket.requirements,
            match_count: bucket.matches,
        })
        .collect();

    CoverageReport { categories }
}
