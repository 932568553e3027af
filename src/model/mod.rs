//! Domain types shared by every stage of the matching pipeline.

mod category;


pub use category::{Category, CategoryParseError};

use serde::{Deserialize, Serialize};

/// A requirement extracted from an RFP by the upstream extractor.
///
/// The engine treats requirements as a read-only snapshot for one matching pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub description: String,
    pub category: Category,
    /// Extractor confidence in `[0, 1]`. Carried through, never used for ranking.
    pub confidence: f32,
    /// Page or section reference supplied by the extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Requirement {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        confidence: f32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category,
            confidence,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
