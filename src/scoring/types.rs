use serde::Serialize;

use crate::constants::{GOOD_MATCH_THRESHOLD, PARTIAL_MATCH_THRESHOLD, STRONG_MATCH_THRESHOLD};

/// Confidence band of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Weak,
    Partial,
    Good,
    Strong,
}

impl MatchTier {
    /// `>= 0.80` strong, `[0.50, 0.80)` good, `[0.30, 0.50)` partial, else weak.
    pub fn from_score(score: f32) -> Self {
        if score >= STRONG_MATCH_THRESHOLD {
            MatchTier::Strong
        } else if score >= GOOD_MATCH_THRESHOLD {
            MatchTier::Good
        } else if score >= PARTIAL_MATCH_THRESHOLD {
            MatchTier::Partial
        } else {
            MatchTier::Weak
        }
    }

    /// Human-readable reasoning text.
    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Strong => "strong match",
            MatchTier::Good => "good match",
            MatchTier::Partial => "partial match",
            MatchTier::Weak => "weak match",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of scoring one requirement against one service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Cosine similarity in `[0, 1]`.
    pub raw_score: f32,
    pub category_bonus_applied: bool,
    /// `min(1.0, raw_score + bonus)` when the bonus applies, else `raw_score`.
    pub final_score: f32,
}

impl ScoreBreakdown {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.final_score)
    }

    pub fn reasoning(&self) -> &'static str {
        self.tier().label()
    }
}
