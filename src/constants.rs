//! Cross-cutting, shared constants.
//!
//! Scoring bands and defaults live here so the scorer, matcher, tracker and
//! config agree on the same numbers.

/// Score increment applied when requirement and service categories agree.
pub const CATEGORY_BONUS: f32 = 0.15;

/// Upper bound on the vectorizer vocabulary.
pub const DEFAULT_MAX_FEATURES: usize = 500;

/// Matches kept per requirement when producing suggestion lists.
pub const DEFAULT_TOP_N: usize = 3;

/// Matches kept per requirement when producing the coverage summary.
pub const BEST_MATCH_TOP_N: usize = 1;

/// Default minimum `final_score` a match must reach to be returned.
pub const DEFAULT_MIN_SCORE: f32 = 0.0;

/// Default cutoff for bulk auto-approval.
pub const DEFAULT_APPROVAL_THRESHOLD: f32 = 0.80;

/// Lower bound of the "strong match" band.
pub const STRONG_MATCH_THRESHOLD: f32 = 0.80;
/// Lower bound of the "good match" band.
pub const GOOD_MATCH_THRESHOLD: f32 = 0.50;
/// Lower bound of the "partial match" band.
pub const PARTIAL_MATCH_THRESHOLD: f32 = 0.30;

/// Returns `true` if `value` is a finite number in `[0, 1]`.
#[inline]
pub fn is_unit_interval(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
