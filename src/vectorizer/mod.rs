//! TF-IDF vector space over the service catalog.
//!
//! [`TfIdfVectorizer::fit`] runs once per catalog load and produces an
//! immutable [`VectorSpace`]. [`VectorSpace::transform`] takes `&self` and has
//! no side effects, so one space can be shared across concurrent matching
//! passes behind an `Arc`.
//!
//! # Weighting
//!
//! - terms are unigrams and bigrams of stopword-filtered, lowercased tokens
//! - the vocabulary keeps the `max_features` most frequent terms (ties by term)
//! - `idf = ln((1 + n) / (1 + df)) + 1`, term weight `count * idf`
//! - vectors are L2-normalised
//!
//! When the corpus yields no terms at all the space is *degenerate* and every
//! transform returns the zero vector, which scores as "no match" downstream.

pub mod space;
pub mod tokenizer;


pub use space::{SparseVector, VectorSpace, cosine_similarity};

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::constants::DEFAULT_MAX_FEATURES;

/// Longest n-gram extracted by default.
pub const DEFAULT_MAX_NGRAM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Vocabulary cap.
    pub max_features: usize,
    /// Longest n-gram (1 = unigrams only).
    pub max_ngram: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            max_ngram: DEFAULT_MAX_NGRAM,
        }
    }
}

impl VectorizerConfig {
    pub fn max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
}

impl TfIdfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Builds a vector space from the corpus documents.
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> VectorSpace {
        let max_ngram = self.config.max_ngram.max(1);
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for document in corpus {
            let terms = tokenizer::terms(document.as_ref(), max_ngram);
            let mut seen: HashSet<&str> = HashSet::with_capacity(terms.len());
            for term in &terms {
                *corpus_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)));
        let dropped = ranked.len().saturating_sub(self.config.max_features);
        ranked.truncate(self.config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort_unstable();

        let n = corpus.len() as f32;
        let idf: Vec<f32> = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f32;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let space = VectorSpace::new(terms, idf, max_ngram, corpus.len());

        if space.is_degenerate() {
            warn!(
                documents = corpus.len(),
                "Corpus produced an empty vocabulary; all vectors will be zero"
            );
        } else {
            debug!(
                documents = corpus.len(),
                vocabulary = space.dimension(),
                dropped_terms = dropped,
                "Vector space fitted"
            );
        }

        space
    }
}
