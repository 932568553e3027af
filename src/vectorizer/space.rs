use std::collections::{BTreeMap, HashMap};

use super::tokenizer;

/// Sparse, non-negative vector. Entries are sorted by dimension index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    dimension: usize,
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// All-zero vector in a space of `dimension` terms.
    pub fn zero(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, w)| w == 0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ai, av) = self.entries[i];
            let (bi, bv) = other.entries[j];
            match ai.cmp(&bi) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += av * bv;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Dense copy, mainly for debugging and tests.
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dimension];
        for &(idx, w) in &self.entries {
            if let Some(slot) = dense.get_mut(idx as usize) {
                *slot = w;
            }
        }
        dense
    }
}

/// Cosine similarity clamped to `[0, 1]`. Zero vectors score `0.0`.
#[inline]
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Fitted vocabulary and IDF weights.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    terms: Vec<String>,
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    max_ngram: usize,
    documents: usize,
}

impl VectorSpace {
    pub(super) fn new(terms: Vec<String>, idf: Vec<f32>, max_ngram: usize, documents: usize) -> Self {
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self {
            terms,
            vocabulary,
            idf,
            max_ngram,
            documents,
        }
    }

    /// Number of vocabulary terms.
    pub fn dimension(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents the space was fitted on.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// `true` when no term survived fitting.
    pub fn is_degenerate(&self) -> bool {
        self.terms.is_empty()
    }

    /// Vocabulary in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&i| self.idf[i as usize])
    }

    /// Projects `text` into the space as an L2-normalised TF-IDF vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        if self.is_degenerate() {
            return SparseVector::zero(0);
        }

        let mut counts: BTreeMap<u32, f32> = BTreeMap::new();
        for term in tokenizer::terms(text, self.max_ngram) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(u32, f32)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx as usize]))
            .collect();

        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }

        SparseVector {
            dimension: self.dimension(),
            entries,
        }
    }
}
