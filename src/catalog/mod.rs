//! Service catalog loading and validation.
//!
//! A catalog is built once per session from a JSON array of service objects.
//! Invalid entries are dropped and reported as [`CatalogValidationWarning`]s;
//! the load only fails when nothing valid remains.

pub mod error;
pub mod types;


pub use error::{CatalogError, CatalogResult, EntryRejection};
pub use types::{CatalogValidationWarning, ServiceCatalogEntry};

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::document::build_document;
use crate::hashing::fingerprint_documents;
use types::RawCatalogEntry;

/// Immutable, validated collection of service offerings.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<ServiceCatalogEntry>,
    index: HashMap<String, usize>,
    fingerprint: String,
}

/// Result of a successful load: the catalog plus the entries that were dropped.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: ServiceCatalog,
    pub warnings: Vec<CatalogValidationWarning>,
}

impl ServiceCatalog {
    /// Parses a JSON catalog source.
    ///
    /// A blank source holds no entries and fails as an empty catalog.
    pub fn load(source: &str) -> CatalogResult<CatalogLoad> {
        let values: Vec<serde_json::Value> = if source.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(source)?
        };

        let mut candidates = Vec::with_capacity(values.len());
        let mut warnings = Vec::new();

        for (index, value) in values.into_iter().enumerate() {
            let id = value
                .get("id")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);

            let parsed = serde_json::from_value::<RawCatalogEntry>(value)
                .map_err(|e| EntryRejection::Unparseable(e.to_string()))
                .and_then(RawCatalogEntry::into_entry);

            match parsed {
                Ok(entry) => candidates.push((index, entry)),
                Err(reason) => warnings.push(CatalogValidationWarning { index, id, reason }),
            }
        }

        Self::assemble(candidates, warnings)
    }

    /// Reads and parses a JSON catalog file.
    pub fn load_from_path(path: impl AsRef<Path>) -> CatalogResult<CatalogLoad> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::load(&source)
    }

    /// Builds a catalog from already-typed entries, applying the same validation.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ServiceCatalogEntry>,
    ) -> CatalogResult<CatalogLoad> {
        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            match entry.validate() {
                Ok(()) => candidates.push((index, entry)),
                Err(reason) => warnings.push(CatalogValidationWarning {
                    index,
                    id: Some(entry.id),
                    reason,
                }),
            }
        }

        Self::assemble(candidates, warnings)
    }

    fn assemble(
        candidates: Vec<(usize, ServiceCatalogEntry)>,
        mut warnings: Vec<CatalogValidationWarning>,
    ) -> CatalogResult<CatalogLoad> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(candidates.len());

        for (index, entry) in candidates {
            if !seen.insert(entry.id.clone()) {
                warnings.push(CatalogValidationWarning {
                    index,
                    id: Some(entry.id.clone()),
                    reason: EntryRejection::DuplicateId(entry.id),
                });
                continue;
            }
            entries.push(entry);
        }

        warnings.sort_by_key(|w| w.index);
        for warning in &warnings {
            warn!(
                index = warning.index,
                id = warning.id.as_deref().unwrap_or("<unknown>"),
                reason = %warning.reason,
                "Skipping invalid catalog entry"
            );
        }

        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog {
                rejected: warnings.len(),
            });
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        let documents: Vec<String> = entries.iter().map(build_document).collect();
        let fingerprint = fingerprint_documents(documents.iter().map(String::as_str));

        info!(
            entries = entries.len(),
            rejected = warnings.len(),
            fingerprint = %fingerprint,
            "Service catalog loaded"
        );

        Ok(CatalogLoad {
            catalog: Self {
                entries,
                index,
                fingerprint,
            },
            warnings,
        })
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServiceCatalogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ServiceCatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// BLAKE3 fingerprint over every entry's document text, in source order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Document text of every entry, in source order (the vectorizer corpus).
    pub fn documents(&self) -> Vec<String> {
        self.entries.iter().map(build_document).collect()
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a ServiceCatalogEntry;
    type IntoIter = std::slice::Iter<'a, ServiceCatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializable view of a catalog for listing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary<'a> {
    pub fingerprint: &'a str,
    pub entries: &'a [ServiceCatalogEntry],
    pub warnings: &'a [CatalogValidationWarning],
}
