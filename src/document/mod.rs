//! Vectorizer input text for services and requirements.
//!
//! Field order is fixed:
//!
//! - services: name, description, capabilities (sorted), tags (sorted)
//! - requirements: description, category label
//!
//! Whitespace runs collapse to a single space, so the same entry always yields
//! the same string regardless of how its lists were ordered on input.


use crate::catalog::ServiceCatalogEntry;
use crate::model::Requirement;

/// Anything that can be turned into a vectorizer document.
pub trait DocumentSource {
    /// Fields in their fixed order. Unordered collections must already be sorted.
    fn document_fields(&self) -> Vec<&str>;
}

impl DocumentSource for ServiceCatalogEntry {
    fn document_fields(&self) -> Vec<&str> {
        let mut capabilities: Vec<&str> = self.capabilities.iter().map(String::as_str).collect();
        capabilities.sort_unstable();

        let mut fields = Vec::with_capacity(2 + capabilities.len() + self.tags.len());
        fields.push(self.name.as_str());
        fields.push(self.description.as_str());
        fields.extend(capabilities);
        // BTreeSet iterates in sorted order.
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl DocumentSource for Requirement {
    fn document_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.category.label()]
    }
}

/// Builds the normalized document text for a service or requirement.
pub fn build_document<D: DocumentSource + ?Sized>(source: &D) -> String {
    let fields = source.document_fields();
    let mut out = String::new();
    for word in fields.iter().flat_map(|f| f.split_whitespace()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
