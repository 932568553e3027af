//! BLAKE3 fingerprints for catalogs and match output.
//!
//! Fingerprints tie an export to the exact catalog documents and match list
//! that produced it. They are content identifiers, not security checks.

use blake3::Hasher;

#[inline]
pub fn hash_document(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Fingerprints an ordered sequence of documents as a 64-char hex string.
///
/// Each document is length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint_documents<'a>(documents: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = Hasher::new();
    for document in documents {
        hasher.update(&(document.len() as u64).to_le_bytes());
        hasher.update(document.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Hex digest of arbitrary bytes (e.g. serialized match output).
#[inline]
pub fn digest_hex(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
