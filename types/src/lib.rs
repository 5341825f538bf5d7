use serde::{Deserialize, Serialize};

// ── Extracted record ─────────────────────────────────────────────────────

/// A place name together with every line attributed to it in one document.
///
/// Serialized field order matches the output table columns:
/// `placename, text, source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceNameRecord {
    pub placename: String,
    /// Attributed lines, deduplicated, joined by a single space
    pub text: String,
    /// Document identifier (file stem)
    pub source: String,
}

impl PlaceNameRecord {
    pub fn new(
        placename: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            placename: placename.into(),
            text: text.into(),
            source: source.into(),
        }
    }
}

// ── Per-document statistics ──────────────────────────────────────────────

/// What one document contributed to the extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub source: String,
    /// Non-empty lines seen
    pub lines: usize,
    /// Distinct (placename, source) buckets opened
    pub buckets: usize,
    /// Records emitted
    pub records: usize,
    /// Buckets dropped because no valid name could be resolved
    pub discarded: usize,
}
