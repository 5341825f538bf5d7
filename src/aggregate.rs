use indexmap::{IndexMap, IndexSet};

use placename_types::{PlaceNameRecord, SourceSummary};

use crate::candidate::detect;
use crate::lexicon::Rules;
use crate::normalize::strip_separators;
use crate::resolve::resolve;

/// Joins the deduplicated lines of a bucket.
const TEXT_JOINER: &str = " ";

/// (placename, source)
type BucketKey = (String, String);

// ── Per-document scan state ──────────────────────────────────────────

/// State of one left-to-right pass over a document.
///
/// Buckets are keyed by (placename, source) in creation order, each an
/// ordered set of lines, so a recurring name appends to the bucket it
/// already has and repeated lines are stored once.
#[derive(Debug)]
pub struct DocumentScan {
    source: String,
    /// Slot of the bucket that continuation lines attach to
    open: Option<usize>,
    buckets: IndexMap<BucketKey, IndexSet<String>>,
    lines: usize,
}

impl DocumentScan {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            open: None,
            buckets: IndexMap::new(),
            lines: 0,
        }
    }

    /// The name continuation lines currently attach to.
    pub fn current_name(&self) -> Option<&str> {
        let slot = self.open?;
        self.buckets
            .get_index(slot)
            .map(|((placename, _), _)| placename.as_str())
    }

    fn push(&mut self, slot: usize, line: &str) {
        if line.is_empty() {
            return;
        }
        if let Some((_, lines)) = self.buckets.get_index_mut(slot) {
            if !lines.contains(line) {
                lines.insert(line.to_string());
            }
        }
    }

    /// Feed one raw line.
    ///
    /// A line that opens a new name contributes only the text after the
    /// name (taken from the original line, not the normalized head). Any
    /// other line continues the open record, or is dropped when no record
    /// is open yet.
    pub fn feed(&mut self, line: &str, rules: &Rules) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.lines += 1;

        match detect(line, rules) {
            Some(name) => {
                // The normalized head is a suffix of the line, so the name
                // is always found; the first occurrence is what counts.
                let residual = match line.find(name.as_str()) {
                    Some(idx) => strip_separators(&line[idx + name.len()..]),
                    None => "",
                };
                let entry = self.buckets.entry((name, self.source.clone()));
                let slot = entry.index();
                entry.or_default();
                self.push(slot, residual);
                self.open = Some(slot);
            }
            None => {
                if let Some(slot) = self.open {
                    self.push(slot, strip_separators(line));
                }
            }
        }
    }

    /// Close the pass: one unresolved record per bucket with text.
    pub fn into_records(self) -> Vec<PlaceNameRecord> {
        self.buckets
            .into_iter()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|((placename, source), lines)| {
                let text = lines.into_iter().collect::<Vec<_>>().join(TEXT_JOINER);
                PlaceNameRecord {
                    placename,
                    text,
                    source,
                }
            })
            .collect()
    }
}

// ── Document-level entry points ──────────────────────────────────────

/// Records of one document plus what happened on the way.
#[derive(Debug, Clone)]
pub struct DocumentExtraction {
    pub records: Vec<PlaceNameRecord>,
    pub summary: SourceSummary,
}

/// Run the line pass without re-resolution.
pub fn collect_document<S: AsRef<str>>(
    lines: &[S],
    source: &str,
    rules: &Rules,
) -> DocumentExtraction {
    let mut scan = DocumentScan::new(source);
    for line in lines {
        scan.feed(line.as_ref(), rules);
    }

    let mut summary = SourceSummary {
        source: source.to_string(),
        lines: scan.lines,
        buckets: scan.buckets.len(),
        ..SourceSummary::default()
    };
    let records = scan.into_records();
    summary.records = records.len();

    DocumentExtraction { records, summary }
}

/// The unresolved records of one document.
pub fn collect_records<S: AsRef<str>>(
    lines: &[S],
    source: &str,
    rules: &Rules,
) -> Vec<PlaceNameRecord> {
    collect_document(lines, source, rules).records
}

/// Run the line pass, then re-resolve every closed record.
pub fn extract_document<S: AsRef<str>>(
    lines: &[S],
    source: &str,
    rules: &Rules,
) -> DocumentExtraction {
    let DocumentExtraction {
        records: raw,
        mut summary,
    } = collect_document(lines, source, rules);

    let mut records = Vec::with_capacity(raw.len());
    for record in raw {
        match resolve(record, rules) {
            Some(record) => records.push(record),
            None => summary.discarded += 1,
        }
    }
    summary.records = records.len();

    DocumentExtraction { records, summary }
}

/// Extract the resolved place-name records of one document.
pub fn extract<S: AsRef<str>>(lines: &[S], source: &str, rules: &Rules) -> Vec<PlaceNameRecord> {
    extract_document(lines, source, rules).records
}
