use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::ExtractError;

/// A plain-text source document discovered in the corpus.
#[derive(Debug, Clone)]
pub struct Document {
    /// File stem, e.g. "12" for "12.txt"
    pub source: String,
    pub path: PathBuf,
}

impl Document {
    pub fn read_lines(&self) -> Result<Vec<String>, ExtractError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ExtractError::io(&self.path, e))?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// Discover the `.txt` documents directly under `root`.
///
/// Expected layout (one file per converted page):
///   {root}/{N}.txt
///
/// Documents come back in processing order: numeric stems by value first,
/// then everything else lexically.
pub fn scan_documents(root: &Path) -> Result<Vec<Document>, ExtractError> {
    // Surface a missing corpus instead of silently scanning nothing.
    fs::read_dir(root).map_err(|e| ExtractError::io(root, e))?;

    let mut documents: Vec<Document> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let path = e.path().to_path_buf();
            if path.extension().and_then(|x| x.to_str()) != Some("txt") {
                return None;
            }
            let Some(source) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping document with non UTF-8 name");
                return None;
            };
            Some(Document {
                source: source.to_string(),
                path,
            })
        })
        .collect();

    documents.sort_by(|a, b| compare_sources(&a.source, &b.source));
    Ok(documents)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Numeric(u64),
    Lexical(&'a str),
}

fn sort_key(stem: &str) -> SortKey<'_> {
    if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = stem.parse() {
            return SortKey::Numeric(n);
        }
    }
    SortKey::Lexical(stem)
}

/// "2" < "10" < "010a" < "目录"; equal numbers fall back to the raw stem.
fn compare_sources(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}
