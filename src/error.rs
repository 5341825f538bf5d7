use std::path::PathBuf;

/// Failures outside the line-scanning algorithms: reading documents,
/// loading lookup tables, and writing the output tables.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot build pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("lookup table `{0}` must not be empty")]
    EmptyTable(&'static str),
}

impl ExtractError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
