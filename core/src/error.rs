//! Error taxonomy for the core crate.
//!
//! Only pure-data failures live here. An out-of-range highlight request is
//! not an error: the selection state machine ignores it.

use thiserror::Error;

/// Errors produced while scoring, ranking or loading candidate data.
#[derive(Debug, Error)]
pub enum Error {
    /// A candidate with zero synonyms has no minimal distance.
    #[error("invalid candidate{}: a candidate needs at least one synonym", fmt_index(.index))]
    InvalidCandidate {
        /// Position of the candidate in its set, when known.
        index: Option<usize>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("cannot serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn fmt_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at position {}", i),
        None => String::new(),
    }
}

impl Error {
    /// Attach a set position to an `InvalidCandidate` that has none.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Error::InvalidCandidate { index: None } => Error::InvalidCandidate { index: Some(index) },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
