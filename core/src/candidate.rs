//! Candidate types for autocomplete ranking.
//!
//! This module provides:
//! - `Candidate`: One selectable entity, spelled by one or more synonyms
//! - `ScoredCandidate`: A candidate's score against a query plus its display value
//! - `Ranking`: The scored candidate set for one query, best first
//! - Loaders for candidate sets stored as JSON or TOML

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One selectable entity identified by an ordered list of synonyms.
///
/// `synonyms[0]` is the canonical display value. Every synonym, including
/// the first, is a match target. Serialized as a plain array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate {
    synonyms: Vec<String>,
}

impl Candidate {
    /// Build a candidate from its synonyms. No validation happens here; an
    /// empty candidate is rejected when it is scored or validated.
    pub fn new<I, S>(synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// The canonical display value (first synonym).
    pub fn display_value(&self) -> Option<&str> {
        self.synonyms.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    /// Fail with `InvalidCandidate` when there are no synonyms.
    pub fn validate(&self) -> Result<()> {
        if self.synonyms.is_empty() {
            Err(Error::InvalidCandidate { index: None })
        } else {
            Ok(())
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Candidate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A candidate scored against one query.
///
/// `score` is the negated minimal edit distance, so 0 is an exact match and
/// more negative is worse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub score: i32,
    pub display_value: String,
}

impl ScoredCandidate {
    pub fn new<T: Into<String>>(display_value: T, score: i32) -> Self {
        ScoredCandidate {
            score,
            display_value: display_value.into(),
        }
    }

    pub fn is_exact(&self) -> bool {
        self.score == 0
    }
}

/// Scored candidates for one query, sorted by score descending.
pub type Ranking = Vec<ScoredCandidate>;

/// Check every candidate of a set, reporting the first empty one by position.
pub fn validate_all(candidates: &[Candidate]) -> Result<()> {
    for (i, candidate) in candidates.iter().enumerate() {
        candidate.validate().map_err(|e| e.at_index(i))?;
    }
    Ok(())
}

#[derive(Deserialize)]
struct CandidateFile {
    candidates: Vec<Candidate>,
}

/// Parse a JSON array of synonym arrays, e.g. `[["Canada", "CA"]]`.
pub fn parse_candidates_json(content: &str) -> Result<Vec<Candidate>> {
    let candidates: Vec<Candidate> = serde_json::from_str(content)?;
    validate_all(&candidates)?;
    Ok(candidates)
}

/// Parse a TOML document with a top-level `candidates` array of synonym arrays.
pub fn parse_candidates_toml(content: &str) -> Result<Vec<Candidate>> {
    let file: CandidateFile = toml::from_str(content)?;
    validate_all(&file.candidates)?;
    Ok(file.candidates)
}

/// Load a candidate set from disk. `.toml` files are read as TOML, anything
/// else as JSON.
pub fn load_candidates<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        parse_candidates_toml(&content)
    } else {
        parse_candidates_json(&content)
    }
}
