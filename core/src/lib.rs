//! misplete-core
//!
//! Candidate model, fuzzy scoring and ranking shared by the misplete
//! autocomplete widget and its tools.
//!
//! Public API:
//! - `Candidate` - One selectable entity with one or more synonyms
//! - `ScoredCandidate` / `Ranking` - Scoring results for one query
//! - `Scorer` / `EditDistanceScorer` - Candidate scoring by edit distance
//! - `MemoizedScorer` - LRU-cached scorer wrapper
//! - `RankingEngine` - Scores and sorts a candidate set
//! - `Config` - Configuration loaded from TOML
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod candidate;
pub use candidate::{
    load_candidates, parse_candidates_json, parse_candidates_toml, validate_all, Candidate,
    Ranking, ScoredCandidate,
};

pub mod distance;
pub use distance::{levenshtein, DistanceFn};

pub mod scorer;
pub use scorer::{EditDistanceScorer, ScoreFn, Scorer};

pub mod cache;
pub use cache::{MemoizedScorer, DEFAULT_CACHE_SIZE};

pub mod ranking;
pub use ranking::{DefaultScorer, RankingEngine};

/// Default render cap. The dropdown stops once an item index exceeds it.
pub const DEFAULT_MAX_ITEMS: usize = 8;

/// Configuration for ranking and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Render cap: items are produced while `index <= max_items`, so up to
    /// `max_items + 1` suggestions are shown.
    pub max_items: usize,

    /// Maximum number of entries in the `(query, candidate)` -> score cache
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize a string for matching: trim surrounding whitespace and
    /// fold case. No Unicode composition is applied.
    pub fn normalize(s: &str) -> String {
        s.trim().to_lowercase()
    }
}
