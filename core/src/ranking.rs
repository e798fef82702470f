// core/src/ranking.rs
//
// Scores and orders a whole candidate set for one query.

use crate::cache::MemoizedScorer;
use crate::candidate::{Candidate, Ranking};
use crate::scorer::{EditDistanceScorer, Scorer};
use crate::{Config, Result};
use tracing::debug;

/// Default scorer: the built-in edit distance scorer behind an LRU cache.
pub type DefaultScorer = MemoizedScorer<EditDistanceScorer>;

/// Ranking engine generic over its scorer.
///
/// The ranking is all-or-nothing: if any candidate fails to score, no
/// partial ranking is returned.
pub struct RankingEngine<S> {
    scorer: S,
}

impl RankingEngine<DefaultScorer> {
    /// Engine with the memoized built-in scorer sized from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::new(MemoizedScorer::with_capacity(
            EditDistanceScorer::new(),
            config.max_cache_size,
        ))
    }
}

impl Default for RankingEngine<DefaultScorer> {
    fn default() -> Self {
        Self::new(MemoizedScorer::default())
    }
}

impl<S: Scorer> RankingEngine<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Rank `candidates` against `query`, best match first.
    ///
    /// An empty query yields an empty ranking. Equal scores keep their
    /// original relative order.
    pub fn rank(&self, query: &str, candidates: &[Candidate]) -> Result<Ranking> {
        if query.is_empty() {
            return Ok(Ranking::new());
        }

        let mut ranking = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| self.scorer.score(query, c).map_err(|e| e.at_index(i)))
            .collect::<Result<Ranking>>()?;

        // sort_by is stable
        ranking.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            query,
            candidates = candidates.len(),
            best = ranking.first().map(|c| c.display_value.as_str()),
            "ranked candidates"
        );
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::ScoredCandidate;
    use crate::error::Error;

    fn countries() -> Vec<Candidate> {
        vec![
            Candidate::new(["Canada", "CA"]),
            Candidate::new(["United States", "USA", "US"]),
        ]
    }

    #[test]
    fn test_empty_query_is_empty_ranking() {
        let engine = RankingEngine::default();
        assert!(engine.rank("", &countries()).unwrap().is_empty());
        // Nothing was scored
        assert_eq!(engine.scorer().cache_stats(), (0, 0));
    }

    #[test]
    fn test_usa_ranks_united_states_first() {
        let engine = RankingEngine::default();
        let ranking = engine.rank("usa", &countries()).unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0], ScoredCandidate::new("United States", 0));
        assert_eq!(ranking[1].display_value, "Canada");
        assert!(ranking[1].score < 0);
    }

    #[test]
    fn test_whitespace_query_is_scored() {
        let engine = RankingEngine::default();
        assert_eq!(engine.rank("  ", &countries()).unwrap().len(), 2);
    }

    #[test]
    fn test_failure_returns_no_partial_ranking() {
        let engine = RankingEngine::default();
        let mut set = countries();
        set.insert(1, Candidate::new(Vec::<String>::new()));

        let err = engine.rank("usa", &set).unwrap_err();
        assert!(matches!(err, Error::InvalidCandidate { index: Some(1) }));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let engine = RankingEngine::new(EditDistanceScorer::new());
        let set = vec![
            Candidate::new(["bb"]),
            Candidate::new(["ab"]),
            Candidate::new(["ba"]),
            Candidate::new(["aa"]),
        ];
        // "aa": bb=-2, ab=-1, ba=-1, aa=0
        let ranking = engine.rank("aa", &set).unwrap();
        let names: Vec<_> = ranking.iter().map(|c| c.display_value.as_str()).collect();
        assert_eq!(names, vec!["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_with_config_sizes_cache() {
        let config = Config {
            max_cache_size: 16,
            ..Config::default()
        };
        let engine = RankingEngine::with_config(&config);
        assert_eq!(engine.scorer().cache_capacity(), 16);
    }
}
