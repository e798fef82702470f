// core/src/scorer.rs
//
// Scores one candidate against one query by edit distance over its synonyms.

use crate::candidate::{Candidate, ScoredCandidate};
use crate::distance::{levenshtein, DistanceFn};
use crate::error::{Error, Result};
use crate::utils::normalize;

/// Trait for anything that can score a candidate against a query.
///
/// Implementations must be pure: the same `(query, candidate)` pair always
/// yields the same result, so results can be memoized.
pub trait Scorer {
    fn score(&self, query: &str, candidate: &Candidate) -> Result<ScoredCandidate>;
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(&self, query: &str, candidate: &Candidate) -> Result<ScoredCandidate> {
        (**self).score(query, candidate)
    }
}

/// Adapter turning a plain function or closure into a `Scorer`.
///
/// ```
/// use misplete_core::{Candidate, Result, ScoreFn, ScoredCandidate, Scorer};
///
/// let by_length = ScoreFn(|query: &str, c: &Candidate| -> Result<ScoredCandidate> {
///     let name = c.display_value().unwrap_or_default();
///     Ok(ScoredCandidate::new(name, -(name.len().abs_diff(query.len()) as i32)))
/// });
/// assert_eq!(by_length.score("abc", &Candidate::new(["xyz"])).unwrap().score, 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoreFn<F>(pub F);

impl<F> Scorer for ScoreFn<F>
where
    F: Fn(&str, &Candidate) -> Result<ScoredCandidate>,
{
    fn score(&self, query: &str, candidate: &Candidate) -> Result<ScoredCandidate> {
        (self.0)(query, candidate)
    }
}

/// Built-in scorer: minimal edit distance between the normalized query and
/// any normalized synonym, negated.
#[derive(Debug, Clone, Copy)]
pub struct EditDistanceScorer {
    distance: DistanceFn,
}

impl EditDistanceScorer {
    pub fn new() -> Self {
        Self {
            distance: levenshtein,
        }
    }

    /// Use a different distance function.
    pub fn with_distance(distance: DistanceFn) -> Self {
        Self { distance }
    }
}

impl Default for EditDistanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for EditDistanceScorer {
    fn score(&self, query: &str, candidate: &Candidate) -> Result<ScoredCandidate> {
        let display_value = candidate
            .display_value()
            .ok_or(Error::InvalidCandidate { index: None })?;

        let query = normalize(query);
        let mut best: Option<usize> = None;

        for synonym in candidate.synonyms() {
            let d = (self.distance)(&normalize(synonym), &query);
            if best.map_or(true, |b| d < b) {
                best = Some(d);
                if d == 0 {
                    break;
                }
            }
        }

        // display_value() succeeded, so at least one synonym was scanned
        let distance = best.unwrap_or_default();
        let score = i32::try_from(distance).map_or(i32::MIN, |d| -d);
        Ok(ScoredCandidate::new(display_value, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_exact_match_on_any_synonym() {
        let scorer = EditDistanceScorer::new();
        let c = Candidate::new(["United States", "USA", "US"]);
        let scored = scorer.score("usa", &c).unwrap();
        assert_eq!(scored.score, 0);
        assert_eq!(scored.display_value, "United States");
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let scorer = EditDistanceScorer::new();
        let c = Candidate::new(["  Canada ", "CA"]);
        assert_eq!(scorer.score("  CANADA", &c).unwrap().score, 0);
        // The display value keeps its original spelling.
        assert_eq!(scorer.score("canada", &c).unwrap().display_value, "  Canada ");
    }

    #[test]
    fn test_minimum_over_synonyms() {
        let scorer = EditDistanceScorer::new();
        let c = Candidate::new(["Germany", "DE", "Deutschland"]);
        // "deu" -> "de" is 1, "deutschland" is 8, "germany" is 7
        assert_eq!(scorer.score("deu", &c).unwrap().score, -1);
    }

    #[test]
    fn test_empty_candidate_fails() {
        let scorer = EditDistanceScorer::new();
        let c = Candidate::new(Vec::<String>::new());
        assert!(matches!(
            scorer.score("usa", &c),
            Err(Error::InvalidCandidate { .. })
        ));
    }

    thread_local! {
        static CALLS: Cell<usize> = const { Cell::new(0) };
    }

    fn counting_distance(a: &str, b: &str) -> usize {
        CALLS.with(|c| c.set(c.get() + 1));
        levenshtein(a, b)
    }

    #[test]
    fn test_short_circuits_on_exact_match() {
        let scorer = EditDistanceScorer::with_distance(counting_distance);
        let c = Candidate::new(["United States", "USA", "US", "America"]);

        CALLS.with(|c| c.set(0));
        assert_eq!(scorer.score("usa", &c).unwrap().score, 0);
        // Stops after "USA"; "US" and "America" are never compared.
        assert_eq!(CALLS.with(|c| c.get()), 2);
    }

    #[test]
    fn test_boxed_scorer() {
        let scorer: Box<dyn Scorer> = Box::new(EditDistanceScorer::new());
        assert_eq!(scorer.score("ca", &Candidate::new(["CA"])).unwrap().score, 0);
    }

    #[test]
    fn test_closure_scorer() {
        let fixed = ScoreFn(|_: &str, c: &Candidate| -> Result<ScoredCandidate> {
            Ok(ScoredCandidate::new(c.display_value().unwrap_or_default(), -5))
        });
        let scored = fixed.score("anything", &Candidate::new(["Peru"])).unwrap();
        assert_eq!(scored.score, -5);
        assert_eq!(scored.display_value, "Peru");
    }
}
