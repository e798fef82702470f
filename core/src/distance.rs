//! Edit distance used by the built-in scorer.

/// Signature of a distance function usable by `EditDistanceScorer`.
///
/// Implementations must return 0 for identical inputs. Matching assumes, but
/// does not check, that the distance is symmetric.
pub type DistanceFn = fn(&str, &str) -> usize;

/// Levenshtein distance counted over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_zero() {
        assert_eq!(levenshtein("usa", "usa"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_single_edits() {
        assert_eq!(levenshtein("usa", "us"), 1);
        assert_eq!(levenshtein("canada", "canade"), 1);
        assert_eq!(levenshtein("ca", "xca"), 1);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("", "日本"), 2);
    }
}
