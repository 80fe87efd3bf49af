//! Edit-distance-based title scorers.
//!
//! All scores are on a 0-100 scale and computed on preprocessed strings:
//! lowercased, every non-alphanumeric character replaced by a space, and
//! runs of whitespace collapsed. "Toy Story (1995)" becomes "toy story 1995".
//!
//! The building blocks:
//! - `ratio`: normalized Levenshtein similarity of the whole strings
//! - `partial_ratio`: best `ratio` of the shorter string against any
//!   equally long window of the longer one
//! - `token_sort_ratio`: `ratio` after sorting the words of each string
//! - `token_set_ratio`: compares the shared words against each side's rest
//!
//! `WeightedRatio` blends them depending on how different the lengths are,
//! so that "Toy Story" scores highly against "Toy Story (1995)" while short
//! queries don't match long titles through a single common word.

use crate::traits::Scorer;
use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Lowercase, map non-alphanumerics to spaces, collapse whitespace
pub fn preprocess(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized Levenshtein similarity, 0-100
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best `ratio` of the shorter string against every same-length window of
/// the longer one
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let needle: String = short.iter().collect();
    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        let candidate: String = window.iter().collect();
        let score = ratio(&needle, &candidate);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// `ratio` of the word-sorted strings
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Words split into (shared, only in a, only in b), each sorted and joined
struct TokenSets {
    shared: String,
    diff_a: String,
    diff_b: String,
}

impl TokenSets {
    fn new(a: &str, b: &str) -> Self {
        let set_a: BTreeSet<&str> = a.split_whitespace().collect();
        let set_b: BTreeSet<&str> = b.split_whitespace().collect();
        let join = |words: Vec<&str>| words.join(" ");

        Self {
            shared: join(set_a.intersection(&set_b).copied().collect()),
            diff_a: join(set_a.difference(&set_b).copied().collect()),
            diff_b: join(set_b.difference(&set_a).copied().collect()),
        }
    }

    /// One side's words are all contained in the other's
    fn is_subset(&self) -> bool {
        !self.shared.is_empty() && (self.diff_a.is_empty() || self.diff_b.is_empty())
    }
}

fn joined(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

/// Compares shared words against each side's full word set
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let sets = TokenSets::new(a, b);
    if sets.is_subset() {
        return 100.0;
    }

    let full_a = joined(&sets.shared, &sets.diff_a);
    let full_b = joined(&sets.shared, &sets.diff_b);

    let mut best = ratio(&full_a, &full_b);
    if !sets.shared.is_empty() {
        best = best
            .max(ratio(&sets.shared, &full_a))
            .max(ratio(&sets.shared, &full_b));
    }
    best
}

/// `partial_ratio` over word-sorted and word-set forms
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let sets = TokenSets::new(a, b);
    if sets.is_subset() {
        return 100.0;
    }

    let sorted = partial_ratio(&sorted_tokens(a), &sorted_tokens(b));
    if sets.diff_a.is_empty() || sets.diff_b.is_empty() {
        return sorted;
    }
    sorted.max(partial_ratio(&sets.diff_a, &sets.diff_b))
}

/// Composite scorer weighting whole, partial and word-level similarity by
/// the length ratio of the two strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl WeightedRatio {
    const TOKEN_SCALE: f64 = 0.95;
    const PARTIAL_SCALE: f64 = 0.9;
    const LONG_PARTIAL_SCALE: f64 = 0.6;

    fn score_processed(a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let len_a = a.chars().count() as f64;
        let len_b = b.chars().count() as f64;
        let len_ratio = len_a.max(len_b) / len_a.min(len_b);

        let whole = ratio(a, b);
        if len_ratio < 1.5 {
            let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
            return whole.max(token * Self::TOKEN_SCALE);
        }

        let partial_scale = if len_ratio < 8.0 {
            Self::PARTIAL_SCALE
        } else {
            Self::LONG_PARTIAL_SCALE
        };

        whole
            .max(partial_ratio(a, b) * partial_scale)
            .max(partial_token_ratio(a, b) * Self::TOKEN_SCALE * partial_scale)
    }
}

impl Scorer for WeightedRatio {
    fn name(&self) -> &str {
        "WeightedRatio"
    }

    fn score(&self, query: &str, choice: &str) -> f64 {
        Self::score_processed(&preprocess(query), &preprocess(choice)).clamp(0.0, 100.0)
    }
}

/// Plain `ratio` on preprocessed strings
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRatio;

impl Scorer for SimpleRatio {
    fn name(&self) -> &str {
        "SimpleRatio"
    }

    fn score(&self, query: &str, choice: &str) -> f64 {
        let (a, b) = (preprocess(query), preprocess(choice));
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        ratio(&a, &b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_preprocess() {
        assert_eq!(preprocess("Toy Story (1995)"), "toy story 1995");
        assert_eq!(preprocess("  Amélie  (2001) "), "amélie 2001");
        assert_eq!(preprocess("Se7en"), "se7en");
        assert_eq!(preprocess("!!!"), "");
    }

    #[test]
    fn test_ratio() {
        assert!(close(ratio("matrix", "matrix"), 100.0));
        assert!(close(ratio("abcd", "abcf"), 75.0));
        assert!(close(ratio("", ""), 100.0));
        assert!(close(ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_partial_ratio_finds_substring() {
        assert!(close(partial_ratio("toy story", "toy story 1995"), 100.0));
        assert!(close(partial_ratio("toy story 1995", "toy story"), 100.0));
        assert!(partial_ratio("toy storey", "toy story 1995") < 100.0);
        assert!(close(partial_ratio("", "abc"), 0.0));
    }

    #[test]
    fn test_token_ratios_ignore_word_order() {
        assert!(close(token_sort_ratio("president american", "american president"), 100.0));
        assert!(close(token_set_ratio("matrix the", "the matrix 1999"), 100.0));
        assert!(token_set_ratio("matrix", "godfather") < 50.0);
    }

    #[test]
    fn test_weighted_ratio_title_without_year() {
        let scorer = WeightedRatio;
        assert!(close(scorer.score("Toy Story", "Toy Story (1995)"), 90.0));
        assert!(close(scorer.score("Toy Story (1995)", "Toy Story (1995)"), 100.0));
        assert!(scorer.score("toy story", "Toy Story (1995)") >= 60.0);
    }

    #[test]
    fn test_weighted_ratio_typo() {
        let scorer = WeightedRatio;
        let typo = scorer.score("Matrx", "Matrix, The (1999)");
        assert!(typo >= 60.0, "typo scored {typo}");
        assert!(scorer.score("Matrx", "Godfather, The (1972)") < typo);
    }

    #[test]
    fn test_weighted_ratio_rejects_noise() {
        let scorer = WeightedRatio;
        for title in ["Toy Story (1995)", "Pulp Fiction (1994)", "Forrest Gump (1994)"] {
            assert!(scorer.score("asdfghjkl", title) < 60.0);
        }
        assert_eq!(scorer.score("", "Toy Story (1995)"), 0.0);
        assert_eq!(scorer.score("???", "Toy Story (1995)"), 0.0);
    }

    #[test]
    fn test_simple_ratio() {
        let scorer = SimpleRatio;
        assert_eq!(scorer.name(), "SimpleRatio");
        assert!(close(scorer.score("HEAT", "heat"), 100.0));
        assert!(scorer.score("Toy Story", "Toy Story (1995)") < 90.0);
    }
}
