//! Text similarity used by the lexical relevance ranker.
//!
//! Word sets are built from lowercased alphanumeric runs, so punctuation
//! attached to a word ("area.") does not block a match.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['-][\p{L}\p{N}]+)*").expect("WORD regex is invalid"));

/// Lowercased words of `text`.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Compute string similarity using multiple strategies.
///
/// Returns a value in [0.0, 1.0] where:
/// - 1.0 = identical strings (after lowercasing)
/// - 0.8 = one string contains the other
/// - 0.0-0.8 = Jaccard similarity on word sets
///
/// Empty inputs score 0.0 against anything.
///
/// # Examples
///
/// ```
/// use sofia::similarity::string_similarity;
///
/// assert!((string_similarity("Flooding", "flooding") - 1.0).abs() < 0.001);
/// assert!(string_similarity("the flooding", "flooding") > 0.5);
/// assert!(string_similarity("rain", "drought") < 0.5);
/// ```
#[must_use]
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.trim().to_lowercase();
    let b_lower = b.trim().to_lowercase();

    if a_lower.is_empty() || b_lower.is_empty() {
        return 0.0;
    }

    if a_lower == b_lower {
        return 1.0;
    }

    if a_lower.contains(&b_lower) || b_lower.contains(&a_lower) {
        return 0.8;
    }

    jaccard_word_similarity(&a_lower, &b_lower)
}

/// Jaccard coefficient of the two texts' word sets.
///
/// # Examples
///
/// ```
/// use sofia::similarity::jaccard_word_similarity;
///
/// // {food, prices} vs {food}: intersection 1, union 2
/// let sim = jaccard_word_similarity("food prices", "Food");
/// assert!((sim - 0.5).abs() < 0.001);
/// ```
#[must_use]
pub fn jaccard_word_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = words(a).into_iter().collect();
    let words_b: HashSet<String> = words(b).into_iter().collect();

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
