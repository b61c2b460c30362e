//! String similarity ratios on a 0-100 scale.
//!
//! All ratios are built on the normalized indel similarity
//! (`2 * LCS / (len_a + len_b)`), rounded to a whole percentage with ties to
//! even. Any empty operand scores 0.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Whole-string similarity.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    percent(indel::normalized_similarity(a.chars(), b.chars()))
}

/// Similarity of the shorter string against its best-aligned window of the
/// longer one.
///
/// Windows slide across the full length of the longer string, including
/// windows clipped at either edge so a prefix or suffix overlap still counts.
/// Strings of equal length have a single window, which makes this symmetric.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    percent(best_alignment(shorter, longer))
}

/// Ratio after sorting whitespace-separated tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Token ratio that tolerates reordering plus extra or repeated tokens.
///
/// Both token sets are split into their intersection and the two
/// differences; the best of comparing `common` to `common + only_a`,
/// `common` to `common + only_b`, and the two combinations is returned.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let left: BTreeSet<String> = tokenize(a).into_iter().collect();
    let right: BTreeSet<String> = tokenize(b).into_iter().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let common = join(left.intersection(&right));
    let with_left = append(&common, &join(left.difference(&right)));
    let with_right = append(&common, &join(right.difference(&left)));

    ratio(&common, &with_left)
        .max(ratio(&common, &with_right))
        .max(ratio(&with_left, &with_right))
}

fn best_alignment(shorter: &[char], longer: &[char]) -> f64 {
    let width = shorter.len();
    let clipped = if width < longer.len() { width } else { 1 };
    let head = (1..clipped).map(|len| &longer[..len]);
    let tail = (1..clipped).map(|len| &longer[longer.len() - len..]);

    let mut best = 0.0_f64;
    for window in head.chain(longer.windows(width)).chain(tail) {
        let similarity =
            indel::normalized_similarity(shorter.iter().copied(), window.iter().copied());
        if similarity > best {
            best = similarity;
            if best >= 1.0 {
                break;
            }
        }
    }
    best
}

fn percent(similarity: f64) -> f64 {
    (similarity * 100.0).round_ties_even()
}

/// Lower-cases, turns every non-alphanumeric character into a separator and
/// splits on whitespace.
fn tokenize(value: &str) -> Vec<String> {
    value
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn sorted_tokens(value: &str) -> String {
    let mut tokens = tokenize(value);
    tokens.sort();
    tokens.join(" ")
}

fn join<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn append(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (false, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_identical_strings_is_full() {
        assert_eq!(ratio("acme corp", "acme corp"), 100.0);
    }

    #[test]
    fn ratio_counts_common_subsequence() {
        // LCS "xyz mart" = 8 chars over 13 + 8 total.
        assert_eq!(ratio("xyz mega mart", "xyz mart"), 76.0);
    }

    #[test]
    fn empty_operands_score_zero() {
        assert_eq!(ratio("", "abc"), 0.0);
        assert_eq!(partial_ratio("abc", ""), 0.0);
        assert_eq!(token_sort_ratio("", ""), 0.0);
        assert_eq!(token_set_ratio("--", "abc"), 0.0);
    }

    #[test]
    fn partial_ratio_finds_embedded_substring() {
        assert_eq!(partial_ratio("mega", "xyz mega mart"), 100.0);
        assert_eq!(partial_ratio("xyz mega mart", "mega"), 100.0);
    }

    #[test]
    fn partial_ratio_uses_clipped_edge_windows() {
        // "martin" only overlaps the tail "mart" of the longer string.
        let score = partial_ratio("martin", "xyz mega mart");
        assert!(score >= 80.0, "got {score}");
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert_eq!(token_sort_ratio("smith shop", "shop smith"), 100.0);
        assert_eq!(token_sort_ratio("Smith, Shop", "shop smith"), 100.0);
    }

    #[test]
    fn token_set_ignores_extra_tokens() {
        assert_eq!(token_set_ratio("xyz mega mart", "xyz mart"), 100.0);
        assert_eq!(token_set_ratio("acme acme corp", "corp acme"), 100.0);
    }

    #[test]
    fn token_set_without_common_tokens() {
        let score = token_set_ratio("alpha", "omega");
        assert!(score < 100.0);
        assert_eq!(score, ratio("alpha", "omega"));
    }

    #[test]
    fn rounding_ties_to_even() {
        assert_eq!(percent(0.625), 62.0);
        assert_eq!(percent(0.875), 88.0);
    }
}
