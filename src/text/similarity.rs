use super::normalize::normalize;

/// Similarity granted to names that are exact token rearrangements of
/// each other ("Smith John" vs "John Smith"). Kept just below 1.0 so
/// exact matches rank above rearranged ones.
const TOKEN_PERMUTATION_SIMILARITY: f64 = 0.98;

/// Normalized name similarity in [0, 1].
///
/// 1.0 for identical normalized strings, 0.0 when either side normalizes
/// to empty, 0.98 for token permutations, otherwise Levenshtein-based
/// `1 - distance / max_len`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let na = normalize(a);
    let nb = normalize(b);

    if na.is_empty() || nb.is_empty() {
        return 0.0;
    }
    if na == nb {
        return 1.0;
    }
    if is_token_permutation(&na, &nb) {
        return TOKEN_PERMUTATION_SIMILARITY;
    }

    let ca: Vec<char> = na.chars().collect();
    let cb: Vec<char> = nb.chars().collect();
    let max_len = ca.len().max(cb.len());
    1.0 - levenshtein(&ca, &cb) as f64 / max_len as f64
}

/// Raw edit distance between two already-normalized names, used as the
/// low-level score on athlete match candidates (lower is better).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let ca: Vec<char> = a.chars().collect();
    let cb: Vec<char> = b.chars().collect();
    levenshtein(&ca, &cb)
}

fn is_token_permutation(a: &str, b: &str) -> bool {
    let mut ta: Vec<&str> = a.split_whitespace().collect();
    let mut tb: Vec<&str> = b.split_whitespace().collect();
    ta.sort_unstable();
    tb.sort_unstable();
    ta == tb
}

// Standard DP edit distance (insert/delete/substitute cost 1), rolling
// two rows to keep memory at O(min row).
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ac != bc);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_names() {
        assert_eq!(similarity("Jane Doe", "Jane Doe"), 1.0);
        // Diacritics and case collapse before comparison
        assert_eq!(similarity("José García", "jose garcia"), 1.0);
    }

    #[test]
    fn test_empty_side_scores_zero() {
        assert_eq!(similarity("", "Jane Doe"), 0.0);
        assert_eq!(similarity("Jane Doe", ""), 0.0);
        assert_eq!(similarity("...", "Jane Doe"), 0.0);
    }

    #[test]
    fn test_token_rearrangement_is_near_exact() {
        assert_eq!(similarity("john smith", "smith john"), 0.98);
        assert_eq!(similarity("Smith John", "John Smith"), 0.98);
    }

    #[test]
    fn test_levenshtein_fraction() {
        // "jane doe" vs "jane roe": 1 edit over 8 chars
        let s = similarity("Jane Doe", "Jane Roe");
        assert!((s - (1.0 - 1.0 / 8.0)).abs() < 1e-9);
    }

    #[test]
    fn test_dissimilar_names_score_low() {
        assert!(similarity("Jane Doe", "John Smith") < 0.5);
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }
}
