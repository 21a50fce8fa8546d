//! Damerau-Levenshtein distance calculation for spelling correction.

use std::cmp::min;

use ahash::AHashMap;

/// Calculate the unrestricted Damerau-Levenshtein distance between two strings.
///
/// This is the minimum number of single-character insertions, deletions,
/// substitutions or adjacent transpositions required to change one string into
/// the other. Unlike the optimal string alignment variant, a transposed pair may
/// be edited again, so `"ca"` to `"abc"` costs 2 rather than 3.
///
/// Distances are counted in `char`s, not bytes.
pub fn damerau_levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    damerau_levenshtein_chars(&s1_chars, &s2_chars)
}

/// Same as [`damerau_levenshtein_distance`] over pre-split character slices.
#[allow(clippy::needless_range_loop)]
pub(crate) fn damerau_levenshtein_chars(a: &[char], b: &[char]) -> usize {
    let len1 = a.len();
    let len2 = b.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    // Row/column 0 hold the sentinel so transpositions never wrap past the origin.
    let inf = len1 + len2 + 1;
    let mut matrix = vec![vec![0usize; len2 + 2]; len1 + 2];
    matrix[0][0] = inf;
    for i in 0..=len1 {
        matrix[i + 1][0] = inf;
        matrix[i + 1][1] = i;
    }
    for j in 0..=len2 {
        matrix[0][j + 1] = inf;
        matrix[1][j + 1] = j;
    }

    // Last row in which each character was seen in `a`.
    let mut last_row: AHashMap<char, usize> = AHashMap::with_capacity(len1 + len2);

    for i in 1..=len1 {
        let mut last_match_col = 0;
        for j in 1..=len2 {
            let i1 = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = last_match_col;

            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };

            matrix[i + 1][j + 1] = min(
                min(
                    matrix[i][j] + cost,  // substitution
                    matrix[i + 1][j] + 1, // insertion
                ),
                min(
                    matrix[i][j + 1] + 1,                             // deletion
                    matrix[i1][j1] + (i - i1 - 1) + 1 + (j - j1 - 1), // transposition
                ),
            );
        }
        last_row.insert(a[i - 1], i);
    }

    matrix[len1 + 1][len2 + 1]
}

/// Distance between a dictionary term and the query, skipping their common
/// prefix and suffix.
///
/// Both strings frequently share most of their characters with the delete key
/// that brought them together, so only the differing middle segment is scored.
pub(crate) fn trimmed_distance(term: &[char], query: &[char]) -> usize {
    let mut prefix = 0;
    while prefix < term.len() && prefix < query.len() && term[prefix] == query[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < term.len() - prefix
        && suffix < query.len() - prefix
        && term[term.len() - suffix - 1] == query[query.len() - suffix - 1]
    {
        suffix += 1;
    }

    if prefix > 0 || suffix > 0 {
        damerau_levenshtein_chars(
            &term[prefix..term.len() - suffix],
            &query[prefix..query.len() - suffix],
        )
    } else {
        damerau_levenshtein_chars(term, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_damerau_levenshtein_distance() {
        assert_eq!(damerau_levenshtein_distance("", ""), 0);
        assert_eq!(damerau_levenshtein_distance("", "abc"), 3);
        assert_eq!(damerau_levenshtein_distance("abc", ""), 3);
        assert_eq!(damerau_levenshtein_distance("ab", "ba"), 1); // transposition
        assert_eq!(damerau_levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(damerau_levenshtein_distance("cordoba", "cordba"), 1);
        assert_eq!(damerau_levenshtein_distance("search", "serach"), 1);
    }

    #[test]
    fn test_unrestricted_transposition() {
        // OSA would report 3 here.
        assert_eq!(damerau_levenshtein_distance("ca", "abc"), 2);
    }

    #[test]
    fn test_identity_and_symmetry() {
        let words = ["", "a", "rio cuarto", "ushuaia", "córdoba", "neuquén", "santa fe"];
        for a in words {
            assert_eq!(damerau_levenshtein_distance(a, a), 0);
            for b in words {
                assert_eq!(
                    damerau_levenshtein_distance(a, b),
                    damerau_levenshtein_distance(b, a),
                    "{a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(damerau_levenshtein_distance("córdoba", "cordoba"), 1);
        assert_eq!(damerau_levenshtein_distance("ñ", "n"), 1);
    }

    #[test]
    fn test_trimmed_distance_matches_full_distance() {
        let pairs = [
            ("buenos", "bxxnos"),
            ("cordoba", "cordba"),
            ("rosario", "rosairo"),
            ("mendoza", "mendoza"),
            ("salta", "jujuy"),
            ("a", "b"),
        ];
        for (term, query) in pairs {
            assert_eq!(
                trimmed_distance(&chars(term), &chars(query)),
                damerau_levenshtein_distance(term, query),
                "{term} vs {query}"
            );
        }
    }
}
