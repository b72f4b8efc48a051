//! Fuzzy show-name matching
//!
//! Names are compared with a longest-matching-blocks ratio: the longest common
//! block is found, the comparison recurses on the pieces to its left and right,
//! and the matched character count is normalised to `2 * M / (|a| + |b|)`.
//! Unlike an edit distance this tolerates inserted words well, which is what
//! romanised and translated titles mostly differ by.

use super::{Series, SeriesId};

/// Similarity of two strings in `[0, 1]`, compared case-insensitively.
///
/// Two empty strings are considered identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * matching_characters(&a, &b)) as f64 / total as f64
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_characters(&a[..i], &b[..j])
        + matching_characters(&a[i + size..], &b[j + size..])
}

/// Finds the longest common block as `(start_in_a, start_in_b, size)`.
///
/// Ties resolve to the block starting earliest in `a`, then earliest in `b`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // run[j + 1] is the length of the common run ending at a[i], b[j]
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb { previous[j] + 1 } else { 0 };
            let size = current[j + 1];
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

/// Picks the first candidate that matches `query` within `accuracy`.
///
/// Candidates are scanned in order. For each one an exact, case-insensitive
/// title match wins immediately, then the title ratio is tested, then every
/// alias. `None` means candidates existed but none came close enough.
pub(crate) fn best_match(query: &str, candidates: &[Series], accuracy: f64) -> Option<SeriesId> {
    let lowered = query.to_lowercase();

    candidates.iter().find_map(|series| {
        if series.name.to_lowercase() == lowered {
            return Some(series.id);
        }
        if similarity(query, &series.name) >= accuracy {
            return Some(series.id);
        }
        series
            .aliases
            .iter()
            .any(|alias| similarity(query, alias) >= accuracy)
            .then_some(series.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(id: u64, name: &str, aliases: &[&str]) -> Series {
        Series {
            id: SeriesId(id),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            network: None,
            status: None,
            first_aired: None,
            overview: None,
            banner: None,
            slug: None,
        }
    }

    #[test]
    fn test_similarity_known_ratios() {
        // "abcd" vs "bcde": one block "bcd" => 2 * 3 / 8
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-9);
        assert!((similarity("Mythbusters", "MYTHBUSTERS") - 1.0).abs() < 1e-9);
        assert!(similarity("abc", "xyz").abs() < 1e-9);
        assert!((similarity("", "") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_recurses_into_both_sides() {
        // blocks "ab" and "de" around the differing middle => 2 * 4 / 10
        assert!((similarity("abXde", "abYde") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_longest_block_prefers_earliest() {
        let a: Vec<char> = "abab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_block(&a, &b), (0, 0, 2));
    }

    #[test]
    fn test_best_match_exact_title() {
        let candidates = vec![
            series(1, "MythBusters Jr.", &[]),
            series(73388, "MythBusters", &[]),
        ];
        // The first candidate scores below 1.0 at accuracy 1.0, the second is exact.
        assert_eq!(
            best_match("mythbusters", &candidates, 1.0),
            Some(SeriesId(73388))
        );
    }

    #[test]
    fn test_best_match_alias() {
        let candidates = vec![series(
            83322,
            "A Certain Magical Index",
            &["Toaru Majutsu no Index", "To Aru Majutsu no Index"],
        )];
        assert_eq!(
            best_match("Toaru Majutsu no Index", &candidates, 0.8),
            Some(SeriesId(83322))
        );
    }

    #[test]
    fn test_best_match_respects_candidate_order() {
        let candidates = vec![
            series(1, "Doctor Who", &[]),
            series(2, "Doctor Who (2005)", &[]),
        ];
        assert_eq!(best_match("Doctor Who", &candidates, 0.8), Some(SeriesId(1)));
        assert_eq!(best_match("doctor who 2005", &candidates, 0.7), Some(SeriesId(1)));
    }

    #[test]
    fn test_best_match_none_within_accuracy() {
        let candidates = vec![series(1, "Friends", &["Les Amis"])];
        assert_eq!(best_match("Seinfeld", &candidates, 0.8), None);
    }

    proptest! {
        #[test]
        fn prop_similarity_is_bounded(a in ".{0,24}", b in ".{0,24}") {
            let ratio = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&ratio));
        }

        #[test]
        fn prop_similarity_identity(a in "[a-zA-Z ]{0,24}") {
            prop_assert!((similarity(&a, &a) - 1.0).abs() < 1e-9);
        }
    }
}
