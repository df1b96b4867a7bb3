// Fuzzy matching for "did you mean" suggestions on pod names and task keys

use crate::models::Pod;

/// Levenshtein distance between two strings (single-character edits)
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows are enough: previous and current
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Candidates within `max_distance` of `search` (case-insensitive),
/// closest first, at most 5
pub fn find_near_matches(search: &str, candidates: &[&str], max_distance: usize) -> Vec<(String, usize)> {
    let search_lower = search.to_lowercase();
    let mut matches: Vec<(String, usize)> = candidates
        .iter()
        .filter_map(|candidate| {
            let distance = levenshtein_distance(&search_lower, &candidate.to_lowercase());
            (distance <= max_distance).then(|| (candidate.to_string(), distance))
        })
        .collect();

    matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    matches.truncate(5);
    matches
}

/// Closest pod to a mistyped name, if any is close enough
pub fn suggest_pod(input: &str) -> Option<Pod> {
    let names: Vec<&str> = Pod::ALL.iter().map(|p| p.as_str()).collect();
    find_near_matches(input, &names, 3)
        .first()
        .and_then(|(name, _)| Pod::from_name(name))
}
