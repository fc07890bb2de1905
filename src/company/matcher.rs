use std::collections::HashSet;

use strsim::normalized_levenshtein;

/// Default number of candidates returned by a lookup.
pub const DEFAULT_LIMIT: usize = 3;
/// Default minimum similarity ratio.
pub const DEFAULT_CUTOFF: f64 = 0.3;

/// Names similar to `query`, best first.
///
/// Similarity is the normalized Levenshtein ratio (case-sensitive). At most
/// `limit` names with a ratio of at least `cutoff` are returned; equally
/// similar names keep their input order.
pub fn find_matches<'a, I>(query: &str, known_names: I, limit: usize, cutoff: f64) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    scored_matches(query, known_names, limit, cutoff)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// Like [`find_matches`], but keeps the similarity ratio of each candidate.
pub fn scored_matches<'a, I>(
    query: &str,
    known_names: I,
    limit: usize,
    cutoff: f64,
) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut scored: Vec<(&str, f64)> = known_names
        .into_iter()
        .filter(|name| seen.insert(*name))
        .map(|name| (name, normalized_levenshtein(query, name)))
        .filter(|(_, score)| *score >= cutoff)
        .collect();

    // sort_by is stable, so ties stay in input order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_matches() {
        let names = ["Acme", "Beta"];
        assert!(find_matches("", names, DEFAULT_LIMIT, DEFAULT_CUTOFF).is_empty());
        // Even a zero cutoff does not turn an empty query into a match
        assert!(find_matches("", names, DEFAULT_LIMIT, 0.0).is_empty());
    }

    #[test]
    fn test_ranked_by_descending_similarity() {
        let names = ["Acme Corporation", "Acme", "Unrelated Inc"];
        let matches = find_matches("Acme Corp", names, 3, 0.3);
        assert_eq!(matches, vec!["Acme Corporation", "Acme"]);
    }

    #[test]
    fn test_pinned_ratios() {
        let names = ["Acme Corporation", "Acme", "Unrelated Inc"];
        let scored = scored_matches("Acme Corp", names, 3, 0.0);
        assert_eq!(scored.len(), 3);
        assert!((scored[0].1 - 0.5625).abs() < 1e-9);
        assert!((scored[1].1 - 4.0 / 9.0).abs() < 1e-9);
        assert!((scored[2].1 - 1.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let matches = find_matches("Acme", ["Acmf", "Acne"], 3, 0.3);
        assert_eq!(matches, vec!["Acmf", "Acne"]);
        let matches = find_matches("Acme", ["Acne", "Acmf"], 3, 0.3);
        assert_eq!(matches, vec!["Acne", "Acmf"]);
    }

    #[test]
    fn test_limit_and_cutoff() {
        let names = ["Initech", "Initech LLC", "Intech", "Umbrella"];
        let matches = find_matches("Initech", names, 2, 0.3);
        assert_eq!(matches, vec!["Initech", "Intech"]);

        let matches = find_matches("Initech", names, 10, 0.9);
        assert_eq!(matches, vec!["Initech"]);

        assert!(find_matches("Initech", names, 0, 0.3).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let scored = scored_matches("acme", ["ACME", "acme"], 3, 0.0);
        assert_eq!(scored[0].0, "acme");
        assert!((scored[1].1 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let matches = find_matches("Acme", ["Acme", "Acme", "Acne"], 3, 0.3);
        assert_eq!(matches, vec!["Acme", "Acne"]);
    }

    #[test]
    fn test_no_candidate_above_cutoff() {
        assert!(find_matches("Zzz", ["Acme", "Beta"], 3, 0.3).is_empty());
        assert!(find_matches("Acme", std::iter::empty::<&str>(), 3, 0.3).is_empty());
    }
}
