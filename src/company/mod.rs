//! Company risk classification and fuzzy company lookup.
//!
//! - [`matcher`] — ranks known company names by similarity to a free-text query.
//! - [`classifier`] — maps a company record to a [`RiskCategory`](crate::models::RiskCategory)
//!   with a fixed explanation.
//!
//! [`lookup`] chains the two: query → candidate names → risk per candidate.

pub mod classifier;
pub mod matcher;

use serde::Serialize;

use crate::models::{CompanyRecord, RiskAssessment};

/// One fuzzy-lookup candidate with its risk assessment.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyMatch {
    pub name: String,
    pub similarity: f64,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

/// Find companies resembling `query` and classify each candidate.
///
/// `names` is the set of distinct company names to search; `companies` is the
/// full table the classifier resolves each candidate against.
/// An empty result means nothing cleared `cutoff`; it is not the same as a
/// `NotInDatabase` assessment, which only applies to a chosen name.
pub fn lookup(
    query: &str,
    names: &[&str],
    companies: &[CompanyRecord],
    limit: usize,
    cutoff: f64,
) -> Vec<CompanyMatch> {
    matcher::scored_matches(query, names.iter().copied(), limit, cutoff)
        .into_iter()
        .map(|(name, similarity)| {
            let assessment = classifier::classify(&name, companies);
            CompanyMatch {
                name,
                similarity,
                assessment,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskCategory;

    const NAMES: [&str; 3] = ["Acme Corporation", "Acme", "Unrelated Inc"];

    fn table() -> Vec<CompanyRecord> {
        vec![
            CompanyRecord {
                name: "Acme Corporation".into(),
                website: Some("acme.com".into()),
                member_count: Some(1200),
                verified: true,
                post_count: Some(40),
                ..Default::default()
            },
            CompanyRecord {
                name: "Acme".into(),
                website: None,
                member_count: Some(2),
                verified: false,
                post_count: Some(0),
                ..Default::default()
            },
            CompanyRecord {
                name: "Unrelated Inc".into(),
                website: Some("unrelated.io".into()),
                member_count: Some(4),
                verified: false,
                post_count: Some(7),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_lookup_classifies_each_candidate() {
        let results = lookup("Acme Corp", &NAMES, &table(), 3, 0.3);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Acme Corporation");
        assert_eq!(results[0].assessment.category, RiskCategory::Low);
        assert_eq!(results[1].name, "Acme");
        assert_eq!(results[1].assessment.category, RiskCategory::PotentialScam);
    }

    #[test]
    fn test_lookup_without_candidates_is_empty() {
        assert!(lookup("", &NAMES, &table(), 3, 0.3).is_empty());
        assert!(lookup("Zzzzzzzzzzzzzzzzzz", &NAMES, &table(), 3, 0.3).is_empty());
    }

    #[test]
    fn test_match_serializes_flat() {
        let results = lookup("Unrelated Inc", &NAMES, &table(), 1, 0.3);
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["name"], "Unrelated Inc");
        assert_eq!(json["category"], "HIGH");
        assert_eq!(json["similarity"], 1.0);
    }

    #[test]
    fn test_lookup_resolves_against_full_table() {
        // Names come deduplicated; the classifier still sees the last record.
        let mut companies = table();
        companies.push(CompanyRecord {
            name: "Acme".into(),
            website: Some("acme.com".into()),
            member_count: Some(500),
            verified: true,
            post_count: Some(10),
            ..Default::default()
        });
        let results = lookup("Acme", &["Acme", "Acme Corporation"], &companies, 3, 0.3);
        assert_eq!(results[0].name, "Acme");
        assert_eq!(results[0].assessment.category, RiskCategory::Low);
        assert_eq!(results.iter().filter(|m| m.name == "Acme").count(), 1);
    }
}
