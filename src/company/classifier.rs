use crate::models::{CompanyRecord, RiskAssessment, RiskCategory};

/// Member counts below this are "few members".
const FEW_MEMBERS: u64 = 10;
/// Post counts below this are "minimal activity".
const MINIMAL_POSTS: u64 = 2;
/// Website suffixes that exempt a company from the `High` rule.
const TRUSTED_SUFFIXES: [&str; 2] = [".com", ".gov"];

/// Classify a company by exact (case-sensitive) name.
///
/// When several records share the name, the last one wins. An unknown name is
/// [`RiskCategory::NotInDatabase`] and no further rules run.
pub fn classify(company_name: &str, companies: &[CompanyRecord]) -> RiskAssessment {
    match companies.iter().rev().find(|c| c.name == company_name) {
        Some(record) => assess(record),
        None => RiskCategory::NotInDatabase.into(),
    }
}

/// Run the rule cascade on a resolved record. First matching rule wins:
///
/// 1. `PotentialScam`: no website, few members, not verified, minimal posts
/// 2. `High`: has a website, few members, not verified, and the website
///    does not end in `.com` / `.gov`
/// 3. `Low`: everything else
pub fn assess(company: &CompanyRecord) -> RiskAssessment {
    let website = company.website.as_deref().unwrap_or("");
    let no_website = website.trim().is_empty();
    let not_verified = !company.verified;
    let members = company.member_count.unwrap_or(0);
    let posts = company.post_count.unwrap_or(0);

    if no_website && members < FEW_MEMBERS && not_verified && posts < MINIMAL_POSTS {
        return RiskCategory::PotentialScam.into();
    }

    if !no_website && members < FEW_MEMBERS && not_verified && !has_trusted_suffix(website) {
        return RiskCategory::High.into();
    }

    RiskCategory::Low.into()
}

/// Literal suffix test on the lowercased value; no URL parsing.
fn has_trusted_suffix(website: &str) -> bool {
    let lower = website.to_lowercase();
    TRUSTED_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerifiedFlag;

    fn company(
        name: &str,
        website: Option<&str>,
        members: Option<u64>,
        verified: VerifiedFlag,
        posts: Option<u64>,
    ) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            website: website.map(str::to_string),
            member_count: members,
            verified: verified.is_verified(),
            post_count: posts,
            ..Default::default()
        }
    }

    #[test]
    fn test_potential_scam_scenario() {
        let table = vec![company(
            "Foo",
            None,
            Some(5),
            VerifiedFlag::Text("no".into()),
            Some(1),
        )];
        let a = classify("Foo", &table);
        assert_eq!(a.category, RiskCategory::PotentialScam);
        assert_eq!(
            a.explanation,
            "Company has no website, few members, is not verified, and has minimal activity."
        );
    }

    #[test]
    fn test_high_scenario() {
        let table = vec![company(
            "Bar",
            Some("bar.io"),
            Some(3),
            VerifiedFlag::Boolean(false),
            Some(50),
        )];
        let a = classify("Bar", &table);
        assert_eq!(a.category, RiskCategory::High);
        assert_eq!(
            a.explanation,
            "Company is not verified, has a small online presence, and an untrusted website."
        );
    }

    #[test]
    fn test_trusted_suffix_falls_through_to_low() {
        let table = vec![company(
            "Baz",
            Some("baz.com"),
            Some(2),
            VerifiedFlag::Boolean(false),
            Some(0),
        )];
        let a = classify("Baz", &table);
        assert_eq!(a.category, RiskCategory::Low);
        assert_eq!(
            a.explanation,
            "Company is verified, has an established online presence, and seems legitimate."
        );

        let gov = company("Gov", Some("agency.gov"), None, VerifiedFlag::Absent, None);
        assert_eq!(assess(&gov).category, RiskCategory::Low);
    }

    #[test]
    fn test_not_in_database() {
        let table = vec![company("Foo", None, None, VerifiedFlag::Absent, None)];
        for name in ["foo", "Foo ", "", "Unknown Ltd"] {
            let a = classify(name, &table);
            assert_eq!(a.category, RiskCategory::NotInDatabase);
            assert_eq!(
                a.explanation,
                "Company information is not available in our records."
            );
        }
        assert_eq!(classify("Foo", &[]).category, RiskCategory::NotInDatabase);
    }

    #[test]
    fn test_suffix_check_is_case_insensitive() {
        let c = company(
            "Mixed",
            Some("HTTP://EXAMPLE.COM"),
            Some(1),
            VerifiedFlag::Absent,
            Some(0),
        );
        assert_eq!(assess(&c).category, RiskCategory::Low);
    }

    #[test]
    fn test_suffix_check_is_naive() {
        let c = company(
            "Evil",
            Some("example.com.evil.net"),
            Some(1),
            VerifiedFlag::Absent,
            Some(9),
        );
        assert_eq!(assess(&c).category, RiskCategory::High);
    }

    #[test]
    fn test_unverified_empty_company_with_io_site_is_high() {
        // Rule 1 needs no website, so this cannot be a potential scam.
        let c = company("Io", Some("startup.io"), Some(0), VerifiedFlag::Absent, Some(0));
        assert_eq!(assess(&c).category, RiskCategory::High);
    }

    #[test]
    fn test_verified_company_is_low() {
        let c = company("V", Some("v.io"), Some(0), VerifiedFlag::Text("Yes".into()), Some(0));
        assert_eq!(assess(&c).category, RiskCategory::Low);
        let c = company("V", None, Some(0), VerifiedFlag::Boolean(true), Some(0));
        assert_eq!(assess(&c).category, RiskCategory::Low);
    }

    #[test]
    fn test_blank_website_counts_as_missing() {
        let c = company("Blank", Some("   "), Some(3), VerifiedFlag::Absent, Some(1));
        assert_eq!(assess(&c).category, RiskCategory::PotentialScam);
    }

    #[test]
    fn test_missing_counts_behave_like_zero() {
        for website in [None, Some("x.io"), Some("x.com")] {
            let missing = company("M", website, None, VerifiedFlag::Absent, None);
            let zero = company("M", website, Some(0), VerifiedFlag::Absent, Some(0));
            assert_eq!(assess(&missing), assess(&zero));
        }
    }

    #[test]
    fn test_thresholds_are_strict() {
        let c = company("T", None, Some(10), VerifiedFlag::Absent, Some(0));
        assert_eq!(assess(&c).category, RiskCategory::Low);
        let c = company("T", None, Some(9), VerifiedFlag::Absent, Some(2));
        assert_eq!(assess(&c).category, RiskCategory::Low);
        let c = company("T", Some("t.io"), Some(10), VerifiedFlag::Absent, Some(0));
        assert_eq!(assess(&c).category, RiskCategory::Low);
    }

    #[test]
    fn test_scam_and_high_are_mutually_exclusive() {
        // With members/verified/posts all risk-favoring, only the website decides.
        for (website, expected) in [
            (None, RiskCategory::PotentialScam),
            (Some(""), RiskCategory::PotentialScam),
            (Some("a.io"), RiskCategory::High),
            (Some("a.com"), RiskCategory::Low),
        ] {
            let c = company("X", website, Some(0), VerifiedFlag::Absent, Some(0));
            assert_eq!(assess(&c).category, expected, "website {:?}", website);
        }
    }

    #[test]
    fn test_last_duplicate_wins() {
        let table = vec![
            company("Dup", None, Some(1), VerifiedFlag::Absent, Some(0)),
            company("Dup", Some("dup.com"), Some(500), VerifiedFlag::Boolean(true), Some(90)),
        ];
        assert_eq!(classify("Dup", &table).category, RiskCategory::Low);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let table = vec![company("Bar", Some("bar.io"), Some(3), VerifiedFlag::Absent, Some(5))];
        let first = classify("Bar", &table);
        for _ in 0..5 {
            assert_eq!(classify("Bar", &table), first);
        }
    }
}
