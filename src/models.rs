use chrono::NaiveDate;
use serde::Serialize;

/// One job listing, as materialized by [`crate::ingest::jobs::JobsLoader`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPosting {
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub job_url: Option<String>,
    pub workplace: Option<String>,
    pub seniority_level: Option<String>,
    pub employment_type: Option<String>,
    pub job_function: Option<String>,
    pub industries: Option<String>,
    pub company_name: Option<String>,
    pub company_url: Option<String>,
    /// Salary as advertised, free text.
    pub salary: Option<String>,
    pub posted_date: Option<NaiveDate>,
    pub avg_salary: Option<f64>,
    pub skills_matched: Vec<String>,
    pub degree: Option<String>,
    pub min_years_of_experience: Option<f64>,
    pub primary_title: Option<String>,
    pub sub_title: Option<String>,
    pub job_functions: Vec<String>,
    pub location: Option<String>,
    pub state: Option<String>,
}

/// One known hiring company.
///
/// `verified` has already been normalized from a [`VerifiedFlag`]; the
/// classifier never sees the raw value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    pub website: Option<String>,
    pub member_count: Option<u64>,
    pub verified: bool,
    pub post_count: Option<u64>,
    pub founded_year: Option<i32>,
    pub headquarters: Option<String>,
    pub industry: Option<String>,
    pub where_they_studied: Vec<String>,
    pub what_they_are_skilled_at: Vec<String>,
}

/// The verified-page flag as it arrives from the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifiedFlag {
    Boolean(bool),
    Text(String),
    Absent,
}

impl VerifiedFlag {
    /// Interpret a raw cell. Blank cells are [`VerifiedFlag::Absent`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return VerifiedFlag::Absent;
        };

        if value.eq_ignore_ascii_case("true") {
            VerifiedFlag::Boolean(true)
        } else if value.eq_ignore_ascii_case("false") {
            VerifiedFlag::Boolean(false)
        } else {
            VerifiedFlag::Text(value.to_string())
        }
    }

    /// Only `true` and `"yes"` count as verified.
    pub fn is_verified(&self) -> bool {
        match self {
            VerifiedFlag::Boolean(b) => *b,
            VerifiedFlag::Text(t) => t.eq_ignore_ascii_case("yes"),
            VerifiedFlag::Absent => false,
        }
    }

    /// `false` for text that is neither `"yes"` nor `"no"`.
    pub fn is_recognized(&self) -> bool {
        match self {
            VerifiedFlag::Text(t) => t.eq_ignore_ascii_case("yes") || t.eq_ignore_ascii_case("no"),
            _ => true,
        }
    }
}

/// Coordinates and demographics for a state or a city.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationInfo {
    pub key: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<f64>,
    pub cost_index: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    PotentialScam,
    High,
    Low,
    NotInDatabase,
}

impl RiskCategory {
    /// Fixed justification shown next to the category.
    pub fn explanation(&self) -> &'static str {
        match self {
            RiskCategory::PotentialScam => {
                "Company has no website, few members, is not verified, and has minimal activity."
            }
            RiskCategory::High => {
                "Company is not verified, has a small online presence, and an untrusted website."
            }
            RiskCategory::Low => {
                "Company is verified, has an established online presence, and seems legitimate."
            }
            RiskCategory::NotInDatabase => "Company information is not available in our records.",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::PotentialScam => write!(f, "Potential Scam"),
            RiskCategory::High => write!(f, "High"),
            RiskCategory::Low => write!(f, "Low"),
            RiskCategory::NotInDatabase => write!(f, "Not in Database"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub category: RiskCategory,
    pub explanation: &'static str,
}

impl From<RiskCategory> for RiskAssessment {
    fn from(category: RiskCategory) -> Self {
        RiskAssessment {
            category,
            explanation: category.explanation(),
        }
    }
}
