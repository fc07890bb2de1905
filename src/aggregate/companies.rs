use std::collections::BTreeMap;

use serde::Serialize;

use super::{Count, Means, Tally};
use crate::ingest::listcol::parse_entry;
use crate::models::{CompanyRecord, JobPosting};

/// Companies need this many salaried postings to be ranked by salary.
const MIN_SALARIED_POSTINGS: u64 = 10;
const INDUSTRY_TOP: usize = 10;
const EARLIEST_FOUNDED: i32 = 1900;

#[derive(Debug, Serialize)]
pub struct CompanyOverview {
    pub total_companies: usize,
    pub industries: Vec<Count>,
    pub top_by_salary: Vec<CompanySalary>,
    pub top_by_jobs: Vec<Count>,
    pub top_schools: Vec<Count>,
    pub top_skills: Vec<Count>,
    /// Postings that ask for no prior experience.
    pub newbie_friendly: Vec<Count>,
    /// Internship and entry-level postings.
    pub entry_level: Vec<Count>,
    pub founded_per_year: Vec<YearCount>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CompanySalary {
    pub company: String,
    pub avg_salary: f64,
    pub postings: u64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

pub fn company_overview(
    jobs: &[JobPosting],
    companies: &[CompanyRecord],
    top_n: usize,
    current_year: i32,
) -> CompanyOverview {
    let mut industries = Tally::new();
    for industry in companies.iter().filter_map(|c| c.industry.as_deref()) {
        industries.add(industry);
    }

    let mut salaries = Means::new();
    let mut by_jobs = Tally::new();
    let mut newbie = Tally::new();
    let mut entry = Tally::new();
    for job in jobs {
        let Some(company) = job.company_name.as_deref() else {
            continue;
        };
        by_jobs.add(company);
        if let Some(salary) = job.avg_salary {
            salaries.add(company, salary);
        }
        if job.min_years_of_experience == Some(0.0) {
            newbie.add(company);
        }
        if job
            .seniority_level
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("internship") || s.eq_ignore_ascii_case("entry level"))
        {
            entry.add(company);
        }
    }

    let mut top_by_salary: Vec<CompanySalary> = salaries
        .into_means()
        .into_iter()
        .filter(|(_, _, n)| *n >= MIN_SALARIED_POSTINGS)
        .map(|(company, avg_salary, postings)| CompanySalary {
            company,
            avg_salary,
            postings,
        })
        .collect();
    top_by_salary.sort_by(|a, b| {
        b.avg_salary
            .partial_cmp(&a.avg_salary)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_by_salary.truncate(top_n);

    CompanyOverview {
        total_companies: companies.len(),
        industries: industries.top(INDUSTRY_TOP),
        top_by_salary,
        top_by_jobs: by_jobs.top(top_n),
        top_schools: head_counts(companies.iter().map(|c| &c.where_they_studied), top_n),
        top_skills: head_counts(companies.iter().map(|c| &c.what_they_are_skilled_at), top_n),
        newbie_friendly: newbie.top(top_n),
        entry_level: entry.top(top_n),
        founded_per_year: founded_per_year(companies, current_year),
    }
}

/// Sum `"<count> <name>"` entries across companies.
fn head_counts<'a>(lists: impl Iterator<Item = &'a Vec<String>>, top_n: usize) -> Vec<Count> {
    let mut tally = Tally::new();
    for (name, count) in lists.flatten().filter_map(|e| parse_entry(e)) {
        tally.add_n(name, count);
    }
    tally.top(top_n)
}

fn founded_per_year(companies: &[CompanyRecord], current_year: i32) -> Vec<YearCount> {
    let mut years: BTreeMap<i32, u64> = BTreeMap::new();
    for year in companies
        .iter()
        .filter_map(|c| c.founded_year)
        .filter(|y| (EARLIEST_FOUNDED..=current_year).contains(y))
    {
        *years.entry(year).or_insert(0) += 1;
    }
    years
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(company: &str, salary: Option<f64>, years: Option<f64>, seniority: &str) -> JobPosting {
        JobPosting {
            company_name: Some(company.into()),
            avg_salary: salary,
            min_years_of_experience: years,
            seniority_level: Some(seniority.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_salary_ranking_requires_enough_postings() {
        let mut jobs = Vec::new();
        for _ in 0..10 {
            jobs.push(posting("Big", Some(80_000.0), Some(3.0), "Associate"));
        }
        for _ in 0..9 {
            jobs.push(posting("Small", Some(200_000.0), Some(0.0), "Entry level"));
        }
        jobs.push(posting("Small", None, None, "INTERNSHIP"));

        let o = company_overview(&jobs, &[], 20, 2025);
        assert_eq!(
            o.top_by_salary,
            vec![CompanySalary {
                company: "Big".into(),
                avg_salary: 80_000.0,
                postings: 10
            }]
        );
        assert_eq!(o.top_by_jobs[0].label, "Big");
        assert_eq!(o.top_by_jobs[1].count, 10);
        assert_eq!(o.newbie_friendly, vec![Count { label: "Small".into(), count: 9 }]);
        assert_eq!(o.entry_level, vec![Count { label: "Small".into(), count: 10 }]);
    }

    #[test]
    fn test_schools_skills_and_founding() {
        let companies = vec![
            CompanyRecord {
                name: "A".into(),
                industry: Some("Accounting".into()),
                founded_year: Some(1998),
                where_they_studied: vec![
                    "1,712 University of Washington".into(),
                    "40 Seattle University".into(),
                ],
                what_they_are_skilled_at: vec!["300 Excel".into(), "junk".into()],
                ..Default::default()
            },
            CompanyRecord {
                name: "B".into(),
                industry: Some("Accounting".into()),
                founded_year: Some(1850),
                where_they_studied: vec!["8 University of Washington".into()],
                ..Default::default()
            },
            CompanyRecord {
                name: "C".into(),
                founded_year: Some(2031),
                ..Default::default()
            },
        ];

        let o = company_overview(&[], &companies, 20, 2025);
        assert_eq!(o.total_companies, 3);
        assert_eq!(o.industries, vec![Count { label: "Accounting".into(), count: 2 }]);
        assert_eq!(
            o.top_schools[0],
            Count {
                label: "University of Washington".into(),
                count: 1720
            }
        );
        assert_eq!(o.top_skills, vec![Count { label: "Excel".into(), count: 300 }]);
        assert_eq!(o.founded_per_year, vec![YearCount { year: 1998, count: 1 }]);
    }
}
