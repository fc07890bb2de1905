use std::collections::BTreeMap;

use serde::Serialize;

use super::{Count, Tally};
use crate::models::JobPosting;

const REQUIREMENT_TOP: usize = 10;
const MAX_YEARS: f64 = 20.0;

#[derive(Debug, Serialize)]
pub struct Requirements {
    pub degrees: Vec<Count>,
    pub skills: Vec<Count>,
    /// Ascending by years.
    pub experience: Vec<YearsCount>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct YearsCount {
    pub years: u32,
    pub count: u64,
}

pub fn requirements(jobs: &[JobPosting]) -> Requirements {
    let mut degrees = Tally::new();
    for degree in jobs.iter().filter_map(|j| j.degree.as_deref()) {
        let degree = degree.trim();
        if degree.is_empty() || degree.eq_ignore_ascii_case("nan") {
            continue;
        }
        degrees.add(degree);
    }

    let mut skills = Tally::new();
    for skill in jobs.iter().flat_map(|j| j.skills_matched.iter()) {
        skills.add(skill.as_str());
    }

    let mut experience: BTreeMap<u32, u64> = BTreeMap::new();
    for years in jobs
        .iter()
        .filter_map(|j| j.min_years_of_experience)
        .filter(|y| (0.0..=MAX_YEARS).contains(y))
    {
        // Truncated, so 2.5 years counts as 2
        *experience.entry(years as u32).or_insert(0) += 1;
    }

    Requirements {
        degrees: degrees.top(REQUIREMENT_TOP),
        skills: skills.top(REQUIREMENT_TOP),
        experience: experience
            .into_iter()
            .map(|(years, count)| YearsCount { years, count })
            .collect(),
    }
}
