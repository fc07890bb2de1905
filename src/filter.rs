//! Row filters for the jobs table and the option lists they choose from.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::Tally;
use crate::provider::Dataset;

pub const WORKPLACE_OPTIONS: [&str; 3] = ["onsite", "hybrid", "remote"];

pub const SENIORITY_OPTIONS: [&str; 7] = [
    "Internship",
    "Entry level",
    "Associate",
    "Mid-Senior level",
    "Director",
    "Executive",
    "Not Applicable",
];

pub const EMPLOYMENT_OPTIONS: [&str; 7] = [
    "Full-time",
    "Internship",
    "Part-time",
    "Contract",
    "Temporary",
    "Volunteer",
    "Other",
];

pub const SALARY_BANDS: [&str; 11] = [
    "All",
    "20K - 40K",
    "40K - 60K",
    "60K - 80K",
    "80K - 100K",
    "100K - 120K",
    "120K - 140K",
    "140K - 160K",
    "160K - 180K",
    "180K - 200K",
    "200K+",
];

/// Inclusive salary range on `AVG_SALARY`; `max == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBand {
    pub min: f64,
    pub max: Option<f64>,
}

impl SalaryBand {
    /// Parse a band label such as `"20K - 40K"` or `"200K+"`.
    /// `"All"` yields `None`.
    pub fn parse(label: &str) -> Result<Option<SalaryBand>> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("all") {
            return Ok(None);
        }

        if let Some(min) = label.strip_suffix('+') {
            return Ok(Some(SalaryBand {
                min: thousands(min)?,
                max: None,
            }));
        }

        match label.split_once('-') {
            Some((min, max)) => Ok(Some(SalaryBand {
                min: thousands(min)?,
                max: Some(thousands(max)?),
            })),
            None => bail!("invalid salary band '{}', expected e.g. \"40K - 60K\" or \"200K+\"", label),
        }
    }

    pub fn contains(&self, salary: f64) -> bool {
        salary >= self.min && self.max.map_or(true, |max| salary <= max)
    }
}

/// `"40K"` → 40000.0
fn thousands(part: &str) -> Result<f64> {
    let part = part.trim();
    let digits = part
        .strip_suffix('K')
        .or_else(|| part.strip_suffix('k'))
        .unwrap_or(part)
        .trim();
    match digits.parse::<u32>() {
        Ok(n) => Ok(f64::from(n) * 1000.0),
        Err(_) => bail!("invalid salary amount '{}'", part),
    }
}

/// Criteria a job must meet. `None` fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub state: Option<String>,
    pub workplace: Option<String>,
    pub seniority: Option<String>,
    /// Compared against `PRIMARY_TITLE`.
    pub job_title: Option<String>,
    /// Must appear in the job's function list.
    pub job_function: Option<String>,
    pub salary: Option<SalaryBand>,
}

impl JobFilter {
    pub fn matches(&self, job: &crate::models::JobPosting) -> bool {
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(posted) = job.posted_date else {
                return false;
            };
            if self.date_from.is_some_and(|from| posted < from)
                || self.date_to.is_some_and(|to| posted > to)
            {
                return false;
            }
        }

        if !equals(&self.state, &job.state)
            || !equals(&self.workplace, &job.workplace)
            || !equals(&self.seniority, &job.seniority_level)
            || !equals(&self.job_title, &job.primary_title)
        {
            return false;
        }

        if let Some(function) = &self.job_function {
            if !job.job_functions.iter().any(|f| f == function) {
                return false;
            }
        }

        if let Some(band) = &self.salary {
            match job.avg_salary {
                Some(salary) if band.contains(salary) => {}
                _ => return false,
            }
        }

        true
    }

    /// The dataset with only matching jobs; companies and coordinates are kept.
    pub fn apply(&self, data: &Dataset) -> Dataset {
        Dataset {
            jobs: data.jobs.iter().filter(|j| self.matches(j)).cloned().collect(),
            companies: data.companies.clone(),
            states: data.states.clone(),
            cities: data.cities.clone(),
        }
    }
}

fn equals(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        Some(w) => actual.as_deref() == Some(w.as_str()),
        None => true,
    }
}

/// Treat `"All"` (any case) and blank as "no filter".
pub fn selection(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.trim().eq_ignore_ascii_case("all"))
}

/// Everything a user can pick from when filtering.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub states: Vec<String>,
    pub workplaces: Vec<&'static str>,
    pub seniority_levels: Vec<&'static str>,
    pub employment_types: Vec<&'static str>,
    /// Most frequent first.
    pub job_titles: Vec<String>,
    /// Most frequent first.
    pub job_functions: Vec<String>,
    pub salary_bands: Vec<&'static str>,
}

impl FilterOptions {
    pub fn from_dataset(data: &Dataset) -> Self {
        // States come from the coordinates table when present.
        let states: BTreeSet<String> = if data.states.is_empty() {
            data.jobs.iter().filter_map(|j| j.state.clone()).collect()
        } else {
            data.states.iter().map(|s| s.key.clone()).collect()
        };

        let mut titles = Tally::new();
        let mut functions = Tally::new();
        for job in &data.jobs {
            if let Some(title) = &job.primary_title {
                titles.add(title.replace('"', ""));
            }
            for function in &job.job_functions {
                functions.add(function.replace('"', ""));
            }
        }

        FilterOptions {
            date_range: data.posted_range(),
            states: states.into_iter().collect(),
            workplaces: WORKPLACE_OPTIONS.to_vec(),
            seniority_levels: SENIORITY_OPTIONS.to_vec(),
            employment_types: EMPLOYMENT_OPTIONS.to_vec(),
            job_titles: titles.ranked().into_iter().map(|r| r.label).collect(),
            job_functions: functions.ranked().into_iter().map(|r| r.label).collect(),
            salary_bands: SALARY_BANDS.to_vec(),
        }
    }
}
