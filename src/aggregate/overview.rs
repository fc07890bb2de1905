use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{Count, Tally};
use crate::models::JobPosting;

/// Categories shown per distribution.
const CATEGORY_TOP: usize = 10;

const HISTOGRAM_BINS: usize = 50;
const HISTOGRAM_MIN: f64 = 20_000.0;
const HISTOGRAM_MAX: f64 = 500_000.0;

#[derive(Debug, Serialize)]
pub struct Overview {
    pub total_jobs: usize,
    pub postings_per_day: Vec<DailyCount>,
    pub salary_per_day: Vec<DailySalary>,
    pub salary_histogram: Vec<HistogramBin>,
    pub seniority: Vec<Count>,
    pub workplace: Vec<Count>,
    pub employment_type: Vec<Count>,
    pub job_function: Vec<Count>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DailySalary {
    pub date: NaiveDate,
    pub avg_salary: f64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

pub fn overview(jobs: &[JobPosting]) -> Overview {
    let mut per_day: BTreeMap<NaiveDate, (u64, f64, u64)> = BTreeMap::new();
    for job in jobs {
        if let Some(date) = job.posted_date {
            let entry = per_day.entry(date).or_default();
            entry.0 += 1;
            if let Some(salary) = job.avg_salary {
                entry.1 += salary;
                entry.2 += 1;
            }
        }
    }

    let postings_per_day = per_day
        .iter()
        .map(|(date, (count, _, _))| DailyCount {
            date: *date,
            count: *count,
        })
        .collect();

    let salary_per_day = per_day
        .iter()
        .filter(|(_, (_, _, n))| *n > 0)
        .map(|(date, (_, sum, n))| DailySalary {
            date: *date,
            avg_salary: sum / *n as f64,
        })
        .collect();

    Overview {
        total_jobs: jobs.len(),
        postings_per_day,
        salary_per_day,
        salary_histogram: salary_histogram(jobs),
        seniority: distribution(jobs.iter().map(|j| j.seniority_level.as_deref())),
        workplace: distribution(jobs.iter().map(|j| j.workplace.as_deref())),
        employment_type: distribution(jobs.iter().map(|j| j.employment_type.as_deref())),
        job_function: distribution(
            jobs.iter()
                .flat_map(|j| j.job_functions.iter().map(|f| Some(f.as_str()))),
        ),
    }
}

/// Top categories; missing values are not counted.
fn distribution<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<Count> {
    let mut tally = Tally::new();
    for value in values.flatten() {
        tally.add(value);
    }
    tally.top(CATEGORY_TOP)
}

/// Equal-width bins over the plausible salary range; values outside it are dropped.
fn salary_histogram(jobs: &[JobPosting]) -> Vec<HistogramBin> {
    let width = (HISTOGRAM_MAX - HISTOGRAM_MIN) / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: HISTOGRAM_MIN + width * i as f64,
            upper: HISTOGRAM_MIN + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for salary in jobs.iter().filter_map(|j| j.avg_salary) {
        if !(HISTOGRAM_MIN..=HISTOGRAM_MAX).contains(&salary) {
            continue;
        }
        // The top edge belongs to the last bin
        let idx = (((salary - HISTOGRAM_MIN) / width) as usize).min(HISTOGRAM_BINS - 1);
        bins[idx].count += 1;
    }

    bins
}
