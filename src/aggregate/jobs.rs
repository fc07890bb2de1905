use chrono::NaiveDate;
use serde::Serialize;

use crate::company::classifier::classify;
use crate::models::{CompanyRecord, JobPosting, RiskAssessment};

/// One line of the jobs lookup table.
#[derive(Debug, Serialize)]
pub struct JobRow {
    pub title: Option<String>,
    pub job_url: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub posted_date: Option<NaiveDate>,
    pub workplace: Option<String>,
    pub salary: Option<String>,
    pub seniority_level: Option<String>,
    pub employment_type: Option<String>,
    pub job_function: Option<String>,
    pub industries: Option<String>,
    pub risk: RiskAssessment,
}

/// The `sample_size` most recent jobs, each with the hiring company's risk.
///
/// Newest postings come first; undated postings go last. Jobs posted on the
/// same day keep their table order.
pub fn jobs_lookup(
    jobs: &[JobPosting],
    companies: &[CompanyRecord],
    sample_size: usize,
) -> Vec<JobRow> {
    let mut newest: Vec<&JobPosting> = jobs.iter().collect();
    // None < Some, so reversing the date order puts undated jobs last
    newest.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));

    newest
        .into_iter()
        .take(sample_size)
        .map(|job| JobRow {
            risk: classify(job.company_name.as_deref().unwrap_or(""), companies),
            title: job.title.clone(),
            job_url: job.job_url.clone(),
            location: job.location.clone(),
            company: job.company_name.clone(),
            company_url: job.company_url.clone(),
            posted_date: job.posted_date,
            workplace: job.workplace.clone(),
            salary: job.salary.clone(),
            seniority_level: job.seniority_level.clone(),
            employment_type: job.employment_type.clone(),
            job_function: job.job_function.clone(),
            industries: job.industries.clone(),
        })
        .collect()
}
