use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::info;

use super::listcol::list_column;
use super::{date, number, read_rows, text, Loader, Synonyms};
use crate::models::JobPosting;

/// The warehouse export names the location column `LOCATION_ST`.
const SYNONYMS: Synonyms = &[&["LOCATION", "LOCATION_ST"]];

/// A jobs-table row before any coercion.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
struct RawJob {
    job_id: Option<String>,
    job_title: Option<String>,
    workplace: Option<String>,
    job_url: Option<String>,
    seniority_level: Option<String>,
    employment_type: Option<String>,
    job_function: Option<String>,
    industries: Option<String>,
    company_name: Option<String>,
    company_url: Option<String>,
    salary: Option<String>,
    posted_date: Option<String>,
    avg_salary: Option<String>,
    skills_matched: Option<String>,
    degree: Option<String>,
    min_years_of_experience: Option<String>,
    primary_title: Option<String>,
    sub_title: Option<String>,
    job_function_list: Option<String>,
    location: Option<String>,
    state: Option<String>,
}

impl From<RawJob> for JobPosting {
    fn from(raw: RawJob) -> Self {
        JobPosting {
            posted_date: date("POSTED_DATE", raw.posted_date.as_deref()),
            avg_salary: number("AVG_SALARY", raw.avg_salary.as_deref()),
            min_years_of_experience: number(
                "MIN_YEARS_OF_EXPERIENCE",
                raw.min_years_of_experience.as_deref(),
            ),
            skills_matched: list_column("SKILLS_MATCHED", raw.skills_matched.as_deref()),
            job_functions: list_column("JOB_FUNCTION_LIST", raw.job_function_list.as_deref()),
            job_id: text(raw.job_id),
            title: text(raw.job_title),
            job_url: text(raw.job_url),
            workplace: text(raw.workplace),
            seniority_level: text(raw.seniority_level),
            employment_type: text(raw.employment_type),
            job_function: text(raw.job_function),
            industries: text(raw.industries),
            company_name: text(raw.company_name),
            company_url: text(raw.company_url),
            salary: text(raw.salary),
            degree: text(raw.degree),
            primary_title: text(raw.primary_title),
            sub_title: text(raw.sub_title),
            location: text(raw.location),
            state: text(raw.state),
        }
    }
}

/// Loader for the job-postings table.
pub struct JobsLoader;

impl JobsLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for JobsLoader {
    type Record = JobPosting;

    fn load(&self, path: &Path) -> Result<Vec<JobPosting>> {
        let rows: Vec<RawJob> = read_rows(path, SYNONYMS)?;
        let jobs: Vec<JobPosting> = rows.into_iter().map(JobPosting::from).collect();
        info!(path = %path.display(), jobs = jobs.len(), "loaded job postings");
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_jobs() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            "job_id,job_title,company_name,posted_date,avg_salary,job_function_list,skills_matched,location_st,state"
        )
        .unwrap();
        writeln!(
            f,
            r#"1,Staff Accountant,Acme,03/01/2025,"72,000","['Accounting', 'Finance']","['Excel']","Seattle, WA",WA"#
        )
        .unwrap();
        writeln!(f, "2,Analyst,,not-a-date,,broken,,,").unwrap();

        let jobs = JobsLoader::new().load(f.path()).unwrap();
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.title.as_deref(), Some("Staff Accountant"));
        assert_eq!(first.posted_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(first.avg_salary, Some(72000.0));
        assert_eq!(first.job_functions, vec!["Accounting", "Finance"]);
        assert_eq!(first.skills_matched, vec!["Excel"]);
        assert_eq!(first.location.as_deref(), Some("Seattle, WA"));

        let second = &jobs[1];
        assert_eq!(second.company_name, None);
        assert_eq!(second.posted_date, None);
        assert_eq!(second.avg_salary, None);
        assert!(second.job_functions.is_empty());
        assert_eq!(second.state, None);
    }

    #[test]
    fn test_location_and_location_st_together() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "JOB_ID,LOCATION,LOCATION_ST,STATE").unwrap();
        writeln!(f, r#"1,"Seattle, WA","Seattle, Washington",WA"#).unwrap();

        let jobs = JobsLoader::new().load(f.path()).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].location.as_deref(), Some("Seattle, WA"));
        assert_eq!(jobs[0].state.as_deref(), Some("WA"));
    }
}
