use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::filter::{selection, JobFilter, SalaryBand};
use crate::ingest::locations::LocationLevel;

#[derive(Parser, Debug)]
#[command(
    name = "jobscope",
    about = "Explore job-posting datasets and flag risky hiring companies",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the CSV tables
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Config file [default: <data-dir>/.jobscope/config.toml, fallback ~/.config/jobscope/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, global = true, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Show every row instead of the first few
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print results, no banner or progress
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Posting volume, salary trend and categorical distributions
    Overview,
    /// Job density and rankings by state or city
    Locations {
        #[arg(long, default_value = "state")]
        level: LevelArg,
    },
    /// Degrees, skills and experience asked for
    Requirements,
    /// Company rankings, workforce schools/skills and founding years
    Companies,
    /// Jobs lookup table with company risk
    Jobs,
    /// Risk assessment for an exact company name, with close names when unknown
    Risk {
        /// Company name (case-sensitive, exact)
        name: String,
    },
    /// Fuzzy company search with risk for each candidate
    Lookup {
        /// Free-text company name; omit to read one query per line from stdin
        /// (`:reload` rereads the tables)
        query: Option<String>,
        /// Maximum candidates [default: from config, 3]
        #[arg(long)]
        limit: Option<usize>,
        /// Minimum similarity ratio in [0, 1] [default: from config, 0.3]
        #[arg(long)]
        cutoff: Option<f64>,
    },
    /// List the values each filter accepts
    Filters,
}

/// Job filters; "All" or omitted means no filtering.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Earliest posting date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest posting date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    #[arg(long, global = true)]
    pub state: Option<String>,

    /// onsite, hybrid or remote
    #[arg(long, global = true)]
    pub workplace: Option<String>,

    /// e.g. "Entry level", "Mid-Senior level"
    #[arg(long, global = true)]
    pub seniority: Option<String>,

    /// Primary job title
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Job function
    #[arg(long = "function", global = true)]
    pub job_function: Option<String>,

    /// Salary band, e.g. "40K - 60K" or "200K+"
    #[arg(long, global = true, value_name = "BAND")]
    pub salary: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Result<JobFilter> {
        let salary = match &self.salary {
            Some(band) => SalaryBand::parse(band)?,
            None => None,
        };

        Ok(JobFilter {
            date_from: self.from,
            date_to: self.to,
            state: selection(self.state.clone()),
            workplace: selection(self.workplace.clone()),
            seniority: selection(self.seniority.clone()),
            job_title: selection(self.title.clone()),
            job_function: selection(self.job_function.clone()),
            salary,
        })
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum LevelArg {
    State,
    City,
}

impl From<&LevelArg> for LocationLevel {
    fn from(arg: &LevelArg) -> Self {
        match arg {
            LevelArg::State => LocationLevel::State,
            LevelArg::City => LocationLevel::City,
        }
    }
}
