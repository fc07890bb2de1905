//! `jobscope`: explore a job-postings dataset and flag risky hiring companies.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and start logging.
//! 3. Load the job, company and coordinate tables ([`provider`], [`ingest`]).
//! 4. Apply the job filters ([`filter`]).
//! 5. Build the requested view ([`aggregate`], [`company`]).
//! 6. Render it as a terminal report or JSON ([`report`]).

mod aggregate;
mod cli;
mod company;
mod config;
mod filter;
mod ingest;
mod models;
mod provider;
mod report;

use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command, ReportFormat};
use config::{check_lookup, load_config};
use filter::{FilterOptions, JobFilter};
use models::{RiskAssessment, RiskCategory};
use provider::{DataProvider, Dataset};
use report::terminal;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.data_dir, cli.config.as_deref())?;
    init_logging(&config.log.level);

    // Validate filters before spending time on I/O
    let filter = cli.filters.to_filter()?;

    let mut provider = DataProvider::new(config.data.sources(&cli.data_dir));
    let data = load_dataset(&mut provider, cli.quiet)?;
    let filtered = filter.apply(data);

    let json = matches!(cli.report, ReportFormat::Json);
    if !json && !cli.quiet {
        terminal::banner(&cli.data_dir, filtered.jobs.len(), filtered.companies.len());
    }

    let top_n = config.report.top_n;

    match &cli.command {
        Command::Overview => {
            let view = aggregate::overview::overview(&filtered.jobs);
            emit(json, &view, || terminal::render_overview(&view, cli.verbose))?;
        }
        Command::Locations { level } => {
            let level = ingest::locations::LocationLevel::from(level);
            let view = aggregate::locations::location_view(
                &filtered.jobs,
                filtered.locations(level),
                level,
                top_n,
            );
            emit(json, &view, || terminal::render_locations(&view))?;
        }
        Command::Requirements => {
            let view = aggregate::requirements::requirements(&filtered.jobs);
            emit(json, &view, || terminal::render_requirements(&view))?;
        }
        Command::Companies => {
            let current_year = chrono::Local::now().year();
            let view = aggregate::companies::company_overview(
                &filtered.jobs,
                &filtered.companies,
                top_n,
                current_year,
            );
            emit(json, &view, || terminal::render_companies(&view))?;
        }
        Command::Jobs => {
            let sample_size = if cli.verbose {
                filtered.jobs.len()
            } else {
                config.report.sample_size
            };
            let rows =
                aggregate::jobs::jobs_lookup(&filtered.jobs, &filtered.companies, sample_size);
            emit(json, &rows, || terminal::render_jobs(&rows))?;
        }
        Command::Risk { name } => {
            let assessment = company::classifier::classify(name, &filtered.companies);
            let suggestions = match assessment.category {
                RiskCategory::NotInDatabase => company::matcher::find_matches(
                    name,
                    filtered.company_names(),
                    config.lookup.limit,
                    config.lookup.cutoff,
                ),
                _ => Vec::new(),
            };
            let result = RiskResult {
                company: name,
                assessment,
                suggestions,
            };
            emit(json, &result, || {
                terminal::render_risk(result.company, &result.assessment, &result.suggestions)
            })?;
        }
        Command::Lookup {
            query,
            limit,
            cutoff,
        } => {
            let limit = limit.unwrap_or(config.lookup.limit);
            let cutoff = cutoff.unwrap_or(config.lookup.cutoff);
            check_lookup(limit, cutoff)?;

            match query {
                Some(query) => run_lookup(&filtered, query, json, limit, cutoff)?,
                None => lookup_session(&mut provider, &filter, filtered, json, limit, cutoff)?,
            }
        }
        Command::Filters => {
            // Options describe the whole dataset, not the filtered slice
            let options = FilterOptions::from_dataset(provider.dataset()?);
            emit(json, &options, || terminal::render_filters(&options))?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct RiskResult<'a> {
    company: &'a str,
    #[serde(flatten)]
    assessment: RiskAssessment,
    /// Close known names, only for companies not in the table.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

/// Typed in a lookup session to reread the tables from disk.
const RELOAD_COMMAND: &str = ":reload";

fn run_lookup(data: &Dataset, query: &str, json: bool, limit: usize, cutoff: f64) -> Result<()> {
    let matches = company::lookup(query, &data.company_names(), &data.companies, limit, cutoff);
    emit(json, &matches, || terminal::render_lookup(query, &matches))
}

/// Answer one query per stdin line until EOF.
fn lookup_session(
    provider: &mut DataProvider,
    filter: &JobFilter,
    mut data: Dataset,
    json: bool,
    limit: usize,
    cutoff: f64,
) -> Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read query from stdin")?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == RELOAD_COMMAND {
            data = filter.apply(provider.refresh()?);
            info!(companies = data.companies.len(), "tables reloaded");
            continue;
        }
        run_lookup(&data, query, json, limit, cutoff)?;
    }
    Ok(())
}

/// Print `value` as JSON, or hand over to the terminal renderer.
fn emit<T: Serialize>(json: bool, value: &T, render: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        render();
    }
    Ok(())
}

fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_dataset(provider: &mut DataProvider, quiet: bool) -> Result<&Dataset> {
    let pb = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message("Loading dataset...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = provider.dataset();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    result
}
