use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::ingest::companies::CompaniesLoader;
use crate::ingest::jobs::JobsLoader;
use crate::ingest::locations::{LocationLevel, LocationsLoader};
use crate::ingest::Loader;
use crate::models::{CompanyRecord, JobPosting, LocationInfo};

/// Where the tables live on disk.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub jobs: PathBuf,
    pub companies: PathBuf,
    /// Optional state coordinates table.
    pub states: Option<PathBuf>,
    /// Optional city coordinates table.
    pub cities: Option<PathBuf>,
}

/// All tables, fully materialized in memory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub jobs: Vec<JobPosting>,
    pub companies: Vec<CompanyRecord>,
    pub states: Vec<LocationInfo>,
    pub cities: Vec<LocationInfo>,
}

impl Dataset {
    /// Company names without duplicates, in first-seen order.
    pub fn company_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.companies
            .iter()
            .map(|c| c.name.as_str())
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Earliest and latest posting date, if any job has one.
    pub fn posted_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.jobs.iter().filter_map(|j| j.posted_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn locations(&self, level: LocationLevel) -> &[LocationInfo] {
        match level {
            LocationLevel::State => &self.states,
            LocationLevel::City => &self.cities,
        }
    }
}

/// Owns the loaded [`Dataset`]. Loads on first use; reloads only when asked.
pub struct DataProvider {
    sources: DataSources,
    cached: Option<Dataset>,
}

impl DataProvider {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            cached: None,
        }
    }

    /// The loaded dataset, reading the files on the first call.
    pub fn dataset(&mut self) -> Result<&Dataset> {
        let dataset = match self.cached.take() {
            Some(dataset) => dataset,
            None => load(&self.sources)?,
        };
        Ok(self.cached.insert(dataset))
    }

    /// Drop the cached tables; the next [`dataset`](Self::dataset) call rereads them.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Reread every table from disk.
    pub fn refresh(&mut self) -> Result<&Dataset> {
        self.invalidate();
        self.dataset()
    }
}

fn load(sources: &DataSources) -> Result<Dataset> {
    let jobs = JobsLoader::new().load(&sources.jobs)?;
    let companies = CompaniesLoader::new().load(&sources.companies)?;
    let states = load_optional(sources.states.as_ref(), LocationLevel::State);
    let cities = load_optional(sources.cities.as_ref(), LocationLevel::City);

    Ok(Dataset {
        jobs,
        companies,
        states,
        cities,
    })
}

/// Coordinate tables only feed the locations view, so a missing or unreadable
/// one leaves that view without coordinates instead of failing every command.
fn load_optional(path: Option<&PathBuf>, level: LocationLevel) -> Vec<LocationInfo> {
    let Some(path) = path else {
        return Vec::new();
    };
    if !path.exists() {
        info!(path = %path.display(), level = ?level, "coordinates table not found, skipping");
        return Vec::new();
    }

    match LocationsLoader::new(level).load(path) {
        Ok(locations) => locations,
        Err(e) => {
            warn!(path = %path.display(), level = ?level, error = %format!("{:#}", e), "coordinates table unreadable, skipping");
            Vec::new()
        }
    }
}
