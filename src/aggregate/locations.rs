use std::collections::HashMap;

use serde::Serialize;

use super::{mean, top_measures, Count, Means, Measure, Tally};
use crate::ingest::locations::LocationLevel;
use crate::models::{JobPosting, LocationInfo};

/// City-level density plots keep only the busiest cities.
const CITY_DENSITY_LIMIT: usize = 200;
/// Cost-of-living index of an average location.
const BASELINE_COST_INDEX: f64 = 100.0;

#[derive(Debug, Serialize)]
pub struct LocationView {
    pub level: LocationLevel,
    pub density: Vec<DensityPoint>,
    pub top_by_jobs: Vec<Count>,
    pub top_by_salary: Vec<Measure>,
    pub population_adjusted: Vec<Measure>,
    pub cost_adjusted: Vec<Measure>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DensityPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub jobs: u64,
}

pub fn location_view(
    jobs: &[JobPosting],
    locations: &[LocationInfo],
    level: LocationLevel,
    top_n: usize,
) -> LocationView {
    // Later rows win, like a dictionary built from the table
    let info: HashMap<&str, &LocationInfo> =
        locations.iter().map(|l| (l.key.as_str(), l)).collect();

    let key_of = |job: &JobPosting| match level {
        LocationLevel::State => job.state.clone(),
        LocationLevel::City => job.location.clone(),
    };

    let mut counts = Tally::new();
    let mut salaries = Means::new();
    for job in jobs {
        let Some(key) = key_of(job) else {
            continue;
        };
        if let Some(salary) = job.avg_salary {
            salaries.add(&key, salary);
        }
        counts.add(key);
    }

    let ranked = counts.ranked();

    let mut density: Vec<DensityPoint> = ranked
        .iter()
        .filter_map(|c| {
            let loc = info.get(c.label.as_str())?;
            Some(DensityPoint {
                location: c.label.clone(),
                latitude: loc.latitude?,
                longitude: loc.longitude?,
                jobs: c.count,
            })
        })
        .collect();
    if level == LocationLevel::City {
        density.truncate(CITY_DENSITY_LIMIT);
    }

    let population_adjusted = population_adjusted(&ranked, &info, top_n);

    let means = salaries.into_means();
    let top_by_salary = top_measures(
        means
            .iter()
            .map(|(label, avg, _)| Measure {
                label: label.clone(),
                value: *avg,
            })
            .collect(),
        top_n,
    );
    let cost_adjusted = top_measures(
        means
            .into_iter()
            .map(|(label, avg, _)| {
                let cost_index = info.get(label.as_str()).and_then(|l| l.cost_index);
                let value = match cost_index {
                    Some(ci) if ci > 0.0 => avg * (BASELINE_COST_INDEX / ci),
                    _ => avg,
                };
                Measure { label, value }
            })
            .collect(),
        top_n,
    );

    let mut top_by_jobs = ranked;
    top_by_jobs.truncate(top_n);

    LocationView {
        level,
        density,
        top_by_jobs,
        top_by_salary,
        population_adjusted,
        cost_adjusted,
    }
}

/// Job counts scaled to a location of average population. Locations without
/// a known, positive population are left out.
fn population_adjusted(
    counts: &[Count],
    info: &HashMap<&str, &LocationInfo>,
    top_n: usize,
) -> Vec<Measure> {
    let with_population: Vec<(&Count, f64)> = counts
        .iter()
        .filter_map(|c| {
            let population = info.get(c.label.as_str())?.population?;
            (population > 0.0).then_some((c, population))
        })
        .collect();

    let Some(mean_population) = mean(with_population.iter().map(|(_, p)| *p)) else {
        return Vec::new();
    };

    top_measures(
        with_population
            .into_iter()
            .map(|(c, population)| Measure {
                label: c.label.clone(),
                value: c.count as f64 * (mean_population / population),
            })
            .collect(),
        top_n,
    )
}
