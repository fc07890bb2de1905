//! Aggregate views over the (filtered) dataset, one module per dashboard page.
//!
//! - [`overview`] — posting volume, salary trend and categorical distributions.
//! - [`locations`] — job density and rankings by state or city.
//! - [`requirements`] — degrees, skills and experience asked for.
//! - [`companies`] — company rankings, workforce education/skills, founding years.
//! - [`jobs`] — the per-job lookup table with a risk column.
//!
//! Every ranking is stable: equal values keep first-seen order.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

pub mod companies;
pub mod jobs;
pub mod locations;
pub mod overview;
pub mod requirements;

/// A label with how often it occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub label: String,
    pub count: u64,
}

/// A label with a derived value (a mean, an adjusted figure).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    pub label: String,
    pub value: f64,
}

/// Insertion-ordered counter.
#[derive(Debug, Default)]
pub struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<Count>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl Into<String>) {
        self.add_n(label, 1);
    }

    pub fn add_n(&mut self, label: impl Into<String>, n: u64) {
        let label = label.into();
        match self.index.get(&label) {
            Some(&i) => self.entries[i].count += n,
            None => {
                self.index.insert(label.clone(), self.entries.len());
                self.entries.push(Count { label, count: n });
            }
        }
    }

    /// Entries, most frequent first.
    pub fn ranked(self) -> Vec<Count> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    pub fn top(self, n: usize) -> Vec<Count> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Insertion-ordered per-label mean.
#[derive(Debug, Default)]
pub struct Means {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64, u64)>,
}

impl Means {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, value: f64) {
        match self.index.get(label) {
            Some(&i) => {
                self.entries[i].1 += value;
                self.entries[i].2 += 1;
            }
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), value, 1));
            }
        }
    }

    /// `(label, mean, samples)` in first-seen order.
    pub fn into_means(self) -> Vec<(String, f64, u64)> {
        self.entries
            .into_iter()
            .map(|(label, sum, n)| (label, sum / n as f64, n))
            .collect()
    }
}

/// Sort by descending value, keeping ties in place, and keep the first `n`.
pub fn top_measures(mut measures: Vec<Measure>, n: usize) -> Vec<Measure> {
    measures.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    measures.truncate(n);
    measures
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0u64), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}
