use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub mod companies;
pub mod jobs;
pub mod listcol;
pub mod locations;

/// Reads one table from disk into domain records.
pub trait Loader {
    type Record;

    fn load(&self, path: &Path) -> Result<Vec<Self::Record>>;
}

/// Groups of column names that hold the same field. The first name of each
/// group is the one row structs deserialize.
pub(crate) type Synonyms = &'static [&'static [&'static str]];

/// Read every row of a CSV file into `T`.
///
/// Header names are upper-cased first, so row structs only need to know the
/// upper-case column names. Columns a row struct does not name are ignored;
/// columns the file lacks deserialize as `None`. See [`canonical_headers`]
/// for how synonym and repeated columns are resolved.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path, synonyms: Synonyms) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = canonical_headers(
        reader
            .headers()
            .with_context(|| format!("failed to read header of {}", path.display()))?,
        synonyms,
    );
    reader.set_headers(headers.clone());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let line = idx + 2;
        let record =
            record.with_context(|| format!("{}: malformed row {}", path.display(), line))?;
        let row: T = record
            .deserialize(Some(&headers))
            .with_context(|| format!("{}: cannot read row {}", path.display(), line))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Upper-case every header and rename synonyms to their group's first name.
///
/// Only the leftmost column for a field keeps its name; later columns that
/// resolve to the same name are blanked so the row structs never see a
/// duplicate field.
fn canonical_headers(raw: &StringRecord, synonyms: Synonyms) -> StringRecord {
    let mut taken = HashSet::new();
    raw.iter()
        .map(|header| {
            let upper = header.to_uppercase();
            let name = synonyms
                .iter()
                .find(|group| group.iter().any(|name| *name == upper))
                .map_or(upper.clone(), |group| group[0].to_string());

            if taken.insert(name.clone()) {
                name
            } else {
                debug!(column = %upper, field = %name, "field already has a column, ignoring");
                String::new()
            }
        })
        .collect()
}

/// Trim a text cell; blank becomes `None`.
pub(crate) fn text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse a non-negative count. Accepts thousands separators and whole floats.
pub(crate) fn count(column: &str, raw: Option<&str>) -> Option<u64> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    let cleaned = value.replace(',', "");

    if let Ok(n) = cleaned.parse::<u64>() {
        return Some(n);
    }
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
        _ => {
            warn!(column, value, "not a count, treating as missing");
            None
        }
    }
}

/// Parse a float; unparseable text becomes `None`.
pub(crate) fn number(column: &str, raw: Option<&str>) -> Option<f64> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    if value.eq_ignore_ascii_case("nan") {
        return None;
    }
    match value.replace(',', "").parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f),
        _ => {
            warn!(column, value, "not a number, treating as missing");
            None
        }
    }
}

/// Parse a year such as `1998` or `1998.0`.
pub(crate) fn year(column: &str, raw: Option<&str>) -> Option<i32> {
    number(column, raw).and_then(|f| {
        if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
            Some(f as i32)
        } else {
            warn!(column, value = f, "not a year, treating as missing");
            None
        }
    })
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a calendar date, ignoring any time-of-day suffix.
pub(crate) fn date(column: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    let day = value.split([' ', 'T']).next().unwrap_or(value);

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok());
    if parsed.is_none() {
        warn!(column, value, "not a date, treating as missing");
    }
    parsed
}
