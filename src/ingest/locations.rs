use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{number, read_rows, text, Loader, Synonyms};
use crate::models::LocationInfo;

/// Granularity of a coordinates table and of location aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationLevel {
    State,
    City,
}

const SYNONYMS: Synonyms = &[
    &["LOCATION", "LOCATION_ST", "CITY"],
    &["LATITUDE", "STATE_LATITUDE"],
    &["LONGITUDE", "STATE_LONGITUDE"],
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
struct RawLocation {
    state: Option<String>,
    location: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    population: Option<String>,
    cost_index: Option<String>,
}

/// Loader for state or city coordinate tables.
///
/// State tables are keyed by `STATE`; city tables by `LOCATION`
/// (or `LOCATION_ST` / `CITY`). Rows without a key are dropped.
pub struct LocationsLoader {
    level: LocationLevel,
}

impl LocationsLoader {
    pub fn new(level: LocationLevel) -> Self {
        Self { level }
    }
}

impl Loader for LocationsLoader {
    type Record = LocationInfo;

    fn load(&self, path: &Path) -> Result<Vec<LocationInfo>> {
        let rows: Vec<RawLocation> = read_rows(path, SYNONYMS)?;

        let locations: Vec<LocationInfo> = rows
            .into_iter()
            .filter_map(|raw| {
                let key = match self.level {
                    LocationLevel::State => text(raw.state),
                    LocationLevel::City => text(raw.location),
                }?;
                Some(LocationInfo {
                    key,
                    latitude: number("LATITUDE", raw.latitude.as_deref()),
                    longitude: number("LONGITUDE", raw.longitude.as_deref()),
                    population: number("POPULATION", raw.population.as_deref()),
                    cost_index: number("COST_INDEX", raw.cost_index.as_deref()),
                })
            })
            .collect();

        info!(path = %path.display(), level = ?self.level, rows = locations.len(), "loaded coordinates");
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_state_table() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "STATE,LATITUDE,LONGITUDE,POPULATION,COST_INDEX").unwrap();
        writeln!(f, "WA,47.4,-120.5,7700000,115.1").unwrap();
        writeln!(f, ",1,1,1,1").unwrap();
        writeln!(f, "OR,44.0,-120.5,,").unwrap();

        let states = LocationsLoader::new(LocationLevel::State)
            .load(f.path())
            .unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].key, "WA");
        assert_eq!(states[0].population, Some(7_700_000.0));
        assert_eq!(states[1].cost_index, None);
    }

    #[test]
    fn test_load_city_table() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "location_st,latitude,longitude").unwrap();
        writeln!(f, "\"Seattle, WA\",47.6,-122.3").unwrap();

        let cities = LocationsLoader::new(LocationLevel::City)
            .load(f.path())
            .unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].key, "Seattle, WA");
        assert_eq!(cities[0].longitude, Some(-122.3));
    }

    #[test]
    fn test_city_table_with_several_key_columns() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "CITY,STATE,LOCATION_ST,LATITUDE,LONGITUDE").unwrap();
        writeln!(f, "Seattle,WA,\"Seattle, WA\",47.6,-122.3").unwrap();

        let cities = LocationsLoader::new(LocationLevel::City)
            .load(f.path())
            .unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].key, "Seattle");
        assert_eq!(cities[0].latitude, Some(47.6));

        let states = LocationsLoader::new(LocationLevel::State)
            .load(f.path())
            .unwrap();
        assert_eq!(states[0].key, "WA");
    }
}
