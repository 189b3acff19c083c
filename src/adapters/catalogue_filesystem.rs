//! Filesystem-backed catalogue store reading the JSON fixtures the
//! scraping pipeline drops into a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, MovieTable, Ratings, VenueTable};
use crate::ports::CatalogueStore;

/// Loads `catalogue-<key>.json`, `venues.json`, and `ratings.json` from a
/// data directory.
pub struct JsonCatalogueStore {
    data_dir: PathBuf,
}

impl JsonCatalogueStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|err| AppError::parse_error(format!("{} ({})", what, path.display()), err))
    }
}

impl CatalogueStore for JsonCatalogueStore {
    fn load_movies(&self, key: &str) -> Result<MovieTable, AppError> {
        let path = self.data_dir.join(format!("catalogue-{}.json", key));
        if !path.exists() {
            return Err(AppError::CatalogueNotFound {
                key: key.to_string(),
                path: path.display().to_string(),
            });
        }
        Self::read_json(&path, "movie catalogue")
    }

    fn load_venues(&self) -> Result<VenueTable, AppError> {
        let path = self.data_dir.join("venues.json");
        if !path.exists() {
            return Err(AppError::FixtureNotFound {
                what: "Venue table",
                path: path.display().to_string(),
            });
        }
        Self::read_json(&path, "venue table")
    }

    fn load_ratings(&self) -> Result<Ratings, AppError> {
        let path = self.data_dir.join("ratings.json");
        if !path.exists() {
            // Ratings are best-effort; a missing table means no scores.
            return Ok(Ratings::default());
        }
        Self::read_json(&path, "rating tables")
    }
}
