use crate::domain::{AppError, MovieTable, Ratings, VenueTable};

/// Source of the catalogue, venue, and rating fixtures.
///
/// Implementations load by catalogue key (e.g. a city or region); how the
/// data got there is outside the formatting core's contract.
pub trait CatalogueStore {
    /// Load the movie catalogue for a key.
    fn load_movies(&self, key: &str) -> Result<MovieTable, AppError>;

    /// Load the venue lookup table.
    fn load_venues(&self) -> Result<VenueTable, AppError>;

    /// Load the rating provider tables. Missing tables are empty, not
    /// errors.
    fn load_ratings(&self) -> Result<Ratings, AppError>;
}
