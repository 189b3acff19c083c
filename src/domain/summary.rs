use chrono::{DateTime, Utc};
use url::Url;

/// A movie as selected for one spotlight run.
///
/// Built fresh per run by the selector and never mutated afterwards. The
/// meaning of `timestamp` depends on the theme: the final performance for
/// "ending this week", the first-seen time for "new this week".
/// `venue_id` is the venue associated with that timestamp.
#[derive(Debug, Clone)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub poster_url: Option<Url>,
    /// Display score out of 100, when any rating provider knows the film.
    pub rating: Option<u32>,
    pub performance_count: usize,
    pub venue_count: usize,
    pub timestamp: DateTime<Utc>,
    pub venue_id: Option<String>,
}
