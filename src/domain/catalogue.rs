//! Input data model for the listings catalogue, venue table, and
//! third-party rating tables.
//!
//! These types mirror the JSON fixtures produced by the scraping pipeline.
//! Parsing is deliberately permissive: unknown movies, absent venues, and
//! missing rating entries resolve to empty values rather than errors, so a
//! partially scraped catalogue still formats cleanly.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

/// One scheduled screening of a movie.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    /// Screening start, epoch milliseconds.
    pub time: i64,
    pub showing_id: String,
}

/// A movie's run at a single venue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showing {
    pub venue_id: String,
    /// When this showing first appeared in the catalogue, epoch milliseconds.
    #[serde(default)]
    pub seen: Option<i64>,
}

/// A movie entry as scraped into the catalogue fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub performances: Vec<Performance>,
    /// Keyed by showing id; referenced from `performances`.
    #[serde(default)]
    pub showings: HashMap<String, Showing>,
    /// Running time in milliseconds.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    // Upstream sources disagree on singular vs plural; accept both.
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub directors: Vec<String>,
}

impl Movie {
    /// The latest scheduled performance, if any.
    pub fn last_performance(&self) -> Option<&Performance> {
        self.performances.iter().max_by_key(|p| p.time)
    }

    /// The earliest `seen` timestamp across showings, with its venue.
    pub fn first_seen(&self) -> Option<(i64, &str)> {
        self.showings
            .values()
            .filter_map(|s| s.seen.map(|seen| (seen, s.venue_id.as_str())))
            .min_by_key(|(seen, _)| *seen)
    }

    /// Distinct venue ids this movie shows at, in stable order.
    pub fn venue_ids(&self) -> BTreeSet<&str> {
        self.showings.values().map(|s| s.venue_id.as_str()).collect()
    }

    /// Directors merged across both fixture spellings.
    pub fn all_directors(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.director.iter().map(|d| d.as_str()).collect();
        for d in &self.directors {
            if !out.contains(&d.as_str()) {
                out.push(d);
            }
        }
        out
    }
}

/// The movie catalogue, keyed by movie identifier.
pub type MovieTable = HashMap<String, Movie>;

/// A cinema venue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub name: String,
    /// Chain label shared by sibling venues (e.g. "ODEON").
    #[serde(default)]
    pub group_name: Option<String>,
    /// Platform -> handle, e.g. "bluesky" -> "riocinema.bsky.social".
    #[serde(default)]
    pub socials: HashMap<String, String>,
}

/// The venue lookup table, keyed by venue identifier. Read-only for the
/// duration of a formatting pass.
pub type VenueTable = HashMap<String, Venue>;

/// Critic and audience scores from the review-aggregator provider,
/// both out of 100.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorScores {
    #[serde(default)]
    pub critics: Option<u32>,
    #[serde(default)]
    pub audience: Option<u32>,
}

/// Rating tables for the three independent providers, each keyed by
/// movie identifier.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    /// Numeric score out of 10.
    #[serde(default)]
    pub imdb: HashMap<String, f64>,
    /// Nested critic/audience scores out of 100.
    #[serde(default)]
    pub rotten_tomatoes: HashMap<String, AggregatorScores>,
    /// Numeric score out of 100.
    #[serde(default)]
    pub metacritic: HashMap<String, u32>,
}

impl Ratings {
    /// Resolve one display score (0-100) for a movie.
    ///
    /// Provider order is fixed: aggregator critics, then metacritic, then
    /// imdb scaled to a percentage. Which source is authoritative is not
    /// this tool's call; the order only decides what gets displayed.
    /// A movie absent from every table yields `None`.
    pub fn percent_for(&self, movie_id: &str) -> Option<u32> {
        if let Some(scores) = self.rotten_tomatoes.get(movie_id)
            && let Some(critics) = scores.critics
        {
            return Some(critics.min(100));
        }
        if let Some(score) = self.metacritic.get(movie_id) {
            return Some((*score).min(100));
        }
        self.imdb
            .get(movie_id)
            .map(|score| ((score * 10.0).round() as u32).min(100))
    }
}
