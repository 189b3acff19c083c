//! Spotlight selection: per-theme filtering of the catalogue and
//! construction of the movie summaries the formatters consume.
//!
//! Selection is deliberately dual-pass. The relaxed pass (theme predicate
//! only) feeds the social text; the strict pass additionally requires a
//! poster and a rating and feeds the visual collage. A movie missing a
//! poster still deserves a mention in the post even though it can't
//! appear on the page.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use url::Url;

use crate::domain::catalogue::{Movie, MovieTable, Ratings, VenueTable};
use crate::domain::social::LineFormat;
use crate::domain::summary::MovieSummary;

/// Theme window: seven days either side of "now".
pub const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// A recurring spotlight theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Films whose final performance falls within the next seven days.
    EndingThisWeek,
    /// Films first seen in the catalogue within the last seven days.
    NewThisWeek,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::EndingThisWeek, Theme::NewThisWeek];

    /// Artifact filename slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Theme::EndingThisWeek => "ending-this-week",
            Theme::NewThisWeek => "new-this-week",
        }
    }

    /// Collage page title.
    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::EndingThisWeek => "Last chance",
            Theme::NewThisWeek => "New this week",
        }
    }

    /// Social post header line (emoji-wrapped by the composer).
    pub fn header(&self) -> &'static str {
        match self {
            Theme::EndingThisWeek => "LAST CHANCE TO SEE",
            Theme::NewThisWeek => "NEW THIS WEEK",
        }
    }

    /// Intro template; "These " must lead so compact mode can condense it.
    pub fn intro_template(&self) -> &'static str {
        match self {
            Theme::EndingThisWeek => {
                "These {{ count }} films have their final showings in the next week"
            }
            Theme::NewThisWeek => "These {{ count }} films arrived in cinemas this week",
        }
    }

    /// The theme's natural per-movie line format.
    pub fn line_format(&self) -> LineFormat {
        match self {
            Theme::EndingThisWeek => LineFormat::LastShowing,
            Theme::NewThisWeek => LineFormat::FirstSeen,
        }
    }
}

/// Output of one selection run.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Strict pass: poster and rating required. Feeds the collage.
    pub collage: Vec<MovieSummary>,
    /// Relaxed pass: theme predicate only. Feeds the social text.
    pub social: Vec<MovieSummary>,
    /// Distinct venues showing any selected film.
    pub venue_ids: BTreeSet<String>,
}

/// Apply a theme's filters to the catalogue.
pub fn select(
    theme: Theme,
    movies: &MovieTable,
    venues: &VenueTable,
    ratings: &Ratings,
    now: DateTime<Utc>,
    poster_base: &Url,
) -> Selection {
    // Relaxed pass.
    let mut social: Vec<MovieSummary> = movies
        .iter()
        .filter_map(|(id, movie)| summarize(theme, id, movie, ratings, now, poster_base))
        .collect();
    social.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));

    // Strict pass, run separately over the catalogue: the collage set is
    // a product decision, not just a filter over the social set.
    let mut collage: Vec<MovieSummary> = movies
        .iter()
        .filter_map(|(id, movie)| summarize(theme, id, movie, ratings, now, poster_base))
        .filter(|s| s.poster_url.is_some() && s.rating.is_some())
        .collect();
    collage.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));

    let mut venue_ids = BTreeSet::new();
    for (_, movie) in movies.iter().filter(|(id, m)| {
        social.iter().any(|s| &s.id == *id) && !m.showings.is_empty()
    }) {
        for venue_id in movie.venue_ids() {
            if venues.contains_key(venue_id) {
                venue_ids.insert(venue_id.to_string());
            }
        }
    }

    Selection { collage, social, venue_ids }
}

/// Build a movie's summary when it matches the theme's predicate.
fn summarize(
    theme: Theme,
    id: &str,
    movie: &Movie,
    ratings: &Ratings,
    now: DateTime<Utc>,
    poster_base: &Url,
) -> Option<MovieSummary> {
    let now_ms = now.timestamp_millis();
    let (timestamp_ms, venue_id) = match theme {
        Theme::EndingThisWeek => {
            let last = movie.last_performance()?;
            if last.time < now_ms || last.time > now_ms + WEEK_MS {
                return None;
            }
            let venue = movie.showings.get(&last.showing_id).map(|s| s.venue_id.clone());
            (last.time, venue)
        }
        Theme::NewThisWeek => {
            let (seen, venue_id) = movie.first_seen()?;
            if seen < now_ms - WEEK_MS || seen > now_ms {
                return None;
            }
            (seen, Some(venue_id.to_string()))
        }
    };

    let timestamp = Utc.timestamp_millis_opt(timestamp_ms).single()?;
    let poster_url = movie
        .poster_path
        .as_deref()
        .and_then(|path| poster_base.join(path.trim_start_matches('/')).ok());

    Some(MovieSummary {
        id: id.to_string(),
        title: movie.title.clone(),
        poster_url,
        rating: ratings.percent_for(id),
        performance_count: movie.performances.len(),
        venue_count: movie.venue_ids().len(),
        timestamp,
        venue_id,
    })
}
