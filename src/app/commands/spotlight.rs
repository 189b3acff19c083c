//! The spotlight pipeline: select films for a theme, lay out and render
//! the collage, compose the per-platform posts, and write every artifact.
//!
//! All formatting runs to completion before the first write, so a
//! composition failure never leaves a partial output set behind.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use url::Url;

use crate::adapters::{SeededRandom, ThreadRandom};
use crate::app::AppContext;
use crate::domain::layout::{self, PosterPlacement};
use crate::domain::selector::{self, Theme};
use crate::domain::social::{self, SocialPostConfig};
use crate::domain::venues;
use crate::domain::{AppError, MovieSummary, RandomSource, Venue, collage, thread};
use crate::ports::{ArtifactStore, CatalogueStore};

/// Base URL poster paths resolve against.
pub const POSTER_BASE_URL: &str = "https://images.clusterflick.com/";

/// Per-message limit for the threaded platform.
pub const BLUESKY_CHUNK_LIMIT: usize = 300;

/// Options for one spotlight run.
pub struct SpotlightOptions {
    pub theme: Theme,
    pub catalogue_key: String,
    /// Fixes the layout randomness for reproducible runs.
    pub seed: Option<u64>,
}

/// Result of one spotlight run.
#[derive(Debug)]
pub struct SpotlightOutcome {
    pub theme: Theme,
    /// Films in the social (relaxed) selection.
    pub film_count: usize,
    /// Films in the collage (strict) selection.
    pub collage_count: usize,
    pub written: Vec<PathBuf>,
}

/// Execute the spotlight pipeline against the current time.
pub fn execute<C, A>(
    ctx: &AppContext<C, A>,
    options: &SpotlightOptions,
) -> Result<SpotlightOutcome, AppError>
where
    C: CatalogueStore,
    A: ArtifactStore,
{
    execute_at(ctx, options, Utc::now())
}

/// Execute with an explicit "now" (injectable clock for tests).
pub fn execute_at<C, A>(
    ctx: &AppContext<C, A>,
    options: &SpotlightOptions,
    now: DateTime<Utc>,
) -> Result<SpotlightOutcome, AppError>
where
    C: CatalogueStore,
    A: ArtifactStore,
{
    let movies = ctx.catalogue().load_movies(&options.catalogue_key)?;
    let venues = ctx.catalogue().load_venues()?;
    let ratings = ctx.catalogue().load_ratings()?;

    let poster_base = Url::parse(POSTER_BASE_URL)
        .map_err(|err| AppError::config_error(format!("Bad poster base URL: {}", err)))?;
    let selection = selector::select(options.theme, &movies, &venues, &ratings, now, &poster_base);

    let mut rng: Box<dyn RandomSource> = match options.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    };

    // Collage: shuffle the strict selection, then place each poster.
    let mut films = selection.collage.clone();
    layout::shuffle(&mut films, rng.as_mut());
    let placements = layout::generate(films.len(), rng.as_mut());
    let films: Vec<(MovieSummary, PosterPlacement)> =
        films.into_iter().zip(placements).collect();

    let venue_refs: Vec<&Venue> =
        selection.venue_ids.iter().filter_map(|id| venues.get(id)).collect();
    let venue_items = venues::aggregate(&venue_refs);

    let slug = options.theme.slug();
    let html = collage::render(
        options.theme.display_name(),
        &date_line(options.theme, now),
        &films,
        &venue_items,
    )?;

    // Compose every post before writing anything.
    let mut artifacts: Vec<(String, String)> = vec![(format!("{}-collage.html", slug), html)];

    let header = options.theme.header();
    let intro = options.theme.intro_template();
    let configs = [
        SocialPostConfig::generic(header, intro, options.theme.line_format()),
        SocialPostConfig::instagram(header, intro),
        SocialPostConfig::mastodon(header, intro),
    ];
    for config in &configs {
        let text = social::compose(&selection.social, &venues, config)?;
        artifacts.push((format!("{}-{}.txt", slug, config.platform), text));
    }

    let bluesky = SocialPostConfig::bluesky(header, intro);
    let post = social::compose_full(&selection.social, &venues, &bluesky)?;
    let chunks = thread::chunk(&post, BLUESKY_CHUNK_LIMIT);
    artifacts.push((format!("{}-bluesky-thread.txt", slug), thread::join_thread(&chunks)));

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, contents) in &artifacts {
        written.push(ctx.artifacts().write_artifact(name, contents)?);
    }

    Ok(SpotlightOutcome {
        theme: options.theme,
        film_count: selection.social.len(),
        collage_count: films.len(),
        written,
    })
}

fn date_line(theme: Theme, now: DateTime<Utc>) -> String {
    let fmt = "%-d %b";
    match theme {
        Theme::EndingThisWeek => format!(
            "Final showings {} to {}",
            now.format(fmt),
            (now + Duration::days(7)).format(fmt)
        ),
        Theme::NewThisWeek => {
            format!("Added since {}", (now - Duration::days(7)).format(fmt))
        }
    }
}
