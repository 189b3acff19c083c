//! Social post composition: platform-ready text from a list of movie
//! summaries and the venue table.
//!
//! Two rendering modes exist. Full mode groups movies into per-venue
//! blocks under a header and footer; it is also the input to the thread
//! chunker. Compact mode is a character-budget-aware abbreviation that
//! shrinks its "top picks" section until the post fits, and fails loudly
//! if it never does.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};
use thiserror::Error;

use crate::domain::catalogue::VenueTable;
use crate::domain::summary::MovieSummary;

/// Section separator inside a post.
pub const SEPARATOR: &str = "----------";
/// Marker line standing in for venue blocks omitted under a budget.
pub const MORE_MARKER: &str = "+more at clusterflick.com";
/// Fixed promotional line in the full-mode header block.
pub const PROMO_LINE: &str = "Showtimes for every cinema at clusterflick.com";
/// Display name for movies whose venue is unknown.
pub const UNKNOWN_VENUE: &str = "Unknown venue";
/// Venues need at least this many films to be listed in compact mode.
pub const MIN_VENUE_FILMS: usize = 2;
/// Starting size of the compact-mode top picks section.
pub const DEFAULT_TOP_PICKS: usize = 15;

/// Error during post composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// Compact rendering still exceeds the platform budget at the
    /// smallest top-picks count. Surfaced rather than truncated so
    /// misconfiguration is detectable.
    #[error(
        "{platform} post is {length} characters at the smallest top-picks count; limit is {limit}"
    )]
    BudgetExceeded { platform: String, length: usize, limit: usize },

    /// A top-picks count of zero is rejected before any formatting.
    #[error("Top picks count must be at least 1")]
    InvalidTopPicks,

    /// The intro template failed to render.
    #[error("Failed to render intro template: {0}")]
    IntroTemplate(String),
}

/// How a movie renders as a single line, and how movies are ordered
/// within a venue block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// `"• Title (92%)"`; movies ordered lexically by title.
    Title,
    /// `"• Title (last showing Sat 30 Aug)"`; movies ordered by timestamp.
    LastShowing,
    /// `"• Title (added Wed 27 Aug)"`; movies ordered by timestamp.
    FirstSeen,
}

/// Which rendering mode a platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Full,
    Compact,
}

/// Per-platform post configuration.
#[derive(Debug, Clone)]
pub struct SocialPostConfig {
    pub platform: String,
    pub header: String,
    /// Contains a single `{{ count }}` placeholder.
    pub intro_template: String,
    pub hashtags: Vec<String>,
    pub footer: String,
    pub character_limit: Option<usize>,
    pub line_format: LineFormat,
    pub mode: RenderMode,
    pub top_picks: usize,
}

const DEFAULT_HASHTAGS: &[&str] = &["#Cinema", "#Film", "#WhatsOn"];
const DEFAULT_FOOTER: &str = "🎟️ Full listings at clusterflick.com";

impl SocialPostConfig {
    fn base(platform: &str, header: &str, intro_template: &str) -> Self {
        SocialPostConfig {
            platform: platform.to_string(),
            header: header.to_string(),
            intro_template: intro_template.to_string(),
            hashtags: DEFAULT_HASHTAGS.iter().map(|h| h.to_string()).collect(),
            footer: DEFAULT_FOOTER.to_string(),
            character_limit: None,
            line_format: LineFormat::Title,
            mode: RenderMode::Full,
            top_picks: DEFAULT_TOP_PICKS,
        }
    }

    /// Unconstrained full-mode post with the theme's line format.
    pub fn generic(header: &str, intro_template: &str, line_format: LineFormat) -> Self {
        SocialPostConfig { line_format, ..Self::base("generic", header, intro_template) }
    }

    /// Compact post under Instagram's effective caption budget.
    pub fn instagram(header: &str, intro_template: &str) -> Self {
        SocialPostConfig {
            character_limit: Some(2000),
            mode: RenderMode::Compact,
            ..Self::base("instagram", header, intro_template)
        }
    }

    /// Full-mode post squeezed into Mastodon's single-status limit.
    pub fn mastodon(header: &str, intro_template: &str) -> Self {
        SocialPostConfig {
            character_limit: Some(500),
            ..Self::base("mastodon", header, intro_template)
        }
    }

    /// Unconstrained full-mode post meant for the thread chunker.
    pub fn bluesky(header: &str, intro_template: &str) -> Self {
        Self::base("bluesky", header, intro_template)
    }
}

/// A full-mode post, kept as structured blocks so the thread chunker can
/// pack whole venue blocks. `text()` is the rendered form.
#[derive(Debug, Clone)]
pub struct ComposedPost {
    pub header: String,
    pub venue_blocks: Vec<String>,
    pub footer: String,
}

impl ComposedPost {
    /// The rendered post: blocks joined with blank lines.
    pub fn text(&self) -> String {
        let mut parts = vec![self.header.clone()];
        parts.extend(self.venue_blocks.iter().cloned());
        parts.push(self.footer.clone());
        parts.join("\n\n")
    }
}

/// Compose platform-ready text according to the config's mode and budget.
pub fn compose(
    summaries: &[MovieSummary],
    venues: &VenueTable,
    config: &SocialPostConfig,
) -> Result<String, ComposeError> {
    match (config.mode, config.character_limit) {
        (RenderMode::Full, None) => Ok(compose_full(summaries, venues, config)?.text()),
        (RenderMode::Full, Some(limit)) => compose_full_budgeted(summaries, venues, config, limit),
        (RenderMode::Compact, _) => compose_compact(summaries, venues, config),
    }
}

/// Compose the unconstrained full-mode post as structured blocks.
pub fn compose_full(
    summaries: &[MovieSummary],
    venues: &VenueTable,
    config: &SocialPostConfig,
) -> Result<ComposedPost, ComposeError> {
    let intro = render_intro(&config.intro_template, summaries.len())?;
    let header = format!("🎬 {} 🎬\n{}\n{}\n{}", config.header, intro, PROMO_LINE, SEPARATOR);

    let venue_blocks =
        buckets(summaries, venues, config).iter().map(|b| b.render(config)).collect();

    let footer = format!("{}\n{}\n{}", SEPARATOR, config.hashtags.join(" "), config.footer);

    Ok(ComposedPost { header, venue_blocks, footer })
}

/// Full mode under a budget: whole venue blocks are appended greedily in
/// bucket order; the first block that would overflow is dropped along
/// with the rest and replaced by the `"+more"` marker before the footer.
fn compose_full_budgeted(
    summaries: &[MovieSummary],
    venues: &VenueTable,
    config: &SocialPostConfig,
    limit: usize,
) -> Result<String, ComposeError> {
    let post = compose_full(summaries, venues, config)?;

    let mut kept: Vec<String> = Vec::new();
    let mut omitted = false;
    for block in &post.venue_blocks {
        let mut candidate = kept.clone();
        candidate.push(block.clone());
        let trial =
            ComposedPost { header: post.header.clone(), venue_blocks: candidate, footer: post.footer.clone() };
        if trial.text().chars().count() <= limit {
            kept.push(block.clone());
        } else {
            omitted = true;
            break;
        }
    }
    if omitted {
        kept.push(MORE_MARKER.to_string());
    }

    Ok(ComposedPost { header: post.header, venue_blocks: kept, footer: post.footer }.text())
}

/// Compact mode: condensed intro, a top-picks section, a venue roll-up,
/// and the standard footer. Over budget, the top-picks count shrinks by
/// two and the render retries; the loop is bounded below by 1.
fn compose_compact(
    summaries: &[MovieSummary],
    venues: &VenueTable,
    config: &SocialPostConfig,
) -> Result<String, ComposeError> {
    if config.top_picks == 0 {
        return Err(ComposeError::InvalidTopPicks);
    }

    let mut top_picks = config.top_picks;
    loop {
        let text = render_compact(summaries, venues, config, top_picks)?;
        let length = text.chars().count();
        match config.character_limit {
            None => return Ok(text),
            Some(limit) if length <= limit => return Ok(text),
            Some(limit) => {
                if top_picks <= 2 {
                    return Err(ComposeError::BudgetExceeded {
                        platform: config.platform.clone(),
                        length,
                        limit,
                    });
                }
                top_picks -= 2;
            }
        }
    }
}

fn render_compact(
    summaries: &[MovieSummary],
    venues: &VenueTable,
    config: &SocialPostConfig,
    top_picks: usize,
) -> Result<String, ComposeError> {
    let intro = render_intro(&config.intro_template, summaries.len())?;
    let intro = intro.strip_prefix("These ").unwrap_or(&intro).to_string();

    let mut ranked: Vec<&MovieSummary> = summaries.iter().collect();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.title.cmp(&b.title)));

    let mut picks = String::from("⭐ Top picks:");
    for (i, movie) in ranked.iter().take(top_picks).enumerate() {
        let venue = venue_display_name(movie.venue_id.as_deref(), venues);
        let score = movie.rating.map(|r| format!(" ({}%)", r)).unwrap_or_default();
        picks.push_str(&format!("\n{}. {}{} @ {}", i + 1, movie.title, score, venue));
    }

    let grouped = buckets(summaries, venues, config);
    let mut listed: Vec<&Bucket> =
        grouped.iter().filter(|b| b.movies.len() >= MIN_VENUE_FILMS).collect();
    listed.sort_by(|a, b| {
        b.movies.len().cmp(&a.movies.len()).then_with(|| a.venue_name.cmp(&b.venue_name))
    });
    let singles = grouped.len() - listed.len();

    let mut venue_section = String::from("📍 Venues:");
    for bucket in &listed {
        venue_section
            .push_str(&format!("\n{} ({} films)", bucket.venue_name, bucket.movies.len()));
    }
    if singles > 0 {
        venue_section.push_str(&format!("\n+{} more venues with 1 film each", singles));
    }

    let footer = format!("{}\n{}\n{}", SEPARATOR, config.hashtags.join(" "), config.footer);

    Ok([intro, picks, venue_section, footer].join("\n\n"))
}

/// A venue's bucket of movies, ordered per the config's line format.
struct Bucket<'a> {
    venue_name: String,
    handle: Option<String>,
    movies: Vec<&'a MovieSummary>,
}

impl Bucket<'_> {
    fn render(&self, config: &SocialPostConfig) -> String {
        let mut block = match &self.handle {
            Some(handle) => format!("📍 {} ({})", self.venue_name, at_handle(handle)),
            None => format!("📍 {}", self.venue_name),
        };
        for movie in &self.movies {
            block.push('\n');
            block.push_str(&movie_line(movie, config.line_format));
        }
        block
    }
}

/// Group summaries into venue buckets, ordered lexically by display name.
fn buckets<'a>(
    summaries: &'a [MovieSummary],
    venues: &VenueTable,
    config: &SocialPostConfig,
) -> Vec<Bucket<'a>> {
    let mut by_name: BTreeMap<String, Bucket<'a>> = BTreeMap::new();
    for summary in summaries {
        let venue_id = summary.venue_id.as_deref().unwrap_or("unknown");
        let name = venue_display_name(Some(venue_id), venues);
        by_name
            .entry(name.clone())
            .or_insert_with(|| Bucket {
                venue_name: name,
                handle: venues
                    .get(venue_id)
                    .and_then(|v| v.socials.get(&config.platform).cloned()),
                movies: Vec::new(),
            })
            .movies
            .push(summary);
    }

    let mut out: Vec<Bucket<'a>> = by_name.into_values().collect();
    for bucket in &mut out {
        match config.line_format {
            LineFormat::Title => bucket.movies.sort_by(|a, b| a.title.cmp(&b.title)),
            LineFormat::LastShowing | LineFormat::FirstSeen => {
                bucket.movies.sort_by(|a, b| {
                    a.timestamp.cmp(&b.timestamp).then_with(|| a.title.cmp(&b.title))
                });
            }
        }
    }
    out
}

fn venue_display_name(venue_id: Option<&str>, venues: &VenueTable) -> String {
    venue_id
        .and_then(|id| venues.get(id))
        .map(|v| v.name.clone())
        .unwrap_or_else(|| UNKNOWN_VENUE.to_string())
}

fn movie_line(movie: &MovieSummary, format: LineFormat) -> String {
    match format {
        LineFormat::Title => match movie.rating {
            Some(rating) => format!("• {} ({}%)", movie.title, rating),
            None => format!("• {}", movie.title),
        },
        LineFormat::LastShowing => {
            format!("• {} (last showing {})", movie.title, movie.timestamp.format("%a %-d %b"))
        }
        LineFormat::FirstSeen => {
            format!("• {} (added {})", movie.title, movie.timestamp.format("%a %-d %b"))
        }
    }
}

fn at_handle(handle: &str) -> String {
    if handle.starts_with('@') { handle.to_string() } else { format!("@{}", handle) }
}

fn render_intro(template: &str, count: usize) -> Result<String, ComposeError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });
    env.render_str(template, minijinja::context! { count })
        .map_err(|err| ComposeError::IntroTemplate(err.to_string()))
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();
