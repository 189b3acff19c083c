//! Collage document rendering: the spotlight HTML page handed to the
//! screenshot step.
//!
//! The page template is embedded at compile time; poster markup is built
//! here from placements and injected through a named token. Tokens with
//! no backing data render empty or pick up a `hidden` class.

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::error::AppError;
use crate::domain::layout::PosterPlacement;
use crate::domain::summary::MovieSummary;
use crate::domain::text::html_escape;
use crate::domain::venues::{DisplayItem, render_html};

static COLLAGE_TEMPLATE: &str = include_str!("../templates/collage.html");

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn env() -> &'static Environment<'static> {
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template("collage.html", COLLAGE_TEMPLATE)
            .expect("embedded collage template is valid");
        env
    })
}

/// Render the collage page for one spotlight.
///
/// `films` pairs each (caller-shuffled) summary with its placement;
/// `venue_items` is the aggregated venue list for the footer strip.
pub fn render(
    title: &str,
    date_line: &str,
    films: &[(MovieSummary, PosterPlacement)],
    venue_items: &[DisplayItem],
) -> Result<String, AppError> {
    let poster_items: String = films.iter().map(|(s, p)| poster_item(s, p)).collect();

    let template = env()
        .get_template("collage.html")
        .map_err(|err| AppError::TemplateRenderError(err.to_string()))?;
    template
        .render(context! {
            title,
            date_line,
            poster_items,
            venue_line => render_html(venue_items),
            film_count => films.len(),
        })
        .map_err(|err| AppError::TemplateRenderError(err.to_string()))
}

fn poster_item(summary: &MovieSummary, placement: &PosterPlacement) -> String {
    let src = summary.poster_url.as_ref().map(|u| u.as_str()).unwrap_or_default();
    let score = match summary.rating {
        Some(rating) => format!(r#"<span class="score">{}%</span>"#, rating),
        None => r#"<span class="score hidden"></span>"#.to_string(),
    };
    format!(
        concat!(
            r#"<div class="poster" style="left: {left:.2}%; top: {top:.2}%; "#,
            r#"width: {width:.2}%; transform: translate(-50%, -50%) rotate({rot:.2}deg); "#,
            r#"z-index: {z};">"#,
            r#"<img src="{src}" alt="{alt}">{score}</div>"#
        ),
        left = placement.left_percent,
        top = placement.top_percent,
        width = placement.width_percent,
        rot = placement.rotation_deg,
        z = placement.z_index,
        src = html_escape(src),
        alt = html_escape(&summary.title),
        score = score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use url::Url;

    fn film(title: &str, rating: Option<u32>) -> (MovieSummary, PosterPlacement) {
        (
            MovieSummary {
                id: "x".to_string(),
                title: title.to_string(),
                poster_url: Some(
                    Url::parse("https://images.clusterflick.com/posters/x.jpg").unwrap(),
                ),
                rating,
                performance_count: 1,
                venue_count: 1,
                timestamp: Utc.timestamp_millis_opt(1_756_400_000_000).unwrap(),
                venue_id: None,
            },
            PosterPlacement {
                left_percent: 42.0,
                top_percent: 33.5,
                width_percent: 30.0,
                rotation_deg: -4.25,
                z_index: 2,
            },
        )
    }

    #[test]
    fn renders_posters_with_placement_styles() {
        let films = vec![film("Aftersun", Some(95))];
        let html = render("Last chance", "23-30 Aug", &films, &[]).unwrap();

        assert!(html.contains("left: 42.00%"));
        assert!(html.contains("top: 33.50%"));
        assert!(html.contains("width: 30.00%"));
        assert!(html.contains("rotate(-4.25deg)"));
        assert!(html.contains("z-index: 2;"));
        assert!(html.contains(r#"<span class="score">95%</span>"#));
        assert!(html.contains("1 films"));
    }

    #[test]
    fn missing_rating_renders_hidden_score() {
        let films = vec![film("Aftersun", None)];
        let html = render("Last chance", "", &films, &[]).unwrap();
        assert!(html.contains(r#"<span class="score hidden"></span>"#));
        // Empty date line picks up the hidden class.
        assert!(html.contains(r#"class="date-line hidden""#));
    }

    #[test]
    fn titles_are_escaped_in_alt_text() {
        let films = vec![film("Bonnie & Clyde", Some(90))];
        let html = render("Last chance", "w/c 25 Aug", &films, &[]).unwrap();
        assert!(html.contains("Bonnie &amp; Clyde"));
    }

    #[test]
    fn venue_line_feeds_the_footer() {
        let items = vec![
            DisplayItem { text: "2 Picturehouses".into(), venue_count: 2 },
            DisplayItem { text: "Rio".into(), venue_count: 1 },
        ];
        let html = render("Last chance", "date", &[], &items).unwrap();
        assert!(html.contains(
            r#"<span class="venue-name">2 Picturehouses</span> & <span class="venue-name">Rio</span>"#
        ));
    }
}
