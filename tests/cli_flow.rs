mod common;

use common::TestContext;
use predicates::prelude::*;

fn seeded_run(ctx: &TestContext, theme: &str, key: &str) {
    ctx.cli()
        .args([
            theme,
            key,
            "--data-dir",
            &ctx.data_dir().display().to_string(),
            "--out-dir",
            &ctx.out_dir().display().to_string(),
            "--seed",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅"));
}

#[test]
fn ending_this_week_writes_every_artifact() {
    let ctx = TestContext::new();
    ctx.write_venues();
    ctx.write_catalogue(
        "london",
        &[("m1", "Aftersun", "rio"), ("m2", "Beau Travail", "genesis")],
    );
    ctx.write_ratings(&["m1", "m2"]);

    seeded_run(&ctx, "ending-this-week", "london");

    assert_eq!(ctx.written_files("ending-this-week-collage").len(), 1);
    for platform in ["generic", "instagram", "mastodon", "bluesky-thread"] {
        assert_eq!(
            ctx.written_files(&format!("ending-this-week-{}", platform)).len(),
            1,
            "missing artifact for {}",
            platform
        );
    }

    let html = ctx.read_written("ending-this-week-collage");
    assert!(html.contains("Last chance"));
    assert!(html.contains("m1.jpg"));
    assert!(html.contains("Rio Cinema"));

    let generic = ctx.read_written("ending-this-week-generic");
    assert!(generic.contains("🎬 LAST CHANCE TO SEE 🎬"));
    assert!(generic.contains("These 2 films"));
    assert!(generic.contains("📍 Rio Cinema"));
    assert!(generic.contains("• Aftersun"));
    assert!(generic.contains("clusterflick.com"));

    let thread = ctx.read_written("ending-this-week-bluesky-thread");
    assert!(thread.contains("(1/"));
    assert!(thread.contains("@riocinema.bsky.social"));
}

#[test]
fn new_this_week_alias_runs_the_theme() {
    let ctx = TestContext::new();
    ctx.write_venues();
    ctx.write_catalogue("london", &[("m1", "Aftersun", "rio")]);
    ctx.write_ratings(&["m1"]);

    seeded_run(&ctx, "new", "london");

    let generic = ctx.read_written("new-this-week-generic");
    assert!(generic.contains("🎬 NEW THIS WEEK 🎬"));
    assert!(generic.contains("(added "));
}

#[test]
fn missing_catalogue_argument_exits_with_usage() {
    let ctx = TestContext::new();
    ctx.cli()
        .arg("ending-this-week")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_catalogue_key_reports_the_key() {
    let ctx = TestContext::new();
    ctx.write_venues();
    ctx.write_catalogue("london", &[("m1", "Aftersun", "rio")]);

    ctx.cli()
        .args([
            "ending-this-week",
            "paris",
            "--data-dir",
            &ctx.data_dir().display().to_string(),
            "--out-dir",
            &ctx.out_dir().display().to_string(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalogue 'paris' not found"));
}

#[test]
fn missing_venue_table_is_an_error() {
    let ctx = TestContext::new();
    ctx.write_catalogue("london", &[("m1", "Aftersun", "rio")]);

    ctx.cli()
        .args([
            "ending-this-week",
            "london",
            "--data-dir",
            &ctx.data_dir().display().to_string(),
            "--out-dir",
            &ctx.out_dir().display().to_string(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Venue table fixture not found"));
}

#[test]
fn seeded_runs_produce_identical_collages() {
    let ctx_a = TestContext::new();
    let ctx_b = TestContext::new();
    for ctx in [&ctx_a, &ctx_b] {
        ctx.write_venues();
        ctx.write_catalogue(
            "london",
            &[
                ("m1", "Aftersun", "rio"),
                ("m2", "Beau Travail", "genesis"),
                ("m3", "Casablanca", "odeon-camden"),
            ],
        );
        ctx.write_ratings(&["m1", "m2", "m3"]);
        seeded_run(ctx, "ending-this-week", "london");
    }

    let html_a = ctx_a.read_written("ending-this-week-collage");
    let html_b = ctx_b.read_written("ending-this-week-collage");
    assert_eq!(strip_date_lines(&html_a), strip_date_lines(&html_b));
}

// Collage HTML embeds "now"-derived dates; two runs can straddle a
// minute boundary, so compare everything except the date line.
fn strip_date_lines(html: &str) -> String {
    html.lines().filter(|l| !l.contains("date-line")).collect::<Vec<_>>().join("\n")
}

#[test]
fn empty_selection_still_produces_artifacts() {
    let ctx = TestContext::new();
    ctx.write_venues();
    // Catalogue present but no movie matches the theme window.
    ctx.write_fixture_catalogue_out_of_window("london");

    seeded_run(&ctx, "ending-this-week", "london");

    let generic = ctx.read_written("ending-this-week-generic");
    assert!(generic.contains("These 0 films"));
}

impl TestContext {
    /// A catalogue whose only movie finished showing weeks ago.
    fn write_fixture_catalogue_out_of_window(&self, key: &str) {
        let now = self.now_ms();
        let table = serde_json::json!({
            "m1": {
                "title": "Long Gone",
                "posterPath": "/posters/m1.jpg",
                "performances": [
                    { "time": now - 30 * common::DAY_MS, "showingId": "s1" }
                ],
                "showings": { "s1": { "venueId": "rio", "seen": now - 40 * common::DAY_MS } }
            }
        });
        std::fs::write(
            self.data_dir().join(format!("catalogue-{}.json", key)),
            serde_json::to_string_pretty(&table).unwrap(),
        )
        .unwrap();
    }
}
