//! clusterflick-spotlight: generate poster collages and social post text
//! from a cinema listings catalogue.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

use std::path::Path;

use adapters::{FilesystemArtifactStore, JsonCatalogueStore};
use app::AppContext;
use app::commands::spotlight;

pub use app::commands::spotlight::{SpotlightOptions, SpotlightOutcome};
pub use domain::selector::Theme;
pub use domain::{AppError, ComposeError};

/// Run one spotlight theme end to end: load fixtures from `data_dir`,
/// format everything, write artifacts into `out_dir`.
///
/// Returns a `SpotlightOutcome` listing the written files.
pub fn run_spotlight(
    theme: Theme,
    catalogue_key: &str,
    data_dir: &Path,
    out_dir: &Path,
    seed: Option<u64>,
) -> Result<SpotlightOutcome, AppError> {
    let catalogue = JsonCatalogueStore::new(data_dir);
    let artifacts = FilesystemArtifactStore::new(out_dir);
    let ctx = AppContext::new(catalogue, artifacts);

    let options =
        SpotlightOptions { theme, catalogue_key: catalogue_key.to_string(), seed };
    let outcome = spotlight::execute(&ctx, &options)?;

    println!(
        "✅ {}: {} films ({} on the collage)",
        outcome.theme.display_name(),
        outcome.film_count,
        outcome.collage_count
    );
    for path in &outcome.written {
        println!("   wrote {}", path.display());
    }

    Ok(outcome)
}
