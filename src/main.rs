use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clusterflick_spotlight::{AppError, Theme};

#[derive(Parser)]
#[command(name = "spotlight")]
#[command(version)]
#[command(
    about = "Generate spotlight collages and social posts from a cinema listings catalogue",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RunArgs {
    /// Catalogue key, e.g. "london" (loads data/catalogue-london.json)
    catalogue: String,
    /// Directory containing the JSON fixtures
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Directory artifacts are written into
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,
    /// Fix the layout randomness for a reproducible collage
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Films with their final showings in the next week
    #[clap(visible_alias = "end")]
    EndingThisWeek {
        #[command(flatten)]
        args: RunArgs,
    },
    /// Films that first appeared in the catalogue this week
    #[clap(visible_alias = "new")]
    NewThisWeek {
        #[command(flatten)]
        args: RunArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let (theme, args) = match cli.command {
        Commands::EndingThisWeek { args } => (Theme::EndingThisWeek, args),
        Commands::NewThisWeek { args } => (Theme::NewThisWeek, args),
    };

    let result: Result<(), AppError> = clusterflick_spotlight::run_spotlight(
        theme,
        &args.catalogue,
        &args.data_dir,
        &args.out_dir,
        args.seed,
    )
    .map(|_| ());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
