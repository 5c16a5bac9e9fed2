use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadatlas_cli::prompt::run_prompt_loop;
use roadatlas_lib::Atlas;

#[derive(Parser, Debug)]
#[command(author, version, about = "Country border route queries")]
struct Cli {
    /// Path to the land border adjacency file.
    borders: PathBuf,

    /// Path to the capital-to-capital distance table (CSV).
    capdist: PathBuf,

    /// Path to the state identity table (TSV).
    states: PathBuf,

    /// Override the identity table's "still exists" sentinel date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    reference_date: Option<NaiveDate>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let atlas = match cli.reference_date {
        Some(date) => Atlas::load_at(&cli.borders, &cli.capdist, &cli.states, date),
        None => Atlas::load(&cli.borders, &cli.capdist, &cli.states),
    }
    .context("failed to load country datasets")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_prompt_loop(&atlas, &mut input, &mut output)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
