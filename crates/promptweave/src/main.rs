//! Promptweave binary - flatten YAML prompt templates into prompt text

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptweave_engine::{Engine, EngineOptions, FileSystemSource, render_blocks};

#[derive(Parser, Debug)]
#[command(name = "promptweave")]
#[command(about = "Flatten YAML prompt templates into prompt text")]
#[command(version)]
struct Args {
    /// YAML prompt definition
    file: PathBuf,

    /// Folder with *.txt wildcards (defaults to a `wildcards` directory
    /// next to the YAML file)
    #[arg(long, value_name = "DIR")]
    wildcards_dir: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Derive wildcard picks from the seed and wildcard name instead of
    /// the sequential random stream (requires --seed)
    #[arg(long)]
    stable_wildcards: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptweave=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read '{}'", args.file.display()))?;
    let document = promptweave_yaml::parse(&content)
        .with_context(|| format!("invalid YAML in '{}'", args.file.display()))?;

    let wildcard_dir = args.wildcards_dir.unwrap_or_else(|| {
        args.file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("wildcards")
    });
    debug!(wildcard_dir = %wildcard_dir.display(), "Using wildcard directory");

    let options = EngineOptions {
        seed: args.seed,
        stable_wildcards: args.stable_wildcards,
        ..EngineOptions::default()
    };
    let mut engine = Engine::with_options(FileSystemSource::new(wildcard_dir), options);

    let blocks = engine
        .flatten_document(&document)
        .with_context(|| format!("cannot flatten '{}'", args.file.display()))?;

    println!("{}", render_blocks(&blocks));
    Ok(())
}
