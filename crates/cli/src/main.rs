use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use sensebank_protocol::ReduceConfig;
use sensebank_reduce::SenseReducer;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::flags::ModeFlag;

mod flags;
mod input;

#[derive(Parser)]
#[command(name = "sensebank")]
#[command(about = "Sense reduction for classical-language lexica", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce parsed entries into deduplicated sense buckets
    Reduce(ReduceArgs),
}

#[derive(Args)]
struct ReduceArgs {
    /// JSON file holding an array of parsed source entries
    #[arg(short, long)]
    input: PathBuf,

    /// Clustering aggressiveness
    #[arg(short, long, value_enum, default_value_t = ModeFlag::Open)]
    mode: ModeFlag,

    /// TOML config overriding thresholds/denylist/blend settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the result JSON
    #[arg(long)]
    pretty: bool,
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Reduce(args) => run_reduce(args).await,
    }
}

async fn run_reduce(args: ReduceArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ReduceConfig::from_toml_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ReduceConfig::default(),
    };

    let entries = input::read_entries(&args.input)?;
    log::debug!("loaded {} entries from {}", entries.len(), args.input.display());

    let reducer = SenseReducer::new(config).context("invalid reducer configuration")?;
    let result = reducer.reduce(&entries, args.mode.as_domain()).await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    print_stdout(&json)
}
