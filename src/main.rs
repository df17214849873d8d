use anyhow::Result;
use clap::Parser;
use shrinkmap_core::{init_logging, PolicyKind};
use shrinkmap_lib::app::{render_report, render_settings, Clusterizer};
use shrinkmap_lib::model::config::AppConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Dataset file, overriding the config
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Seed for a reproducible run, overriding the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Population-control policy, overriding the config
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Policy {
    Quota,
    Merge,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Table,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(path) = args.data {
        config.dataset.path = path;
    }
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    match args.policy {
        Some(Policy::Quota) => config.engine.policy = PolicyKind::Quota,
        Some(Policy::Merge) => config.engine.policy = PolicyKind::Merge,
        None => {}
    }

    init_logging(&config.run.log_filter);

    let clusterizer = Clusterizer::new(config)?;

    if matches!(args.format, Format::Table) {
        println!("Training started with following parameters:");
        println!("{}\n", render_settings(clusterizer.config()));
    }

    let report = clusterizer.run()?;

    match args.format {
        Format::Table => print!("{}", render_report(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
