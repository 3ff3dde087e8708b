use anyhow::Result;
use cedar_accel::{crosswalk, extract, rollup};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cedar-accel")]
#[command(about = "Parse CEDAR JSON-LD resources and crosswalk them to the accelerator schema")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one CEDAR document into the intermediate model
    Extract(extract::ExtractArgs),
    /// Parse and crosswalk CEDAR documents into accelerator documents
    Crosswalk(crosswalk::CrosswalkArgs),
    /// Roll measures up to their parent and subcategories
    Rollup(rollup::RollupArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Crosswalk(args) => crosswalk::run(args),
        Commands::Rollup(args) => rollup::run(args),
    }
}
