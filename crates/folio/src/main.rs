//! # folio
//!
//! Folio - Cross-linked HTML documentation for FlatBuffers schemas.
//!
//! ## Name Origin
//!
//! A **folio** is a leaf of a bound book. Every schema file becomes one leaf,
//! and the index binds them together.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Cross-linked HTML documentation for FlatBuffers schemas", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation (default command)
    Build(commands::build::BuildArgs),

    /// Analyze schemas and report diagnostics without writing anything
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    folio::logging::init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Build(args)) => commands::build::run(args),
        Some(Commands::Check(args)) => commands::check::run(args),
        None => {
            // Default to build command with default args
            commands::build::run(commands::build::BuildArgs::default());
        }
    }
}
