//! Check command - Report schema diagnostics without writing documentation

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use folio::atelier::MemorySink;
use folio::config::load_config;
use folio::run::{run as run_documentation, RunOptions};

use super::{configure_threads, resolve_inputs, resolve_root};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// One line per diagnostic
    #[default]
    Text,
    /// The full report as JSON
    Json,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Schema files or directories (default: config `inputs`, else the current directory)
    pub paths: Vec<PathBuf>,

    /// Folder page paths are computed from (default: the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

pub fn run(args: CheckArgs) {
    configure_threads(args.threads);

    let config = load_config(None);
    let options = RunOptions {
        inputs: resolve_inputs(args.paths, &config),
        root: resolve_root(args.root, &config),
        write_assets: false,
    };

    let outcome = match run_documentation(&options, &MemorySink::new()) {
        Ok(outcome) => outcome,
        Err(e) => {
            for diagnostic in e.diagnostics() {
                println!("{}", diagnostic);
            }
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let report = &outcome.report;

    match args.format {
        OutputFormat::Text => {
            for diagnostic in &report.diagnostics {
                println!("{}", diagnostic);
            }
            let file_word = if outcome.files == 1 { "file" } else { "files" };
            eprintln!(
                "{} {} {} checked: {} error(s), {} warning(s)",
                if report.has_errors() { "✗" } else { "✓" },
                outcome.files,
                file_word,
                report.error_count(),
                report.warning_count()
            );
        }
        OutputFormat::Json => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        },
    }

    if report.has_errors() {
        std::process::exit(1);
    }
}
