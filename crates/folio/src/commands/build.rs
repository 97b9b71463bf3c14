//! Build command - Generate HTML documentation for schema files

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use folio::atelier::FsSink;
use folio::config::load_config;
use folio::run::{run as run_documentation, RunError, RunOptions};

use super::{configure_threads, resolve_inputs, resolve_root};

/// Output directory used when neither the arguments nor the config name one.
const DEFAULT_OUTPUT: &str = "./docs";

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Schema files or directories (default: config `inputs`, else the current directory)
    pub paths: Vec<PathBuf>,

    /// Output directory (default: config `output`, else ./docs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Folder page paths are computed from (default: the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Show timing profile breakdown
    #[arg(long)]
    pub profile: bool,
}

pub fn run(args: BuildArgs) {
    let start = Instant::now();
    configure_threads(args.threads);

    let config = load_config(None);
    let output = args
        .output
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let options = RunOptions {
        inputs: resolve_inputs(args.paths, &config),
        root: resolve_root(args.root, &config),
        write_assets: true,
    };

    let outcome = match run_documentation(&options, &FsSink::new(&output)) {
        Ok(outcome) => outcome,
        Err(e) => {
            for diagnostic in e.diagnostics() {
                eprintln!("  {}", diagnostic);
            }
            match e {
                RunError::OutputRoot(_) => eprintln!("Error: {} ({})", e, output.display()),
                _ => eprintln!("Error: {}", e),
            }
            std::process::exit(1);
        }
    };
    let report = &outcome.report;

    for diagnostic in &report.diagnostics {
        eprintln!("  {}", diagnostic);
    }

    let total_elapsed = start.elapsed();

    if args.profile {
        eprintln!();
        eprintln!("Timing breakdown ({} threads):", rayon::current_num_threads());
        eprintln!("  File collection: {:.4}s", outcome.collect_elapsed.as_secs_f64());
        eprintln!("  Parsing:         {:.4}s", outcome.load_elapsed.as_secs_f64());
        eprintln!("  Documentation:   {:.4}s", outcome.generate_elapsed.as_secs_f64());
        eprintln!("  Total:           {:.4}s", total_elapsed.as_secs_f64());
        eprintln!();
    }

    let file_word = if outcome.files == 1 { "file" } else { "files" };
    if report.failed_writes > 0 {
        eprintln!(
            "✗ {} document(s) failed to write, {} {} documented in {:.4}s",
            report.failed_writes,
            outcome.files,
            file_word,
            total_elapsed.as_secs_f64()
        );
    } else {
        eprintln!(
            "✓ {} {} documented in {:.4}s ({} warning(s), {} error(s)) -> {}",
            outcome.files,
            file_word,
            total_elapsed.as_secs_f64(),
            report.warning_count(),
            report.error_count(),
            output.display()
        );
    }
}
