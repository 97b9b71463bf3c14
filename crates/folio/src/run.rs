//! One documentation run, from input paths to a written site.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use folio_armature::ParsedFile;
use folio_atelier::{generate, DocumentSink, GenerateError, GenerateReport, OutputLayout};
use folio_croquis::Diagnostic;

use crate::assets::write_assets;
use crate::files::{absolute, collect_schema_files};
use crate::source::load_schemas;

/// A run that produced no documentation at all.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Schema files were found, but none of them could be read.
    #[error("none of the {} schema files could be read", .diagnostics.len())]
    Unreadable { diagnostics: Vec<Diagnostic> },

    #[error("failed to create the output directory: {0}")]
    OutputRoot(#[source] io::Error),
}

impl RunError {
    /// Per-file diagnostics explaining the failure, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Unreadable { diagnostics } => diagnostics,
            Self::Generate(_) | Self::OutputRoot(_) => &[],
        }
    }
}

/// What to document.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Schema files or directories.
    pub inputs: Vec<PathBuf>,
    /// Folder page paths are computed from.
    pub root: PathBuf,
    /// Also write the bundled stylesheet and scripts.
    pub write_assets: bool,
}

/// Report of a run with its timing breakdown.
#[derive(Debug)]
pub struct RunOutcome {
    pub files: usize,
    pub report: GenerateReport,
    pub collect_elapsed: Duration,
    pub load_elapsed: Duration,
    pub generate_elapsed: Duration,
}

/// Collect, load and document every schema named by `options`.
///
/// The sink is prepared only once there is something to write, so a failed
/// run leaves no output behind.
pub fn run(options: &RunOptions, sink: &dyn DocumentSink) -> Result<RunOutcome, RunError> {
    let start = Instant::now();
    let files = collect_schema_files(&options.inputs);
    if files.is_empty() {
        return Err(GenerateError::EmptyInputSet.into());
    }
    let collect_elapsed = start.elapsed();

    let load_start = Instant::now();
    let (parsed, unreadable) = load_schemas(&files);
    let load_elapsed = load_start.elapsed();

    let generate_start = Instant::now();
    let root = absolute(&options.root);
    let layout = OutputLayout::new(root.clone());
    let mut report = generate_loaded(&parsed, unreadable, &layout, sink)?;

    if options.write_assets {
        let failures = write_assets(sink, &root);
        report.failed_writes += failures.len();
        report.diagnostics.extend(failures);
    }
    let generate_elapsed = generate_start.elapsed();

    tracing::info!(
        files = files.len(),
        documents = report.documents,
        diagnostics = report.diagnostics.len(),
        "run finished"
    );

    Ok(RunOutcome {
        files: files.len(),
        report,
        collect_elapsed,
        load_elapsed,
        generate_elapsed,
    })
}

/// Document the files that loaded. Load diagnostics lead the report.
fn generate_loaded(
    parsed: &[ParsedFile],
    unreadable: Vec<Diagnostic>,
    layout: &OutputLayout,
    sink: &dyn DocumentSink,
) -> Result<GenerateReport, RunError> {
    if parsed.is_empty() && !unreadable.is_empty() {
        return Err(RunError::Unreadable {
            diagnostics: unreadable,
        });
    }

    sink.prepare().map_err(RunError::OutputRoot)?;
    let mut report = generate(parsed, layout, sink)?;

    let mut diagnostics = unreadable;
    diagnostics.append(&mut report.diagnostics);
    report.diagnostics = diagnostics;
    Ok(report)
}
