//! The whole documentation run.
//!
//! ```text
//! parsed files ──► assign document paths
//!                      │
//!                      ▼
//!                  collect (sequential, &mut registry)
//!                      │  registry frozen
//!                      ▼
//!                  annotate + render + write (parallel, &registry)
//!                      │
//!                      ▼
//!                  index (written last)
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_armature::ParsedFile;
use folio_croquis::{collect_declarations, DeclarationRegistry, Diagnostic};
use rayon::prelude::*;
use serde::Serialize;

use crate::annotate::Annotator;
use crate::index::render_index;
use crate::layout::OutputLayout;
use crate::render::{render_document, Document};
use crate::sink::DocumentSink;

/// A run-level failure. Everything else is a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("no schema files found among the input paths")]
    EmptyInputSet,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    /// Documents handed to the sink successfully, index included.
    pub documents: usize,
    /// Every diagnostic of the run, grouped by file in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Documents the sink failed to store.
    pub failed_writes: usize,
    pub type_count: usize,
    pub attribute_count: usize,
}

impl GenerateReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Document every file and write the index.
pub fn generate(
    files: &[ParsedFile],
    layout: &OutputLayout,
    sink: &dyn DocumentSink,
) -> Result<GenerateReport, GenerateError> {
    if files.is_empty() {
        return Err(GenerateError::EmptyInputSet);
    }

    let mut report = GenerateReport::default();

    for file in files {
        report.diagnostics.extend(
            file.errors
                .iter()
                .map(|error| Diagnostic::syntax(file.path(), error)),
        );
    }

    let mut layout = layout.clone();
    report
        .diagnostics
        .extend(layout.assign_documents(files.iter().map(ParsedFile::path)));
    let layout = &layout;

    let mut registry = DeclarationRegistry::new();
    report
        .diagnostics
        .extend(collect_declarations(&mut registry, files));
    report.type_count = registry.type_count();
    report.attribute_count = registry.attribute_count();

    tracing::info!(
        files = files.len(),
        types = registry.type_count(),
        attributes = registry.attribute_count(),
        "declarations collected"
    );

    // From here on the registry is only shared.
    let registry = &registry;
    let written = AtomicUsize::new(0);
    let annotator = Annotator::new(registry, layout);

    let per_file: Vec<Vec<Diagnostic>> = files
        .par_iter()
        .map(|file| {
            let annotated = annotator.annotate(file);
            let document = render_document(file, &annotated.annotations, layout);

            let mut diagnostics = annotated.diagnostics;
            match write_document(sink, &document, file.path()) {
                Ok(()) => {
                    written.fetch_add(1, Ordering::Relaxed);
                }
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
            diagnostics
        })
        .collect();
    report.diagnostics.extend(per_file.into_iter().flatten());

    let index = render_index(registry, layout);
    match write_document(sink, &index, layout.input_root()) {
        Ok(()) => {
            written.fetch_add(1, Ordering::Relaxed);
        }
        Err(diagnostic) => report.diagnostics.push(diagnostic),
    }

    report.documents = written.into_inner();
    report.failed_writes = report
        .diagnostics
        .iter()
        .filter(|d| d.code() == "folio/output-write-failure")
        .count();

    for diagnostic in &report.diagnostics {
        tracing::debug!(code = diagnostic.code(), "{}", diagnostic);
    }

    Ok(report)
}

fn write_document(
    sink: &dyn DocumentSink,
    document: &Document,
    source: &Path,
) -> Result<(), Diagnostic> {
    sink.write(&document.path, &document.content).map_err(|error| {
        Diagnostic::output_write_failure(&document.path, source, &error)
    })?;
    tracing::debug!(document = %document.path.display(), "written");
    Ok(())
}
