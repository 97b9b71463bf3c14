//! Diagnostic types.
//!
//! Every recoverable condition of a run (duplicates, unresolved references,
//! syntax errors, failed writes) becomes a [`Diagnostic`]. None of them stops
//! the run; the generated documentation is always best effort.

use std::path::{Path, PathBuf};

use folio_armature::{ParseError, Position};
use folio_carton::CompactString;
use serde::Serialize;

use crate::registry::RegistryError;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum DiagnosticSeverity {
    /// Error - output for this file is incomplete or missing.
    Error = 0,
    /// Warning - output was produced, some links are missing.
    Warning = 1,
}

impl DiagnosticSeverity {
    /// Get display name.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// What an unresolved reference was pointing at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceKind {
    Type,
    Attribute,
    RootType,
    Include,
}

impl ReferenceKind {
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Attribute => "attribute",
            Self::RootType => "root type",
            Self::Include => "include file",
        }
    }
}

/// Which symbol table a duplicate was rejected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    Type,
    Attribute,
}

/// Kind of diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A file-scope event arrived before a file context was established.
    MissingContext,
    /// Two input files share a base name; the first one keeps it.
    DuplicateFile {
        name: CompactString,
        first: PathBuf,
    },
    /// A type or attribute was declared twice; the first declaration wins.
    DuplicateSymbol {
        symbol: SymbolKind,
        name: CompactString,
        first: PathBuf,
    },
    /// A reference could not be resolved in any enclosing namespace.
    UnresolvedReference {
        reference: ReferenceKind,
        name: CompactString,
    },
    /// Two sources map to one document path, or a source maps to a reserved one.
    /// The later source is written to `assigned` instead.
    DocumentPathCollision { document: PathBuf, assigned: PathBuf },
    /// The write sink failed for a document.
    OutputWriteFailure { document: PathBuf, error: String },
    /// A syntax error reported by the parser.
    Syntax,
    /// The schema file could not be read or decoded.
    UnreadableSource { error: String },
}

/// A non-fatal reported condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Diagnostic kind.
    pub kind: DiagnosticKind,
    /// Severity level.
    pub severity: DiagnosticSeverity,
    /// File the condition was found in.
    pub file: PathBuf,
    /// Position in that file, when known.
    pub position: Option<Position>,
    /// Human-readable message.
    pub message: CompactString,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        severity: DiagnosticSeverity,
        file: impl Into<PathBuf>,
        position: Option<Position>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self {
            kind,
            severity,
            file: file.into(),
            position,
            message: message.into(),
        }
    }

    pub fn missing_context(file: &Path, position: Option<Position>) -> Self {
        Self::new(
            DiagnosticKind::MissingContext,
            DiagnosticSeverity::Warning,
            file,
            position,
            "declaration outside of a file context; registration skipped",
        )
    }

    pub fn unresolved(
        reference: ReferenceKind,
        name: &str,
        file: &Path,
        position: Option<Position>,
    ) -> Self {
        Self::new(
            DiagnosticKind::UnresolvedReference {
                reference,
                name: name.into(),
            },
            DiagnosticSeverity::Warning,
            file,
            position,
            format!("{} '{}' not found", reference.display_name(), name),
        )
    }

    /// `owner` is the source already holding `document`, or `None` for a reserved page.
    pub fn document_path_collision(
        source: &Path,
        document: &Path,
        assigned: &Path,
        owner: Option<&Path>,
    ) -> Self {
        let taken_by = match owner {
            Some(owner) => format!("taken by {}", owner.display()),
            None => "reserved".to_string(),
        };
        Self::new(
            DiagnosticKind::DocumentPathCollision {
                document: document.to_path_buf(),
                assigned: assigned.to_path_buf(),
            },
            DiagnosticSeverity::Warning,
            source,
            None,
            format!(
                "document {} is {}; written to {} instead",
                document.display(),
                taken_by,
                assigned.display()
            ),
        )
    }

    pub fn output_write_failure(document: &Path, source: &Path, error: &std::io::Error) -> Self {
        Self::new(
            DiagnosticKind::OutputWriteFailure {
                document: document.to_path_buf(),
                error: error.to_string(),
            },
            DiagnosticSeverity::Error,
            source,
            None,
            format!("failed to write {}: {}", document.display(), error),
        )
    }

    pub fn syntax(file: &Path, error: &ParseError) -> Self {
        Self::new(
            DiagnosticKind::Syntax,
            DiagnosticSeverity::Error,
            file,
            Some(error.position),
            error.message.clone(),
        )
    }

    pub fn unreadable_source(file: &Path, error: impl std::fmt::Display) -> Self {
        let error = error.to_string();
        Self::new(
            DiagnosticKind::UnreadableSource {
                error: error.clone(),
            },
            DiagnosticSeverity::Error,
            file,
            None,
            format!("failed to read schema: {}", error),
        )
    }

    /// Convert a rejected registry insertion into a diagnostic.
    pub fn from_registry_error(error: RegistryError, file: &Path, position: Option<Position>) -> Self {
        let message = error.to_string();
        let kind = match error {
            RegistryError::DuplicateFile { name, first } => DiagnosticKind::DuplicateFile { name, first },
            RegistryError::DuplicateType { name, first } => DiagnosticKind::DuplicateSymbol {
                symbol: SymbolKind::Type,
                name,
                first,
            },
            RegistryError::DuplicateAttribute { name, first } => DiagnosticKind::DuplicateSymbol {
                symbol: SymbolKind::Attribute,
                name,
                first,
            },
        };
        Self::new(kind, DiagnosticSeverity::Warning, file, position, message)
    }

    /// Check if this is an error.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// Get the diagnostic code (for filtering/configuration).
    pub fn code(&self) -> &'static str {
        match &self.kind {
            DiagnosticKind::MissingContext => "folio/missing-context",
            DiagnosticKind::DuplicateFile { .. } => "folio/duplicate-file",
            DiagnosticKind::DuplicateSymbol { .. } => "folio/duplicate-symbol",
            DiagnosticKind::UnresolvedReference { reference, .. } => match reference {
                ReferenceKind::Type => "folio/unresolved-type",
                ReferenceKind::Attribute => "folio/unresolved-attribute",
                ReferenceKind::RootType => "folio/unresolved-root-type",
                ReferenceKind::Include => "folio/unresolved-include",
            },
            DiagnosticKind::DocumentPathCollision { .. } => "folio/document-path-collision",
            DiagnosticKind::OutputWriteFailure { .. } => "folio/output-write-failure",
            DiagnosticKind::Syntax => "folio/syntax",
            DiagnosticKind::UnreadableSource { .. } => "folio/unreadable-source",
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(position) = self.position {
            write!(f, ":{}:{}", position.line, position.column)?;
        }
        write!(
            f,
            ": {} [{}]: {}",
            self.severity.display_name(),
            self.code(),
            self.message
        )
    }
}
