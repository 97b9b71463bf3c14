//! Croquis - Semantic analysis for Folio.
//!
//! Quick sketches of meaning over a whole schema corpus:
//!
//! - [`DeclarationRegistry`] - the global symbol table of a run
//! - [`DeclarationCollector`] - the first pass, filling the registry from parse events
//! - [`resolve_type`] - innermost-first namespace scope resolution
//! - [`Diagnostic`] - the non-fatal conditions reported along the way
//!
//! The registry is written only during collection. Afterwards it is shared by
//! reference, which is what lets the rendering pass run files in parallel.

pub mod builtins;
pub mod collector;
pub mod context;
pub mod declaration;
pub mod diagnostics;
pub mod registry;
pub mod resolver;

pub use builtins::is_builtin_attribute;
pub use collector::{collect_declarations, DeclarationCollector};
pub use context::{NamespaceContext, NamespaceSegments};
pub use declaration::{fully_qualified_name, AttributeDeclaration, TypeDeclaration};
pub use diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticSeverity, ReferenceKind, SymbolKind,
};
pub use registry::{DeclarationRegistry, RegistryError};
pub use resolver::{resolve_attribute, resolve_type};
