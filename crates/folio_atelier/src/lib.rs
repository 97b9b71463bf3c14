//! Atelier - The workshop where schema pages are made.
//!
//! Takes parsed schema files and a finished declaration registry and produces
//! cross-linked HTML:
//!
//! - [`Annotator`] - the second pass, anchoring declarations and linking references
//! - [`render_document`] - one page per schema file
//! - [`render_index`] - the namespace overview
//! - [`generate`] - the whole run, from parsed files to written documents
//!
//! ```
//! use folio_armature::parse;
//! use folio_atelier::{generate, MemorySink, OutputLayout};
//!
//! let files = vec![parse("/s/a.fbs", "namespace Foo;\ntable Bar { x:int; }\n")];
//! let sink = MemorySink::new();
//! let report = generate(&files, &OutputLayout::new("/s"), &sink).unwrap();
//!
//! assert_eq!(report.documents, 2);
//! assert!(sink.get("a.html").unwrap().contains("<a id=\"Bar\">"));
//! ```

pub mod annotate;
pub mod generate;
pub mod index;
pub mod layout;
pub mod render;
pub mod sink;

pub use annotate::{AnnotatedFile, Annotator, Role, SubKind, TokenAnnotation};
pub use generate::{generate, GenerateError, GenerateReport};
pub use index::{render_index, Bucket, GLOBAL_NAMESPACE_LABEL, INDEX_TITLE};
pub use layout::{OutputLayout, INDEX_DOCUMENT, STICKY_HEADER_SCRIPT, STYLESHEET, TREE_SCRIPT};
pub use render::{render_document, Document};
pub use sink::{DocumentSink, FsSink, MemorySink};
