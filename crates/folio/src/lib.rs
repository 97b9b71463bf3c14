//! # Folio
//!
//! Cross-linked HTML documentation for FlatBuffers schemas, written in Rust.
//!
//! This crate re-exports the Folio sub-crates for unified documentation and
//! holds the pieces the command line needs around the core pipeline.
//!
//! ## Crates
//!
//! - [`carton`] - Shared toolbox and the link calculator
//! - [`armature`] - Schema tokenizer and event parser
//! - [`croquis`] - Declaration registry, collection and scope resolution
//! - [`atelier`] - Annotation, page rendering and the documentation pipeline

/// Shared toolbox and the link calculator.
pub use folio_carton as carton;

/// Schema tokenizer and event parser.
pub use folio_armature as armature;

/// Declaration registry, collection and scope resolution.
pub use folio_croquis as croquis;

/// Annotation, page rendering and the documentation pipeline.
pub use folio_atelier as atelier;

pub mod assets;
pub mod config;
pub mod files;
pub mod logging;
pub mod run;
pub mod source;
