//! Declaration collection (the first pass).
//!
//! Walks each file's parse events once and fills the [`DeclarationRegistry`]
//! with namespaces, types, attributes, file names and root-type flags. Files
//! may be collected in any order. Nothing is rendered here.

use folio_armature::{ParseEvent, ParsedFile};
use folio_carton::unquote;

use crate::context::NamespaceContext;
use crate::declaration::{AttributeDeclaration, TypeDeclaration};
use crate::diagnostics::{Diagnostic, ReferenceKind};
use crate::registry::DeclarationRegistry;

/// Collects declarations from parsed files into a registry.
pub struct DeclarationCollector<'r> {
    registry: &'r mut DeclarationRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> DeclarationCollector<'r> {
    pub fn new(registry: &'r mut DeclarationRegistry) -> Self {
        Self {
            registry,
            diagnostics: Vec::new(),
        }
    }

    /// Collect the declarations of one file.
    pub fn collect(&mut self, file: &ParsedFile) {
        let mut ctx = NamespaceContext::new();
        let mut missing_context_reported = false;

        for event in &file.events {
            match event {
                ParseEvent::FileEnter => self.enter_file(file, &mut ctx),

                ParseEvent::NamespaceEnter { segments } => {
                    ctx.enter_namespace(segments.iter().map(|&id| file.text(id)));
                    if !ctx.namespace().is_empty() {
                        self.registry.add_namespace(ctx.namespace());
                    }
                }

                ParseEvent::AttributeDecl { name } => {
                    let token = file.token(*name);
                    let Some(source_file) = ctx.file() else {
                        self.report_missing_context(file, token, &mut missing_context_reported);
                        continue;
                    };

                    let decl = AttributeDeclaration::new(unquote(&token.text), source_file)
                        .with_position(token.position);
                    if let Err(error) = self.registry.register_attribute(decl) {
                        self.diagnostics.push(Diagnostic::from_registry_error(
                            error,
                            source_file,
                            Some(token.position),
                        ));
                    }
                }

                ParseEvent::TypeDecl { kind, name } => {
                    let token = file.token(*name);
                    let Some(source_file) = ctx.file() else {
                        self.report_missing_context(file, token, &mut missing_context_reported);
                        continue;
                    };

                    let decl = TypeDeclaration::new(*kind, ctx.namespace(), &*token.text, source_file)
                        .with_position(token.position);
                    if let Err(error) = self.registry.register_type(decl) {
                        self.diagnostics.push(Diagnostic::from_registry_error(
                            error,
                            source_file,
                            Some(token.position),
                        ));
                    }
                }

                ParseEvent::RootDecl { name } => {
                    let token = file.token(*name);
                    let fqn = ctx.qualify(&token.text);
                    if self.registry.mark_root(&fqn).is_none() {
                        self.diagnostics.push(Diagnostic::unresolved(
                            ReferenceKind::RootType,
                            &fqn,
                            file.path(),
                            Some(token.position),
                        ));
                    }
                }

                ParseEvent::Include { .. }
                | ParseEvent::TypeReference { .. }
                | ParseEvent::Metadata { .. }
                | ParseEvent::FileExit => {}
            }
        }

        tracing::debug!(
            file = %file.path().display(),
            types = self.registry.type_count(),
            "collected declarations"
        );
    }

    /// Register `base name -> full path` and establish the file context.
    fn enter_file<'f>(&mut self, file: &'f ParsedFile, ctx: &mut NamespaceContext<'f>) {
        let Some(base_name) = file.path().file_name().map(|n| n.to_string_lossy()) else {
            self.diagnostics
                .push(Diagnostic::missing_context(file.path(), None));
            return;
        };

        ctx.enter_file(file.path());
        if let Err(error) = self.registry.register_file(&base_name, file.path()) {
            self.diagnostics
                .push(Diagnostic::from_registry_error(error, file.path(), None));
        }
    }

    fn report_missing_context(
        &mut self,
        file: &ParsedFile,
        token: &folio_armature::Token,
        reported: &mut bool,
    ) {
        if !*reported {
            *reported = true;
            self.diagnostics
                .push(Diagnostic::missing_context(file.path(), Some(token.position)));
        }
    }

    /// Diagnostics reported so far.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish collection and return the diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Collect every file into `registry`, returning the diagnostics.
pub fn collect_declarations<'a>(
    registry: &mut DeclarationRegistry,
    files: impl IntoIterator<Item = &'a ParsedFile>,
) -> Vec<Diagnostic> {
    let mut collector = DeclarationCollector::new(registry);
    for file in files {
        collector.collect(file);
    }
    collector.finish()
}
