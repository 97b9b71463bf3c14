//! Token annotation (the second pass).
//!
//! Replays one file's parse events against the finished registry and decorates
//! tokens in place of a tree: declaration sites get an anchor, resolvable
//! references get a link to the declaring document. Annotations live only as
//! long as the rendering of their file.
//!
//! ## Anchors and links
//!
//! - Type and attribute declarations are anchored by their bare name.
//! - A type reference links every segment of its chain to
//!   `<declaring document>#<declared name>`.
//! - Metadata names link to user attribute declarations. Compiler-defined
//!   attributes are left plain without a diagnostic.
//! - `include` strings link to the document of the registered file with the
//!   same base name.

use std::path::{Path, PathBuf};

use folio_armature::{ParseEvent, ParsedFile, Token, TokenId, TokenKind};
use folio_carton::{path::relative_href, unquote, CompactString};
use folio_croquis::{
    is_builtin_attribute, resolve_attribute, resolve_type, DeclarationRegistry, Diagnostic,
    NamespaceContext, ReferenceKind,
};

use crate::layout::OutputLayout;

/// Lexical role of a token, fixed by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Keyword,
    BaseType,
    Comment,
    StringLiteral,
    Identifier,
    Other,
    EndOfStream,
}

impl Role {
    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Keyword(_) => Self::Keyword,
            TokenKind::BaseTypeName => Self::BaseType,
            TokenKind::Comment | TokenKind::BlockComment => Self::Comment,
            TokenKind::StringConstant => Self::StringLiteral,
            TokenKind::Ident => Self::Identifier,
            TokenKind::Eof => Self::EndOfStream,
            TokenKind::IntegerConstant
            | TokenKind::FloatConstant
            | TokenKind::Punct(_)
            | TokenKind::Whitespace
            | TokenKind::Unknown => Self::Other,
        }
    }
}

/// What the walk learned about a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubKind {
    #[default]
    PlainText,
    IncludeFilename,
    AttributeDeclaration,
    AttributeReference,
    TypeDeclaration,
    TypeReference,
}

/// Annotation slot of one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAnnotation {
    pub role: Role,
    pub sub_kind: SubKind,
    /// Anchor emitted at a declaration site.
    pub anchor_id: Option<CompactString>,
    /// Relative path plus anchor of the referenced declaration.
    pub link_target: Option<String>,
}

impl TokenAnnotation {
    fn plain(token: &Token) -> Self {
        Self {
            role: Role::of(token.kind),
            sub_kind: SubKind::PlainText,
            anchor_id: None,
            link_target: None,
        }
    }

    fn declare(&mut self, sub_kind: SubKind, anchor: &str) {
        self.sub_kind = sub_kind;
        self.anchor_id = Some(CompactString::new(anchor));
    }

    fn link(&mut self, sub_kind: SubKind, target: String) {
        self.sub_kind = sub_kind;
        self.link_target = Some(target);
    }
}

/// Annotations of one file, one per token, plus the pass-2 diagnostics.
#[derive(Debug, Clone)]
pub struct AnnotatedFile {
    pub annotations: Vec<TokenAnnotation>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves the references of one file against a frozen registry.
pub struct Annotator<'r> {
    registry: &'r DeclarationRegistry,
    layout: &'r OutputLayout,
}

impl<'r> Annotator<'r> {
    pub fn new(registry: &'r DeclarationRegistry, layout: &'r OutputLayout) -> Self {
        Self { registry, layout }
    }

    /// Annotate every token of `file`.
    pub fn annotate(&self, file: &ParsedFile) -> AnnotatedFile {
        let mut walk = FileWalk {
            file,
            registry: self.registry,
            layout: self.layout,
            document: self.layout.document_path(file.path()),
            ctx: NamespaceContext::for_file(file.path()),
            annotations: file.tokens.iter().map(TokenAnnotation::plain).collect(),
            diagnostics: Vec::new(),
        };

        for event in &file.events {
            walk.visit(event);
        }

        AnnotatedFile {
            annotations: walk.annotations,
            diagnostics: walk.diagnostics,
        }
    }
}

/// State of one file's walk.
struct FileWalk<'a> {
    file: &'a ParsedFile,
    registry: &'a DeclarationRegistry,
    layout: &'a OutputLayout,
    document: PathBuf,
    ctx: NamespaceContext<'a>,
    annotations: Vec<TokenAnnotation>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> FileWalk<'a> {
    fn visit(&mut self, event: &ParseEvent) {
        let file = self.file;
        match event {
            ParseEvent::NamespaceEnter { segments } => {
                self.ctx
                    .enter_namespace(segments.iter().map(|&id| file.text(id)));
            }

            ParseEvent::Include { path } => self.visit_include(*path),

            ParseEvent::AttributeDecl { name } => {
                let anchor = unquote(file.text(*name));
                self.slot(*name).declare(SubKind::AttributeDeclaration, anchor);
            }

            ParseEvent::TypeDecl { name, .. } => {
                let anchor = file.text(*name);
                self.slot(*name).declare(SubKind::TypeDeclaration, anchor);
            }

            ParseEvent::RootDecl { name } => {
                // Already diagnosed by the collection pass when missing.
                let fqn = self.ctx.qualify(file.text(*name));
                if let Some(decl) = self.registry.get_type(&fqn) {
                    let target = self.href(&decl.source_file, &decl.name);
                    self.slot(*name).link(SubKind::TypeReference, target);
                }
            }

            ParseEvent::TypeReference { chain } => self.visit_type_reference(chain),

            ParseEvent::Metadata { entries } => {
                for entry in entries {
                    self.visit_attribute_usage(entry.name);
                }
            }

            ParseEvent::FileEnter | ParseEvent::FileExit => {}
        }
    }

    fn visit_include(&mut self, id: TokenId) {
        let file = self.file;
        let token = file.token(id);
        let included = unquote(&token.text);
        let base_name = Path::new(included)
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        match self.registry.get_file(&base_name) {
            Some(full_path) => {
                let target = relative_href(&self.document, &self.layout.document_path(full_path));
                self.slot(id).link(SubKind::IncludeFilename, target);
            }
            None => self.unresolved(ReferenceKind::Include, included, token),
        }
    }

    fn visit_type_reference(&mut self, chain: &[TokenId]) {
        let Some(&last) = chain.last() else {
            return;
        };
        let reference = self.file.join_chain(chain);

        match resolve_type(self.registry, self.ctx.segments(), &reference) {
            Some(decl) => {
                let target = self.href(&decl.source_file, &decl.name);
                for &id in chain {
                    self.slot(id).link(SubKind::TypeReference, target.clone());
                }
            }
            None => {
                let file = self.file;
                let token = file.token(last);
                self.unresolved(ReferenceKind::Type, &reference, token);
            }
        }
    }

    fn visit_attribute_usage(&mut self, id: TokenId) {
        let file = self.file;
        let token = file.token(id);

        if let Some(decl) = resolve_attribute(self.registry, &token.text) {
            let target = self.href(&decl.source_file, &decl.name);
            self.slot(id).link(SubKind::AttributeReference, target);
        } else if !is_builtin_attribute(&token.text) {
            self.unresolved(ReferenceKind::Attribute, &token.text, token);
        }
    }

    /// Link from the current document to `anchor` in the document of `source`.
    fn href(&self, source: &Path, anchor: &str) -> String {
        let target = self.layout.document_path(source);
        format!("{}#{}", relative_href(&self.document, &target), anchor)
    }

    fn unresolved(&mut self, reference: ReferenceKind, name: &str, token: &Token) {
        self.diagnostics.push(Diagnostic::unresolved(
            reference,
            name,
            self.file.path(),
            Some(token.position),
        ));
    }

    #[inline]
    fn slot(&mut self, id: TokenId) -> &mut TokenAnnotation {
        &mut self.annotations[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_armature::parse;
    use folio_croquis::collect_declarations;

    fn annotate_all(files: &[ParsedFile]) -> Vec<AnnotatedFile> {
        let mut registry = DeclarationRegistry::new();
        collect_declarations(&mut registry, files);
        let layout = OutputLayout::new("/s");
        let annotator = Annotator::new(&registry, &layout);
        files.iter().map(|f| annotator.annotate(f)).collect()
    }

    fn find(file: &ParsedFile, text: &str, nth: usize) -> usize {
        file.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.text == text)
            .nth(nth)
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn test_reference_links_to_declaring_document() {
        let files = [
            parse("/s/a.fbs", "namespace Foo;\ntable Bar { x:int; }\nroot_type Bar;\n"),
            parse("/s/b.fbs", "namespace Foo;\ntable Baz { b:Bar; }\n"),
        ];
        let annotated = annotate_all(&files);
        assert!(annotated.iter().all(|a| a.diagnostics.is_empty()));

        let b = &annotated[1].annotations[find(&files[1], "Bar", 0)];
        assert_eq!(b.sub_kind, SubKind::TypeReference);
        assert_eq!(b.role, Role::Identifier);
        assert_eq!(b.link_target.as_deref(), Some("a.html#Bar"));

        let decl = &annotated[0].annotations[find(&files[0], "Bar", 0)];
        assert_eq!(decl.sub_kind, SubKind::TypeDeclaration);
        assert_eq!(decl.anchor_id.as_deref(), Some("Bar"));

        let root = &annotated[0].annotations[find(&files[0], "Bar", 1)];
        assert_eq!(root.link_target.as_deref(), Some("a.html#Bar"));
    }

    #[test]
    fn test_qualified_chain_links_every_segment() {
        let files = [
            parse("/s/common/vec.fbs", "namespace Game.Common;\nstruct Vec3 { x:float; }\n"),
            parse(
                "/s/game/monster.fbs",
                "namespace Game.Monsters;\ntable Monster { pos:Common.Vec3; path:[Game.Common.Vec3]; }\n",
            ),
        ];
        let annotated = annotate_all(&files);
        let monster = &annotated[1];
        assert!(monster.diagnostics.is_empty(), "{:?}", monster.diagnostics);

        for nth in 0..2 {
            let id = find(&files[1], "Vec3", nth);
            assert_eq!(
                monster.annotations[id].link_target.as_deref(),
                Some("../common/vec.html#Vec3")
            );
        }
        let common = &monster.annotations[find(&files[1], "Common", 1)];
        assert_eq!(common.link_target.as_deref(), Some("../common/vec.html#Vec3"));
    }

    #[test]
    fn test_unresolved_type_stays_plain() {
        let files = [parse("/s/a.fbs", "table A { b:Missing; }\n")];
        let annotated = annotate_all(&files);

        let slot = &annotated[0].annotations[find(&files[0], "Missing", 0)];
        assert_eq!(slot.sub_kind, SubKind::PlainText);
        assert!(slot.link_target.is_none());
        assert_eq!(annotated[0].diagnostics.len(), 1);
        assert_eq!(annotated[0].diagnostics[0].code(), "folio/unresolved-type");
    }

    #[test]
    fn test_attributes() {
        let files = [
            parse("/s/attrs.fbs", "attribute \"priority\";\n"),
            parse(
                "/s/a.fbs",
                "table A (priority: 1) { x:int (id: 0, deprecated); y:int (bogus); }\n",
            ),
        ];
        let annotated = annotate_all(&files);

        let decl = &annotated[0].annotations[find(&files[0], "\"priority\"", 0)];
        assert_eq!(decl.sub_kind, SubKind::AttributeDeclaration);
        assert_eq!(decl.anchor_id.as_deref(), Some("priority"));

        let usage = &annotated[1].annotations[find(&files[1], "priority", 0)];
        assert_eq!(usage.link_target.as_deref(), Some("attrs.html#priority"));

        let builtin = &annotated[1].annotations[find(&files[1], "id", 0)];
        assert_eq!(builtin.sub_kind, SubKind::PlainText);

        let diagnostics = &annotated[1].diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "attribute 'bogus' not found");
    }

    #[test]
    fn test_include_links_by_base_name() {
        let files = [
            parse("/s/common/vec.fbs", "struct Vec3 { x:float; }\n"),
            parse(
                "/s/game/monster.fbs",
                "include \"../common/vec.fbs\";\ninclude \"missing.fbs\";\n",
            ),
        ];
        let annotated = annotate_all(&files);
        let monster = &annotated[1];

        let include = &monster.annotations[find(&files[1], "\"../common/vec.fbs\"", 0)];
        assert_eq!(include.sub_kind, SubKind::IncludeFilename);
        assert_eq!(include.link_target.as_deref(), Some("../common/vec.html"));

        assert_eq!(monster.diagnostics.len(), 1);
        assert_eq!(monster.diagnostics[0].code(), "folio/unresolved-include");
    }

    #[test]
    fn test_union_alias_is_not_a_reference() {
        let files = [parse(
            "/s/a.fbs",
            "table Sword {}\nunion Weapon { Main: Sword, Sword }\n",
        )];
        let annotated = annotate_all(&files);
        assert!(annotated[0].diagnostics.is_empty());

        let alias = &annotated[0].annotations[find(&files[0], "Main", 0)];
        assert_eq!(alias.sub_kind, SubKind::PlainText);
        for nth in 1..3 {
            let slot = &annotated[0].annotations[find(&files[0], "Sword", nth)];
            assert_eq!(slot.link_target.as_deref(), Some("a.html#Sword"));
        }
    }
}
