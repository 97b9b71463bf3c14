//! FlatBuffers schema parser.
//!
//! A recursive-descent parser over the significant (non-trivia) tokens. It does
//! not build a tree; it emits [`ParseEvent`]s in lexical order, which is all the
//! analysis passes need. Syntax errors are recorded and the parser resynchronises
//! at the next `;` or closing `}` so one bad declaration never hides the rest.

use std::path::Path;

use folio_carton::SmallVec;

use crate::error::ParseError;
use crate::event::{DeclKind, MetadataEntry, NsIdent, ParseEvent, ParsedFile};
use crate::token::{Keyword, Token, TokenId, TokenKind};
use crate::tokenizer::tokenize;

type ParseResult<T> = Result<T, ParseError>;

/// Parser state for one file.
pub struct Parser<'a> {
    tokens: &'a [Token],
    /// Ids of the non-trivia tokens; always ends with the `Eof` token.
    significant: Vec<TokenId>,
    cursor: usize,
    events: Vec<ParseEvent>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a token stream produced by [`tokenize`].
    pub fn new(tokens: &'a [Token]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i as TokenId)
            .collect();

        Self {
            tokens,
            significant,
            cursor: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the schema and return the events and errors
    pub fn parse(mut self) -> (Vec<ParseEvent>, Vec<ParseError>) {
        self.events.push(ParseEvent::FileEnter);

        while !self.at_eof() {
            let start = self.cursor;
            if let Err(error) = self.parse_top_level() {
                self.errors.push(error);
                self.synchronize_top_level(start);
            }
        }

        self.events.push(ParseEvent::FileExit);
        (self.events, self.errors)
    }

    // =========================================================================
    // Cursor helpers
    // =========================================================================

    #[inline]
    fn current_id(&self) -> TokenId {
        let last = self.significant.len().saturating_sub(1);
        self.significant[self.cursor.min(last)]
    }

    #[inline]
    fn current(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.current_id() as usize]
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    #[inline]
    fn advance(&mut self) -> TokenId {
        let id = self.current_id();
        if !self.at_eof() {
            self.cursor += 1;
        }
        id
    }

    #[inline]
    fn at_punct(&self, c: char) -> bool {
        self.kind() == TokenKind::Punct(c)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.at_punct(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", token.text),
        };
        ParseError::new(format!("expected {}, found {}", expected, found), token.position)
    }

    fn expect_punct(&mut self, c: char) -> ParseResult<TokenId> {
        if self.at_punct(c) {
            Ok(self.advance())
        } else {
            Err(self.error_here(&format!("'{}'", c)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> ParseResult<TokenId> {
        if self.kind() == TokenKind::Ident {
            Ok(self.advance())
        } else {
            Err(self.error_here(what))
        }
    }

    fn expect_string(&mut self, what: &str) -> ParseResult<TokenId> {
        if self.kind() == TokenKind::StringConstant {
            Ok(self.advance())
        } else {
            Err(self.error_here(what))
        }
    }

    // =========================================================================
    // Error recovery
    // =========================================================================

    /// Skip to the end of the broken top-level declaration.
    fn synchronize_top_level(&mut self, start: usize) {
        let mut depth = 0usize;

        while !self.at_eof() {
            match self.kind() {
                TokenKind::Punct('{') => depth += 1,
                TokenKind::Punct('}') => {
                    if depth <= 1 {
                        self.advance();
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Punct(';') if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::Keyword(_) if depth == 0 && self.cursor > start => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip to the end of a broken member inside a `{ ... }` body,
    /// stopping before the body's closing brace.
    fn synchronize_member(&mut self) {
        let mut depth = 0usize;

        while !self.at_eof() {
            match self.kind() {
                TokenKind::Punct('{') => depth += 1,
                TokenKind::Punct('}') => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Punct(';') if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_top_level(&mut self) -> ParseResult<()> {
        match self.kind() {
            TokenKind::Keyword(Keyword::Include) => self.parse_include(true),
            TokenKind::Keyword(Keyword::NativeInclude) => self.parse_include(false),
            TokenKind::Keyword(Keyword::Namespace) => self.parse_namespace(),
            TokenKind::Keyword(Keyword::Attribute) => self.parse_attribute(),
            TokenKind::Keyword(Keyword::Table) => self.parse_type_decl(DeclKind::Table),
            TokenKind::Keyword(Keyword::Struct) => self.parse_type_decl(DeclKind::Struct),
            TokenKind::Keyword(Keyword::Enum) => self.parse_enum(),
            TokenKind::Keyword(Keyword::Union) => self.parse_union(),
            TokenKind::Keyword(Keyword::RootType) => self.parse_root(),
            TokenKind::Keyword(Keyword::FileIdentifier | Keyword::FileExtension) => {
                self.advance();
                self.expect_string("a string constant")?;
                self.expect_punct(';')?;
                Ok(())
            }
            TokenKind::Keyword(Keyword::RpcService) => self.parse_rpc_service(),
            TokenKind::Punct('{') => self.skip_object(),
            _ => Err(self.error_here("a declaration")),
        }
    }

    fn parse_include(&mut self, linkable: bool) -> ParseResult<()> {
        self.advance();
        let path = self.expect_string("a file name")?;
        if linkable {
            self.events.push(ParseEvent::Include { path });
        }
        self.expect_punct(';')?;
        Ok(())
    }

    fn parse_namespace(&mut self) -> ParseResult<()> {
        self.advance();
        let segments = if self.kind() == TokenKind::Ident {
            self.parse_ns_ident()?
        } else {
            SmallVec::new()
        };
        self.expect_punct(';')?;
        self.events.push(ParseEvent::NamespaceEnter { segments });
        Ok(())
    }

    fn parse_attribute(&mut self) -> ParseResult<()> {
        self.advance();
        let name = match self.kind() {
            TokenKind::StringConstant | TokenKind::Ident => self.advance(),
            _ => return Err(self.error_here("an attribute name")),
        };
        self.events.push(ParseEvent::AttributeDecl { name });
        self.expect_punct(';')?;
        Ok(())
    }

    fn parse_type_decl(&mut self, kind: DeclKind) -> ParseResult<()> {
        self.advance();
        let name = self.expect_ident("a type name")?;
        self.events.push(ParseEvent::TypeDecl { kind, name });
        self.parse_metadata()?;
        self.expect_punct('{')?;

        while !self.at_punct('}') && !self.at_eof() {
            if let Err(error) = self.parse_field() {
                self.errors.push(error);
                self.synchronize_member();
            }
        }

        self.expect_punct('}')?;
        Ok(())
    }

    fn parse_field(&mut self) -> ParseResult<()> {
        match self.kind() {
            TokenKind::Ident | TokenKind::Keyword(_) | TokenKind::BaseTypeName => {
                self.advance();
            }
            _ => return Err(self.error_here("a field name")),
        }
        self.expect_punct(':')?;
        self.parse_type()?;
        if self.eat_punct('=') {
            self.parse_scalar()?;
        }
        self.parse_metadata()?;
        self.expect_punct(';')?;
        Ok(())
    }

    fn parse_enum(&mut self) -> ParseResult<()> {
        self.advance();
        let name = self.expect_ident("an enum name")?;
        self.events.push(ParseEvent::TypeDecl {
            kind: DeclKind::Enum,
            name,
        });
        if self.eat_punct(':') {
            self.parse_type()?;
        }
        self.parse_metadata()?;
        self.expect_punct('{')?;

        while !self.at_punct('}') && !self.at_eof() {
            self.parse_ns_ident()?;
            if self.eat_punct('=') {
                self.parse_scalar()?;
            }
            if !self.eat_punct(',') {
                break;
            }
        }

        self.expect_punct('}')?;
        Ok(())
    }

    fn parse_union(&mut self) -> ParseResult<()> {
        self.advance();
        let name = self.expect_ident("a union name")?;
        self.events.push(ParseEvent::TypeDecl {
            kind: DeclKind::Union,
            name,
        });
        self.parse_metadata()?;
        self.expect_punct('{')?;

        while !self.at_punct('}') && !self.at_eof() {
            let first = self.parse_ns_ident()?;
            // `Alias: Type` names the alternative; only `Type` is a reference.
            let chain = if self.eat_punct(':') {
                self.parse_ns_ident()?
            } else {
                first
            };
            self.events.push(ParseEvent::TypeReference { chain });
            if !self.eat_punct(',') {
                break;
            }
        }

        self.expect_punct('}')?;
        Ok(())
    }

    fn parse_root(&mut self) -> ParseResult<()> {
        self.advance();
        let name = self.expect_ident("a root type name")?;
        self.events.push(ParseEvent::RootDecl { name });
        self.expect_punct(';')?;
        Ok(())
    }

    fn parse_rpc_service(&mut self) -> ParseResult<()> {
        self.advance();
        self.expect_ident("a service name")?;
        self.expect_punct('{')?;

        while !self.at_punct('}') && !self.at_eof() {
            if let Err(error) = self.parse_rpc_method() {
                self.errors.push(error);
                self.synchronize_member();
            }
        }

        self.expect_punct('}')?;
        Ok(())
    }

    fn parse_rpc_method(&mut self) -> ParseResult<()> {
        self.expect_ident("a method name")?;
        self.expect_punct('(')?;
        let request = self.parse_ns_ident()?;
        self.events.push(ParseEvent::TypeReference { chain: request });
        self.expect_punct(')')?;
        self.expect_punct(':')?;
        let response = self.parse_ns_ident()?;
        self.events.push(ParseEvent::TypeReference { chain: response });
        self.parse_metadata()?;
        self.expect_punct(';')?;
        Ok(())
    }

    /// Skip a top-level JSON object.
    fn skip_object(&mut self) -> ParseResult<()> {
        let open = self.current().position;
        let mut depth = 0usize;

        while !self.at_eof() {
            match self.kind() {
                TokenKind::Punct('{') | TokenKind::Punct('[') => depth += 1,
                TokenKind::Punct('}') | TokenKind::Punct(']') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.advance();
        }

        Err(ParseError::new("unterminated object", open))
    }

    // =========================================================================
    // Types, values and metadata
    // =========================================================================

    fn parse_type(&mut self) -> ParseResult<()> {
        match self.kind() {
            TokenKind::Punct('[') => {
                self.advance();
                self.parse_type()?;
                if self.eat_punct(':') {
                    if self.kind() == TokenKind::IntegerConstant {
                        self.advance();
                    } else {
                        return Err(self.error_here("an array length"));
                    }
                }
                self.expect_punct(']')?;
                Ok(())
            }
            TokenKind::BaseTypeName => {
                self.advance();
                Ok(())
            }
            TokenKind::Ident => {
                let chain = self.parse_ns_ident()?;
                self.events.push(ParseEvent::TypeReference { chain });
                Ok(())
            }
            _ => Err(self.error_here("a type")),
        }
    }

    fn parse_ns_ident(&mut self) -> ParseResult<NsIdent> {
        let mut chain = NsIdent::new();
        chain.push(self.expect_ident("an identifier")?);
        while self.at_punct('.') {
            self.advance();
            chain.push(self.expect_ident("an identifier")?);
        }
        Ok(chain)
    }

    /// Scalar or single value: optional sign, then a number, identifier, string or bool.
    fn parse_scalar(&mut self) -> ParseResult<TokenId> {
        if self.at_punct('-') || self.at_punct('+') {
            self.advance();
        }
        match self.kind() {
            TokenKind::IntegerConstant
            | TokenKind::FloatConstant
            | TokenKind::StringConstant
            | TokenKind::Ident => Ok(self.advance()),
            _ => Err(self.error_here("a value")),
        }
    }

    fn parse_metadata(&mut self) -> ParseResult<()> {
        if !self.eat_punct('(') {
            return Ok(());
        }

        let mut entries = Vec::new();
        while !self.at_punct(')') && !self.at_eof() {
            let name = self.expect_ident("an attribute name")?;
            let value = if self.eat_punct(':') {
                Some(self.parse_scalar()?)
            } else {
                None
            };
            entries.push(MetadataEntry { name, value });
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct(')')?;

        if !entries.is_empty() {
            self.events.push(ParseEvent::Metadata { entries });
        }
        Ok(())
    }
}

/// Tokenize and parse one schema file.
pub fn parse(path: impl AsRef<Path>, source: &str) -> ParsedFile {
    let path = path.as_ref();
    let tokens = tokenize(source);
    let (events, errors) = Parser::new(&tokens).parse();

    if !errors.is_empty() {
        tracing::debug!(
            "{}: {} syntax error(s), first: {}",
            path.display(),
            errors.len(),
            errors[0]
        );
    }

    ParsedFile {
        path: path.to_path_buf(),
        tokens,
        events,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(file: &ParsedFile, chain: &[TokenId]) -> Vec<String> {
        chain.iter().map(|&id| file.text(id).to_string()).collect()
    }

    #[test]
    fn test_concrete_schema_events() {
        let file = parse(
            "a.fbs",
            "namespace Foo;\ntable Bar { x:int; }\nroot_type Bar;\n",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);

        let events = &file.events;
        assert_eq!(events.first(), Some(&ParseEvent::FileEnter));
        assert_eq!(events.last(), Some(&ParseEvent::FileExit));

        match &events[1] {
            ParseEvent::NamespaceEnter { segments } => {
                assert_eq!(texts(&file, segments), vec!["Foo"]);
            }
            other => panic!("unexpected event {:?}", other),
        }
        match &events[2] {
            ParseEvent::TypeDecl { kind, name } => {
                assert_eq!(*kind, DeclKind::Table);
                assert_eq!(file.text(*name), "Bar");
            }
            other => panic!("unexpected event {:?}", other),
        }
        match &events[3] {
            ParseEvent::RootDecl { name } => assert_eq!(file.text(*name), "Bar"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_field_references() {
        let file = parse(
            "b.fbs",
            "table Baz { b:Bar; v:[Game.Vec3]; n:int; f:[ubyte:4]; }",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);

        let chains: Vec<String> = file
            .events
            .iter()
            .filter_map(|e| match e {
                ParseEvent::TypeReference { chain } => Some(file.join_chain(chain)),
                _ => None,
            })
            .collect();
        assert_eq!(chains, vec!["Bar", "Game.Vec3"]);
    }

    #[test]
    fn test_union_alias_references_only_the_type() {
        let file = parse("u.fbs", "union Any { Monster, Hero: Game.Character, }");
        assert!(file.errors.is_empty(), "{:?}", file.errors);

        let chains: Vec<String> = file
            .events
            .iter()
            .filter_map(|e| match e {
                ParseEvent::TypeReference { chain } => Some(file.join_chain(chain)),
                _ => None,
            })
            .collect();
        assert_eq!(chains, vec!["Monster", "Game.Character"]);
    }

    #[test]
    fn test_enum_and_metadata() {
        let file = parse(
            "e.fbs",
            "attribute \"priority\";\nenum Color : ubyte (bit_flags) { Red = 1, Green, Blue = -2 }\ntable T { c:Color = Red (id: 0, priority: \"high\", deprecated); }",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);

        let metadata: Vec<Vec<(String, Option<String>)>> = file
            .events
            .iter()
            .filter_map(|e| match e {
                ParseEvent::Metadata { entries } => Some(
                    entries
                        .iter()
                        .map(|m| {
                            (
                                file.text(m.name).to_string(),
                                m.value.map(|v| file.text(v).to_string()),
                            )
                        })
                        .collect(),
                ),
                _ => None,
            })
            .collect();

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0], vec![("bit_flags".to_string(), None)]);
        assert_eq!(
            metadata[1],
            vec![
                ("id".to_string(), Some("0".to_string())),
                ("priority".to_string(), Some("\"high\"".to_string())),
                ("deprecated".to_string(), None),
            ]
        );
        assert!(matches!(
            file.events[1],
            ParseEvent::AttributeDecl { name } if file.text(name) == "\"priority\""
        ));
    }

    #[test]
    fn test_include_and_rpc() {
        let file = parse(
            "s.fbs",
            "include \"common.fbs\";\nnative_include \"vec.h\";\nfile_identifier \"MONS\";\nrpc_service Svc { Get(Req):Resp (streaming: \"server\"); }",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);

        let includes = file
            .events
            .iter()
            .filter(|e| matches!(e, ParseEvent::Include { .. }))
            .count();
        assert_eq!(includes, 1);

        let chains: Vec<String> = file
            .events
            .iter()
            .filter_map(|e| match e {
                ParseEvent::TypeReference { chain } => Some(file.join_chain(chain)),
                _ => None,
            })
            .collect();
        assert_eq!(chains, vec!["Req", "Resp"]);
    }

    #[test]
    fn test_recovers_from_broken_field() {
        let file = parse(
            "broken.fbs",
            "table A { x: ; y:B; }\ntable C { }\nroot_type C;",
        );
        assert_eq!(file.errors.len(), 1);
        insta::assert_snapshot!(
            file.errors[0].to_string(),
            @"expected a type, found ';' (line 1, column 14)"
        );

        let decls: Vec<&str> = file
            .events
            .iter()
            .filter_map(|e| match e {
                ParseEvent::TypeDecl { name, .. } => Some(file.text(*name)),
                _ => None,
            })
            .collect();
        assert_eq!(decls, vec!["A", "C"]);
        assert!(file
            .events
            .iter()
            .any(|e| matches!(e, ParseEvent::TypeReference { chain } if file.join_chain(chain) == "B")));
    }

    #[test]
    fn test_recovers_from_broken_top_level() {
        let file = parse("junk.fbs", "garbage here;\nstruct Vec3 { x:float; }\n{ \"json\": [1, 2] }");
        assert_eq!(file.errors.len(), 1);
        assert!(file
            .events
            .iter()
            .any(|e| matches!(e, ParseEvent::TypeDecl { kind: DeclKind::Struct, .. })));
    }

    #[test]
    fn test_unterminated_declaration_does_not_loop() {
        let file = parse("eof.fbs", "table Open { x:int;");
        assert_eq!(file.errors.len(), 1);
        assert_eq!(file.events.last(), Some(&ParseEvent::FileExit));
    }

    #[test]
    fn test_empty_namespace_resets() {
        let file = parse("ns.fbs", "namespace;");
        assert!(file.errors.is_empty());
        assert_eq!(
            file.events[1],
            ParseEvent::NamespaceEnter {
                segments: NsIdent::new()
            }
        );
    }
}
