//! Parse events surfaced while walking one schema file.
//!
//! Events carry [`TokenId`]s instead of text: each id is the annotation slot a
//! later pass can decorate (anchor, link target) without altering the source.

use std::path::{Path, PathBuf};

use folio_carton::SmallVec;
use serde::Serialize;

use crate::error::ParseError;
use crate::token::{Token, TokenId};

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DeclKind {
    Enum,
    Union,
    Struct,
    Table,
}

impl DeclKind {
    /// Display name used in listings.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Struct => "struct",
            Self::Table => "table",
        }
    }
}

/// Identifier chain such as `Game.Common.Vec3`, one token id per segment.
pub type NsIdent = SmallVec<[TokenId; 4]>;

/// One `name` or `name: value` entry of a metadata list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub name: TokenId,
    pub value: Option<TokenId>,
}

/// A tree-walk callback, in lexical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseEvent {
    /// Start of the schema.
    FileEnter,
    /// `include "file.fbs";`, carrying the string constant.
    Include { path: TokenId },
    /// `namespace a.b.c;`. No segments means the global namespace.
    NamespaceEnter { segments: NsIdent },
    /// `attribute "name";`, carrying the quoted (or bare) name.
    AttributeDecl { name: TokenId },
    /// `table`, `struct`, `enum` or `union` declaration.
    TypeDecl { kind: DeclKind, name: TokenId },
    /// `root_type Name;`
    RootDecl { name: TokenId },
    /// A type occurrence: field type, enum underlying type, union alternative or rpc type.
    TypeReference { chain: NsIdent },
    /// A `( ... )` metadata list.
    Metadata { entries: Vec<MetadataEntry> },
    /// End of the schema.
    FileExit,
}

/// One schema file, tokenized and parsed once, replayed by every pass.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub tokens: Vec<Token>,
    pub events: Vec<ParseEvent>,
    pub errors: Vec<ParseError>,
}

impl ParsedFile {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a token by id.
    #[inline]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id as usize]
    }

    /// Get the text of a token by id.
    #[inline]
    pub fn text(&self, id: TokenId) -> &str {
        self.tokens[id as usize].text.as_str()
    }

    /// Join the segments of an identifier chain with `.`.
    pub fn join_chain(&self, chain: &[TokenId]) -> String {
        let mut joined = String::new();
        for (i, &id) in chain.iter().enumerate() {
            if i > 0 {
                joined.push('.');
            }
            joined.push_str(self.text(id));
        }
        joined
    }
}
