//! Token definitions for FlatBuffers schemas.

use folio_carton::CompactString;
use phf::phf_map;
use serde::Serialize;

/// Index of a token inside its file's token stream.
///
/// Parse events refer to tokens by id, so later passes can attach
/// annotations to a token without touching its text.
pub type TokenId = u32;

/// Source position of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Position {
    /// Byte offset from start of file
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number (in characters)
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Byte span [start, end) of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Reserved words of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Attribute,
    Enum,
    FileExtension,
    FileIdentifier,
    Include,
    NativeInclude,
    Namespace,
    RootType,
    RpcService,
    Struct,
    Table,
    Union,
}

impl Keyword {
    /// Source spelling of the keyword.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attribute => "attribute",
            Self::Enum => "enum",
            Self::FileExtension => "file_extension",
            Self::FileIdentifier => "file_identifier",
            Self::Include => "include",
            Self::NativeInclude => "native_include",
            Self::Namespace => "namespace",
            Self::RootType => "root_type",
            Self::RpcService => "rpc_service",
            Self::Struct => "struct",
            Self::Table => "table",
            Self::Union => "union",
        }
    }
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "attribute" => Keyword::Attribute,
    "enum" => Keyword::Enum,
    "file_extension" => Keyword::FileExtension,
    "file_identifier" => Keyword::FileIdentifier,
    "include" => Keyword::Include,
    "native_include" => Keyword::NativeInclude,
    "namespace" => Keyword::Namespace,
    "root_type" => Keyword::RootType,
    "rpc_service" => Keyword::RpcService,
    "struct" => Keyword::Struct,
    "table" => Keyword::Table,
    "union" => Keyword::Union,
};

static BASE_TYPE_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "bool", "byte", "ubyte", "short", "ushort", "int", "uint", "float", "long", "ulong",
    "double", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
    "float32", "float64", "string",
};

/// Look up a keyword by its spelling.
#[inline]
pub fn lookup_keyword(word: &str) -> Option<Keyword> {
    KEYWORDS.get(word).copied()
}

/// Check if a word names a built-in scalar or string type.
#[inline]
pub fn is_base_type_name(word: &str) -> bool {
    BASE_TYPE_NAMES.contains(word)
}

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// `// ...` line comment (including `///` doc comments).
    Comment,
    /// `/* ... */` block comment.
    BlockComment,
    /// `"..."` string constant, quotes included.
    StringConstant,
    /// Built-in type name such as `int` or `string`.
    BaseTypeName,
    /// User identifier.
    Ident,
    Keyword(Keyword),
    IntegerConstant,
    FloatConstant,
    /// Single punctuation character.
    Punct(char),
    Whitespace,
    /// Any character the schema language does not know.
    Unknown,
    /// Zero-width end-of-stream marker.
    Eof,
}

impl TokenKind {
    /// Whitespace and comments carry no syntax.
    #[inline]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::BlockComment)
    }
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: CompactString,
    pub span: Span,
    pub position: Position,
}

impl Token {
    #[inline]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}
