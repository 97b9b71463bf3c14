//! Armature - The structural parser for FlatBuffers schemas.
//!
//! Turns raw schema text into the two streams every later pass consumes:
//!
//! - a **token stream** covering every byte of the file (comments and whitespace included)
//! - a **parse-event stream** of declarations and references, in lexical order
//!
//! Both are bundled in a [`ParsedFile`], which is produced once per file and
//! replayed by the declaration pass and the rendering pass.
//!
//! ```
//! use folio_armature::{parse, ParseEvent};
//!
//! let file = parse("monster.fbs", "namespace Game;\ntable Monster { hp:short; }\n");
//! assert!(file.errors.is_empty());
//! assert!(matches!(file.events[1], ParseEvent::NamespaceEnter { .. }));
//! ```

pub mod error;
pub mod event;
pub mod parser;
pub mod token;
pub mod tokenizer;

pub use error::ParseError;
pub use event::{DeclKind, MetadataEntry, NsIdent, ParseEvent, ParsedFile};
pub use parser::{parse, Parser};
pub use token::{Keyword, Position, Span, Token, TokenId, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
