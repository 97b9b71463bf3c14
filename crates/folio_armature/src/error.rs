//! Parse error type.

use folio_carton::CompactString;
use serde::Serialize;

use crate::token::Position;

/// A syntax error. The parser records it and resynchronises; it never aborts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} (line {}, column {})", .position.line, .position.column)]
pub struct ParseError {
    pub message: CompactString,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<CompactString>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
