//! Tokenizer for FlatBuffers schema files.
//!
//! Every byte of the input ends up in exactly one token, whitespace and comments
//! included, so the concatenated token texts reproduce the source. Renderers rely
//! on that to emit a faithful, annotated copy of each schema.

use folio_carton::CompactString;

use crate::token::{is_base_type_name, lookup_keyword, Position, Span, Token, TokenKind};

/// Scanner state over one source text.
pub struct Tokenizer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.source.len() / 3 + 1);

        while self.offset < self.bytes.len() {
            let start = self.offset;
            let position = self.position();
            let kind = self.scan();
            debug_assert!(self.offset > start, "tokenizer must make progress");
            self.advance_position(start);

            tokens.push(Token {
                kind,
                text: CompactString::new(&self.source[start..self.offset]),
                span: Span::new(start as u32, self.offset as u32),
                position,
            });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            text: CompactString::default(),
            span: Span::new(self.offset as u32, self.offset as u32),
            position: self.position(),
        });

        tokens
    }

    #[inline]
    fn position(&self) -> Position {
        Position::new(self.offset as u32, self.line, self.column)
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.offset + ahead).copied()
    }

    /// Update line/column for the bytes consumed since `start`.
    fn advance_position(&mut self, start: usize) {
        for &b in &self.bytes[start..self.offset] {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if b & 0xC0 != 0x80 {
                self.column += 1;
            }
        }
    }

    /// Consume one token starting at the current offset and return its kind.
    fn scan(&mut self) -> TokenKind {
        let b = self.bytes[self.offset];

        match b {
            b' ' | b'\t' | b'\r' | b'\n' | 0x0C => {
                self.eat_while(|c| matches!(c, b' ' | b'\t' | b'\r' | b'\n' | 0x0C));
                TokenKind::Whitespace
            }
            b'/' if self.peek_at(1) == Some(b'/') => {
                self.eat_while(|c| c != b'\n');
                TokenKind::Comment
            }
            b'/' if self.peek_at(1) == Some(b'*') => {
                self.scan_block_comment();
                TokenKind::BlockComment
            }
            b'"' => {
                self.scan_string();
                TokenKind::StringConstant
            }
            b'0'..=b'9' => self.scan_number(),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                let start = self.offset;
                self.eat_while(|c| c.is_ascii_alphanumeric() || c == b'_');
                let word = &self.source[start..self.offset];

                if let Some(keyword) = lookup_keyword(word) {
                    TokenKind::Keyword(keyword)
                } else if is_base_type_name(word) {
                    TokenKind::BaseTypeName
                } else {
                    TokenKind::Ident
                }
            }
            b';' | b'{' | b'}' | b'(' | b')' | b'[' | b']' | b':' | b',' | b'.' | b'=' | b'-'
            | b'+' => {
                self.offset += 1;
                TokenKind::Punct(b as char)
            }
            _ => {
                // One whole character, never a partial UTF-8 sequence.
                let len = self.source[self.offset..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.offset += len;
                TokenKind::Unknown
            }
        }
    }

    #[inline]
    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.offset < self.bytes.len() && pred(self.bytes[self.offset]) {
            self.offset += 1;
        }
    }

    fn scan_block_comment(&mut self) {
        self.offset += 2;
        while self.offset < self.bytes.len() {
            if self.bytes[self.offset] == b'*' && self.peek_at(1) == Some(b'/') {
                self.offset += 2;
                return;
            }
            self.offset += 1;
        }
    }

    /// A string ends at the closing quote; an unterminated one ends before the newline.
    fn scan_string(&mut self) {
        self.offset += 1;
        while self.offset < self.bytes.len() {
            match self.bytes[self.offset] {
                b'"' => {
                    self.offset += 1;
                    return;
                }
                b'\\' if self.offset + 1 < self.bytes.len() && self.bytes[self.offset + 1] != b'\n' => {
                    self.offset += 2;
                }
                b'\n' => return,
                _ => self.offset += 1,
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        if self.bytes[self.offset] == b'0' && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.offset += 2;
            self.eat_while(|c| c.is_ascii_hexdigit());
            return TokenKind::IntegerConstant;
        }

        let mut is_float = false;
        self.eat_while(|c| c.is_ascii_digit());

        if self.peek_at(0) == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.offset += 1;
            self.eat_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek_at(0), Some(b'e' | b'E')) {
            let digits_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if self.peek_at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.offset += digits_at;
                self.eat_while(|c| c.is_ascii_digit());
            }
        }

        if is_float {
            TokenKind::FloatConstant
        } else {
            TokenKind::IntegerConstant
        }
    }
}

/// Tokenize a schema source text.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Keyword;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokens_reproduce_source() {
        let source = "namespace Foo.Bar;\n/* block */ table T { x:int = -1 (id: 0); } // tail\n\"str\"";
        let text: String = tokenize(source).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, source);
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds("table Monster { hp:short; }"),
            vec![
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Ident,
                TokenKind::Punct('{'),
                TokenKind::Ident,
                TokenKind::Punct(':'),
                TokenKind::BaseTypeName,
                TokenKind::Punct(';'),
                TokenKind::Punct('}'),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("/// doc\n/* a\n b */x");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "/// doc");
        assert_eq!(tokens[2].kind, TokenKind::BlockComment);
        assert_eq!(tokens[2].text, "/* a\n b */");
        assert_eq!(tokens[3].kind, TokenKind::Ident);
        assert_eq!(tokens[3].position.line, 3);
        assert_eq!(tokens[3].position.column, 6);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = tokenize("x /* never closed");
        assert_eq!(tokens[2].kind, TokenKind::BlockComment);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize(r#"attribute "pri\"ority";"#);
        assert_eq!(tokens[2].kind, TokenKind::StringConstant);
        assert_eq!(tokens[2].text, r#""pri\"ority""#);

        let tokens = tokenize("include \"open\nnext");
        assert_eq!(tokens[2].kind, TokenKind::StringConstant);
        assert_eq!(tokens[2].text, "\"open");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 0xFF 2.5 1e10 3.0e-2"),
            vec![
                TokenKind::IntegerConstant,
                TokenKind::IntegerConstant,
                TokenKind::FloatConstant,
                TokenKind::FloatConstant,
                TokenKind::FloatConstant,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_characters_keep_utf8_boundaries() {
        let tokens = tokenize("é@");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[1].text, "@");
        assert_eq!(tokens[2].position.column, 3);
    }

    #[test]
    fn test_empty_source() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
