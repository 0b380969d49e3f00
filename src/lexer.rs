use crate::{
    ast::{Position, Token, TokenKind},
    error::LexError,
};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    /// Current scan position.
    pub fn location(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn token_from(&self, kind: TokenKind, start: Position) -> Token {
        let text: String = self.input[start.offset..self.position].iter().collect();
        Token::new(kind, text, start)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.location();
        self.advance();
        self.token_from(kind, start)
    }

    fn pair(&mut self, kind: TokenKind) -> Token {
        let start = self.location();
        self.advance_by(2);
        self.token_from(kind, start)
    }

    fn is_whitespace(ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r')
    }

    fn is_name_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
    }

    fn is_name_char(ch: char) -> bool {
        Self::is_name_start(ch) || ch.is_ascii_digit()
    }

    fn read_whitespace(&mut self) -> Token {
        let start = self.location();
        while self.current_char().is_some_and(Self::is_whitespace) {
            self.advance();
        }
        self.token_from(TokenKind::Whitespace, start)
    }

    fn read_name(&mut self) -> Token {
        let start = self.location();
        while self.current_char().is_some_and(Self::is_name_char) {
            self.advance();
        }
        let mut token = self.token_from(TokenKind::Name, start);
        if let Some(kind) = TokenKind::keyword(&token.text) {
            token.kind = kind;
        }
        token
    }

    fn skip_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Length of a well-formed exponent (`e`, optional sign, digits) at the
    /// cursor, or 0 when there is none.
    fn exponent_len(&self) -> usize {
        if !matches!(self.current_char(), Some('e' | 'E')) {
            return 0;
        }
        let mut len = 1;
        if matches!(self.peek_char(len), Some('+' | '-')) {
            len += 1;
        }
        let digits_start = len;
        while self.peek_char(len).is_some_and(|c| c.is_ascii_digit()) {
            len += 1;
        }
        if len == digits_start { 0 } else { len }
    }

    fn read_number(&mut self) -> Token {
        let start = self.location();
        let mut is_float = false;

        self.skip_digits();

        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.advance();
            self.skip_digits();
        }

        let exponent = self.exponent_len();
        if exponent > 0 {
            is_float = true;
            self.advance_by(exponent);
        }

        let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
        self.token_from(kind, start)
    }

    /// `.5`, `.25e-3`; the caller has checked a digit follows the dot.
    fn read_fraction(&mut self) -> Token {
        let start = self.location();
        self.advance();
        self.skip_digits();
        let exponent = self.exponent_len();
        self.advance_by(exponent);
        self.token_from(TokenKind::Float, start)
    }

    fn read_phrase(&mut self) -> Result<Token, LexError> {
        let start = self.location();
        self.advance(); // opening quote

        loop {
            match self.current_char() {
                None => {
                    return Err(LexError::UnterminatedPhrase {
                        start,
                        position: self.location(),
                    });
                }
                Some('"') => {
                    self.advance();
                    return Ok(self.token_from(TokenKind::Phrase, start));
                }
                Some('\\') => self.read_escape(start)?,
                Some(_) => self.advance(),
            }
        }
    }

    fn read_escape(&mut self, phrase_start: Position) -> Result<(), LexError> {
        let escape_start = self.location();
        self.advance(); // backslash

        match self.current_char() {
            Some('"' | '\\' | 'b' | 'f' | 'n' | 'r' | 't') => self.advance(),
            Some('u') => {
                self.advance();
                for _ in 0..4 {
                    match self.current_char() {
                        Some(c) if c.is_ascii_hexdigit() => self.advance(),
                        Some(c) => {
                            let mut sequence: String =
                                self.input[escape_start.offset..self.position].iter().collect();
                            sequence.push(c);
                            return Err(LexError::InvalidEscape {
                                sequence,
                                position: escape_start,
                            });
                        }
                        None => {
                            return Err(LexError::UnterminatedPhrase {
                                start: phrase_start,
                                position: self.location(),
                            });
                        }
                    }
                }

                // Surrogates only decode in high/low pairs.
                let code = self.hex4_before_cursor();
                if (0xDC00..0xE000).contains(&code) {
                    return Err(self.invalid_escape(escape_start));
                }
                if (0xD800..0xDC00).contains(&code) {
                    let low = match (self.current_char(), self.peek_char(1)) {
                        (Some('\\'), Some('u')) => self.peek_hex4(2),
                        _ => None,
                    };
                    if !low.is_some_and(|low| (0xDC00..0xE000).contains(&low)) {
                        return Err(self.invalid_escape(escape_start));
                    }
                    self.advance_by(6);
                }
            }
            Some(first @ '0'..='7') => {
                self.advance();
                let more = if first <= '3' { 2 } else { 1 };
                for _ in 0..more {
                    if matches!(self.current_char(), Some('0'..='7')) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            Some(other) => {
                return Err(LexError::InvalidEscape {
                    sequence: format!("\\{}", other),
                    position: escape_start,
                });
            }
            None => {
                return Err(LexError::UnterminatedPhrase {
                    start: phrase_start,
                    position: self.location(),
                });
            }
        }
        Ok(())
    }

    /// Value of the four hex digits just consumed.
    fn hex4_before_cursor(&self) -> u32 {
        hex4(&self.input, self.position - 4).unwrap_or_default()
    }

    /// Value of four hex digits starting `offset` characters ahead, if present.
    fn peek_hex4(&self, offset: usize) -> Option<u32> {
        hex4(&self.input, self.position + offset)
    }

    fn invalid_escape(&self, escape_start: Position) -> LexError {
        LexError::InvalidEscape {
            sequence: self.input[escape_start.offset..self.position].iter().collect(),
            position: escape_start,
        }
    }

    /// Next token on any channel, whitespace included.
    pub fn next_raw_token(&mut self) -> Result<Token, LexError> {
        let token = match self.current_char() {
            None => Token::eof(self.location()),
            Some(ch) if Self::is_whitespace(ch) => self.read_whitespace(),
            Some('(') => self.single(TokenKind::LParen),
            Some(')') => self.single(TokenKind::RParen),
            Some('[') => self.single(TokenKind::LSquare),
            Some(']') => self.single(TokenKind::RSquare),
            Some(',') => self.single(TokenKind::Comma),
            Some('?') => self.single(TokenKind::Cond),
            Some('+') => self.single(TokenKind::Plus),
            Some('-') => self.single(TokenKind::Minus),
            Some('*') => self.single(TokenKind::Times),
            Some('/') => self.single(TokenKind::Div),
            Some('=') => self.single(TokenKind::Eq),
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Le)
                } else {
                    self.single(TokenKind::Lt)
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Ge)
                } else {
                    self.single(TokenKind::Gt)
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Ne)
                } else {
                    return Err(LexError::UnexpectedCharacter {
                        ch: '!',
                        position: self.location(),
                    });
                }
            }
            Some('.') => {
                if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.read_fraction()
                } else {
                    self.single(TokenKind::Dot)
                }
            }
            Some('"') => self.read_phrase()?,
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) if Self::is_name_start(ch) => self.read_name(),
            Some(ch) => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: self.location(),
                });
            }
        };
        Ok(token)
    }

    /// Next token the parser should see. Hidden tokens are skipped and `Eof`
    /// repeats once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let token = self.next_raw_token()?;
            if !token.is_hidden() {
                return Ok(token);
            }
        }
    }

    /// All default-channel tokens, terminated by `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// All tokens including hidden whitespace, terminated by `Eof`.
    pub fn tokenize_with_hidden(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_raw_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Decode the raw text of a phrase token (quotes included) into its value.
///
/// Octal escapes name a code point up to `\377`; `\u` escapes may form a
/// surrogate pair.
pub fn unescape_phrase(raw: &str) -> Result<String, LexError> {
    let chars: Vec<char> = raw.chars().collect();
    let inner = match chars.as_slice() {
        ['"', inner @ .., '"'] => inner,
        _ => {
            return Err(LexError::UnterminatedPhrase {
                start: Position::start(),
                position: column_at(chars.len()),
            });
        }
    };

    let mut value = String::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        if inner[i] != '\\' {
            value.push(inner[i]);
            i += 1;
            continue;
        }

        let start = i;
        let invalid = |len: usize| LexError::InvalidEscape {
            sequence: inner[start..(start + len).min(inner.len())].iter().collect(),
            position: column_at(start + 1),
        };

        match inner.get(i + 1) {
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('b') => value.push('\u{0008}'),
            Some('f') => value.push('\u{000C}'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('u') => {
                let high = hex4(inner, i + 2).ok_or_else(|| invalid(6))?;
                i += 6;
                if (0xD800..0xDC00).contains(&high)
                    && inner.get(i) == Some(&'\\')
                    && inner.get(i + 1) == Some(&'u')
                    && let Some(low) = hex4(inner, i + 2)
                    && (0xDC00..0xE000).contains(&low)
                {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    value.push(char::from_u32(code).ok_or_else(|| invalid(12))?);
                    i += 6;
                } else {
                    value.push(char::from_u32(high).ok_or_else(|| invalid(6))?);
                }
                continue;
            }
            Some(first @ '0'..='7') => {
                let max_len = if *first <= '3' { 3 } else { 2 };
                let mut code = 0u32;
                let mut len = 0;
                while len < max_len
                    && let Some(digit) = inner.get(i + 1 + len).and_then(|c| c.to_digit(8))
                {
                    code = code * 8 + digit;
                    len += 1;
                }
                value.push(char::from_u32(code).ok_or_else(|| invalid(len + 1))?);
                i += 1 + len;
                continue;
            }
            _ => return Err(invalid(2)),
        }
        i += 2;
    }
    Ok(value)
}

fn hex4(chars: &[char], from: usize) -> Option<u32> {
    let digits = chars.get(from..from + 4)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}

fn column_at(offset: usize) -> Position {
    Position {
        offset,
        line: 1,
        column: offset + 1,
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("AND OR XOR NOT max geopoint");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::And);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Or);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Xor);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Not);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Max);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Geopoint);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_whitespace_is_hidden() {
    let mut lexer = Lexer::new("a \t\n b");
    let first = lexer.next_raw_token().unwrap();
    let ws = lexer.next_raw_token().unwrap();
    let second = lexer.next_raw_token().unwrap();
    assert_eq!(first.kind, TokenKind::Name);
    assert_eq!(ws.kind, TokenKind::Whitespace);
    assert!(ws.is_hidden());
    assert_eq!(ws.text, " \t\n ");
    assert_eq!(second.position.line, 2);
    assert_eq!(second.position.column, 2);
}

#[test]
fn test_unescape() {
    assert_eq!(unescape_phrase(r#""a\"b""#).unwrap(), "a\"b");
    assert_eq!(unescape_phrase(r#""A\101\7""#).unwrap(), "AA\u{7}");
    assert_eq!(unescape_phrase(r#""\uD83D\uDE00""#).unwrap(), "\u{1F600}");
    assert!(unescape_phrase(r#""\q""#).is_err());
}
