use std::fmt;

/// Location of a token or error in the source text.
///
/// `offset` counts characters (not bytes) from the start of the input,
/// `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Channel a token is emitted on.
///
/// Whitespace is lexed like any other token but lands on the hidden channel,
/// which the parser never sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Default,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Reserved field-type words
    /// `text`
    Text,
    /// `html`
    Html,
    /// `atom`
    Atom,
    /// `date`
    Date,
    /// `number`
    Number,
    /// `geo`
    Geo,
    /// `geopoint`
    ///
    /// Doubles as a function name: `geopoint(lat, lng)`.
    Geopoint,

    // Function names
    /// `abs`
    Abs,
    /// `count`
    Count,
    /// `distance`
    Distance,
    /// `log`
    Log,
    /// `max`
    Max,
    /// `min`
    Min,
    /// `pow`
    Pow,
    /// `snippet`
    Snippet,
    /// `switch`
    Switch,

    // Logical
    /// Logical AND (uppercase word only)
    ///
    /// # Examples
    /// ```text
    /// price > 10 AND rating >= 4
    /// ```
    And,
    /// Logical OR
    Or,
    /// Logical exclusive OR
    Xor,
    /// Logical negation
    ///
    /// # Examples
    /// ```text
    /// NOT stock = 0
    /// ```
    Not,

    // Comparison
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `=`
    Eq,
    /// `!=`
    Ne,

    // Arithmetic
    /// `+`
    Plus,
    /// `-`, binary subtraction or unary negation
    Minus,
    /// `*`
    Times,
    /// `/`
    Div,

    // Punctuation
    LParen,
    RParen,
    LSquare,
    RSquare,
    Comma,
    /// Separator in dotted names (`author.name`)
    Dot,
    /// Conditional marker `?`
    ///
    /// # Examples
    /// ```text
    /// max(in_stock ? price, 0)
    /// ```
    Cond,

    // Literals
    /// Decimal integer
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// ```
    Int,
    /// Floating-point number
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// .5
    /// 1e10
    /// 2.5E-3
    /// ```
    Float,
    /// Double-quoted phrase, escapes kept verbatim in the token text
    ///
    /// # Examples
    /// ```text
    /// "hello world"
    /// "tab\there"
    /// "café"
    /// ```
    Phrase,
    /// Field or variable name
    ///
    /// Starts with a letter, `_` or `$`, continues with letters, digits, `_` or `$`.
    ///
    /// # Examples
    /// ```text
    /// price
    /// _score
    /// $rank
    /// ```
    Name,

    /// Spaces, tabs and line breaks (hidden channel)
    Whitespace,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Maps an identifier run to its reserved kind, if it is one.
    ///
    /// Matching is exact and case-sensitive: `AND` is a keyword, `And` and
    /// `android` are names.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "text" => TokenKind::Text,
            "html" => TokenKind::Html,
            "atom" => TokenKind::Atom,
            "date" => TokenKind::Date,
            "number" => TokenKind::Number,
            "geo" => TokenKind::Geo,
            "geopoint" => TokenKind::Geopoint,
            "abs" => TokenKind::Abs,
            "count" => TokenKind::Count,
            "distance" => TokenKind::Distance,
            "log" => TokenKind::Log,
            "max" => TokenKind::Max,
            "min" => TokenKind::Min,
            "pow" => TokenKind::Pow,
            "snippet" => TokenKind::Snippet,
            "switch" => TokenKind::Switch,
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "XOR" => TokenKind::Xor,
            "NOT" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }

    /// Reserved words that may stand where a field name is expected.
    pub fn is_field_type(self) -> bool {
        matches!(
            self,
            TokenKind::Text
                | TokenKind::Html
                | TokenKind::Atom
                | TokenKind::Date
                | TokenKind::Number
                | TokenKind::Geo
                | TokenKind::Geopoint
        )
    }

    /// Reserved words that may be called as a function.
    pub fn is_function_name(self) -> bool {
        self.is_field_type()
            || matches!(
                self,
                TokenKind::Abs
                    | TokenKind::Count
                    | TokenKind::Distance
                    | TokenKind::Log
                    | TokenKind::Max
                    | TokenKind::Min
                    | TokenKind::Pow
                    | TokenKind::Snippet
                    | TokenKind::Switch
            )
    }

    /// Upper-case rule name used in diagnostics and token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Text => "TEXT",
            TokenKind::Html => "HTML",
            TokenKind::Atom => "ATOM",
            TokenKind::Date => "DATE",
            TokenKind::Number => "NUMBER",
            TokenKind::Geo => "GEO",
            TokenKind::Geopoint => "GEOPOINT",
            TokenKind::Abs => "ABS",
            TokenKind::Count => "COUNT",
            TokenKind::Distance => "DISTANCE",
            TokenKind::Log => "LOG",
            TokenKind::Max => "MAX",
            TokenKind::Min => "MIN",
            TokenKind::Pow => "POW",
            TokenKind::Snippet => "SNIPPET",
            TokenKind::Switch => "SWITCH",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Xor => "XOR",
            TokenKind::Not => "NOT",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LSquare => "LSQUARE",
            TokenKind::RSquare => "RSQUARE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Cond => "COND",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Phrase => "PHRASE",
            TokenKind::Name => "NAME",
            TokenKind::Whitespace => "WS",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token: its kind, the exact characters it matched and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
    pub channel: Channel,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        let channel = if kind == TokenKind::Whitespace {
            Channel::Hidden
        } else {
            Channel::Default
        };
        Token {
            kind,
            text: text.into(),
            position,
            channel,
        }
    }

    pub fn eof(position: Position) -> Self {
        Token::new(TokenKind::Eof, "", position)
    }

    pub fn is_hidden(&self) -> bool {
        self.channel == Channel::Hidden
    }

    /// Short human description for error messages: `'max'`, `end of input`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

#[test]
fn test_keyword_lookup_is_exact() {
    assert_eq!(TokenKind::keyword("AND"), Some(TokenKind::And));
    assert_eq!(TokenKind::keyword("and"), None);
    assert_eq!(TokenKind::keyword("geopoint"), Some(TokenKind::Geopoint));
    assert_eq!(TokenKind::keyword("texts"), None);
}

#[test]
fn test_geopoint_is_both_field_type_and_function() {
    assert!(TokenKind::Geopoint.is_field_type());
    assert!(TokenKind::Geopoint.is_function_name());
    assert!(!TokenKind::Max.is_field_type());
    assert!(TokenKind::Max.is_function_name());
    assert!(!TokenKind::Name.is_function_name());
}
