// tests/lexer_tests.rs

use search_expr::ast::{Position, Token, TokenKind};
use search_expr::error::LexError;
use search_expr::lexer::Lexer;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn single(input: &str) -> Token {
    let mut lexer = Lexer::new(input);
    let token = lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Eof,
        "more than one token in {:?}",
        input
    );
    token
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (".", TokenKind::Dot),
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("[", TokenKind::LSquare),
        ("]", TokenKind::RSquare),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Times),
        ("/", TokenKind::Div),
        ("<", TokenKind::Lt),
        (">", TokenKind::Gt),
        ("=", TokenKind::Eq),
        ("?", TokenKind::Cond),
        (",", TokenKind::Comma),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("<=", TokenKind::Le),
        (">=", TokenKind::Ge),
        ("!=", TokenKind::Ne),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_two_char_vs_single_char() {
    assert_eq!(kinds("< ="), [TokenKind::Lt, TokenKind::Eq, TokenKind::Eof]);
    assert_eq!(kinds("<="), [TokenKind::Le, TokenKind::Eof]);
    assert_eq!(kinds("<<="), [TokenKind::Lt, TokenKind::Le, TokenKind::Eof]);
    assert_eq!(kinds(">=="), [TokenKind::Ge, TokenKind::Eq, TokenKind::Eof]);
}

#[test]
fn test_bare_exclamation_is_invalid() {
    let mut lexer = Lexer::new("a ! b");
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert!(matches!(err, LexError::UnexpectedCharacter { ch: '!', .. }));
    assert_eq!(err.position().offset, 2);
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("text", TokenKind::Text),
        ("html", TokenKind::Html),
        ("atom", TokenKind::Atom),
        ("date", TokenKind::Date),
        ("number", TokenKind::Number),
        ("geo", TokenKind::Geo),
        ("geopoint", TokenKind::Geopoint),
        ("abs", TokenKind::Abs),
        ("count", TokenKind::Count),
        ("distance", TokenKind::Distance),
        ("log", TokenKind::Log),
        ("max", TokenKind::Max),
        ("min", TokenKind::Min),
        ("pow", TokenKind::Pow),
        ("snippet", TokenKind::Snippet),
        ("switch", TokenKind::Switch),
        ("AND", TokenKind::And),
        ("OR", TokenKind::Or),
        ("XOR", TokenKind::Xor),
        ("NOT", TokenKind::Not),
    ];

    for (input, expected) in test_cases {
        assert_eq!(single(input).kind, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_keywords_vs_identifiers() {
    // Keywords only match when they are the whole identifier run
    let test_cases = vec![
        "android", "ANDROID", "ORDER", "NOTE", "XORed", "texts", "geopoints", "maximum", "logo",
        "count_", "_max", "$date", "and", "or", "not", "Text", "MAX",
    ];

    for input in test_cases {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Name, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_names() {
    for input in ["price", "_score", "$rank", "a1_b2$", "Z", "snake_case_name"] {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Name, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_name_cannot_start_with_digit() {
    assert_eq!(kinds("2abc"), [TokenKind::Int, TokenKind::Name, TokenKind::Eof]);
}

#[test]
fn test_dotted_name_tokens() {
    assert_eq!(
        kinds("author.name"),
        [TokenKind::Name, TokenKind::Dot, TokenKind::Name, TokenKind::Eof]
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integers() {
    for input in ["0", "7", "42", "007", "123456789012345678901234567890"] {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Int, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_floats() {
    for input in [
        "3.14", "0.5", ".5", ".25e3", "1e10", "1E10", "2.5e-3", "2.5E+3", "7e0", "10.01",
    ] {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Float, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_number_edge_cases() {
    // A dot needs a digit after it to belong to the number
    assert_eq!(kinds("1."), [TokenKind::Int, TokenKind::Dot, TokenKind::Eof]);
    // An incomplete exponent is left for the next token
    assert_eq!(kinds("1e"), [TokenKind::Int, TokenKind::Name, TokenKind::Eof]);
    assert_eq!(
        kinds("1e+"),
        [TokenKind::Int, TokenKind::Name, TokenKind::Plus, TokenKind::Eof]
    );
    // Two fractions in a row
    assert_eq!(kinds("1.5.3"), [TokenKind::Float, TokenKind::Float, TokenKind::Eof]);
    // No signed literals
    assert_eq!(kinds("-5"), [TokenKind::Minus, TokenKind::Int, TokenKind::Eof]);
}

// ============================================================================
// Phrases
// ============================================================================

#[test]
fn test_simple_phrase() {
    let token = single(r#""hello world""#);
    assert_eq!(token.kind, TokenKind::Phrase);
    assert_eq!(token.text, r#""hello world""#);
}

#[test]
fn test_empty_phrase() {
    assert_eq!(single(r#""""#).kind, TokenKind::Phrase);
}

#[test]
fn test_phrase_with_escaped_quote() {
    let input = r#""he said \"hi\"""#;
    let token = single(input);
    assert_eq!(token.kind, TokenKind::Phrase);
    assert_eq!(token.text, input);
}

#[test]
fn test_phrase_escape_sequences() {
    let test_cases = vec![
        r#""\"""#,
        r#""\\""#,
        r#""\b\f\n\r\t""#,
        r#""\u00e9""#,
        r#""\uABCD""#,
        r#""\0""#,
        r#""\7""#,
        r#""\12""#,
        r#""\377""#,
        r#""\400""#,
        r#""\uD83D\uDE00""#,
    ];

    for input in test_cases {
        let token = Lexer::new(input)
            .next_token()
            .unwrap_or_else(|e| panic!("{} failed: {}", input, e));
        assert_eq!(token.kind, TokenKind::Phrase, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_escaped_backslash_before_end() {
    // `\\` is a complete escape, so the phrase never closes
    let result = Lexer::new(r#""a\\"#).next_token();
    assert!(matches!(result, Err(LexError::UnterminatedPhrase { .. })));
}

#[test]
fn test_phrase_keeps_special_characters() {
    let token = single("\"AND ( ) [ ] 42 caf\u{e9} \n\"");
    assert_eq!(token.kind, TokenKind::Phrase);
}

#[test]
fn test_invalid_escapes() {
    let test_cases = vec![
        r#""\q""#,
        r#""\8""#,
        r#""\u12""#,
        r#""\uXYZW""#,
        r#""\'""#,
        r#""\uD800""#,
        r#""\uDC00""#,
        r#""\uD800\u0041""#,
        r#""\uDE00\uD83D""#,
    ];

    for input in test_cases {
        let result = Lexer::new(input).next_token();
        assert!(
            matches!(result, Err(LexError::InvalidEscape { .. })),
            "Expected invalid escape for {}, got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_lone_surrogate_escape() {
    let err = Lexer::new(r#"x = "a\uD800""#).tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidEscape {
            sequence: r"\uD800".to_string(),
            position: Position {
                offset: 6,
                line: 1,
                column: 7,
            },
        }
    );
}

#[test]
fn test_unterminated_phrase() {
    let err = Lexer::new(r#""abc"#).next_token().unwrap_err();
    match err {
        LexError::UnterminatedPhrase { start, position } => {
            assert_eq!(start.offset, 0);
            assert_eq!(position.offset, 4);
        }
        other => panic!("Expected unterminated phrase, got {:?}", other),
    }
}

// ============================================================================
// Whitespace and Positions
// ============================================================================

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        kinds(" \t a \r\n + \n 1 "),
        [TokenKind::Name, TokenKind::Plus, TokenKind::Int, TokenKind::Eof]
    );
}

#[test]
fn test_hidden_channel_tokens() {
    let tokens = Lexer::new("a  b").tokenize_with_hidden().unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [TokenKind::Name, TokenKind::Whitespace, TokenKind::Name, TokenKind::Eof]
    );
    assert!(tokens[1].is_hidden());
    assert!(!tokens[0].is_hidden());
}

#[test]
fn test_unicode_whitespace_is_rejected() {
    let result = Lexer::new("a\u{00a0}b").tokenize();
    assert!(matches!(
        result,
        Err(LexError::UnexpectedCharacter { ch: '\u{00a0}', .. })
    ));
}

#[test]
fn test_positions() {
    let tokens = Lexer::new("max(a,\n  b)").tokenize().unwrap();
    let positions: Vec<_> = tokens
        .iter()
        .map(|t| (t.position.line, t.position.column, t.position.offset))
        .collect();
    assert_eq!(
        positions,
        [(1, 1, 0), (1, 4, 3), (1, 5, 4), (1, 6, 5), (2, 3, 9), (2, 4, 10), (2, 5, 11)]
    );
}

#[test]
fn test_unexpected_characters() {
    let test_cases = [
        ("#", '#'),
        ("a % b", '%'),
        ("'x'", '\''),
        ("caf\u{e9}", '\u{e9}'),
        ("{", '{'),
    ];
    for (input, ch) in test_cases {
        let result = Lexer::new(input).tokenize();
        assert!(
            matches!(result, Err(LexError::UnexpectedCharacter { ch: c, .. }) if c == ch),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Complex Expressions
// ============================================================================

#[test]
fn test_complex_expression() {
    assert_eq!(
        kinds(r#"max(price, 1.5) >= 10 AND NOT tags[0] != "x""#),
        [
            TokenKind::Max,
            TokenKind::LParen,
            TokenKind::Name,
            TokenKind::Comma,
            TokenKind::Float,
            TokenKind::RParen,
            TokenKind::Ge,
            TokenKind::Int,
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Name,
            TokenKind::LSquare,
            TokenKind::Int,
            TokenKind::RSquare,
            TokenKind::Ne,
            TokenKind::Phrase,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Name);
    for _ in 0..3 {
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}
