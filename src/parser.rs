use crate::{
    ast::{BinOp, Expr, FieldType, Function, Token, TokenKind},
    error::ParseError,
    lexer::Lexer,
    limits::Limits,
};
use std::mem;
use tracing::{debug, trace};

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peeked: Option<Token>,
    limits: Limits,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        Self::with_limits(lexer, Limits::default())
    }

    pub fn with_limits(mut lexer: Lexer, limits: Limits) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            peeked: None,
            limits,
            depth: 0,
        })
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        let consumed = mem::replace(&mut self.current_token, next);
        trace!(kind = %consumed.kind, text = %consumed.text, "consumed token");
        Ok(consumed)
    }

    /// Kind of the token after the current one.
    fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        let kind = token.kind;
        self.peeked = Some(token);
        Ok(kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = &self.current_token;
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEof {
                expected: expected.to_string(),
                position: token.position,
            }
        } else {
            ParseError::UnexpectedToken {
                found: token.describe(),
                expected: expected.to_string(),
                position: token.position,
            }
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.limits.max_depth,
                position: self.current_token.position,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Unwind the levels a left-deep operator chain entered.
    fn leave_chain(&mut self, links: usize) {
        self.depth -= links;
    }

    /// Parse a complete expression; the whole input must be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_conditional()?;
        if !self.check(TokenKind::Eof) {
            return Err(ParseError::TrailingInput {
                found: self.current_token.describe(),
                position: self.current_token.position,
            });
        }
        Ok(expr)
    }

    /// `conjunction ('?' additive)?`
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_conjunction()?;

        if self.check(TokenKind::Cond) {
            self.advance()?;
            let then = self.parse_additive()?;
            return Ok(Expr::Cond {
                condition: Box::new(condition),
                then: Box::new(then),
            });
        }
        Ok(condition)
    }

    fn parse_conjunction(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_disjunction()?;
        let mut links = 0;

        while self.check(TokenKind::And) {
            self.advance()?;
            self.enter()?;
            links += 1;
            let right = self.parse_disjunction()?;
            left = Expr::binary(BinOp::And, left, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_disjunction(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_negation()?;
        let mut links = 0;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Or => BinOp::Or,
                TokenKind::Xor => BinOp::Xor,
                _ => break,
            };

            self.advance()?;
            self.enter()?;
            links += 1;
            let right = self.parse_negation()?;
            left = Expr::binary(op, left, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_negation(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Not) {
            self.advance()?;
            let operand = self.parse_comparison()?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_comparison()
    }

    /// At most one comparison; `a < b < c` leaves the second `<` unconsumed.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;

        match BinOp::from_token(self.current_token.kind) {
            Some(op) if op.is_comparison() => {
                self.advance()?;
                let right = self.parse_additive()?;
                Ok(Expr::binary(op, left, right))
            }
            _ => Ok(left),
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        let mut links = 0;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };

            self.advance()?;
            self.enter()?;
            links += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        let mut links = 0;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Times => BinOp::Mul,
                TokenKind::Div => BinOp::Div,
                _ => break,
            };

            self.advance()?;
            self.enter()?;
            links += 1;
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    /// A single optional minus; `--x` is rejected, `-(-x)` is fine.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Minus) {
            self.advance()?;
            let operand = self.parse_atom()?;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.current_token.kind {
            TokenKind::Int => Ok(Expr::Int(self.advance()?.text)),
            TokenKind::Float => Ok(Expr::Float(self.advance()?.text)),
            TokenKind::Phrase => Ok(Expr::Phrase(self.advance()?.text)),
            TokenKind::Name => self.parse_variable(),
            TokenKind::LParen => {
                self.enter()?;
                self.advance()?;
                let inner = self.parse_conjunction()?;
                self.expect(TokenKind::RParen, "')'")?;
                self.leave();
                Ok(inner)
            }
            kind if kind.is_function_name() => {
                // Field-type words are names unless they are being called.
                if kind.is_field_type() && self.peek_kind()? != TokenKind::LParen {
                    self.parse_variable()
                } else {
                    self.parse_call()
                }
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// `name` or `name '[' INT ']'`
    fn parse_variable(&mut self) -> Result<Expr, ParseError> {
        let name = self.parse_name()?;

        if self.check(TokenKind::LSquare) {
            self.advance()?;
            let index = self.expect(TokenKind::Int, "an integer index")?;
            self.expect(TokenKind::RSquare, "']'")?;
            return Ok(Expr::Index {
                name: Box::new(name),
                index: index.text,
            });
        }
        Ok(name)
    }

    fn parse_name(&mut self) -> Result<Expr, ParseError> {
        if let Some(field_type) = FieldType::from_token(self.current_token.kind) {
            self.advance()?;
            return Ok(Expr::FieldType(field_type));
        }

        let first = self.expect(TokenKind::Name, "a field name")?;
        let mut expr = Expr::Name(first.text);
        let mut links = 0;

        while self.check(TokenKind::Dot) {
            self.advance()?;
            self.enter()?;
            links += 1;
            let field = self.expect(TokenKind::Name, "a name after '.'")?;
            expr = Expr::Dotted {
                base: Box::new(expr),
                field: Box::new(Expr::Name(field.text)),
            };
        }
        self.leave_chain(links);
        Ok(expr)
    }

    /// `fnName '(' conditional (',' conditional)* ')'`
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let Some(function) = Function::from_token(self.current_token.kind) else {
            return Err(self.unexpected("a function name"));
        };
        let name = self.advance()?;
        self.enter()?;
        self.expect(TokenKind::LParen, &format!("'(' after '{}'", name.text))?;

        let mut args = vec![self.parse_conditional()?];
        while self.check(TokenKind::Comma) {
            self.advance()?;
            args.push(self.parse_conditional()?);
        }

        self.expect(TokenKind::RParen, "',' or ')'")?;
        self.leave();
        Ok(Expr::Call { function, args })
    }
}

/// Parse `input` with the default [`Limits`].
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    parse_with_limits(input, &Limits::default())
}

/// Parse `input` with a fresh lexer and parser.
pub fn parse_with_limits(input: &str, limits: &Limits) -> Result<Expr, ParseError> {
    let length = input.chars().count();
    if length > limits.max_expression_length {
        debug!(length, limit = limits.max_expression_length, "expression too long");
        return Err(ParseError::TooLong {
            length,
            limit: limits.max_expression_length,
        });
    }

    let result = Parser::with_limits(Lexer::new(input), *limits).and_then(|mut p| p.parse());
    match &result {
        Ok(expr) => debug!(length, nodes = expr.node_count(), "parsed expression"),
        Err(e) => debug!(length, error = %e, "rejected expression"),
    }
    result
}

#[test]
fn test_call_requires_parenthesis() {
    let err = parse("max").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));
}

#[test]
fn test_field_type_word_is_a_name() {
    assert_eq!(parse("date").unwrap(), Expr::FieldType(FieldType::Date));
    assert!(matches!(
        parse("date(x)").unwrap(),
        Expr::Call {
            function: Function::Date,
            ..
        }
    ));
}
