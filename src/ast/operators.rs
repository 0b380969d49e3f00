use crate::ast::TokenKind;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    /// Logical AND (`AND`)
    And,
    /// Logical OR (`OR`)
    Or,
    /// Exclusive OR (`XOR`)
    Xor,

    // Comparison
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Le,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Ge,
    /// Equal (`=`)
    Eq,
    /// Not equal (`!=`)
    Ne,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::And => "AND",
            BinOp::Or => "OR",
            BinOp::Xor => "XOR",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "=",
            BinOp::Ne => "!=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    /// Binding power, higher binds tighter.
    ///
    /// `AND` sits below `OR`/`XOR`: `a OR b AND c` groups as `(a OR b) AND c`.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::And => 1,
            BinOp::Or | BinOp::Xor => 2,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne => 4,
            BinOp::Add | BinOp::Sub => 5,
            BinOp::Mul | BinOp::Div => 6,
        }
    }

    pub fn is_comparison(self) -> bool {
        self.precedence() == 4
    }

    pub fn from_token(kind: TokenKind) -> Option<BinOp> {
        let op = match kind {
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            TokenKind::Xor => BinOp::Xor,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            TokenKind::Eq => BinOp::Eq,
            TokenKind::Ne => BinOp::Ne,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Times => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            _ => return None,
        };
        Some(op)
    }
}

/// Reserved field-type words. Each may be used on its own as a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Html,
    Atom,
    Date,
    Number,
    Geo,
    Geopoint,
}

impl FieldType {
    pub fn keyword(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Html => "html",
            FieldType::Atom => "atom",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::Geo => "geo",
            FieldType::Geopoint => "geopoint",
        }
    }

    pub fn from_token(kind: TokenKind) -> Option<FieldType> {
        let field_type = match kind {
            TokenKind::Text => FieldType::Text,
            TokenKind::Html => FieldType::Html,
            TokenKind::Atom => FieldType::Atom,
            TokenKind::Date => FieldType::Date,
            TokenKind::Number => FieldType::Number,
            TokenKind::Geo => FieldType::Geo,
            TokenKind::Geopoint => FieldType::Geopoint,
            _ => return None,
        };
        Some(field_type)
    }
}

/// Functions callable from an expression.
///
/// The field-type words double as conversion functions (`number(price)`),
/// the rest are the built-in scoring helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Text,
    Html,
    Atom,
    Date,
    Number,
    Geo,
    Geopoint,
    Abs,
    Count,
    Distance,
    Log,
    Max,
    Min,
    Pow,
    Snippet,
    Switch,
}

impl Function {
    pub fn keyword(self) -> &'static str {
        match self {
            Function::Text => "text",
            Function::Html => "html",
            Function::Atom => "atom",
            Function::Date => "date",
            Function::Number => "number",
            Function::Geo => "geo",
            Function::Geopoint => "geopoint",
            Function::Abs => "abs",
            Function::Count => "count",
            Function::Distance => "distance",
            Function::Log => "log",
            Function::Max => "max",
            Function::Min => "min",
            Function::Pow => "pow",
            Function::Snippet => "snippet",
            Function::Switch => "switch",
        }
    }

    pub fn from_token(kind: TokenKind) -> Option<Function> {
        let function = match kind {
            TokenKind::Text => Function::Text,
            TokenKind::Html => Function::Html,
            TokenKind::Atom => Function::Atom,
            TokenKind::Date => Function::Date,
            TokenKind::Number => Function::Number,
            TokenKind::Geo => Function::Geo,
            TokenKind::Geopoint => Function::Geopoint,
            TokenKind::Abs => Function::Abs,
            TokenKind::Count => Function::Count,
            TokenKind::Distance => Function::Distance,
            TokenKind::Log => Function::Log,
            TokenKind::Max => Function::Max,
            TokenKind::Min => Function::Min,
            TokenKind::Pow => Function::Pow,
            TokenKind::Snippet => Function::Snippet,
            TokenKind::Switch => Function::Switch,
            _ => return None,
        };
        Some(function)
    }
}

#[test]
fn test_precedence_chain() {
    assert!(BinOp::And.precedence() < BinOp::Or.precedence());
    assert_eq!(BinOp::Or.precedence(), BinOp::Xor.precedence());
    assert!(BinOp::Xor.precedence() < BinOp::Lt.precedence());
    assert!(BinOp::Ne.precedence() < BinOp::Add.precedence());
    assert!(BinOp::Sub.precedence() < BinOp::Div.precedence());
}

#[test]
fn test_every_function_keyword_lexes_back() {
    for kind in [TokenKind::Geopoint, TokenKind::Snippet, TokenKind::Number] {
        let function = Function::from_token(kind).unwrap();
        assert_eq!(TokenKind::keyword(function.keyword()), Some(kind));
    }
}
