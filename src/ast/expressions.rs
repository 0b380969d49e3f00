use crate::ast::{BinOp, FieldType, Function};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every node owns its children outright; literal payloads keep the exact
/// source text so a tree can be printed back without loss.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Integer literal, as written
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Int(String),

    /// Floating-point literal, as written
    ///
    /// # Example
    /// ```text
    /// 2.5e3
    /// ```
    Float(String),

    /// Phrase literal including its quotes and escape sequences
    ///
    /// # Example
    /// ```text
    /// "hello \"world\""
    /// ```
    Phrase(String),

    // Names
    /// Plain field name
    Name(String),

    /// Reserved field-type word used as a field name
    ///
    /// # Example
    /// ```text
    /// date < 2011
    /// ```
    FieldType(FieldType),

    /// Dotted name, built left-associatively
    ///
    /// `a.b.c` is `Dotted { base: Dotted { base: a, field: b }, field: c }`,
    /// `field` is always a [`Expr::Name`]. What a dotted name refers to is up
    /// to the consumer of the tree.
    Dotted { base: Box<Expr>, field: Box<Expr> },

    /// Indexed field access
    ///
    /// # Example
    /// ```text
    /// tags[2]
    /// ```
    Index { name: Box<Expr>, index: String },

    // Operations
    /// Unary minus
    Neg(Box<Expr>),

    /// Logical negation (`NOT`)
    Not(Box<Expr>),

    /// Binary operation (logical, comparison, arithmetic)
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Conditional (`condition ? value`)
    ///
    /// # Example
    /// ```text
    /// max(in_stock ? price, 0)
    /// ```
    Cond { condition: Box<Expr>, then: Box<Expr> },

    /// Function call with one or more arguments
    ///
    /// # Examples
    /// ```text
    /// max(a, b, c)
    /// snippet("rust", body)
    /// ```
    Call { function: Function, args: Vec<Expr> },
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn name(name: impl Into<String>) -> Expr {
        Expr::Name(name.into())
    }

    pub fn int(text: impl Into<String>) -> Expr {
        Expr::Int(text.into())
    }

    pub fn dotted(base: Expr, field: impl Into<String>) -> Expr {
        Expr::Dotted {
            base: Box::new(base),
            field: Box::new(Expr::Name(field.into())),
        }
    }

    /// Node kind label: the operator or keyword for interior nodes, the
    /// literal type for leaves.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Int(_) => "INT",
            Expr::Float(_) => "FLOAT",
            Expr::Phrase(_) => "PHRASE",
            Expr::Name(_) => "NAME",
            Expr::FieldType(field_type) => match field_type {
                FieldType::Text => "TEXT",
                FieldType::Html => "HTML",
                FieldType::Atom => "ATOM",
                FieldType::Date => "DATE",
                FieldType::Number => "NUMBER",
                FieldType::Geo => "GEO",
                FieldType::Geopoint => "GEOPOINT",
            },
            Expr::Dotted { .. } => ".",
            Expr::Index { .. } => "INDEX",
            Expr::Neg(_) => "NEG",
            Expr::Not(_) => "NOT",
            Expr::Binary { op, .. } => op.symbol(),
            Expr::Cond { .. } => "?",
            Expr::Call { function, .. } => function.keyword(),
        }
    }

    /// Literal payload of a leaf, or the index text of an `INDEX` node.
    pub fn text(&self) -> Option<&str> {
        match self {
            Expr::Int(text) | Expr::Float(text) | Expr::Phrase(text) | Expr::Name(text) => {
                Some(text)
            }
            Expr::FieldType(field_type) => Some(field_type.keyword()),
            Expr::Index { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Ordered children.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Int(_)
            | Expr::Float(_)
            | Expr::Phrase(_)
            | Expr::Name(_)
            | Expr::FieldType(_) => vec![],
            Expr::Dotted { base, field } => vec![&**base, &**field],
            Expr::Index { name, .. } => vec![&**name],
            Expr::Neg(operand) | Expr::Not(operand) => vec![&**operand],
            Expr::Binary { left, right, .. } => vec![&**left, &**right],
            Expr::Cond { condition, then } => vec![&**condition, &**then],
            Expr::Call { args, .. } => args.iter().collect(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Expr::Int(_) | Expr::Float(_) | Expr::Phrase(_) | Expr::Name(_) | Expr::FieldType(_)
        )
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }
}
