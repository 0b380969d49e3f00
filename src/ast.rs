//! # Search Expressions - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of the
//! search expression language: the small language used to compute returned
//! fields, sort keys and scores from document fields.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, with positions
//! - **[expressions]** - Expression nodes (literals, names, operations, calls)
//! - **[operators]** - Binary operators, field-type words and function names
//!
//! ## Quick Start
//!
//! ```text
//! max(price * (1 - discount), 5) > 10 AND NOT category = "clearance"
//! ```
//!
//! ## Precedence
//!
//! From loosest to tightest:
//!
//! | level | operators | associativity |
//! |---|---|---|
//! | conditional | `?` | at most one |
//! | conjunction | `AND` | left |
//! | disjunction | `OR` `XOR` | left |
//! | negation | `NOT` | prefix, once |
//! | comparison | `<` `<=` `>` `>=` `=` `!=` | at most one |
//! | additive | `+` `-` | left |
//! | multiplicative | `*` `/` | left |
//! | unary | `-` | prefix, once |
//!
//! Note that `AND` binds looser than `OR`: `a OR b AND c` is `(a OR b) AND c`.
//!
//! ## Names
//!
//! - `price` - plain field name
//! - `author.name` - dotted name, kept as a left-associative `.` chain
//! - `tags[2]` - indexed field, an `INDEX` node carrying `2`
//! - `date`, `geo`, ... - reserved field-type words are valid names on their own
//!
//! ## Functions
//!
//! Calls take one or more arguments; each argument may be a conditional:
//!
//! ```text
//! snippet("rust", content)
//! distance(location, geopoint(35.2, 40.5))
//! max(in_stock ? price, 0)
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::{Channel, Position, Token, TokenKind};
pub use expressions::Expr;
pub use operators::{BinOp, FieldType, Function};
