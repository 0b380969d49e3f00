pub mod ast;
pub mod checker;
pub mod cli;
pub mod error;
pub mod lexer;
pub mod limits;
pub mod output;
pub mod parser;
pub mod request;

pub use ast::{BinOp, Channel, Expr, FieldType, Function, Position, Token, TokenKind};
pub use error::{LexError, ParseError};
pub use lexer::{Lexer, unescape_phrase};
pub use limits::Limits;
pub use output::{to_infix, to_sexpr};
pub use parser::{Parser, parse, parse_with_limits};
