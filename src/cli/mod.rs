//! CLI support for search-expr
//!
//! Provides programmatic access to the command-line functionality so other
//! tools can embed it; the `search-expr` binary only wires arguments to it.

mod check;
mod convert;
mod docs;
mod tokens;

pub use check::{CheckOptions, CheckResult, OutputFormat, execute_check, execute_field};
pub use convert::{expr_to_json, token_to_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use tokens::{TokensOptions, execute_tokens};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Lexical error: {0}")]
    Lex(#[from] crate::LexError),

    #[error("Invalid: {0}")]
    Validation(#[from] crate::checker::ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No expression provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown output format: '{0}' (expected infix, sexpr or json)")]
    UnknownFormat(String),

    #[error("Unknown category: '{0}'\nRun 'search-expr docs' to see available categories.")]
    UnknownCategory(String),
}
