//! Dump the token stream of an expression

use serde_json::Value;

use super::{CliError, token_to_json};
use crate::Lexer;

/// Options for the tokens command
#[derive(Debug, Clone, Default)]
pub struct TokensOptions {
    /// The expression to tokenize
    pub expression: String,
    /// Include whitespace tokens from the hidden channel
    pub include_hidden: bool,
}

/// Tokenize an expression, one JSON object per token, ending with `EOF`.
pub fn execute_tokens(options: &TokensOptions) -> Result<Vec<Value>, CliError> {
    let lexer = Lexer::new(&options.expression);
    let tokens = if options.include_hidden {
        lexer.tokenize_with_hidden()?
    } else {
        lexer.tokenize()?
    };
    Ok(tokens.iter().map(token_to_json).collect())
}
