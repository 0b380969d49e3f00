//! Validation of the names and expressions placed into a search request.
//!
//! The service rejects requests whose field names or expressions break its
//! limits; these checks catch the same problems locally, before a request is
//! built.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{
    ast::Expr,
    error::ParseError,
    limits::{Limits, MAX_EXPRESSION_LENGTH},
    parser::parse_with_limits,
};

/// Maximum field name length, in bytes.
pub const MAX_NAME_LENGTH: usize = 500;

/// Maximum length of a text value used as a sort default, in bytes.
pub const MAX_SORT_DEFAULT_TEXT_LENGTH: usize = 1024;

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("field name pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field name must not be empty")]
    EmptyName,

    #[error("field name is {length} bytes long, the limit is {limit}")]
    NameTooLong { length: usize, limit: usize },

    #[error(
        "field name '{0}' must start with a letter and contain only letters, digits and underscores"
    )]
    InvalidName(String),

    #[error("expression must not be empty")]
    EmptyExpression,

    #[error("expression is {length} bytes long, the limit is {limit}")]
    ExpressionTooLong { length: usize, limit: usize },

    #[error("failed to parse expression '{expression}': {source}")]
    InvalidExpression {
        expression: String,
        #[source]
        source: ParseError,
    },

    #[error("sort default text is {length} bytes long, the limit is {limit}")]
    DefaultTextTooLong { length: usize, limit: usize },
}

/// Check that `name` is usable as a document field name.
pub fn check_field_name(name: &str) -> Result<&str, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            length: name.len(),
            limit: MAX_NAME_LENGTH,
        });
    }
    if !FIELD_NAME.is_match(name) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Check the length of `expression` and parse it.
pub fn check_expression(expression: &str) -> Result<Expr, ValidationError> {
    if expression.trim().is_empty() {
        return Err(ValidationError::EmptyExpression);
    }
    if expression.len() > MAX_EXPRESSION_LENGTH {
        return Err(ValidationError::ExpressionTooLong {
            length: expression.len(),
            limit: MAX_EXPRESSION_LENGTH,
        });
    }
    // Length is checked in bytes above, which is the stricter measure.
    let limits = Limits::default().with_max_expression_length(usize::MAX);
    parse_with_limits(expression, &limits).map_err(|source| ValidationError::InvalidExpression {
        expression: expression.to_string(),
        source,
    })
}

pub fn check_sort_default_text(text: &str) -> Result<&str, ValidationError> {
    if text.len() > MAX_SORT_DEFAULT_TEXT_LENGTH {
        return Err(ValidationError::DefaultTextTooLong {
            length: text.len(),
            limit: MAX_SORT_DEFAULT_TEXT_LENGTH,
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_field_names() {
        for name in ["price", "a", "Rating_2", "x_"] {
            assert_eq!(check_field_name(name), Ok(name));
        }
    }

    #[test]
    fn test_invalid_field_names() {
        assert_eq!(check_field_name(""), Err(ValidationError::EmptyName));
        for name in ["_score", "2nd", "has space", "dollar$", "!rank", "café"] {
            assert!(
                matches!(check_field_name(name), Err(ValidationError::InvalidName(_))),
                "accepted {}",
                name
            );
        }
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            check_field_name(&long),
            Err(ValidationError::NameTooLong { length: 501, .. })
        ));
    }

    #[test]
    fn test_check_expression_keeps_parse_error() {
        let err = check_expression("a AND").unwrap_err();
        match err {
            ValidationError::InvalidExpression { expression, source } => {
                assert_eq!(expression, "a AND");
                assert!(matches!(source, ParseError::UnexpectedEof { .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_check_expression_limits() {
        assert_eq!(check_expression("  "), Err(ValidationError::EmptyExpression));
        let long = vec!["1"; 2600].join("+");
        assert!(matches!(
            check_expression(&long),
            Err(ValidationError::ExpressionTooLong { .. })
        ));
        assert!(check_expression("snippet(\"rust\", content)").is_ok());
    }
}
