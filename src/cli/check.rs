//! Check expressions and field names

use std::str::FromStr;

use super::{CliError, expr_to_json};
use crate::{Limits, checker, parse_with_limits, to_infix, to_sexpr};

/// How a parsed tree is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Canonical expression text
    Infix,
    /// Prefix S-expression
    #[default]
    Sexpr,
    /// JSON tree
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "infix" | "text" => Ok(OutputFormat::Infix),
            "sexpr" | "sexp" | "tree" => Ok(OutputFormat::Sexpr),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CliError::UnknownFormat(s.to_string())),
        }
    }
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to check
    pub expression: String,
    /// Rendering of the parsed tree
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, don't render
    pub syntax_only: bool,
    /// Parser limits
    pub limits: Limits,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression parsed and rendered
    Rendered(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = options.expression.trim();
    if expression.is_empty() {
        return Err(CliError::NoInput);
    }

    let expr = parse_with_limits(expression, &options.limits)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let rendered = match options.format {
        OutputFormat::Infix => to_infix(&expr),
        OutputFormat::Sexpr => to_sexpr(&expr),
        OutputFormat::Json => {
            let json = expr_to_json(&expr);
            if options.pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            }
        }
    };
    Ok(CheckResult::Rendered(rendered))
}

/// Validate a document field name
pub fn execute_field(name: &str) -> Result<(), CliError> {
    checker::check_field_name(name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(expression: &str, format: OutputFormat) -> CheckOptions {
        CheckOptions {
            expression: expression.to_string(),
            format,
            ..Default::default()
        }
    }

    #[test]
    fn test_renders_each_format() {
        let result = execute_check(&options("1 + 2 * 3", OutputFormat::Sexpr)).unwrap();
        assert_eq!(result, CheckResult::Rendered("(+ 1 (* 2 3))".to_string()));

        let result = execute_check(&options("(1 + 2) * 3", OutputFormat::Infix)).unwrap();
        assert_eq!(result, CheckResult::Rendered("(1 + 2) * 3".to_string()));

        let result = execute_check(&options("x", OutputFormat::Json)).unwrap();
        assert_eq!(
            result,
            CheckResult::Rendered(r#"{"kind":"NAME","text":"x"}"#.to_string())
        );
    }

    #[test]
    fn test_syntax_only() {
        let mut opts = options("a AND b", OutputFormat::Sexpr);
        opts.syntax_only = true;
        assert_eq!(execute_check(&opts).unwrap(), CheckResult::SyntaxValid);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            execute_check(&options("   ", OutputFormat::Sexpr)),
            Err(CliError::NoInput)
        ));
        assert!(matches!(
            execute_check(&options("a AND", OutputFormat::Sexpr)),
            Err(CliError::Parse(_))
        ));
        assert!(matches!("yaml".parse::<OutputFormat>(), Err(CliError::UnknownFormat(_))));
        assert!(execute_field("rating").is_ok());
        assert!(matches!(execute_field("9lives"), Err(CliError::Validation(_))));
    }
}
