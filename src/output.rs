//! Text renderings of expression trees.
//!
//! - **Infix** via [`to_infix()`] (and `Display`) - canonical expression text
//!   that parses back to the same tree
//! - **S-expression** via [`to_sexpr()`] - prefix form for inspection and tests
//!
//! # Examples
//!
//! ```
//! use search_expr::{parse, to_infix, to_sexpr};
//!
//! let expr = parse("1 + 2 * 3").unwrap();
//! assert_eq!(to_sexpr(&expr), "(+ 1 (* 2 3))");
//! assert_eq!(to_infix(&expr), "1 + (2 * 3)");
//! ```

use std::fmt;

use crate::ast::Expr;

pub struct InfixPrinter;

impl InfixPrinter {
    pub fn print(expr: &Expr) -> String {
        let mut out = String::new();
        Self::write(expr, false, &mut out);
        out
    }

    /// `nested` is set when the output lands inside a larger operation and so
    /// must read as a single operand.
    fn write(expr: &Expr, nested: bool, out: &mut String) {
        match expr {
            Expr::Int(text) | Expr::Float(text) | Expr::Phrase(text) | Expr::Name(text) => {
                out.push_str(text)
            }
            Expr::FieldType(field_type) => out.push_str(field_type.keyword()),
            Expr::Dotted { base, field } => {
                Self::write(base, true, out);
                out.push('.');
                Self::write(field, true, out);
            }
            Expr::Index { name, index } => {
                Self::write(name, true, out);
                out.push('[');
                out.push_str(index);
                out.push(']');
            }
            Expr::Neg(operand) => {
                out.push('-');
                Self::write_atom(operand, out);
            }
            Expr::Not(operand) => {
                if nested {
                    out.push('(');
                }
                out.push_str("NOT ");
                Self::write_atom(operand, out);
                if nested {
                    out.push(')');
                }
            }
            Expr::Binary { op, left, right } => {
                if nested {
                    out.push('(');
                }
                Self::write(left, true, out);
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                Self::write(right, true, out);
                if nested {
                    out.push(')');
                }
            }
            // Only valid at the top level or as a call argument, neither of
            // which may be wrapped in parentheses.
            Expr::Cond { condition, then } => {
                Self::write(condition, true, out);
                out.push_str(" ? ");
                Self::write(then, true, out);
            }
            Expr::Call { function, args } => {
                out.push_str(function.keyword());
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    Self::write(arg, false, out);
                }
                out.push(')');
            }
        }
    }

    /// Operand of a prefix operator: anything but a primary gets parentheses.
    fn write_atom(expr: &Expr, out: &mut String) {
        let primary = expr.is_leaf()
            || matches!(
                expr,
                Expr::Dotted { .. } | Expr::Index { .. } | Expr::Call { .. }
            );
        if primary {
            Self::write(expr, true, out);
        } else {
            out.push('(');
            Self::write(expr, false, out);
            out.push(')');
        }
    }
}

pub struct SexprPrinter;

impl SexprPrinter {
    pub fn print(expr: &Expr) -> String {
        let mut out = String::new();
        Self::write(expr, &mut out);
        out
    }

    fn write(expr: &Expr, out: &mut String) {
        let children = expr.children();
        let label = match expr {
            Expr::Index { index, .. } => format!("INDEX[{}]", index),
            _ => expr.text().unwrap_or(expr.kind()).to_string(),
        };

        if children.is_empty() {
            out.push_str(&label);
            return;
        }

        out.push('(');
        out.push_str(&label);
        for child in children {
            out.push(' ');
            Self::write(child, out);
        }
        out.push(')');
    }
}

/// Render `expr` as canonical expression text.
pub fn to_infix(expr: &Expr) -> String {
    InfixPrinter::print(expr)
}

/// Render `expr` in prefix form, e.g. `(+ 1 (* 2 3))`.
pub fn to_sexpr(expr: &Expr) -> String {
    SexprPrinter::print(expr)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_infix(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_sexpr_shapes() {
        let cases = [
            ("10 - 3 - 2", "(- (- 10 3) 2)"),
            ("tags[2]", "(INDEX[2] tags)"),
            ("-x", "(NEG x)"),
            ("a.b.c", "(. (. a b) c)"),
            ("max(a, b, c)", "(max a b c)"),
            ("NOT a = 1", "(NOT (= a 1))"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_sexpr(&parse(input).unwrap()), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_infix_prefix_operands() {
        assert_eq!(to_infix(&parse("-(a + b)").unwrap()), "-(a + b)");
        assert_eq!(to_infix(&parse("-(-5)").unwrap()), "-(-5)");
        assert_eq!(to_infix(&parse("NOT (a AND b)").unwrap()), "NOT (a AND b)");
        assert_eq!(
            to_infix(&parse("max(a AND b ? c + d, 1)").unwrap()),
            "max((a AND b) ? (c + d), 1)"
        );
    }
}
