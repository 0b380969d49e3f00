//! Request parts that carry expressions.
//!
//! A search request can ask for computed fields ([`FieldExpression`]) and for
//! results ordered by an expression ([`SortExpression`]). Both are built
//! through fluent builders that validate their input with [`crate::checker`]
//! and keep the parsed tree next to the source text.
//!
//! ```
//! use search_expr::request::{FieldExpression, SortDirection, SortExpression};
//!
//! let field = FieldExpression::builder()
//!     .name("discounted")
//!     .expression("price * (1 - discount)")
//!     .build()
//!     .unwrap();
//! assert_eq!(field.name(), "discounted");
//!
//! let sort = SortExpression::builder()
//!     .expression("rating")
//!     .direction(SortDirection::Ascending)
//!     .default_numeric(0.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(sort.direction(), SortDirection::Ascending);
//! ```

use thiserror::Error;

use crate::{
    ast::Expr,
    checker::{ValidationError, check_expression, check_field_name, check_sort_default_text},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("{0} must be specified")]
    Missing(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A named field computed from an expression and returned with each result.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpression {
    name: String,
    expression: String,
    tree: Expr,
}

impl FieldExpression {
    pub fn builder() -> FieldExpressionBuilder {
        FieldExpressionBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldExpressionBuilder {
    name: Option<String>,
    expression: Option<String>,
}

impl FieldExpressionBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn build(self) -> Result<FieldExpression, RequestError> {
        let name = self.name.ok_or(RequestError::Missing("field expression name"))?;
        let expression = self
            .expression
            .ok_or(RequestError::Missing("field expression"))?;

        check_field_name(&name)?;
        let tree = check_expression(&expression)?;

        Ok(FieldExpression {
            name,
            expression,
            tree,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Value used for documents where the sort expression cannot be computed.
#[derive(Debug, Clone, PartialEq)]
pub enum SortDefault {
    Text(String),
    Numeric(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortExpression {
    expression: String,
    tree: Expr,
    direction: SortDirection,
    default_value: Option<SortDefault>,
}

impl SortExpression {
    pub fn builder() -> SortExpressionBuilder {
        SortExpressionBuilder::default()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn default_value(&self) -> Option<&SortDefault> {
        self.default_value.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SortExpressionBuilder {
    expression: Option<String>,
    direction: SortDirection,
    default_value: Option<SortDefault>,
}

impl SortExpressionBuilder {
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Replaces any numeric default.
    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.default_value = Some(SortDefault::Text(text.into()));
        self
    }

    /// Replaces any text default.
    pub fn default_numeric(mut self, value: f64) -> Self {
        self.default_value = Some(SortDefault::Numeric(value));
        self
    }

    pub fn build(self) -> Result<SortExpression, RequestError> {
        let expression = self
            .expression
            .ok_or(RequestError::Missing("sort expression"))?;
        let tree = check_expression(&expression)?;

        if let Some(SortDefault::Text(text)) = &self.default_value {
            check_sort_default_text(text)?;
        }

        Ok(SortExpression {
            expression,
            tree,
            direction: self.direction,
            default_value: self.default_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_expression_requires_both_parts() {
        assert_eq!(
            FieldExpression::builder().expression("1").build(),
            Err(RequestError::Missing("field expression name"))
        );
        assert_eq!(
            FieldExpression::builder().name("x").build(),
            Err(RequestError::Missing("field expression"))
        );
    }

    #[test]
    fn test_field_expression_validates_name() {
        let err = FieldExpression::builder()
            .name("2fast")
            .expression("speed * 2")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::Invalid(ValidationError::InvalidName(_))
        ));
    }

    #[test]
    fn test_sort_expression_defaults_to_descending() {
        let sort = SortExpression::builder().expression("price").build().unwrap();
        assert_eq!(sort.direction(), SortDirection::Descending);
        assert_eq!(sort.default_value(), None);
        assert_eq!(sort.tree(), &Expr::name("price"));
    }

    #[test]
    fn test_sort_default_text_is_length_checked() {
        let err = SortExpression::builder()
            .expression("title")
            .default_text("z".repeat(2000))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::Invalid(ValidationError::DefaultTextTooLong { length: 2000, .. })
        ));
    }
}
