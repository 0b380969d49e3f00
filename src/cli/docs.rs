//! Documentation content for the search-expr CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Functions,
    Literals,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "names" | "fields" => Some(Self::Syntax),
            "operators" | "ops" | "precedence" => Some(Self::Operators),
            "functions" | "function" | "fns" => Some(Self::Functions),
            "literals" | "literal" | "numbers" | "phrases" => Some(Self::Literals),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SEARCH EXPRESSION DOCUMENTATION

Search expressions compute values from document fields. They are used for
returned fields, sort keys and scoring, e.g.

  max(price * (1 - discount), 5) > 10 AND NOT category = "clearance"

DOCUMENTATION CATEGORIES

  syntax            Field names, dotted names, indexed fields
  operators         Logical, comparison and arithmetic operators, precedence
  functions         Built-in functions and the conditional argument form
  literals          Numbers and quoted phrases, escape sequences

QUICK REFERENCE

  price             Field
  author.name       Dotted name
  tags[0]           Indexed field
  a AND b OR c      Logical (AND binds loosest)
  a + b * c         Arithmetic
  max(a, b)         Function call
  max(c ? a, b)     Conditional argument

Run 'search-expr doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        Some(DocCategory::Literals) => Ok(LITERALS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Names

FIELD NAMES
  price
    Starts with a letter, '_' or '$', continues with letters, digits,
    '_' or '$'. Names are case-sensitive.

RESERVED FIELD WORDS
  text  html  atom  date  number  geo  geopoint
    Valid as names on their own. Followed by '(' they are function calls:
      date < 2011           field named "date"
      date(published)       call

DOTTED NAMES
  author.name.first
    A chain of plain names joined by '.'. Reserved words cannot be part
    of a chain.

INDEXED FIELDS
  tags[2]
    A name followed by an integer index in square brackets.

WHITESPACE
  Spaces, tabs and line breaks separate tokens and are otherwise ignored.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

PRECEDENCE (loosest first)
  ?                     conditional, only at the top or as a call argument
  AND                   left-associative
  OR  XOR               left-associative
  NOT                   prefix, applies to one comparison
  <  <=  >  >=  =  !=   at most one per operand chain
  +  -                  left-associative
  *  /                  left-associative
  -                     unary minus, applies to one primary

EXAMPLES
  1 + 2 * 3             1 + (2 * 3)
  10 - 3 - 2            (10 - 3) - 2
  a OR b AND c          (a OR b) AND c
  NOT a = 1             NOT (a = 1)
  -(a + b)              negated group

NOTES
  Logical words are uppercase only: 'and' is a field name.
  'a < b < c' is rejected; use parentheses.
  '--x' is rejected; write '-(-x)'.
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS

  abs  count  distance  log  max  min  pow  snippet  switch
  text  html  atom  date  number  geo  geopoint

CALLS
  max(a, b, c)
    At least one argument; 'max()' is rejected.

CONDITIONAL ARGUMENTS
  max(in_stock ? price, 0)
    Each argument may be 'condition ? value'.

EXAMPLES
  snippet("rust", content)
  distance(location, geopoint(35.2, 40.5)) < 1000
  pow(rating, 2) * log(views)
"#;

const LITERALS_DOC: &str = r#"LITERALS

NUMBERS
  42            integer
  3.14  .5      float
  1e10  2.5E-3  float with exponent
    A sign is an operator, not part of the number: -5 is unary minus.

PHRASES
  "hello world"
    Double-quoted. Escape sequences:
      \"  \\  \b  \f  \n  \r  \t
      \u00e9          four hex digits
      \0 .. \377      octal
    Any other escape, or a missing closing quote, is an error.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_aliases() {
        assert_eq!(DocCategory::from_name("OPS"), Some(DocCategory::Operators));
        assert_eq!(DocCategory::from_name("fns"), Some(DocCategory::Functions));
        assert_eq!(DocCategory::from_name("geo"), None);
        assert!(get_doc_category("literals").unwrap().contains("\\u00e9"));
        assert!(matches!(get_doc_category("nope"), Err(CliError::UnknownCategory(_))));
    }
}
