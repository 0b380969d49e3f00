//! Resource limits applied while parsing.

/// Maximum expression length accepted by the search service, in characters.
pub const MAX_EXPRESSION_LENGTH: usize = 5000;

/// Default bound on tree nesting.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Configurable limits for the parser.
///
/// `max_depth` bounds the nesting of the tree the parser builds. Every
/// parenthesised group, function call, chained binary operator and `.` link
/// counts one level, so `1 + 2 + 3` is two levels deep. Every recursive walk
/// over an accepted tree then stays within a small multiple of the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input length in characters (default: 5000).
    pub max_expression_length: usize,
    /// Maximum nesting of groups, calls and operator chains (default: 100).
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_expression_length: MAX_EXPRESSION_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_expression_length: usize::MAX,
            max_depth: usize::MAX,
        }
    }

    pub fn with_max_expression_length(mut self, max: usize) -> Self {
        self.max_expression_length = max;
        self
    }

    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = Limits::default();
        assert_eq!(limits.max_expression_length, 5000);
        assert_eq!(limits.max_depth, 100);
    }

    #[test]
    fn test_builders() {
        let limits = Limits::default().with_max_depth(3).with_max_expression_length(10);
        assert_eq!(limits.max_depth, 3);
        assert_eq!(limits.max_expression_length, 10);
        assert_eq!(Limits::unlimited().max_depth, usize::MAX);
    }
}
