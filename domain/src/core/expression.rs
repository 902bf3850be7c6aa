//! Expression value object

use serde::{Deserialize, Serialize};

/// The mathematical expression a debate is held over (Value Object)
///
/// The engine never evaluates it; it is carried verbatim into prompts and
/// the final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    content: String,
}

impl Expression {
    /// Create a new expression
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Expression cannot be empty");
        Self { content }
    }

    /// Try to create a new expression, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the expression content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl std::str::FromStr for Expression {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s).ok_or_else(|| {
            crate::core::error::DomainError::InvalidExpression(
                "cannot be empty or whitespace".to_string(),
            )
        })
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::new(s)
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_creation() {
        let e = Expression::new("2 + 3 * 4");
        assert_eq!(e.content(), "2 + 3 * 4");
    }

    #[test]
    fn test_expression_from_str() {
        let e: Expression = "sqrt(16)".into();
        assert_eq!(e.content(), "sqrt(16)");
    }

    #[test]
    #[should_panic]
    fn test_empty_expression_panics() {
        Expression::new("   ");
    }

    #[test]
    fn test_try_new() {
        assert!(Expression::try_new("").is_none());
        assert!(Expression::try_new("1 + 1").is_some());
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!("   ".parse::<Expression>().is_err());
        assert!("2 + 3".parse::<Expression>().is_ok());
    }
}
