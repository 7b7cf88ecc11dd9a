//! Input validation for entry and session fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value too long.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Empty value where one is required.
    Empty(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for entry summaries.
pub const MAX_SUMMARY_LENGTH: usize = 100;

/// Maximum allowed length for session titles.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate entry content: required, non-empty.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::Empty("content"));
    }
    Ok(())
}

/// Validate an entry summary: at most 100 characters.
pub fn validate_summary(summary: &str) -> Result<(), ValidationError> {
    let len = summary.chars().count();
    if len > MAX_SUMMARY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "summary",
            max: MAX_SUMMARY_LENGTH,
            actual: len,
        });
    }
    Ok(())
}

/// Validate a session title.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LENGTH,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content() {
        assert!(validate_content("Had a good day.").is_ok());
        assert_eq!(validate_content(""), Err(ValidationError::Empty("content")));
        assert_eq!(
            validate_content("   "),
            Err(ValidationError::Empty("content"))
        );
    }

    #[test]
    fn test_validate_summary_length() {
        assert!(validate_summary("Productive day, finished project").is_ok());
        assert!(validate_summary(&"a".repeat(100)).is_ok());
        assert!(matches!(
            validate_summary(&"a".repeat(101)),
            Err(ValidationError::TooLong { field: "summary", .. })
        ));
    }

    #[test]
    fn test_validate_summary_counts_chars_not_bytes() {
        // 100 multi-byte characters are within the limit.
        let summary = "й".repeat(100);
        assert!(validate_summary(&summary).is_ok());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::TooLong {
            field: "summary",
            max: 100,
            actual: 130,
        };
        assert_eq!(err.to_string(), "summary is too long (130 chars, max 100)");
    }
}
