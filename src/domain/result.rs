//! Result type alias for the migrator
//!
//! This module provides a convenient Result type alias that uses MigratorError
//! as the error type.

use super::errors::MigratorError;

/// Result type alias for migrator operations
///
/// # Examples
///
/// ```
/// use invenio_migrator::domain::result::Result;
/// use invenio_migrator::domain::errors::MigratorError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MigratorError::configuration("target.api_token", "is required"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MigratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(MigratorError::Io("disk full".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
