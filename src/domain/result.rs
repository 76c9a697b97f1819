//! Result type alias for fieldservice

use super::errors::AppError;

/// Result type alias for fieldservice operations
///
/// # Examples
///
/// ```
/// use fieldservice::domain::result::Result;
/// use fieldservice::domain::errors::AppError;
///
/// fn failing_function() -> Result<()> {
///     Err(AppError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

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
