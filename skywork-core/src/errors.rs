//! Error types for coordinate handling.
//!
//! [`SkyError`] covers the two ways the core can fail: a coordinate string that
//! does not parse, and a numeric input that is unusable for the requested
//! operation.
//!
//! ```
//! use skywork_core::SkyError;
//!
//! let err = SkyError::parse("12:34", "HMS");
//! assert_eq!(err.to_string(), "Cannot parse '12:34' as HMS");
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyError {
    /// A string could not be read as the expected coordinate notation.
    #[error("Cannot parse '{input}' as {expected}")]
    Parse { input: String, expected: String },

    /// A numeric argument is outside what the operation accepts.
    #[error("Invalid input to {context}: {message}")]
    InvalidInput { context: String, message: String },
}

/// Convenience alias for `Result<T, SkyError>`.
pub type SkyResult<T> = Result<T, SkyError>;

impl SkyError {
    pub fn parse(input: &str, expected: &str) -> Self {
        Self::Parse {
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn invalid_input(context: &str, message: &str) -> Self {
        Self::InvalidInput {
            context: context.to_string(),
            message: message.to_string(),
        }
    }
}
