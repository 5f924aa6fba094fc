// Copyright 2026 Sqlfold Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Sqlfold
//!
//! This module defines all error conditions surfaced by expression
//! evaluation and constant folding.

use thiserror::Error;

/// Result type alias for Sqlfold operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for expression evaluation
///
/// Evaluation errors always abort the evaluation in progress. The single
/// exception is the re-optimization of IF branches, which downgrades a
/// failure to "leave this branch symbolic".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A construct the evaluator does not implement
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Runtime type tags for which no operator rule exists
    #[error("type mismatch: {0}")]
    Type(String),

    /// Integer division or modulus by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Function name could not be resolved in the registry
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// Invalid argument for a scalar function
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A scalar function raised a failure that is not already an
    /// evaluation error
    #[error("function '{name}' failed: {message}")]
    Function { name: String, message: String },

    /// Internal error for conditions the upstream analyzer should have
    /// ruled out
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotSupported error
    pub fn not_supported(message: impl Into<String>) -> Self {
        Error::NotSupported(message.into())
    }

    /// Create a new Type error
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Error::Type(message.into())
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a new Function error
    pub fn function(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Function {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    /// Check if this is an unsupported-construct error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }

    /// Check if this is a type error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::Type(_))
    }

    /// Check if this error originated in a scalar function
    pub fn is_function_failure(&self) -> bool {
        matches!(self, Error::Function { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::not_supported("month based intervals").to_string(),
            "not supported: month based intervals"
        );
        assert_eq!(
            Error::type_mismatch("cannot negate a string").to_string(),
            "type mismatch: cannot negate a string"
        );
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            Error::UnknownFunction("FOO".to_string()).to_string(),
            "unknown function 'FOO'"
        );
        assert_eq!(
            Error::function("SQRT", "negative input").to_string(),
            "function 'SQRT' failed: negative input"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::not_supported("x").is_unsupported());
        assert!(!Error::DivisionByZero.is_unsupported());

        assert!(Error::type_mismatch("x").is_type_mismatch());
        assert!(!Error::not_supported("x").is_type_mismatch());

        assert!(Error::function("F", "boom").is_function_failure());
        assert!(!Error::internal("x").is_function_failure());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::DivisionByZero, Error::DivisionByZero);
        assert_ne!(Error::not_supported("a"), Error::not_supported("b"));
    }
}
