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

//! SQL Scalar Function System
//!
//! This module provides the scalar function layer the evaluator
//! dispatches to:
//!
//! - [`ScalarFunction`] - the function trait, with determinism and
//!   session-binding flags the evaluator consults
//! - [`FunctionRegistry`] - registry for lookup and signature validation
//! - [`FunctionInfo`] / [`FunctionSignature`] - descriptors

pub mod registry;
pub mod scalar;

use crate::core::{Error, Result, ScalarType, Value};
use crate::session::Session;

/// Argument type in a function signature
///
/// `Any` accepts every concrete scalar type; functions coerce inside
/// their implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// Any concrete scalar type
    Any,
    /// BIGINT
    Bigint,
    /// DOUBLE
    Double,
    /// VARCHAR
    Varchar,
    /// BOOLEAN
    Boolean,
}

impl ArgType {
    /// Whether a concrete scalar type satisfies this argument type
    pub fn accepts(&self, scalar_type: ScalarType) -> bool {
        match self {
            ArgType::Any => true,
            ArgType::Bigint => scalar_type == ScalarType::Bigint,
            ArgType::Double => scalar_type == ScalarType::Double,
            ArgType::Varchar => scalar_type == ScalarType::Varchar,
            ArgType::Boolean => scalar_type == ScalarType::Boolean,
        }
    }
}

/// Function signature information
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Return type
    pub return_type: ArgType,
    /// Argument types; with fewer entries than max_args the last entry
    /// repeats (variadic tail)
    pub argument_types: Vec<ArgType>,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments
    pub max_args: usize,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        return_type: ArgType,
        argument_types: Vec<ArgType>,
        min_args: usize,
        max_args: usize,
    ) -> Self {
        Self {
            return_type,
            argument_types,
            min_args,
            max_args,
        }
    }

    /// Create a variadic function signature
    pub fn variadic(return_type: ArgType, arg_type: ArgType) -> Self {
        Self {
            return_type,
            argument_types: vec![arg_type],
            min_args: 1,
            max_args: usize::MAX,
        }
    }

    /// Validate argument count and types against this signature
    pub fn validate(&self, name: &str, arg_types: &[ScalarType]) -> Result<()> {
        if arg_types.len() < self.min_args {
            return Err(Error::invalid_argument(format!(
                "{} expects at least {} arguments, got {}",
                name,
                self.min_args,
                arg_types.len()
            )));
        }
        if arg_types.len() > self.max_args {
            return Err(Error::invalid_argument(format!(
                "{} expects at most {} arguments, got {}",
                name,
                self.max_args,
                arg_types.len()
            )));
        }
        for (i, scalar_type) in arg_types.iter().enumerate() {
            let expected = self
                .argument_types
                .get(i)
                .or_else(|| self.argument_types.last());
            if let Some(expected) = expected {
                if !expected.accepts(*scalar_type) {
                    return Err(Error::type_mismatch(format!(
                        "{} argument {} expects {:?}, got {}",
                        name,
                        i + 1,
                        expected,
                        scalar_type
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Function information
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Description
    pub description: String,
    /// Signature
    pub signature: FunctionSignature,
}

impl FunctionInfo {
    /// Create a new function info
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        signature: FunctionSignature,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            signature,
        }
    }
}

/// Trait for scalar functions
///
/// Implementations are strict in nulls from the evaluator's point of
/// view: the evaluator returns NULL before invoking when any argument
/// is NULL.
pub trait ScalarFunction: Send + Sync + std::fmt::Debug {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Whether repeated invocations with equal arguments yield equal
    /// results; the optimizer refuses to fold non-deterministic calls
    fn is_deterministic(&self) -> bool {
        true
    }

    /// Whether the function takes the query session as its leading
    /// (implicit) parameter
    fn binds_session(&self) -> bool {
        false
    }

    /// Evaluate the function with the given arguments
    fn evaluate(&self, args: &[Value]) -> Result<Value>;

    /// Evaluate with the session bound; only called when
    /// [`binds_session`](ScalarFunction::binds_session) is true
    fn evaluate_with_session(&self, _session: &Session, args: &[Value]) -> Result<Value> {
        self.evaluate(args)
    }
}

/// Macro to validate argument count for scalar functions.
///
/// # Usage
/// ```ignore
/// // Exact count
/// validate_arg_count!(args, "UPPER", 1);
///
/// // Range (min, max inclusive)
/// validate_arg_count!(args, "SUBSTR", 2, 3);
/// ```
#[macro_export]
macro_rules! validate_arg_count {
    // Exact count
    ($args:expr, $name:expr, $exact:expr) => {
        if $args.len() != $exact {
            return Err($crate::core::Error::invalid_argument(format!(
                "{} requires exactly {} argument{}, got {}",
                $name,
                $exact,
                if $exact == 1 { "" } else { "s" },
                $args.len()
            )));
        }
    };
    // Range (min to max inclusive)
    ($args:expr, $name:expr, $min:expr, $max:expr) => {
        if $args.len() < $min || $args.len() > $max {
            return Err($crate::core::Error::invalid_argument(format!(
                "{} requires {} to {} arguments, got {}",
                $name,
                $min,
                $max,
                $args.len()
            )));
        }
    };
}

// Re-export main types
pub use registry::{global_registry, FunctionRegistry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_arg_count_validation() {
        let sig = FunctionSignature::new(ArgType::Bigint, vec![ArgType::Any], 1, 1);
        assert!(sig.validate("F", &[ScalarType::Bigint]).is_ok());
        assert!(sig.validate("F", &[]).is_err());
        assert!(sig
            .validate("F", &[ScalarType::Bigint, ScalarType::Bigint])
            .is_err());
    }

    #[test]
    fn test_signature_arg_type_validation() {
        let sig = FunctionSignature::new(ArgType::Varchar, vec![ArgType::Varchar], 1, 1);
        assert!(sig.validate("F", &[ScalarType::Varchar]).is_ok());
        assert!(sig.validate("F", &[ScalarType::Bigint]).is_err());
    }

    #[test]
    fn test_variadic_signature() {
        let sig = FunctionSignature::variadic(ArgType::Varchar, ArgType::Any);
        assert!(sig.validate("F", &[ScalarType::Varchar]).is_ok());
        assert!(sig
            .validate(
                "F",
                &[ScalarType::Varchar, ScalarType::Bigint, ScalarType::Double]
            )
            .is_ok());
        assert!(sig.validate("F", &[]).is_err());
    }

    #[test]
    fn test_any_accepts_all() {
        assert!(ArgType::Any.accepts(ScalarType::Bigint));
        assert!(ArgType::Any.accepts(ScalarType::Varchar));
        assert!(ArgType::Bigint.accepts(ScalarType::Bigint));
        assert!(!ArgType::Bigint.accepts(ScalarType::Double));
    }
}
