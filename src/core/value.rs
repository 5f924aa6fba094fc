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

//! Runtime value type for expression evaluation
//!
//! A [`Value`] is what evaluating an expression produces. Besides the
//! concrete SQL scalars, the `Residual` tag carries a partially reduced
//! expression: the escape hatch the optimizer uses when a subtree cannot
//! be collapsed to a constant.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::types::ScalarType;
use crate::ast::Expression;

/// A runtime value produced by expression evaluation
///
/// Note: Text uses Arc<str> for cheap cloning; residual expressions flow
/// through many rebuild sites and are boxed to keep the value small.
#[derive(Debug, Clone)]
pub enum Value {
    /// SQL NULL
    Null,

    /// 64-bit signed integer (BIGINT)
    Integer(i64),

    /// 64-bit floating point (DOUBLE)
    Float(f64),

    /// UTF-8 text (VARCHAR)
    Text(Arc<str>),

    /// Boolean value
    Boolean(bool),

    /// A reduced but still symbolic expression
    Residual(Box<Expression>),
}

impl Value {
    /// Create an integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    /// Create a float value
    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    /// Create a text value
    pub fn text(value: impl AsRef<str>) -> Self {
        Value::Text(Arc::from(value.as_ref()))
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create a residual value from a reduced expression
    pub fn residual(expression: Expression) -> Self {
        Value::Residual(Box::new(expression))
    }

    /// Returns true if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is a residual expression
    pub fn is_residual(&self) -> bool {
        matches!(self, Value::Residual(_))
    }

    /// The registry-facing scalar type of a concrete value
    ///
    /// NULL and residuals have no scalar type.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Value::Integer(_) => Some(ScalarType::Bigint),
            Value::Float(_) => Some(ScalarType::Double),
            Value::Text(_) => Some(ScalarType::Varchar),
            Value::Boolean(_) => Some(ScalarType::Boolean),
            Value::Null | Value::Residual(_) => None,
        }
    }

    /// Extract as f64 if this is a numeric value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as i64 if this is an integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as string reference if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as bool if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Residual(e) => write!(f, "{}", e),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                // NaN != NaN in IEEE 754, but set membership needs it equal
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            // Cross-type numeric comparison: Integer vs Float
            (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
                *f == (*i as f64)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Residual(a), Value::Residual(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal values must hash the same. Since Integer(5) == Float(5.0),
        // both numeric tags hash as the f64 bit representation.
        match self {
            Value::Null => {
                0u8.hash(state);
            }
            Value::Integer(v) => {
                1u8.hash(state);
                (*v as f64).to_bits().hash(state);
            }
            Value::Float(v) => {
                1u8.hash(state);
                if v.is_nan() {
                    f64::NAN.to_bits().hash(state);
                } else {
                    v.to_bits().hash(state);
                }
            }
            Value::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Boolean(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            Value::Residual(e) => {
                4u8.hash(state);
                // Residuals never participate in value sets; hashing the
                // rendered form keeps the impl total without requiring
                // Hash on every AST node.
                e.to_string().hash(state);
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_scalar_type() {
        assert_eq!(Value::integer(1).scalar_type(), Some(ScalarType::Bigint));
        assert_eq!(Value::float(1.5).scalar_type(), Some(ScalarType::Double));
        assert_eq!(Value::text("x").scalar_type(), Some(ScalarType::Varchar));
        assert_eq!(
            Value::boolean(true).scalar_type(),
            Some(ScalarType::Boolean)
        );
        assert_eq!(Value::Null.scalar_type(), None);
    }

    #[test]
    fn test_cross_type_numeric_equality() {
        assert_eq!(Value::integer(5), Value::float(5.0));
        assert_eq!(Value::float(5.0), Value::integer(5));
        assert_ne!(Value::integer(5), Value::float(5.5));
        assert_ne!(Value::integer(5), Value::text("5"));
    }

    #[test]
    fn test_nan_equality() {
        assert_eq!(Value::float(f64::NAN), Value::float(f64::NAN));
        assert_ne!(Value::float(f64::NAN), Value::float(1.0));
    }

    #[test]
    fn test_hash_consistency_in_sets() {
        let mut set = FxHashSet::default();
        set.insert(Value::integer(5));
        set.insert(Value::text("x"));

        // Integer(5) == Float(5.0), so the set must report both
        assert!(set.contains(&Value::integer(5)));
        assert!(set.contains(&Value::float(5.0)));
        assert!(set.contains(&Value::text("x")));
        assert!(!set.contains(&Value::float(5.5)));
        assert!(!set.contains(&Value::boolean(true)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::integer(42).to_string(), "42");
        assert_eq!(Value::float(14.0).to_string(), "14.0");
        assert_eq!(Value::text("hello").to_string(), "hello");
        assert_eq!(Value::boolean(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
