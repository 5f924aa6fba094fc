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

//! Cast primitives
//!
//! Conversions between concrete scalar values for the four supported
//! CAST targets. NULL and residual inputs are handled by the evaluator
//! before dispatching here.

use std::sync::Arc;

use crate::core::{Error, Result, Value};

/// Cast a concrete value to BOOLEAN
pub fn to_boolean(value: &Value) -> Result<Value> {
    match value {
        Value::Boolean(b) => Ok(Value::Boolean(*b)),
        Value::Integer(i) => Ok(Value::Boolean(*i != 0)),
        Value::Float(f) => Ok(Value::Boolean(*f != 0.0)),
        Value::Text(s) => {
            let s_ref: &str = s.as_ref();
            if s_ref.eq_ignore_ascii_case("true") || s_ref.eq_ignore_ascii_case("t") || s_ref == "1"
            {
                Ok(Value::Boolean(true))
            } else if s_ref.eq_ignore_ascii_case("false")
                || s_ref.eq_ignore_ascii_case("f")
                || s_ref == "0"
            {
                Ok(Value::Boolean(false))
            } else {
                Err(Error::type_mismatch(format!(
                    "cannot cast '{}' to BOOLEAN",
                    s
                )))
            }
        }
        other => Err(Error::internal(format!(
            "cast received a non-scalar value: {}",
            other
        ))),
    }
}

/// Cast a concrete value to VARCHAR
pub fn to_varchar(value: &Value) -> Result<Value> {
    match value {
        Value::Text(s) => Ok(Value::Text(Arc::clone(s))),
        Value::Integer(i) => Ok(Value::text(i.to_string())),
        Value::Float(f) => Ok(Value::text(format!("{:?}", f))),
        Value::Boolean(b) => Ok(Value::text(if *b { "true" } else { "false" })),
        other => Err(Error::internal(format!(
            "cast received a non-scalar value: {}",
            other
        ))),
    }
}

/// Cast a concrete value to DOUBLE
pub fn to_double(value: &Value) -> Result<Value> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Integer(i) => Ok(Value::Float(*i as f64)),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Error::type_mismatch(format!("cannot cast '{}' to DOUBLE", s))),
        Value::Boolean(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        other => Err(Error::internal(format!(
            "cast received a non-scalar value: {}",
            other
        ))),
    }
}

/// Cast a concrete value to BIGINT
pub fn to_bigint(value: &Value) -> Result<Value> {
    match value {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        Value::Float(f) => Ok(Value::Integer(*f as i64)),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| Error::type_mismatch(format!("cannot cast '{}' to BIGINT", s))),
        Value::Boolean(b) => Ok(Value::Integer(if *b { 1 } else { 0 })),
        other => Err(Error::internal(format!(
            "cast received a non-scalar value: {}",
            other
        ))),
    }
}
