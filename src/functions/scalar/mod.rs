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

//! Built-in scalar functions
//!
//! ## Math Functions
//! - [`AbsFunction`] - ABS(number)
//! - [`CeilFunction`] / [`FloorFunction`] - CEIL(number), FLOOR(number)
//! - [`RoundFunction`] - ROUND(number, decimals)
//! - [`SqrtFunction`] - SQRT(number)
//! - [`ModFunction`] - MOD(a, b)
//! - [`NanFunction`] / [`InfinityFunction`] / [`IsNanFunction`] - IEEE forms
//! - [`RandomFunction`] - RANDOM(), non-deterministic
//!
//! ## String Functions
//! - [`UpperFunction`] / [`LowerFunction`] - case mapping
//! - [`LengthFunction`] - LENGTH(string)
//! - [`ConcatFunction`] - CONCAT(string, ...)
//! - [`SubstrFunction`] - SUBSTR(string, start, length)
//! - [`ReverseFunction`] - REVERSE(string)
//!
//! ## Date/Time Functions
//! - [`NowFunction`] - NOW(), session-bound and non-deterministic
//! - [`ToUnixtimeFunction`] / [`FromUnixtimeFunction`] - epoch conversions

mod datetime;
mod math;
mod string;

pub use datetime::{FromUnixtimeFunction, NowFunction, ToUnixtimeFunction};
pub use math::{
    AbsFunction, CeilFunction, FloorFunction, InfinityFunction, IsNanFunction, ModFunction,
    NanFunction, RandomFunction, RoundFunction, SqrtFunction,
};
pub use string::{
    ConcatFunction, LengthFunction, LowerFunction, ReverseFunction, SubstrFunction, UpperFunction,
};

use crate::core::Value;

/// Try to convert a Value to f64
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Try to convert a Value to i64
pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) => Some(*f as i64),
        _ => None,
    }
}
