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

//! Scalar types surfaced to the function registry

use std::fmt;

/// SQL scalar type of a concrete runtime value
///
/// This is the type vocabulary the evaluator derives from runtime tags
/// when resolving scalar functions: int64 is BIGINT, f64 is DOUBLE,
/// text is VARCHAR and bool is BOOLEAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 64-bit signed integer
    Bigint,
    /// 64-bit IEEE-754 floating point
    Double,
    /// UTF-8 string
    Varchar,
    /// Boolean
    Boolean,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Bigint => write!(f, "BIGINT"),
            ScalarType::Double => write!(f, "DOUBLE"),
            ScalarType::Varchar => write!(f, "VARCHAR"),
            ScalarType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}
