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

//! String scalar functions

use crate::core::{Error, Result, Value};
use crate::functions::{ArgType, FunctionInfo, FunctionSignature, ScalarFunction};
use crate::validate_arg_count;

use super::value_to_i64;

fn text_arg<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a str> {
    args[index].as_str().ok_or_else(|| {
        Error::invalid_argument(format!(
            "{} argument {} must be a string",
            name,
            index + 1
        ))
    })
}

// ============================================================================
// UPPER / LOWER
// ============================================================================

/// UPPER function - converts a string to upper case
#[derive(Default, Debug)]
pub struct UpperFunction;

impl ScalarFunction for UpperFunction {
    fn name(&self) -> &str {
        "UPPER"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "UPPER",
            "Converts a string to upper case",
            FunctionSignature::new(ArgType::Varchar, vec![ArgType::Varchar], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "UPPER", 1);
        if args[0].is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::text(text_arg(args, 0, "UPPER")?.to_uppercase()))
    }
}

/// LOWER function - converts a string to lower case
#[derive(Default, Debug)]
pub struct LowerFunction;

impl ScalarFunction for LowerFunction {
    fn name(&self) -> &str {
        "LOWER"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "LOWER",
            "Converts a string to lower case",
            FunctionSignature::new(ArgType::Varchar, vec![ArgType::Varchar], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "LOWER", 1);
        if args[0].is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::text(text_arg(args, 0, "LOWER")?.to_lowercase()))
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// LENGTH function - returns the number of characters in a string
#[derive(Default, Debug)]
pub struct LengthFunction;

impl ScalarFunction for LengthFunction {
    fn name(&self) -> &str {
        "LENGTH"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "LENGTH",
            "Returns the number of characters in a string",
            FunctionSignature::new(ArgType::Bigint, vec![ArgType::Varchar], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "LENGTH", 1);
        if args[0].is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::integer(
            text_arg(args, 0, "LENGTH")?.chars().count() as i64,
        ))
    }
}

// ============================================================================
// CONCAT
// ============================================================================

/// CONCAT function - concatenates strings
#[derive(Default, Debug)]
pub struct ConcatFunction;

impl ScalarFunction for ConcatFunction {
    fn name(&self) -> &str {
        "CONCAT"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "CONCAT",
            "Concatenates the string forms of all arguments",
            FunctionSignature::variadic(ArgType::Varchar, ArgType::Any),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        if args.is_empty() {
            return Err(Error::invalid_argument(
                "CONCAT requires at least 1 argument",
            ));
        }
        let mut result = String::new();
        for arg in args {
            if arg.is_null() {
                return Ok(Value::Null);
            }
            result.push_str(&arg.to_string());
        }
        Ok(Value::text(result))
    }
}

// ============================================================================
// SUBSTR
// ============================================================================

/// SUBSTR function - extracts a substring (1-based start)
#[derive(Default, Debug)]
pub struct SubstrFunction;

impl ScalarFunction for SubstrFunction {
    fn name(&self) -> &str {
        "SUBSTR"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "SUBSTR",
            "Extracts a substring starting at a 1-based position",
            FunctionSignature::new(
                ArgType::Varchar,
                vec![ArgType::Varchar, ArgType::Bigint, ArgType::Bigint],
                2,
                3,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "SUBSTR", 2, 3);
        if args.iter().any(Value::is_null) {
            return Ok(Value::Null);
        }

        let text = text_arg(args, 0, "SUBSTR")?;
        let start = value_to_i64(&args[1])
            .ok_or_else(|| Error::invalid_argument("SUBSTR start must be an integer"))?;
        let length = if args.len() == 3 {
            let length = value_to_i64(&args[2])
                .ok_or_else(|| Error::invalid_argument("SUBSTR length must be an integer"))?;
            if length < 0 {
                return Err(Error::invalid_argument("SUBSTR length must not be negative"));
            }
            Some(length as usize)
        } else {
            None
        };

        let chars: Vec<char> = text.chars().collect();
        let skip = if start > 0 { start as usize - 1 } else { 0 };
        let taken: String = match length {
            Some(length) => chars.iter().skip(skip).take(length).collect(),
            None => chars.iter().skip(skip).collect(),
        };
        Ok(Value::text(taken))
    }
}

// ============================================================================
// REVERSE
// ============================================================================

/// REVERSE function - reverses the characters of a string
#[derive(Default, Debug)]
pub struct ReverseFunction;

impl ScalarFunction for ReverseFunction {
    fn name(&self) -> &str {
        "REVERSE"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REVERSE",
            "Reverses the characters of a string",
            FunctionSignature::new(ArgType::Varchar, vec![ArgType::Varchar], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REVERSE", 1);
        if args[0].is_null() {
            return Ok(Value::Null);
        }
        let reversed: String = text_arg(args, 0, "REVERSE")?.chars().rev().collect();
        Ok(Value::text(reversed))
    }
}
