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

//! Math scalar functions

use rand::Rng;

use crate::core::{Error, Result, Value};
use crate::functions::{ArgType, FunctionInfo, FunctionSignature, ScalarFunction};
use crate::validate_arg_count;

use super::{value_to_f64, value_to_i64};

// ============================================================================
// ABS
// ============================================================================

/// ABS function - returns the absolute value of a number
#[derive(Default, Debug)]
pub struct AbsFunction;

impl ScalarFunction for AbsFunction {
    fn name(&self) -> &str {
        "ABS"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "ABS",
            "Returns the absolute value of a number",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Any], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "ABS", 1);

        match &args[0] {
            Value::Integer(i) => Ok(Value::integer(i.wrapping_abs())),
            Value::Float(f) => Ok(Value::float(f.abs())),
            Value::Null => Ok(Value::Null),
            _ => Err(Error::invalid_argument("ABS argument must be a number")),
        }
    }
}

// ============================================================================
// CEIL / FLOOR
// ============================================================================

/// CEIL function - rounds a number up to the nearest integer
#[derive(Default, Debug)]
pub struct CeilFunction;

impl ScalarFunction for CeilFunction {
    fn name(&self) -> &str {
        "CEIL"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "CEIL",
            "Rounds a number up to the nearest integer",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Any], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "CEIL", 1);

        match &args[0] {
            Value::Integer(i) => Ok(Value::integer(*i)),
            Value::Float(f) => Ok(Value::float(f.ceil())),
            Value::Null => Ok(Value::Null),
            _ => Err(Error::invalid_argument("CEIL argument must be a number")),
        }
    }
}

/// FLOOR function - rounds a number down to the nearest integer
#[derive(Default, Debug)]
pub struct FloorFunction;

impl ScalarFunction for FloorFunction {
    fn name(&self) -> &str {
        "FLOOR"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "FLOOR",
            "Rounds a number down to the nearest integer",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Any], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "FLOOR", 1);

        match &args[0] {
            Value::Integer(i) => Ok(Value::integer(*i)),
            Value::Float(f) => Ok(Value::float(f.floor())),
            Value::Null => Ok(Value::Null),
            _ => Err(Error::invalid_argument("FLOOR argument must be a number")),
        }
    }
}

// ============================================================================
// ROUND
// ============================================================================

/// ROUND function - rounds a number to a specified number of decimal places
#[derive(Default, Debug)]
pub struct RoundFunction;

impl ScalarFunction for RoundFunction {
    fn name(&self) -> &str {
        "ROUND"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "ROUND",
            "Rounds a number to a specified number of decimal places",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Any, ArgType::Bigint], 1, 2),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "ROUND", 1, 2);

        if args[0].is_null() {
            return Ok(Value::Null);
        }
        let num = value_to_f64(&args[0])
            .ok_or_else(|| Error::invalid_argument("ROUND first argument must be a number"))?;

        let places = if args.len() == 2 && !args[1].is_null() {
            value_to_i64(&args[1]).ok_or_else(|| {
                Error::invalid_argument("ROUND decimal places must be an integer")
            })? as i32
        } else {
            0
        };

        let shift = 10_f64.powi(places);
        let rounded = (num * shift).round() / shift;

        // integer input with no decimal places keeps its type
        if places == 0 {
            if let Value::Integer(_) = args[0] {
                return Ok(Value::integer(rounded as i64));
            }
        }
        Ok(Value::float(rounded))
    }
}

// ============================================================================
// SQRT
// ============================================================================

/// SQRT function - returns the square root of a number
#[derive(Default, Debug)]
pub struct SqrtFunction;

impl ScalarFunction for SqrtFunction {
    fn name(&self) -> &str {
        "SQRT"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "SQRT",
            "Returns the square root of a number",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Any], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "SQRT", 1);

        if args[0].is_null() {
            return Ok(Value::Null);
        }
        let num = value_to_f64(&args[0])
            .ok_or_else(|| Error::invalid_argument("SQRT argument must be a number"))?;
        Ok(Value::float(num.sqrt()))
    }
}

// ============================================================================
// MOD
// ============================================================================

/// MOD function - returns the remainder of a division
#[derive(Default, Debug)]
pub struct ModFunction;

impl ScalarFunction for ModFunction {
    fn name(&self) -> &str {
        "MOD"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "MOD",
            "Returns the remainder of dividing the first argument by the second",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Any, ArgType::Any], 2, 2),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "MOD", 2);

        if args[0].is_null() || args[1].is_null() {
            return Ok(Value::Null);
        }

        if let (Value::Integer(l), Value::Integer(r)) = (&args[0], &args[1]) {
            if *r == 0 {
                return Err(Error::DivisionByZero);
            }
            return Ok(Value::integer(l.wrapping_rem(*r)));
        }

        let l = value_to_f64(&args[0])
            .ok_or_else(|| Error::invalid_argument("MOD arguments must be numbers"))?;
        let r = value_to_f64(&args[1])
            .ok_or_else(|| Error::invalid_argument("MOD arguments must be numbers"))?;
        Ok(Value::float(l % r))
    }
}

// ============================================================================
// NAN / INFINITY / IS_NAN
// ============================================================================

/// NAN function - returns the IEEE-754 quiet NaN
#[derive(Default, Debug)]
pub struct NanFunction;

impl ScalarFunction for NanFunction {
    fn name(&self) -> &str {
        "NAN"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "NAN",
            "Returns the IEEE-754 not-a-number constant",
            FunctionSignature::new(ArgType::Double, vec![], 0, 0),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "NAN", 0);
        Ok(Value::float(f64::NAN))
    }
}

/// INFINITY function - returns positive infinity
#[derive(Default, Debug)]
pub struct InfinityFunction;

impl ScalarFunction for InfinityFunction {
    fn name(&self) -> &str {
        "INFINITY"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "INFINITY",
            "Returns the IEEE-754 positive infinity constant",
            FunctionSignature::new(ArgType::Double, vec![], 0, 0),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "INFINITY", 0);
        Ok(Value::float(f64::INFINITY))
    }
}

/// IS_NAN function - tests whether a number is NaN
#[derive(Default, Debug)]
pub struct IsNanFunction;

impl ScalarFunction for IsNanFunction {
    fn name(&self) -> &str {
        "IS_NAN"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "IS_NAN",
            "Returns true if the argument is not-a-number",
            FunctionSignature::new(ArgType::Boolean, vec![ArgType::Any], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "IS_NAN", 1);

        match &args[0] {
            Value::Float(f) => Ok(Value::boolean(f.is_nan())),
            Value::Integer(_) => Ok(Value::boolean(false)),
            Value::Null => Ok(Value::Null),
            _ => Err(Error::invalid_argument("IS_NAN argument must be a number")),
        }
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// RANDOM function - returns a random float between 0 and 1
#[derive(Default, Debug)]
pub struct RandomFunction;

impl ScalarFunction for RandomFunction {
    fn name(&self) -> &str {
        "RANDOM"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "RANDOM",
            "Returns a random float between 0 (inclusive) and 1 (exclusive)",
            FunctionSignature::new(ArgType::Double, vec![], 0, 0),
        )
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "RANDOM", 0);
        Ok(Value::float(rand::rng().random::<f64>()))
    }
}
