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

//! Date/time scalar functions
//!
//! Datetime scalars are int64 epoch seconds, UTC.

use crate::core::{Error, Result, Value};
use crate::functions::{ArgType, FunctionInfo, FunctionSignature, ScalarFunction};
use crate::session::Session;
use crate::validate_arg_count;

use super::value_to_f64;

// ============================================================================
// NOW
// ============================================================================

/// NOW function - the session clock reading
///
/// Session-bound and non-deterministic: the optimizer never folds it.
#[derive(Default, Debug)]
pub struct NowFunction;

impl ScalarFunction for NowFunction {
    fn name(&self) -> &str {
        "NOW"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "NOW",
            "Returns the session timestamp in epoch seconds",
            FunctionSignature::new(ArgType::Bigint, vec![], 0, 0),
        )
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    fn binds_session(&self) -> bool {
        true
    }

    fn evaluate(&self, _args: &[Value]) -> Result<Value> {
        Err(Error::internal("NOW requires a bound session"))
    }

    fn evaluate_with_session(&self, session: &Session, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "NOW", 0);
        Ok(Value::integer(session.start_time()))
    }
}

// ============================================================================
// TO_UNIXTIME / FROM_UNIXTIME
// ============================================================================

/// TO_UNIXTIME function - datetime scalar to fractional epoch seconds
#[derive(Default, Debug)]
pub struct ToUnixtimeFunction;

impl ScalarFunction for ToUnixtimeFunction {
    fn name(&self) -> &str {
        "TO_UNIXTIME"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "TO_UNIXTIME",
            "Converts a datetime scalar to fractional epoch seconds",
            FunctionSignature::new(ArgType::Double, vec![ArgType::Bigint], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "TO_UNIXTIME", 1);
        match &args[0] {
            Value::Integer(seconds) => Ok(Value::float(*seconds as f64)),
            Value::Null => Ok(Value::Null),
            _ => Err(Error::invalid_argument(
                "TO_UNIXTIME argument must be a datetime scalar",
            )),
        }
    }
}

/// FROM_UNIXTIME function - epoch seconds to a datetime scalar
#[derive(Default, Debug)]
pub struct FromUnixtimeFunction;

impl ScalarFunction for FromUnixtimeFunction {
    fn name(&self) -> &str {
        "FROM_UNIXTIME"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "FROM_UNIXTIME",
            "Converts epoch seconds to a datetime scalar",
            FunctionSignature::new(ArgType::Bigint, vec![ArgType::Any], 1, 1),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "FROM_UNIXTIME", 1);
        if args[0].is_null() {
            return Ok(Value::Null);
        }
        let seconds = value_to_f64(&args[0]).ok_or_else(|| {
            Error::invalid_argument("FROM_UNIXTIME argument must be a number")
        })?;
        Ok(Value::integer(seconds as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_reads_session_clock() {
        let session = Session::with_start_time(1_700_000_000);
        assert_eq!(
            NowFunction.evaluate_with_session(&session, &[]).unwrap(),
            Value::integer(1_700_000_000)
        );
        // unbound invocation is a programming error
        assert!(NowFunction.evaluate(&[]).is_err());
    }

    #[test]
    fn test_unixtime_round_trip() {
        assert_eq!(
            ToUnixtimeFunction
                .evaluate(&[Value::integer(1_700_000_000)])
                .unwrap(),
            Value::float(1_700_000_000.0)
        );
        assert_eq!(
            FromUnixtimeFunction
                .evaluate(&[Value::float(1_700_000_000.5)])
                .unwrap(),
            Value::integer(1_700_000_000)
        );
    }
}
