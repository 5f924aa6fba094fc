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

//! # Sqlfold - SQL expression evaluator and constant folder
//!
//! Sqlfold evaluates typed SQL expression trees inside a query planner.
//! Given a tree produced by an upstream analyzer, it either reduces the
//! tree to a scalar value or - in optimization mode - to a residual tree
//! in which every statically determinable subtree has been folded to a
//! literal.
//!
//! ## Key Features
//!
//! - **Two modes, one walker** - interpretation against live input
//!   tuples and plan-time folding against symbol bindings share the same
//!   recursive descent
//! - **SQL three-valued logic** - null-strict operators, AND/OR truth
//!   tables and short-circuit laws over partial knowledge
//! - **Residual algebra** - unresolved subtrees flow up as values and
//!   are repacked into well-formed reduced nodes
//! - **Identity-keyed caches** - compiled LIKE patterns and IN-list hash
//!   sets, per evaluator instance
//! - **Scalar function registry** - determinism-aware dispatch with
//!   session binding
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlfold::ast::Expression;
//! use sqlfold::{Evaluator, Session, SymbolMap, Value};
//!
//! let symbols = SymbolMap::new().bind("x", Value::integer(3));
//! let session = Session::new();
//! let evaluator = Evaluator::optimizer(&symbols, sqlfold::global_registry(), &session);
//!
//! // x + 4 folds to 7 once x is bound
//! let expr = Expression::Arithmetic(sqlfold::ast::ArithmeticExpression::new(
//!     sqlfold::ast::ArithmeticOp::Add,
//!     Expression::name("x"),
//!     Expression::long(4),
//! ));
//! assert_eq!(evaluator.evaluate(&expr).unwrap(), Value::integer(7));
//! ```
//!
//! ## Modules
//!
//! - [`ast`] - the closed expression node set consumed by the evaluator
//! - [`core`] - runtime values, scalar types and the error surface
//! - [`eval`] - the evaluator, literal reconstruction, resolvers and the
//!   LIKE/datetime/cast primitive libraries
//! - [`functions`] - the scalar function trait and registry
//! - [`session`] - the query session carrying the clock

pub mod ast;
pub mod core;
pub mod eval;
pub mod functions;
pub mod session;

// Re-export main types for convenience
pub use crate::core::{Error, Result, ScalarType, Value};
pub use eval::{
    value_to_expression, Evaluator, InputResolver, RowInputs, SymbolMap, SymbolResolver,
};
pub use functions::{global_registry, FunctionRegistry, ScalarFunction};
pub use session::Session;
