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

//! Expression evaluation
//!
//! - [`Evaluator`] - the tree-walking evaluator / partial evaluator
//! - [`value_to_expression`] - literal reconstruction (inverse of evaluation)
//! - [`SymbolResolver`] / [`InputResolver`] - lookup seams for the two modes
//! - [`like`], [`datetime`], [`cast`] - the scalar primitive libraries
//!   the evaluator dispatches to

pub mod cast;
pub mod datetime;
pub mod evaluator;
pub mod like;
pub mod resolver;

pub use evaluator::{value_to_expression, Evaluator};
pub use resolver::{InputResolver, RowInputs, SymbolMap, SymbolResolver};
