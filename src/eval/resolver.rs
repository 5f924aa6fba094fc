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

//! Symbol and input resolution
//!
//! The evaluator looks up free names and input-tuple slots through these
//! traits. Optimization mode uses a [`SymbolResolver`]; interpretation
//! mode uses an [`InputResolver`].

use rustc_hash::FxHashMap;

use crate::ast::{Expression, QualifiedName, QualifiedNameReference};
use crate::core::{Error, Result, Value};

/// Resolves bare symbols during optimization
///
/// Implementations may return [`Value::Residual`] to keep a symbol
/// symbolic, in which case the optimizer folds around it.
pub trait SymbolResolver {
    /// Resolve a symbol to a value
    fn resolve(&self, symbol: &str) -> Result<Value>;
}

/// Resolves positional input-tuple slots during interpretation
///
/// Always produces a concrete scalar (or NULL); a missing slot is fatal.
pub trait InputResolver {
    /// Fetch the value in the given slot of the current tuple
    fn value(&self, slot: usize) -> Result<Value>;
}

/// Map-backed symbol resolver
///
/// Symbols without a binding stay symbolic: lookup returns a residual
/// name reference rather than an error.
#[derive(Debug, Default)]
pub struct SymbolMap {
    bindings: FxHashMap<String, Value>,
}

impl SymbolMap {
    pub fn new() -> Self {
        SymbolMap {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind a symbol to a value, replacing any previous binding
    pub fn bind(mut self, symbol: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(symbol.into(), value);
        self
    }
}

impl SymbolResolver for SymbolMap {
    fn resolve(&self, symbol: &str) -> Result<Value> {
        match self.bindings.get(symbol) {
            Some(value) => Ok(value.clone()),
            None => Ok(Value::residual(Expression::Name(QualifiedNameReference {
                name: QualifiedName::from(symbol),
            }))),
        }
    }
}

/// Slice-backed input resolver over a single row
#[derive(Debug, Default)]
pub struct RowInputs {
    values: Vec<Value>,
}

impl RowInputs {
    pub fn new(values: Vec<Value>) -> Self {
        RowInputs { values }
    }
}

impl InputResolver for RowInputs {
    fn value(&self, slot: usize) -> Result<Value> {
        self.values
            .get(slot)
            .cloned()
            .ok_or_else(|| Error::internal(format!("input slot {} out of range", slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_map_bound() {
        let symbols = SymbolMap::new().bind("x", Value::integer(7));
        assert_eq!(symbols.resolve("x").unwrap(), Value::integer(7));
    }

    #[test]
    fn test_symbol_map_unbound_stays_symbolic() {
        let symbols = SymbolMap::new();
        let value = symbols.resolve("x").unwrap();
        assert!(value.is_residual());
        assert_eq!(value.to_string(), "x");
    }

    #[test]
    fn test_row_inputs() {
        let row = RowInputs::new(vec![Value::integer(1), Value::Null]);
        assert_eq!(row.value(0).unwrap(), Value::integer(1));
        assert!(row.value(1).unwrap().is_null());
        assert!(row.value(2).is_err());
    }
}
