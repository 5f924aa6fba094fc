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

//! Function Registry
//!
//! Lookup and signature validation for scalar functions. The registry is
//! read-only from the evaluator's point of view and thread-safe by
//! contract.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::ast::QualifiedName;
use crate::core::{Error, Result, ScalarType};

use super::scalar::{
    AbsFunction, CeilFunction, ConcatFunction, FloorFunction, FromUnixtimeFunction,
    InfinityFunction, IsNanFunction, LengthFunction, LowerFunction, ModFunction, NanFunction,
    NowFunction, RandomFunction, ReverseFunction, RoundFunction, SqrtFunction, SubstrFunction,
    ToUnixtimeFunction, UpperFunction,
};
use super::{FunctionInfo, ScalarFunction};

/// Global function registry instance
static GLOBAL_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Get the global function registry with all built-ins registered
#[inline]
pub fn global_registry() -> &'static FunctionRegistry {
    GLOBAL_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Registry of scalar functions, keyed by upper-cased name
pub struct FunctionRegistry {
    scalar_functions: RwLock<HashMap<String, Arc<dyn ScalarFunction>>>,
    function_info: RwLock<HashMap<String, FunctionInfo>>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions registered
    pub fn new() -> Self {
        let registry = Self::empty();

        // Math functions
        registry.register::<AbsFunction>();
        registry.register::<CeilFunction>();
        registry.register::<FloorFunction>();
        registry.register::<RoundFunction>();
        registry.register::<SqrtFunction>();
        registry.register::<ModFunction>();
        registry.register::<NanFunction>();
        registry.register::<InfinityFunction>();
        registry.register::<IsNanFunction>();
        registry.register::<RandomFunction>();

        // String functions
        registry.register::<UpperFunction>();
        registry.register::<LowerFunction>();
        registry.register::<LengthFunction>();
        registry.register::<ConcatFunction>();
        registry.register::<SubstrFunction>();
        registry.register::<ReverseFunction>();

        // Date/Time functions
        registry.register::<NowFunction>();
        registry.register::<ToUnixtimeFunction>();
        registry.register::<FromUnixtimeFunction>();

        registry
    }

    /// Create a registry with no functions registered
    pub fn empty() -> Self {
        Self {
            scalar_functions: RwLock::new(HashMap::new()),
            function_info: RwLock::new(HashMap::new()),
        }
    }

    /// Register a scalar function
    pub fn register<F: ScalarFunction + Default + 'static>(&self) {
        let instance = F::default();
        let name = instance.name().to_uppercase();
        let info = instance.info();

        let mut funcs = self.scalar_functions.write().unwrap();
        funcs.insert(name.clone(), Arc::new(F::default()));

        let mut infos = self.function_info.write().unwrap();
        infos.insert(name, info);
    }

    /// Get a scalar function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ScalarFunction>> {
        let funcs = self.scalar_functions.read().unwrap();
        // fast path: the name is already upper-cased
        if let Some(f) = funcs.get(name) {
            return Some(Arc::clone(f));
        }
        let upper = name.to_uppercase();
        funcs.get(&upper).map(Arc::clone)
    }

    /// Resolve a function for a call site, validating the signature
    /// against the argument types derived from runtime values
    pub fn resolve(
        &self,
        name: &QualifiedName,
        arg_types: &[ScalarType],
    ) -> Result<Arc<dyn ScalarFunction>> {
        let name_text = name.to_string();
        let function = self
            .get(&name_text)
            .ok_or_else(|| Error::UnknownFunction(name_text.clone()))?;
        let info = function.info();
        info.signature.validate(&info.name, arg_types)?;
        Ok(function)
    }

    /// Check if a function exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get function info by name
    pub fn get_info(&self, name: &str) -> Option<FunctionInfo> {
        let upper = name.to_uppercase();
        let infos = self.function_info.read().unwrap();
        infos.get(&upper).cloned()
    }

    /// List all function names, sorted
    pub fn list(&self) -> Vec<String> {
        let funcs = self.scalar_functions.read().unwrap();
        let mut names: Vec<String> = funcs.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_new() {
        let registry = FunctionRegistry::new();
        assert!(registry.contains("ABS"));
        assert!(registry.contains("UPPER"));
        assert!(registry.contains("NOW"));
        assert!(!registry.contains("NONEXISTENT"));
    }

    #[test]
    fn test_registry_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.contains("abs"));
        assert!(registry.contains("Abs"));
        assert!(registry.contains("ABS"));
    }

    #[test]
    fn test_resolve_validates_signature() {
        let registry = FunctionRegistry::new();
        let name = QualifiedName::from("LENGTH");
        assert!(registry.resolve(&name, &[ScalarType::Varchar]).is_ok());
        assert!(registry
            .resolve(&name, &[ScalarType::Varchar, ScalarType::Varchar])
            .is_err());
    }

    #[test]
    fn test_resolve_unknown_function() {
        let registry = FunctionRegistry::new();
        let err = registry
            .resolve(&QualifiedName::from("NO_SUCH_FN"), &[])
            .unwrap_err();
        assert_eq!(err, Error::UnknownFunction("NO_SUCH_FN".to_string()));
    }

    #[test]
    fn test_determinism_flags() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("ABS").unwrap().is_deterministic());
        assert!(!registry.get("RANDOM").unwrap().is_deterministic());
        assert!(!registry.get("NOW").unwrap().is_deterministic());
    }

    #[test]
    fn test_session_binding_flags() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("NOW").unwrap().binds_session());
        assert!(!registry.get("ABS").unwrap().binds_session());
    }

    #[test]
    fn test_function_info() {
        let registry = FunctionRegistry::new();
        let info = registry.get_info("ABS").unwrap();
        assert_eq!(info.name, "ABS");
    }

    #[test]
    fn test_list_functions() {
        let registry = FunctionRegistry::new();
        let names = registry.list();
        assert!(names.contains(&"ABS".to_string()));
        assert!(names.contains(&"CONCAT".to_string()));
    }

    #[test]
    fn test_global_registry() {
        let registry = global_registry();
        assert!(registry.contains("NAN"));
        assert!(registry.contains("INFINITY"));
    }
}
