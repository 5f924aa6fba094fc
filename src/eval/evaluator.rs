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

//! Expression Evaluator
//!
//! A single recursive descent over the expression tree, serving two
//! modes. In interpretation mode every subtree collapses to a concrete
//! scalar (or NULL) and anything unresolved is fatal. In optimization
//! mode unresolved symbols flow up as [`Value::Residual`] and every
//! operator folds as far as its partial knowledge allows, rebuilding a
//! reduced node otherwise.
//!
//! Two constant caches are keyed by node identity ([`NodeId`]): compiled
//! LIKE patterns and IN-list hash sets. They live as long as the
//! evaluator instance and are never shared.

use std::cell::RefCell;
use std::cmp::Ordering;

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::*;
use crate::core::{Error, Result, Value};
use crate::functions::FunctionRegistry;
use crate::session::Session;

use super::resolver::{InputResolver, SymbolResolver};
use super::{cast, datetime, like};

/// Expression evaluator and partial evaluator
///
/// Holds exclusive ownership of its caches and walks a fixed AST. Not
/// thread-safe; construct one per planning or execution stage and
/// discard it with the stage.
pub struct Evaluator<'a> {
    /// Symbol bindings, optimization mode only
    symbol_resolver: Option<&'a dyn SymbolResolver>,
    /// Input tuple, interpretation mode only
    input_resolver: Option<&'a dyn InputResolver>,
    /// Scalar function registry (read-only, shared)
    registry: &'a FunctionRegistry,
    /// Query session supplying the clock
    session: &'a Session,
    /// Whether residual results are allowed
    optimize: bool,
    /// Compiled patterns of LIKE nodes with constant pattern and escape
    like_cache: RefCell<FxHashMap<NodeId, Regex>>,
    /// Element sets of constant-only IN lists; None marks a list that
    /// cannot use the set (some element is not a literal)
    in_list_cache: RefCell<FxHashMap<NodeId, Option<FxHashSet<Value>>>>,
}

impl<'a> Evaluator<'a> {
    /// Create an interpretation-mode evaluator over an input tuple
    pub fn interpreter(
        inputs: &'a dyn InputResolver,
        registry: &'a FunctionRegistry,
        session: &'a Session,
    ) -> Self {
        Evaluator {
            symbol_resolver: None,
            input_resolver: Some(inputs),
            registry,
            session,
            optimize: false,
            like_cache: RefCell::new(FxHashMap::default()),
            in_list_cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Create an optimization-mode evaluator over symbol bindings
    pub fn optimizer(
        symbols: &'a dyn SymbolResolver,
        registry: &'a FunctionRegistry,
        session: &'a Session,
    ) -> Self {
        Evaluator {
            symbol_resolver: Some(symbols),
            input_resolver: None,
            registry,
            session,
            optimize: true,
            like_cache: RefCell::new(FxHashMap::default()),
            in_list_cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Evaluate an expression to a value
    ///
    /// Interpretation mode returns a concrete scalar or NULL.
    /// Optimization mode may additionally return a residual expression,
    /// semantically equivalent and as reduced as possible.
    pub fn evaluate(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Long(lit) => Ok(Value::integer(lit.value)),
            Expression::Double(lit) => Ok(Value::float(lit.value)),
            Expression::String(lit) => Ok(Value::text(&lit.value)),
            Expression::Boolean(lit) => Ok(Value::boolean(lit.value)),
            Expression::Null(_) => Ok(Value::Null),
            Expression::Date(lit) => Ok(Value::integer(lit.epoch_seconds)),
            Expression::Time(lit) => Ok(Value::integer(lit.epoch_seconds)),
            Expression::Timestamp(lit) => Ok(Value::integer(lit.epoch_seconds)),
            Expression::Interval(lit) => self.evaluate_interval(lit),
            Expression::Name(node) => self.evaluate_name(node),
            Expression::Input(node) => self.evaluate_input(node),
            Expression::CurrentTime(node) => self.evaluate_current_time(node),
            Expression::Arithmetic(node) => self.evaluate_arithmetic(node),
            Expression::Negative(node) => self.evaluate_negative(node),
            Expression::Comparison(node) => self.evaluate_comparison(node),
            Expression::Between(node) => self.evaluate_between(node),
            Expression::Logical(node) => self.evaluate_logical(node),
            Expression::Not(node) => self.evaluate_not(node),
            Expression::IsNull(node) => self.evaluate_is_null(node),
            Expression::IsNotNull(node) => self.evaluate_is_not_null(node),
            Expression::In(node) => self.evaluate_in(node),
            Expression::InList(_) => Err(Error::invalid_argument(
                "IN value list cannot be evaluated outside an IN predicate".to_string(),
            )),
            Expression::Coalesce(node) => self.evaluate_coalesce(node),
            Expression::NullIf(node) => self.evaluate_null_if(node),
            Expression::If(node) => self.evaluate_if(node),
            Expression::Case(node) => self.evaluate_case(node),
            Expression::FunctionCall(node) => self.evaluate_function_call(node),
            Expression::Like(node) => self.evaluate_like(node),
            Expression::Extract(node) => self.evaluate_extract(node),
            Expression::Cast(node) => self.evaluate_cast(node),
        }
    }

    /// Evaluate an expression as a predicate (for WHERE-style callers)
    ///
    /// NULL is falsy; non-boolean results are a type error.
    pub fn evaluate_bool(&self, expr: &Expression) -> Result<bool> {
        match self.evaluate(expr)? {
            Value::Boolean(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(Error::type_mismatch(format!(
                "expected a boolean predicate, got {}",
                other
            ))),
        }
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    fn evaluate_interval(&self, lit: &IntervalLiteral) -> Result<Value> {
        if lit.year_to_month {
            return Err(Error::not_supported(format!(
                "month based intervals: {}",
                lit
            )));
        }
        Ok(Value::integer(lit.seconds))
    }

    fn evaluate_name(&self, node: &QualifiedNameReference) -> Result<Value> {
        if node.name.prefix().is_some() {
            // not a symbol
            return Ok(Value::residual(Expression::Name(node.clone())));
        }
        let symbols = self
            .symbol_resolver
            .ok_or_else(|| Error::internal("no symbol resolver bound".to_string()))?;
        symbols.resolve(node.name.suffix())
    }

    fn evaluate_input(&self, node: &InputReference) -> Result<Value> {
        let inputs = self
            .input_resolver
            .ok_or_else(|| Error::internal("no input resolver bound".to_string()))?;
        inputs.value(node.slot)
    }

    fn evaluate_current_time(&self, node: &CurrentTime) -> Result<Value> {
        if node.kind != CurrentTimeKind::Timestamp {
            return Err(Error::not_supported(format!("{}", node)));
        }
        if node.precision.is_some() {
            return Err(Error::not_supported(
                "current_timestamp with explicit precision".to_string(),
            ));
        }
        Ok(Value::integer(self.session.start_time()))
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    fn evaluate_arithmetic(&self, node: &ArithmeticExpression) -> Result<Value> {
        let left = self.evaluate(&node.left)?;
        if left.is_null() {
            return Ok(Value::Null);
        }
        let right = self.evaluate(&node.right)?;
        if right.is_null() {
            return Ok(Value::Null);
        }

        if left.is_residual() || right.is_residual() {
            return Ok(Value::residual(Expression::Arithmetic(
                ArithmeticExpression::new(
                    node.op,
                    value_to_expression(left),
                    value_to_expression(right),
                ),
            )));
        }

        // both operands int64: compute in int64
        if let (Value::Integer(l), Value::Integer(r)) = (&left, &right) {
            return integer_arithmetic(node.op, *l, *r);
        }

        // either operand f64: widen for this operation only
        let (l, r) = match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                return Err(Error::type_mismatch(format!(
                    "arithmetic requires numeric operands: {} {} {}",
                    left, node.op, right
                )))
            }
        };
        let result = match node.op {
            ArithmeticOp::Add => l + r,
            ArithmeticOp::Subtract => l - r,
            ArithmeticOp::Multiply => l * r,
            ArithmeticOp::Divide => l / r,
            ArithmeticOp::Modulus => l % r,
        };
        Ok(Value::float(result))
    }

    fn evaluate_negative(&self, node: &NegativeExpression) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_null() {
            return Ok(Value::Null);
        }
        match value {
            Value::Residual(_) => Ok(Value::residual(Expression::Negative(
                NegativeExpression::new(value_to_expression(value)),
            ))),
            Value::Integer(v) => Ok(Value::integer(v.wrapping_neg())),
            Value::Float(v) => Ok(Value::float(-v)),
            other => Err(Error::type_mismatch(format!("cannot negate {}", other))),
        }
    }

    // =========================================================================
    // Comparisons
    // =========================================================================

    fn evaluate_comparison(&self, node: &ComparisonExpression) -> Result<Value> {
        if node.op == ComparisonOp::IsDistinctFrom {
            return self.evaluate_is_distinct_from(node);
        }

        let left = self.evaluate(&node.left)?;
        if left.is_null() {
            return Ok(Value::Null);
        }
        let right = self.evaluate(&node.right)?;
        if right.is_null() {
            return Ok(Value::Null);
        }

        match (&left, &right) {
            (Value::Integer(l), Value::Integer(r)) => {
                return Ok(Value::boolean(ordering_matches(node.op, l.cmp(r))?))
            }
            (
                Value::Integer(_) | Value::Float(_),
                Value::Integer(_) | Value::Float(_),
            ) => {
                // as_f64 is total over the numeric tags matched here
                let l = left.as_f64().unwrap_or_default();
                let r = right.as_f64().unwrap_or_default();
                return Ok(Value::boolean(compare_f64(node.op, l, r)?));
            }
            (Value::Text(l), Value::Text(r)) => {
                return Ok(Value::boolean(ordering_matches(
                    node.op,
                    l.as_bytes().cmp(r.as_bytes()),
                )?))
            }
            (Value::Boolean(l), Value::Boolean(r)) => {
                return match node.op {
                    ComparisonOp::Equal => Ok(Value::boolean(l == r)),
                    ComparisonOp::NotEqual => Ok(Value::boolean(l != r)),
                    op => Err(Error::type_mismatch(format!(
                        "booleans do not support {}",
                        op
                    ))),
                }
            }
            _ => {}
        }

        // mixed or residual operands: keep the comparison symbolic
        Ok(Value::residual(Expression::Comparison(
            ComparisonExpression::new(
                node.op,
                value_to_expression(left),
                value_to_expression(right),
            ),
        )))
    }

    /// IS DISTINCT FROM is total: no null propagation
    fn evaluate_is_distinct_from(&self, node: &ComparisonExpression) -> Result<Value> {
        let left = self.evaluate(&node.left)?;
        let right = self.evaluate(&node.right)?;

        if left.is_residual() || right.is_residual() {
            return Ok(Value::residual(Expression::Comparison(
                ComparisonExpression::new(
                    ComparisonOp::IsDistinctFrom,
                    value_to_expression(left),
                    value_to_expression(right),
                ),
            )));
        }

        match (&left, &right) {
            (Value::Null, Value::Null) => Ok(Value::boolean(false)),
            (Value::Null, _) | (_, Value::Null) => Ok(Value::boolean(true)),
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::boolean(l != r)),
            (Value::Integer(_), Value::Float(_))
            | (Value::Float(_), Value::Integer(_))
            | (Value::Float(_), Value::Float(_)) => {
                let l = left.as_f64().unwrap_or_default();
                let r = right.as_f64().unwrap_or_default();
                Ok(Value::boolean(l != r))
            }
            (Value::Boolean(l), Value::Boolean(r)) => Ok(Value::boolean(l != r)),
            (Value::Text(l), Value::Text(r)) => Ok(Value::boolean(l != r)),
            // the analyzer owns type agreement; reaching this is a planner bug
            _ => Err(Error::internal(format!(
                "IS DISTINCT FROM over mismatched types: {} and {}",
                left, right
            ))),
        }
    }

    fn evaluate_between(&self, node: &BetweenPredicate) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_null() {
            return Ok(Value::Null);
        }
        let min = self.evaluate(&node.min)?;
        if min.is_null() {
            return Ok(Value::Null);
        }
        let max = self.evaluate(&node.max)?;
        if max.is_null() {
            return Ok(Value::Null);
        }

        if let (Some(v), Some(lo), Some(hi)) = (value.as_f64(), min.as_f64(), max.as_f64()) {
            return Ok(Value::boolean(lo <= v && v <= hi));
        }
        if let (Value::Text(v), Value::Text(lo), Value::Text(hi)) = (&value, &min, &max) {
            return Ok(Value::boolean(
                lo.as_bytes() <= v.as_bytes() && v.as_bytes() <= hi.as_bytes(),
            ));
        }

        Ok(Value::residual(Expression::Between(BetweenPredicate::new(
            value_to_expression(value),
            value_to_expression(min),
            value_to_expression(max),
        ))))
    }

    // =========================================================================
    // Three-valued logic
    // =========================================================================

    fn evaluate_logical(&self, node: &LogicalBinaryExpression) -> Result<Value> {
        let left = self.evaluate(&node.left)?;
        let l = logic_of(&left)?;

        // definite absorbing element short-circuits the other side
        match node.op {
            LogicalOp::And if l == Logic::False => return Ok(Value::boolean(false)),
            LogicalOp::Or if l == Logic::True => return Ok(Value::boolean(true)),
            _ => {}
        }

        let right = self.evaluate(&node.right)?;
        let r = logic_of(&right)?;

        match node.op {
            LogicalOp::And => match (l, r) {
                (_, Logic::False) => Ok(Value::boolean(false)),
                (Logic::True, Logic::True) => Ok(Value::boolean(true)),
                (Logic::True, Logic::Unknown)
                | (Logic::Unknown, Logic::True)
                | (Logic::Unknown, Logic::Unknown) => Ok(Value::Null),
                (Logic::True, Logic::Symbolic) => Ok(right),
                (Logic::Symbolic, Logic::True) => Ok(left),
                _ => Ok(Value::residual(Expression::Logical(
                    LogicalBinaryExpression::new(
                        LogicalOp::And,
                        value_to_expression(left),
                        value_to_expression(right),
                    ),
                ))),
            },
            LogicalOp::Or => match (l, r) {
                (_, Logic::True) => Ok(Value::boolean(true)),
                (Logic::False, Logic::False) => Ok(Value::boolean(false)),
                (Logic::False, Logic::Unknown)
                | (Logic::Unknown, Logic::False)
                | (Logic::Unknown, Logic::Unknown) => Ok(Value::Null),
                (Logic::False, Logic::Symbolic) => Ok(right),
                (Logic::Symbolic, Logic::False) => Ok(left),
                _ => Ok(Value::residual(Expression::Logical(
                    LogicalBinaryExpression::new(
                        LogicalOp::Or,
                        value_to_expression(left),
                        value_to_expression(right),
                    ),
                ))),
            },
        }
    }

    fn evaluate_not(&self, node: &NotExpression) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_null() {
            return Ok(Value::Null);
        }
        match value {
            Value::Residual(_) => Ok(Value::residual(Expression::Not(NotExpression::new(
                value_to_expression(value),
            )))),
            Value::Boolean(b) => Ok(Value::boolean(!b)),
            other => Err(Error::type_mismatch(format!(
                "NOT operand must be a boolean, got {}",
                other
            ))),
        }
    }

    fn evaluate_is_null(&self, node: &IsNullPredicate) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_residual() {
            return Ok(Value::residual(Expression::IsNull(IsNullPredicate::new(
                value_to_expression(value),
            ))));
        }
        Ok(Value::boolean(value.is_null()))
    }

    fn evaluate_is_not_null(&self, node: &IsNotNullPredicate) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_residual() {
            return Ok(Value::residual(Expression::IsNotNull(
                IsNotNullPredicate::new(value_to_expression(value)),
            )));
        }
        Ok(Value::boolean(!value.is_null()))
    }

    // =========================================================================
    // IN
    // =========================================================================

    fn evaluate_in(&self, node: &InPredicate) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_null() {
            return Ok(Value::Null);
        }

        let list = match node.value_list.as_ref() {
            Expression::InList(list) => list,
            other => {
                if !self.optimize {
                    return Err(Error::not_supported(format!(
                        "IN value list form: {}",
                        other
                    )));
                }
                return Ok(Value::residual(Expression::In(node.clone())));
            }
        };

        // Presence in the cache records that the analysis ran; None means
        // the set optimization does not apply to this list.
        let analyzed = self.in_list_cache.borrow().contains_key(&list.id());
        if !analyzed {
            let constant_only = list
                .values
                .iter()
                .all(|e| e.is_literal() && !matches!(e, Expression::Null(_)));
            let set = if constant_only {
                let mut set = FxHashSet::default();
                for element in &list.values {
                    set.insert(self.evaluate(element)?);
                }
                Some(set)
            } else {
                None
            };
            self.in_list_cache.borrow_mut().insert(list.id(), set);
        }

        if !value.is_residual() {
            if let Some(Some(set)) = self.in_list_cache.borrow().get(&list.id()) {
                return Ok(Value::boolean(set.contains(&value)));
            }
        }

        let mut has_unresolved = value.is_residual();
        let mut has_null = false;
        let mut found = false;
        let mut reduced = Vec::with_capacity(list.values.len());
        for element in &list.values {
            let element_value = self.evaluate(element)?;
            if element_value.is_residual() {
                has_unresolved = true;
            } else if element_value.is_null() {
                has_null = true;
            } else if !found && !value.is_residual() && value == element_value {
                // IN does not short-circuit; the whole list is reduced
                found = true;
            }
            reduced.push(element_value);
        }

        if found {
            return Ok(Value::boolean(true));
        }
        if has_unresolved {
            let elements = reduced.into_iter().map(value_to_expression).collect();
            return Ok(Value::residual(Expression::In(InPredicate::new(
                value_to_expression(value),
                Expression::InList(InListExpression::new(elements)),
            ))));
        }
        if has_null {
            return Ok(Value::Null);
        }
        Ok(Value::boolean(false))
    }

    // =========================================================================
    // Conditionals
    // =========================================================================

    fn evaluate_coalesce(&self, node: &CoalesceExpression) -> Result<Value> {
        for operand in &node.operands {
            let value = self.evaluate(operand)?;
            if value.is_residual() {
                return Ok(Value::residual(Expression::Coalesce(node.clone())));
            }
            if !value.is_null() {
                return Ok(value);
            }
        }
        Ok(Value::Null)
    }

    fn evaluate_null_if(&self, node: &NullIfExpression) -> Result<Value> {
        let first = self.evaluate(&node.first)?;
        if first.is_null() {
            return Ok(Value::Null);
        }
        let second = self.evaluate(&node.second)?;
        if second.is_null() {
            return Ok(first);
        }

        let comparable = matches!(
            (&first, &second),
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_))
                | (Value::Boolean(_), Value::Boolean(_))
                | (Value::Text(_), Value::Text(_))
        );
        if !comparable {
            return Ok(Value::residual(Expression::NullIf(node.clone())));
        }
        if first == second {
            Ok(Value::Null)
        } else {
            Ok(first)
        }
    }

    fn evaluate_if(&self, node: &IfExpression) -> Result<Value> {
        let condition = self.evaluate(&node.condition)?;
        match condition {
            Value::Boolean(true) => self.evaluate(&node.true_value),
            Value::Boolean(false) | Value::Null => match &node.false_value {
                Some(false_value) => self.evaluate(false_value),
                None => Ok(Value::Null),
            },
            Value::Residual(_) => {
                if !self.optimize {
                    return Err(Error::internal(
                        "residual IF condition outside optimization".to_string(),
                    ));
                }
                let true_value = self.optimize_branch(&node.true_value);
                let false_value = match &node.false_value {
                    Some(false_value) => self.optimize_branch(false_value),
                    None => Expression::null(),
                };
                Ok(Value::residual(Expression::If(IfExpression::new(
                    value_to_expression(condition),
                    true_value,
                    Some(false_value),
                ))))
            }
            other => Err(Error::type_mismatch(format!(
                "IF condition must be a boolean, got {}",
                other
            ))),
        }
    }

    /// Re-optimize one IF branch, keeping it symbolic if that fails
    ///
    /// This is the only place an evaluation failure is recovered.
    fn optimize_branch(&self, branch: &Expression) -> Expression {
        match self.evaluate(branch) {
            Ok(value) => value_to_expression(value),
            Err(_) => branch.clone(),
        }
    }

    fn evaluate_case(&self, node: &CaseExpression) -> Result<Value> {
        let selected = match &node.operand {
            // simple CASE: compare the selector against each WHEN operand
            Some(operand_expr) => {
                let operand = self.evaluate(operand_expr)?;
                if operand.is_residual() {
                    return Ok(Value::residual(Expression::Case(node.clone())));
                }

                let mut selected = node.default_value.as_deref();
                if !operand.is_null() {
                    for when in &node.when_clauses {
                        let candidate = self.evaluate(&when.operand)?;
                        if candidate.is_residual() {
                            return Ok(Value::residual(Expression::Case(node.clone())));
                        }
                        if !candidate.is_null() && operand == candidate {
                            selected = Some(&when.result);
                            break;
                        }
                    }
                }
                selected
            }
            // searched CASE: the first WHEN operand evaluating to true wins
            None => {
                let mut selected = node.default_value.as_deref();
                for when in &node.when_clauses {
                    let condition = self.evaluate(&when.operand)?;
                    if condition.is_residual() {
                        return Ok(Value::residual(Expression::Case(node.clone())));
                    }
                    if matches!(condition, Value::Boolean(true)) {
                        selected = Some(&when.result);
                        break;
                    }
                }
                selected
            }
        };

        let selected = match selected {
            Some(result) => result,
            None => return Ok(Value::Null),
        };
        let result = self.evaluate(selected)?;
        if result.is_residual() {
            return Ok(Value::residual(Expression::Case(node.clone())));
        }
        Ok(result)
    }

    // =========================================================================
    // Function calls
    // =========================================================================

    fn evaluate_function_call(&self, node: &FunctionCall) -> Result<Value> {
        if node.window.is_some() {
            return Err(Error::not_supported(format!(
                "window function in scalar context: {}",
                node.name
            )));
        }

        let mut argument_types = Vec::with_capacity(node.arguments.len());
        let mut argument_values = Vec::with_capacity(node.arguments.len());
        for argument in &node.arguments {
            let value = self.evaluate(argument)?;
            // all scalar functions are strict in nulls
            if value.is_null() {
                return Ok(Value::Null);
            }
            match value.scalar_type() {
                Some(scalar_type) => argument_types.push(scalar_type),
                // a residual argument keeps the whole call symbolic
                None => return Ok(Value::residual(Expression::FunctionCall(node.clone()))),
            }
            argument_values.push(value);
        }

        let function = self.registry.resolve(&node.name, &argument_types)?;

        // never fold a non-deterministic function at plan time
        if self.optimize && !function.is_deterministic() {
            let arguments = argument_values
                .into_iter()
                .map(value_to_expression)
                .collect();
            return Ok(Value::residual(Expression::FunctionCall(FunctionCall {
                name: node.name.clone(),
                window: node.window.clone(),
                distinct: node.distinct,
                arguments,
            })));
        }

        if function.binds_session() {
            function.evaluate_with_session(self.session, &argument_values)
        } else {
            function.evaluate(&argument_values)
        }
    }

    // =========================================================================
    // LIKE
    // =========================================================================

    fn evaluate_like(&self, node: &LikePredicate) -> Result<Value> {
        let value = self.evaluate(&node.value)?;
        if value.is_null() {
            return Ok(Value::Null);
        }

        // fast path: constant pattern and escape, compiled once per node
        if let Value::Text(input) = &value {
            let pattern_constant = matches!(node.pattern.as_ref(), Expression::String(_));
            let escape_constant = node
                .escape
                .as_deref()
                .map_or(true, |e| matches!(e, Expression::String(_)));
            if pattern_constant && escape_constant {
                let regex = self.constant_like_pattern(node)?;
                return Ok(Value::boolean(regex.is_match(input)));
            }
        }

        let pattern = self.evaluate(&node.pattern)?;
        if pattern.is_null() {
            return Ok(Value::Null);
        }
        let escape = match &node.escape {
            Some(escape) => {
                let escape = self.evaluate(escape)?;
                if escape.is_null() {
                    return Ok(Value::Null);
                }
                Some(escape)
            }
            None => None,
        };

        // general path: all operands concrete strings
        if let (Value::Text(input), Value::Text(pattern_text)) = (&value, &pattern) {
            let escape_text = match &escape {
                None => Some(None),
                Some(Value::Text(escape_text)) => Some(Some(escape_text.as_ref())),
                Some(_) => None,
            };
            if let Some(escape_text) = escape_text {
                let regex = like::like_to_regex(pattern_text, escape_text)?;
                return Ok(Value::boolean(regex.is_match(input)));
            }
        }

        // a wildcard-free constant pattern degenerates LIKE to equality
        let degenerates = escape.is_none()
            && matches!(&pattern, Value::Text(text) if !like::has_wildcards(text));
        if degenerates {
            return Ok(Value::residual(Expression::Comparison(
                ComparisonExpression::new(
                    ComparisonOp::Equal,
                    value_to_expression(value),
                    value_to_expression(pattern),
                ),
            )));
        }

        let escape = escape.map(value_to_expression);
        Ok(Value::residual(Expression::Like(LikePredicate::new(
            value_to_expression(value),
            value_to_expression(pattern),
            escape,
        ))))
    }

    /// Compile and cache the pattern of a LIKE node whose pattern and
    /// escape are string literals
    fn constant_like_pattern(&self, node: &LikePredicate) -> Result<Regex> {
        if let Some(regex) = self.like_cache.borrow().get(&node.id()) {
            return Ok(regex.clone());
        }

        let pattern = match node.pattern.as_ref() {
            Expression::String(pattern) => pattern.value.as_str(),
            other => {
                return Err(Error::internal(format!(
                    "constant LIKE pattern expected a string literal, got {}",
                    other
                )))
            }
        };
        let escape = match node.escape.as_deref() {
            None => None,
            Some(Expression::String(escape)) => Some(escape.value.as_str()),
            Some(other) => {
                return Err(Error::internal(format!(
                    "constant LIKE escape expected a string literal, got {}",
                    other
                )))
            }
        };

        let regex = like::like_to_regex(pattern, escape)?;
        self.like_cache.borrow_mut().insert(node.id(), regex.clone());
        Ok(regex)
    }

    // =========================================================================
    // EXTRACT and CAST
    // =========================================================================

    fn evaluate_extract(&self, node: &ExtractExpression) -> Result<Value> {
        let value = self.evaluate(&node.expression)?;
        if value.is_null() {
            return Ok(Value::Null);
        }
        if value.is_residual() {
            return Ok(Value::residual(Expression::Extract(
                ExtractExpression::new(node.field, value_to_expression(value)),
            )));
        }
        let seconds = match value {
            Value::Integer(seconds) => seconds,
            other => {
                return Err(Error::type_mismatch(format!(
                    "EXTRACT requires a datetime scalar, got {}",
                    other
                )))
            }
        };
        Ok(Value::integer(datetime::extract(node.field, seconds)?))
    }

    fn evaluate_cast(&self, node: &CastExpression) -> Result<Value> {
        let value = self.evaluate(&node.expression)?;
        if value.is_residual() {
            return Ok(Value::residual(Expression::Cast(CastExpression::new(
                value_to_expression(value),
                node.target.clone(),
            ))));
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        match node.target.to_uppercase().as_str() {
            "BOOLEAN" => cast::to_boolean(&value),
            "VARCHAR" => cast::to_varchar(&value),
            "DOUBLE" => cast::to_double(&value),
            "BIGINT" => cast::to_bigint(&value),
            other => Err(Error::not_supported(format!("cast to type: {}", other))),
        }
    }

    // =========================================================================
    // Test accessors
    // =========================================================================

    #[cfg(test)]
    pub(crate) fn like_cache_size(&self) -> usize {
        self.like_cache.borrow().len()
    }

    #[cfg(test)]
    pub(crate) fn in_list_cache_size(&self) -> usize {
        self.in_list_cache.borrow().len()
    }

    #[cfg(test)]
    pub(crate) fn in_list_set_usable(&self, id: NodeId) -> Option<bool> {
        self.in_list_cache
            .borrow()
            .get(&id)
            .map(|set| set.is_some())
    }
}

// ============================================================================
// Literal reconstruction
// ============================================================================

/// Turn a runtime value back into an AST literal
///
/// The inverse of evaluation: residuals pass through unchanged, finite
/// scalars become literal nodes, and non-finite doubles become the
/// `nan()` / `infinity()` call forms that evaluate back to themselves.
pub fn value_to_expression(value: Value) -> Expression {
    match value {
        Value::Residual(expression) => *expression,
        Value::Null => Expression::null(),
        Value::Integer(v) => Expression::long(v),
        Value::Float(v) => {
            if v.is_nan() {
                nullary_call("nan")
            } else if v == f64::INFINITY {
                nullary_call("infinity")
            } else if v == f64::NEG_INFINITY {
                Expression::Negative(NegativeExpression::new(nullary_call("infinity")))
            } else {
                Expression::double(v)
            }
        }
        Value::Text(s) => Expression::string(s.as_ref()),
        Value::Boolean(b) => Expression::boolean(b),
    }
}

fn nullary_call(name: &str) -> Expression {
    Expression::FunctionCall(FunctionCall::new(QualifiedName::from(name), Vec::new()))
}

// ============================================================================
// Operator helpers
// ============================================================================

/// The four states an operand of a logical operator can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Logic {
    True,
    False,
    Unknown,
    Symbolic,
}

fn logic_of(value: &Value) -> Result<Logic> {
    match value {
        Value::Boolean(true) => Ok(Logic::True),
        Value::Boolean(false) => Ok(Logic::False),
        Value::Null => Ok(Logic::Unknown),
        Value::Residual(_) => Ok(Logic::Symbolic),
        other => Err(Error::type_mismatch(format!(
            "logical operand must be a boolean, got {}",
            other
        ))),
    }
}

fn integer_arithmetic(op: ArithmeticOp, l: i64, r: i64) -> Result<Value> {
    let result = match op {
        ArithmeticOp::Add => l.wrapping_add(r),
        ArithmeticOp::Subtract => l.wrapping_sub(r),
        ArithmeticOp::Multiply => l.wrapping_mul(r),
        ArithmeticOp::Divide => {
            if r == 0 {
                return Err(Error::DivisionByZero);
            }
            l.wrapping_div(r)
        }
        ArithmeticOp::Modulus => {
            if r == 0 {
                return Err(Error::DivisionByZero);
            }
            l.wrapping_rem(r)
        }
    };
    Ok(Value::integer(result))
}

fn ordering_matches(op: ComparisonOp, ordering: Ordering) -> Result<bool> {
    match op {
        ComparisonOp::Equal => Ok(ordering == Ordering::Equal),
        ComparisonOp::NotEqual => Ok(ordering != Ordering::Equal),
        ComparisonOp::LessThan => Ok(ordering == Ordering::Less),
        ComparisonOp::LessThanOrEqual => Ok(ordering != Ordering::Greater),
        ComparisonOp::GreaterThan => Ok(ordering == Ordering::Greater),
        ComparisonOp::GreaterThanOrEqual => Ok(ordering != Ordering::Less),
        ComparisonOp::IsDistinctFrom => Err(Error::internal(
            "IS DISTINCT FROM is not an ordered comparison".to_string(),
        )),
    }
}

/// IEEE semantics: every ordered comparison against NaN is false and
/// NotEqual is true
fn compare_f64(op: ComparisonOp, l: f64, r: f64) -> Result<bool> {
    match l.partial_cmp(&r) {
        Some(ordering) => ordering_matches(op, ordering),
        None => match op {
            ComparisonOp::NotEqual => Ok(true),
            ComparisonOp::IsDistinctFrom => Err(Error::internal(
                "IS DISTINCT FROM is not an ordered comparison".to_string(),
            )),
            _ => Ok(false),
        },
    }
}
