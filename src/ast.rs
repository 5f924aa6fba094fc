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

//! Abstract Syntax Tree (AST) types for SQL expressions
//!
//! This module defines the closed set of expression nodes the evaluator
//! consumes. Trees are produced by an upstream analyzer; nodes are
//! immutable once built.
//!
//! LIKE and IN-list nodes carry a [`NodeId`] allocated at construction.
//! The evaluator keys its constant caches by that id: clones share it,
//! while freshly constructed nodes (even structurally equal ones) get a
//! new one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Node identity
// ============================================================================

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a cache-relevant AST node
///
/// Structural equality of nodes deliberately ignores this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Expression enum representing all expression node types
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal (64-bit signed)
    Long(LongLiteral),
    /// Floating point literal (IEEE-754 double)
    Double(DoubleLiteral),
    /// String literal
    String(StringLiteral),
    /// Boolean literal (TRUE/FALSE)
    Boolean(BooleanLiteral),
    /// NULL literal
    Null(NullLiteral),
    /// DATE literal
    Date(DateLiteral),
    /// TIME literal
    Time(TimeLiteral),
    /// TIMESTAMP literal
    Timestamp(TimestampLiteral),
    /// INTERVAL literal
    Interval(IntervalLiteral),
    /// Possibly-qualified name reference (a bare name is a symbol)
    Name(QualifiedNameReference),
    /// Positional reference into an input tuple
    Input(InputReference),
    /// CURRENT_TIMESTAMP and friends
    CurrentTime(CurrentTime),
    /// Binary arithmetic (+ - * / %)
    Arithmetic(ArithmeticExpression),
    /// Unary minus
    Negative(NegativeExpression),
    /// Binary comparison, including IS DISTINCT FROM
    Comparison(ComparisonExpression),
    /// BETWEEN predicate
    Between(BetweenPredicate),
    /// Logical AND/OR
    Logical(LogicalBinaryExpression),
    /// Logical NOT
    Not(NotExpression),
    /// IS NULL predicate
    IsNull(IsNullPredicate),
    /// IS NOT NULL predicate
    IsNotNull(IsNotNullPredicate),
    /// IN predicate
    In(InPredicate),
    /// Parenthesized value list of an IN predicate
    InList(InListExpression),
    /// COALESCE expression
    Coalesce(CoalesceExpression),
    /// NULLIF expression
    NullIf(NullIfExpression),
    /// IF expression
    If(IfExpression),
    /// CASE expression, simple or searched
    Case(CaseExpression),
    /// Scalar function call
    FunctionCall(FunctionCall),
    /// LIKE predicate with optional ESCAPE
    Like(LikePredicate),
    /// EXTRACT(field FROM expr)
    Extract(ExtractExpression),
    /// CAST(expr AS type)
    Cast(CastExpression),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Long(e) => write!(f, "{}", e),
            Expression::Double(e) => write!(f, "{}", e),
            Expression::String(e) => write!(f, "{}", e),
            Expression::Boolean(e) => write!(f, "{}", e),
            Expression::Null(e) => write!(f, "{}", e),
            Expression::Date(e) => write!(f, "{}", e),
            Expression::Time(e) => write!(f, "{}", e),
            Expression::Timestamp(e) => write!(f, "{}", e),
            Expression::Interval(e) => write!(f, "{}", e),
            Expression::Name(e) => write!(f, "{}", e),
            Expression::Input(e) => write!(f, "{}", e),
            Expression::CurrentTime(e) => write!(f, "{}", e),
            Expression::Arithmetic(e) => write!(f, "{}", e),
            Expression::Negative(e) => write!(f, "{}", e),
            Expression::Comparison(e) => write!(f, "{}", e),
            Expression::Between(e) => write!(f, "{}", e),
            Expression::Logical(e) => write!(f, "{}", e),
            Expression::Not(e) => write!(f, "{}", e),
            Expression::IsNull(e) => write!(f, "{}", e),
            Expression::IsNotNull(e) => write!(f, "{}", e),
            Expression::In(e) => write!(f, "{}", e),
            Expression::InList(e) => write!(f, "{}", e),
            Expression::Coalesce(e) => write!(f, "{}", e),
            Expression::NullIf(e) => write!(f, "{}", e),
            Expression::If(e) => write!(f, "{}", e),
            Expression::Case(e) => write!(f, "{}", e),
            Expression::FunctionCall(e) => write!(f, "{}", e),
            Expression::Like(e) => write!(f, "{}", e),
            Expression::Extract(e) => write!(f, "{}", e),
            Expression::Cast(e) => write!(f, "{}", e),
        }
    }
}

impl Expression {
    /// Build an integer literal expression
    pub fn long(value: i64) -> Self {
        Expression::Long(LongLiteral { value })
    }

    /// Build a double literal expression
    pub fn double(value: f64) -> Self {
        Expression::Double(DoubleLiteral { value })
    }

    /// Build a string literal expression
    pub fn string(value: impl Into<String>) -> Self {
        Expression::String(StringLiteral {
            value: value.into(),
        })
    }

    /// Build a boolean literal expression
    pub fn boolean(value: bool) -> Self {
        Expression::Boolean(BooleanLiteral { value })
    }

    /// Build a NULL literal expression
    pub fn null() -> Self {
        Expression::Null(NullLiteral)
    }

    /// Build a bare-symbol name reference
    pub fn name(name: impl Into<String>) -> Self {
        Expression::Name(QualifiedNameReference {
            name: QualifiedName::new(vec![name.into()]),
        })
    }

    /// Build an input-tuple reference
    pub fn input(slot: usize) -> Self {
        Expression::Input(InputReference { slot })
    }

    /// Returns true for literal nodes, NULL included
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::Long(_)
                | Expression::Double(_)
                | Expression::String(_)
                | Expression::Boolean(_)
                | Expression::Null(_)
                | Expression::Date(_)
                | Expression::Time(_)
                | Expression::Timestamp(_)
                | Expression::Interval(_)
        )
    }
}

// ============================================================================
// Literals
// ============================================================================

/// Integer literal
#[derive(Debug, Clone, PartialEq)]
pub struct LongLiteral {
    pub value: i64,
}

impl fmt::Display for LongLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Floating point literal
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleLiteral {
    pub value: f64,
}

impl fmt::Display for DoubleLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

/// String literal
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.value.replace('\'', "''"))
    }
}

/// Boolean literal
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.value { "true" } else { "false" })
    }
}

/// NULL literal
#[derive(Debug, Clone, PartialEq)]
pub struct NullLiteral;

impl fmt::Display for NullLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "null")
    }
}

/// DATE literal; the analyzer supplies both the source text and the
/// resolved epoch seconds (midnight UTC)
#[derive(Debug, Clone, PartialEq)]
pub struct DateLiteral {
    pub text: String,
    pub epoch_seconds: i64,
}

impl fmt::Display for DateLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DATE '{}'", self.text)
    }
}

/// TIME literal, resolved to epoch seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLiteral {
    pub text: String,
    pub epoch_seconds: i64,
}

impl fmt::Display for TimeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TIME '{}'", self.text)
    }
}

/// TIMESTAMP literal, resolved to epoch seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampLiteral {
    pub text: String,
    pub epoch_seconds: i64,
}

impl fmt::Display for TimestampLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TIMESTAMP '{}'", self.text)
    }
}

/// INTERVAL literal
///
/// Day-to-second intervals resolve to seconds. Year-to-month intervals
/// are carried through the AST but rejected by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalLiteral {
    pub text: String,
    pub seconds: i64,
    pub year_to_month: bool,
}

impl fmt::Display for IntervalLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INTERVAL '{}'", self.text)
    }
}

// ============================================================================
// References
// ============================================================================

/// Possibly-qualified SQL name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    parts: Vec<String>,
}

impl QualifiedName {
    /// Create a qualified name from its parts; at least one is required
    pub fn new(parts: Vec<String>) -> Self {
        debug_assert!(!parts.is_empty(), "qualified name must have parts");
        QualifiedName { parts }
    }

    /// The name parts in order
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Everything but the last part, if the name is qualified
    pub fn prefix(&self) -> Option<&[String]> {
        if self.parts.len() > 1 {
            Some(&self.parts[..self.parts.len() - 1])
        } else {
            None
        }
    }

    /// The last part of the name
    pub fn suffix(&self) -> &str {
        self.parts
            .last()
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        QualifiedName::new(name.split('.').map(str::to_string).collect())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

/// Reference to a possibly-qualified name
///
/// A bare (unqualified) name is a symbol the optimizer may resolve; a
/// qualified name is opaque to the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedNameReference {
    pub name: QualifiedName,
}

impl fmt::Display for QualifiedNameReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Positional reference into the current input tuple
#[derive(Debug, Clone, PartialEq)]
pub struct InputReference {
    pub slot: usize,
}

impl fmt::Display for InputReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.slot)
    }
}

/// Which clock reading a CurrentTime node requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentTimeKind {
    Time,
    Date,
    Timestamp,
}

/// CURRENT_TIMESTAMP / CURRENT_TIME / CURRENT_DATE
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentTime {
    pub kind: CurrentTimeKind,
    pub precision: Option<u32>,
}

impl fmt::Display for CurrentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            CurrentTimeKind::Time => "current_time",
            CurrentTimeKind::Date => "current_date",
            CurrentTimeKind::Timestamp => "current_timestamp",
        };
        match self.precision {
            Some(p) => write!(f, "{}({})", name, p),
            None => write!(f, "{}", name),
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Modulus => "%",
        };
        write!(f, "{}", symbol)
    }
}

/// Binary arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpression {
    pub op: ArithmeticOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl ArithmeticExpression {
    pub fn new(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        ArithmeticExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for ArithmeticExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

/// Unary minus
#[derive(Debug, Clone, PartialEq)]
pub struct NegativeExpression {
    pub value: Box<Expression>,
}

impl NegativeExpression {
    pub fn new(value: Expression) -> Self {
        NegativeExpression {
            value: Box::new(value),
        }
    }
}

impl fmt::Display for NegativeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.value)
    }
}

/// Comparison operator, including the null-tolerant IS DISTINCT FROM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    IsDistinctFrom,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanOrEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanOrEqual => ">=",
            ComparisonOp::IsDistinctFrom => "IS DISTINCT FROM",
        };
        write!(f, "{}", symbol)
    }
}

/// Binary comparison expression
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpression {
    pub op: ComparisonOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl ComparisonExpression {
    pub fn new(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        ComparisonExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for ComparisonExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

/// BETWEEN predicate
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenPredicate {
    pub value: Box<Expression>,
    pub min: Box<Expression>,
    pub max: Box<Expression>,
}

impl BetweenPredicate {
    pub fn new(value: Expression, min: Expression, max: Expression) -> Self {
        BetweenPredicate {
            value: Box::new(value),
            min: Box::new(min),
            max: Box::new(max),
        }
    }
}

impl fmt::Display for BetweenPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} BETWEEN {} AND {})", self.value, self.min, self.max)
    }
}

/// Logical binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// Logical AND/OR expression
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalBinaryExpression {
    pub op: LogicalOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl LogicalBinaryExpression {
    pub fn new(op: LogicalOp, left: Expression, right: Expression) -> Self {
        LogicalBinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for LogicalBinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

/// Logical NOT
#[derive(Debug, Clone, PartialEq)]
pub struct NotExpression {
    pub value: Box<Expression>,
}

impl NotExpression {
    pub fn new(value: Expression) -> Self {
        NotExpression {
            value: Box::new(value),
        }
    }
}

impl fmt::Display for NotExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(NOT {})", self.value)
    }
}

/// IS NULL predicate
#[derive(Debug, Clone, PartialEq)]
pub struct IsNullPredicate {
    pub value: Box<Expression>,
}

impl IsNullPredicate {
    pub fn new(value: Expression) -> Self {
        IsNullPredicate {
            value: Box::new(value),
        }
    }
}

impl fmt::Display for IsNullPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} IS NULL)", self.value)
    }
}

/// IS NOT NULL predicate
#[derive(Debug, Clone, PartialEq)]
pub struct IsNotNullPredicate {
    pub value: Box<Expression>,
}

impl IsNotNullPredicate {
    pub fn new(value: Expression) -> Self {
        IsNotNullPredicate {
            value: Box::new(value),
        }
    }
}

impl fmt::Display for IsNotNullPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} IS NOT NULL)", self.value)
    }
}

// ============================================================================
// Predicates over lists
// ============================================================================

/// IN predicate
///
/// The value list is usually an [`InListExpression`]; other forms (such
/// as subqueries) stay symbolic in optimization mode and are rejected in
/// interpretation mode.
#[derive(Debug, Clone, PartialEq)]
pub struct InPredicate {
    pub value: Box<Expression>,
    pub value_list: Box<Expression>,
}

impl InPredicate {
    pub fn new(value: Expression, value_list: Expression) -> Self {
        InPredicate {
            value: Box::new(value),
            value_list: Box::new(value_list),
        }
    }
}

impl fmt::Display for InPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} IN {})", self.value, self.value_list)
    }
}

/// The parenthesized value list of an IN predicate
#[derive(Debug, Clone)]
pub struct InListExpression {
    id: NodeId,
    pub values: Vec<Expression>,
}

impl InListExpression {
    pub fn new(values: Vec<Expression>) -> Self {
        InListExpression {
            id: NodeId::next(),
            values,
        }
    }

    /// Cache identity of this node; shared by clones only
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl PartialEq for InListExpression {
    fn eq(&self, other: &Self) -> bool {
        // structural equality only; the cache id is identity, not structure
        self.values == other.values
    }
}

impl fmt::Display for InListExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Conditionals
// ============================================================================

/// COALESCE expression
#[derive(Debug, Clone, PartialEq)]
pub struct CoalesceExpression {
    pub operands: Vec<Expression>,
}

impl CoalesceExpression {
    pub fn new(operands: Vec<Expression>) -> Self {
        CoalesceExpression { operands }
    }
}

impl fmt::Display for CoalesceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COALESCE(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", operand)?;
        }
        write!(f, ")")
    }
}

/// NULLIF expression
#[derive(Debug, Clone, PartialEq)]
pub struct NullIfExpression {
    pub first: Box<Expression>,
    pub second: Box<Expression>,
}

impl NullIfExpression {
    pub fn new(first: Expression, second: Expression) -> Self {
        NullIfExpression {
            first: Box::new(first),
            second: Box::new(second),
        }
    }
}

impl fmt::Display for NullIfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NULLIF({}, {})", self.first, self.second)
    }
}

/// IF expression
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub true_value: Box<Expression>,
    pub false_value: Option<Box<Expression>>,
}

impl IfExpression {
    pub fn new(
        condition: Expression,
        true_value: Expression,
        false_value: Option<Expression>,
    ) -> Self {
        IfExpression {
            condition: Box::new(condition),
            true_value: Box::new(true_value),
            false_value: false_value.map(Box::new),
        }
    }
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.false_value {
            Some(false_value) => write!(
                f,
                "IF({}, {}, {})",
                self.condition, self.true_value, false_value
            ),
            None => write!(f, "IF({}, {})", self.condition, self.true_value),
        }
    }
}

/// One WHEN arm of a CASE expression
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub operand: Expression,
    pub result: Expression,
}

impl WhenClause {
    pub fn new(operand: Expression, result: Expression) -> Self {
        WhenClause { operand, result }
    }
}

impl fmt::Display for WhenClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.operand, self.result)
    }
}

/// CASE expression
///
/// A present `operand` makes this a simple CASE (the WHEN operands are
/// compared against it); absent, it is a searched CASE (the WHEN
/// operands are boolean conditions).
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpression {
    pub operand: Option<Box<Expression>>,
    pub when_clauses: Vec<WhenClause>,
    pub default_value: Option<Box<Expression>>,
}

impl CaseExpression {
    /// Build a searched CASE
    pub fn searched(when_clauses: Vec<WhenClause>, default_value: Option<Expression>) -> Self {
        CaseExpression {
            operand: None,
            when_clauses,
            default_value: default_value.map(Box::new),
        }
    }

    /// Build a simple CASE
    pub fn simple(
        operand: Expression,
        when_clauses: Vec<WhenClause>,
        default_value: Option<Expression>,
    ) -> Self {
        CaseExpression {
            operand: Some(Box::new(operand)),
            when_clauses,
            default_value: default_value.map(Box::new),
        }
    }
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {}", operand)?;
        }
        for when in &self.when_clauses {
            write!(f, " {}", when)?;
        }
        if let Some(default_value) = &self.default_value {
            write!(f, " ELSE {}", default_value)?;
        }
        write!(f, " END")
    }
}

// ============================================================================
// Calls
// ============================================================================

/// Window specification attached to a function call
///
/// Carried through rebuilds untouched; the evaluator never evaluates
/// window functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub partition_by: Vec<Expression>,
    pub order_by: Vec<Expression>,
}

/// Scalar function call
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub window: Option<Box<Window>>,
    pub distinct: bool,
    pub arguments: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(name: QualifiedName, arguments: Vec<Expression>) -> Self {
        FunctionCall {
            name,
            window: None,
            distinct: false,
            arguments,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", argument)?;
        }
        write!(f, ")")
    }
}

/// LIKE predicate with optional ESCAPE clause
#[derive(Debug, Clone)]
pub struct LikePredicate {
    id: NodeId,
    pub value: Box<Expression>,
    pub pattern: Box<Expression>,
    pub escape: Option<Box<Expression>>,
}

impl LikePredicate {
    pub fn new(value: Expression, pattern: Expression, escape: Option<Expression>) -> Self {
        LikePredicate {
            id: NodeId::next(),
            value: Box::new(value),
            pattern: Box::new(pattern),
            escape: escape.map(Box::new),
        }
    }

    /// Cache identity of this node; shared by clones only
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl PartialEq for LikePredicate {
    fn eq(&self, other: &Self) -> bool {
        // structural equality only; the cache id is identity, not structure
        self.value == other.value
            && self.pattern == other.pattern
            && self.escape == other.escape
    }
}

impl fmt::Display for LikePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.escape {
            Some(escape) => write!(
                f,
                "({} LIKE {} ESCAPE {})",
                self.value, self.pattern, escape
            ),
            None => write!(f, "({} LIKE {})", self.value, self.pattern),
        }
    }
}

// ============================================================================
// EXTRACT and CAST
// ============================================================================

/// Date/time field of an EXTRACT expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractField {
    Century,
    Year,
    Quarter,
    Month,
    Week,
    Day,
    DayOfMonth,
    DayOfWeek,
    Dow,
    DayOfYear,
    Doy,
    Hour,
    Minute,
    Second,
    TimezoneHour,
    TimezoneMinute,
}

impl fmt::Display for ExtractField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractField::Century => "CENTURY",
            ExtractField::Year => "YEAR",
            ExtractField::Quarter => "QUARTER",
            ExtractField::Month => "MONTH",
            ExtractField::Week => "WEEK",
            ExtractField::Day => "DAY",
            ExtractField::DayOfMonth => "DAY_OF_MONTH",
            ExtractField::DayOfWeek => "DAY_OF_WEEK",
            ExtractField::Dow => "DOW",
            ExtractField::DayOfYear => "DAY_OF_YEAR",
            ExtractField::Doy => "DOY",
            ExtractField::Hour => "HOUR",
            ExtractField::Minute => "MINUTE",
            ExtractField::Second => "SECOND",
            ExtractField::TimezoneHour => "TIMEZONE_HOUR",
            ExtractField::TimezoneMinute => "TIMEZONE_MINUTE",
        };
        write!(f, "{}", name)
    }
}

/// EXTRACT(field FROM expr)
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractExpression {
    pub field: ExtractField,
    pub expression: Box<Expression>,
}

impl ExtractExpression {
    pub fn new(field: ExtractField, expression: Expression) -> Self {
        ExtractExpression {
            field,
            expression: Box::new(expression),
        }
    }
}

impl fmt::Display for ExtractExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXTRACT({} FROM {})", self.field, self.expression)
    }
}

/// CAST(expr AS type)
///
/// The target keeps the analyzer's spelling; the evaluator dispatches on
/// its upper-cased form.
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpression {
    pub expression: Box<Expression>,
    pub target: String,
}

impl CastExpression {
    pub fn new(expression: Expression, target: impl Into<String>) -> Self {
        CastExpression {
            expression: Box::new(expression),
            target: target.into(),
        }
    }
}

impl fmt::Display for CastExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAST({} AS {})", self.expression, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_fresh_per_construction() {
        let a = LikePredicate::new(
            Expression::string("abc"),
            Expression::string("a%"),
            None,
        );
        let b = LikePredicate::new(
            Expression::string("abc"),
            Expression::string("a%"),
            None,
        );
        assert_ne!(a.id(), b.id());
        // structurally equal despite distinct identities
        assert_eq!(a, b);
    }

    #[test]
    fn test_node_ids_shared_by_clones() {
        let list = InListExpression::new(vec![Expression::long(1), Expression::long(2)]);
        let copy = list.clone();
        assert_eq!(list.id(), copy.id());
    }

    #[test]
    fn test_qualified_name() {
        let bare = QualifiedName::from("x");
        assert!(bare.prefix().is_none());
        assert_eq!(bare.suffix(), "x");

        let qualified = QualifiedName::from("t.x");
        assert_eq!(qualified.prefix(), Some(&["t".to_string()][..]));
        assert_eq!(qualified.suffix(), "x");
        assert_eq!(qualified.to_string(), "t.x");
    }

    #[test]
    fn test_display_rendering() {
        let expr = Expression::Arithmetic(ArithmeticExpression::new(
            ArithmeticOp::Multiply,
            Expression::Arithmetic(ArithmeticExpression::new(
                ArithmeticOp::Add,
                Expression::long(3),
                Expression::long(4),
            )),
            Expression::long(2),
        ));
        assert_eq!(expr.to_string(), "((3 + 4) * 2)");

        let case = Expression::Case(CaseExpression::searched(
            vec![WhenClause::new(
                Expression::boolean(true),
                Expression::long(1),
            )],
            Some(Expression::long(2)),
        ));
        assert_eq!(case.to_string(), "CASE WHEN true THEN 1 ELSE 2 END");

        let like = Expression::Like(LikePredicate::new(
            Expression::name("x"),
            Expression::string("a%"),
            Some(Expression::string("#")),
        ));
        assert_eq!(like.to_string(), "(x LIKE 'a%' ESCAPE '#')");

        let cast = Expression::Cast(CastExpression::new(Expression::name("x"), "BIGINT"));
        assert_eq!(cast.to_string(), "CAST(x AS BIGINT)");

        assert_eq!(Expression::string("o'brien").to_string(), "'o''brien'");
        assert_eq!(Expression::double(14.0).to_string(), "14.0");
        assert_eq!(Expression::input(3).to_string(), "$3");
    }

    #[test]
    fn test_extract_display() {
        let extract = Expression::Extract(ExtractExpression::new(
            ExtractField::Year,
            Expression::name("ts"),
        ));
        assert_eq!(extract.to_string(), "EXTRACT(YEAR FROM ts)");
    }

    #[test]
    fn test_is_literal() {
        assert!(Expression::long(1).is_literal());
        assert!(Expression::null().is_literal());
        assert!(!Expression::name("x").is_literal());
        assert!(!Expression::Negative(NegativeExpression::new(Expression::long(1))).is_literal());
    }
}
