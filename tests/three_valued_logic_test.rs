//! Integration tests for SQL three-valued logic
//!
//! AND/OR truth tables over {true, false, null}, NOT, IS [NOT] NULL,
//! IS DISTINCT FROM, and the null-strictness of every operator without
//! an explicit null rule.

use sqlfold::ast::*;
use sqlfold::{global_registry, Evaluator, RowInputs, Session, Value};

fn eval(expr: &Expression) -> Value {
    let row = RowInputs::new(vec![]);
    let session = Session::with_start_time(0);
    let evaluator = Evaluator::interpreter(&row, global_registry(), &session);
    evaluator.evaluate(expr).expect("evaluation failed")
}

/// true / false / null operand for table-driven tests
fn tribool(value: Option<bool>) -> Expression {
    match value {
        Some(b) => Expression::boolean(b),
        None => Expression::null(),
    }
}

fn logical(op: LogicalOp, left: Option<bool>, right: Option<bool>) -> Option<bool> {
    let expr = Expression::Logical(LogicalBinaryExpression::new(
        op,
        tribool(left),
        tribool(right),
    ));
    match eval(&expr) {
        Value::Boolean(b) => Some(b),
        Value::Null => None,
        other => panic!("logical result must be boolean or null, got {}", other),
    }
}

// ============================================================================
// AND / OR truth tables
// ============================================================================

#[test]
fn test_and_truth_table() {
    let t = Some(true);
    let f = Some(false);
    let n = None;

    assert_eq!(logical(LogicalOp::And, t, t), Some(true));
    assert_eq!(logical(LogicalOp::And, t, f), Some(false));
    assert_eq!(logical(LogicalOp::And, t, n), None);
    assert_eq!(logical(LogicalOp::And, f, t), Some(false));
    assert_eq!(logical(LogicalOp::And, f, f), Some(false));
    assert_eq!(logical(LogicalOp::And, f, n), Some(false));
    assert_eq!(logical(LogicalOp::And, n, t), None);
    assert_eq!(logical(LogicalOp::And, n, f), Some(false));
    assert_eq!(logical(LogicalOp::And, n, n), None);
}

#[test]
fn test_or_truth_table() {
    let t = Some(true);
    let f = Some(false);
    let n = None;

    assert_eq!(logical(LogicalOp::Or, t, t), Some(true));
    assert_eq!(logical(LogicalOp::Or, t, f), Some(true));
    assert_eq!(logical(LogicalOp::Or, t, n), Some(true));
    assert_eq!(logical(LogicalOp::Or, f, t), Some(true));
    assert_eq!(logical(LogicalOp::Or, f, f), Some(false));
    assert_eq!(logical(LogicalOp::Or, f, n), None);
    assert_eq!(logical(LogicalOp::Or, n, t), Some(true));
    assert_eq!(logical(LogicalOp::Or, n, f), None);
    assert_eq!(logical(LogicalOp::Or, n, n), None);
}

#[test]
fn test_not() {
    let not = |value| Expression::Not(NotExpression::new(value));
    assert_eq!(eval(&not(Expression::boolean(true))), Value::boolean(false));
    assert_eq!(eval(&not(Expression::boolean(false))), Value::boolean(true));
    assert!(eval(&not(Expression::null())).is_null());
}

// ============================================================================
// IS NULL / IS NOT NULL never return null
// ============================================================================

#[test]
fn test_is_null() {
    let is_null = |value| Expression::IsNull(IsNullPredicate::new(value));
    assert_eq!(eval(&is_null(Expression::null())), Value::boolean(true));
    assert_eq!(eval(&is_null(Expression::long(1))), Value::boolean(false));

    let is_not_null = |value| Expression::IsNotNull(IsNotNullPredicate::new(value));
    assert_eq!(eval(&is_not_null(Expression::null())), Value::boolean(false));
    assert_eq!(eval(&is_not_null(Expression::long(1))), Value::boolean(true));
}

// ============================================================================
// IS DISTINCT FROM is total
// ============================================================================

#[test]
fn test_is_distinct_from_table() {
    let distinct = |left, right| {
        Expression::Comparison(ComparisonExpression::new(
            ComparisonOp::IsDistinctFrom,
            left,
            right,
        ))
    };

    assert_eq!(
        eval(&distinct(Expression::null(), Expression::null())),
        Value::boolean(false)
    );
    assert_eq!(
        eval(&distinct(Expression::null(), Expression::long(1))),
        Value::boolean(true)
    );
    assert_eq!(
        eval(&distinct(Expression::long(1), Expression::null())),
        Value::boolean(true)
    );
    assert_eq!(
        eval(&distinct(Expression::long(1), Expression::long(1))),
        Value::boolean(false)
    );
    assert_eq!(
        eval(&distinct(Expression::long(1), Expression::long(2))),
        Value::boolean(true)
    );
    // widened numeric rule applies here too
    assert_eq!(
        eval(&distinct(Expression::long(1), Expression::double(1.0))),
        Value::boolean(false)
    );
    assert_eq!(
        eval(&distinct(Expression::string("a"), Expression::string("b"))),
        Value::boolean(true)
    );
    assert_eq!(
        eval(&distinct(Expression::boolean(true), Expression::boolean(true))),
        Value::boolean(false)
    );
}

// ============================================================================
// Null strictness of the remaining operators
// ============================================================================

#[test]
fn test_arithmetic_is_null_strict() {
    let expr = Expression::Arithmetic(ArithmeticExpression::new(
        ArithmeticOp::Add,
        Expression::null(),
        Expression::long(1),
    ));
    assert!(eval(&expr).is_null());

    let expr = Expression::Arithmetic(ArithmeticExpression::new(
        ArithmeticOp::Multiply,
        Expression::long(1),
        Expression::null(),
    ));
    assert!(eval(&expr).is_null());

    let expr = Expression::Negative(NegativeExpression::new(Expression::null()));
    assert!(eval(&expr).is_null());
}

#[test]
fn test_comparison_is_null_strict() {
    let expr = Expression::Comparison(ComparisonExpression::new(
        ComparisonOp::Equal,
        Expression::null(),
        Expression::null(),
    ));
    assert!(eval(&expr).is_null());

    let expr = Expression::Comparison(ComparisonExpression::new(
        ComparisonOp::LessThan,
        Expression::long(1),
        Expression::null(),
    ));
    assert!(eval(&expr).is_null());
}

#[test]
fn test_between_is_null_strict() {
    for (value, min, max) in [
        (Expression::null(), Expression::long(1), Expression::long(2)),
        (Expression::long(1), Expression::null(), Expression::long(2)),
        (Expression::long(1), Expression::long(0), Expression::null()),
    ] {
        let expr = Expression::Between(BetweenPredicate::new(value, min, max));
        assert!(eval(&expr).is_null());
    }
}

#[test]
fn test_like_is_null_strict() {
    let expr = Expression::Like(LikePredicate::new(
        Expression::null(),
        Expression::string("a%"),
        None,
    ));
    assert!(eval(&expr).is_null());

    let expr = Expression::Like(LikePredicate::new(
        Expression::string("a"),
        Expression::null(),
        None,
    ));
    assert!(eval(&expr).is_null());

    let expr = Expression::Like(LikePredicate::new(
        Expression::string("a"),
        Expression::string("a"),
        Some(Expression::null()),
    ));
    assert!(eval(&expr).is_null());
}

#[test]
fn test_function_arguments_are_null_strict() {
    let expr = Expression::FunctionCall(FunctionCall::new(
        QualifiedName::from("abs"),
        vec![Expression::null()],
    ));
    assert!(eval(&expr).is_null());

    let expr = Expression::FunctionCall(FunctionCall::new(
        QualifiedName::from("concat"),
        vec![Expression::string("a"), Expression::null()],
    ));
    assert!(eval(&expr).is_null());
}

#[test]
fn test_cast_and_extract_are_null_strict() {
    let expr = Expression::Cast(CastExpression::new(Expression::null(), "DOUBLE"));
    assert!(eval(&expr).is_null());

    let expr = Expression::Extract(ExtractExpression::new(
        ExtractField::Month,
        Expression::null(),
    ));
    assert!(eval(&expr).is_null());
}
