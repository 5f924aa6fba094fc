//! Integration tests for optimization mode
//!
//! Optimization folds against compile-time symbol bindings. Bound
//! symbols collapse to literals; unbound ones flow up as residuals and
//! every operator reduces as far as its partial knowledge allows.

use sqlfold::ast::*;
use sqlfold::{global_registry, Evaluator, Session, SymbolMap, Value};

fn optimize_with(symbols: &SymbolMap, expr: &Expression) -> Value {
    let session = Session::with_start_time(1_700_000_000);
    let evaluator = Evaluator::optimizer(symbols, global_registry(), &session);
    evaluator.evaluate(expr).expect("optimization failed")
}

fn optimize(expr: &Expression) -> Value {
    optimize_with(&SymbolMap::new(), expr)
}

/// Assert the value is a residual and render it to SQL for comparison
fn residual_sql(value: &Value) -> String {
    match value {
        Value::Residual(expr) => expr.to_string(),
        other => panic!("expected a residual, got {}", other),
    }
}

fn and(left: Expression, right: Expression) -> Expression {
    Expression::Logical(LogicalBinaryExpression::new(LogicalOp::And, left, right))
}

fn or(left: Expression, right: Expression) -> Expression {
    Expression::Logical(LogicalBinaryExpression::new(LogicalOp::Or, left, right))
}

fn add(left: Expression, right: Expression) -> Expression {
    Expression::Arithmetic(ArithmeticExpression::new(ArithmeticOp::Add, left, right))
}

// ============================================================================
// Symbol folding
// ============================================================================

#[test]
fn test_bound_symbols_fold() {
    let symbols = SymbolMap::new().bind("x", Value::integer(3));
    let expr = add(Expression::name("x"), Expression::long(4));
    assert_eq!(optimize_with(&symbols, &expr), Value::integer(7));
}

#[test]
fn test_unbound_symbol_stays_symbolic() {
    let value = optimize(&Expression::name("x"));
    assert_eq!(residual_sql(&value), "x");
}

#[test]
fn test_qualified_name_is_not_a_symbol() {
    let expr = Expression::Name(QualifiedNameReference {
        name: QualifiedName::from("t.x"),
    });
    let value = optimize(&expr);
    assert_eq!(residual_sql(&value), "t.x");
}

// ============================================================================
// Short-circuit laws over partial knowledge
// ============================================================================

#[test]
fn test_symbolic_and_false_folds_to_false() {
    let expr = and(Expression::name("x"), Expression::boolean(false));
    assert_eq!(optimize(&expr), Value::boolean(false));
}

#[test]
fn test_symbolic_or_true_folds_to_true() {
    let expr = or(Expression::name("x"), Expression::boolean(true));
    assert_eq!(optimize(&expr), Value::boolean(true));
}

#[test]
fn test_symbolic_and_true_reduces_to_symbol() {
    let expr = and(Expression::name("x"), Expression::boolean(true));
    assert_eq!(residual_sql(&optimize(&expr)), "x");

    let expr = and(Expression::boolean(true), Expression::name("x"));
    assert_eq!(residual_sql(&optimize(&expr)), "x");
}

#[test]
fn test_symbolic_or_false_reduces_to_symbol() {
    let expr = or(Expression::name("x"), Expression::boolean(false));
    assert_eq!(residual_sql(&optimize(&expr)), "x");
}

#[test]
fn test_symbolic_and_null_stays_symbolic() {
    let expr = and(Expression::name("x"), Expression::null());
    assert_eq!(residual_sql(&optimize(&expr)), "(x AND null)");
}

#[test]
fn test_two_symbols_stay_symbolic() {
    let expr = and(Expression::name("x"), Expression::name("y"));
    assert_eq!(residual_sql(&optimize(&expr)), "(x AND y)");
}

#[test]
fn test_symbolic_not() {
    let expr = Expression::Not(NotExpression::new(Expression::name("x")));
    assert_eq!(residual_sql(&optimize(&expr)), "(NOT x)");
}

// ============================================================================
// No algebraic identities beyond literal folding
// ============================================================================

#[test]
fn test_add_zero_is_not_simplified() {
    let expr = add(Expression::name("x"), Expression::long(0));
    assert_eq!(residual_sql(&optimize(&expr)), "(x + 0)");
}

#[test]
fn test_nested_subtrees_fold_around_symbols() {
    // (x + (1 + 2)) reduces the constant subtree only
    let expr = add(
        Expression::name("x"),
        add(Expression::long(1), Expression::long(2)),
    );
    assert_eq!(residual_sql(&optimize(&expr)), "(x + 3)");
}

// ============================================================================
// Comparisons, BETWEEN, IS [NOT] NULL
// ============================================================================

#[test]
fn test_symbolic_comparison() {
    let expr = Expression::Comparison(ComparisonExpression::new(
        ComparisonOp::Equal,
        Expression::name("x"),
        Expression::long(5),
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "(x = 5)");
}

#[test]
fn test_symbolic_between() {
    let expr = Expression::Between(BetweenPredicate::new(
        Expression::name("x"),
        Expression::long(1),
        Expression::long(10),
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "(x BETWEEN 1 AND 10)");
}

#[test]
fn test_symbolic_is_distinct_from() {
    let expr = Expression::Comparison(ComparisonExpression::new(
        ComparisonOp::IsDistinctFrom,
        Expression::name("x"),
        Expression::null(),
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "(x IS DISTINCT FROM null)");
}

#[test]
fn test_symbolic_is_null() {
    let expr = Expression::IsNull(IsNullPredicate::new(Expression::name("x")));
    assert_eq!(residual_sql(&optimize(&expr)), "(x IS NULL)");

    let expr = Expression::IsNotNull(IsNotNullPredicate::new(Expression::name("x")));
    assert_eq!(residual_sql(&optimize(&expr)), "(x IS NOT NULL)");
}

// ============================================================================
// IN
// ============================================================================

fn in_list(value: Expression, elements: Vec<Expression>) -> Expression {
    Expression::In(InPredicate::new(
        value,
        Expression::InList(InListExpression::new(elements)),
    ))
}

#[test]
fn test_symbolic_needle_keeps_whole_list() {
    let expr = in_list(
        Expression::name("x"),
        vec![Expression::long(1), Expression::long(2)],
    );
    assert_eq!(residual_sql(&optimize(&expr)), "(x IN (1, 2))");
}

#[test]
fn test_match_wins_over_symbolic_elements() {
    let expr = in_list(
        Expression::long(5),
        vec![Expression::name("x"), Expression::long(5)],
    );
    assert_eq!(optimize(&expr), Value::boolean(true));
}

#[test]
fn test_miss_with_symbolic_element_keeps_reduced_list() {
    let expr = in_list(
        Expression::long(5),
        vec![
            Expression::name("x"),
            Expression::long(1),
            Expression::null(),
        ],
    );
    // all elements survive into the residual, nulls included
    assert_eq!(residual_sql(&optimize(&expr)), "(5 IN (x, 1, null))");
}

#[test]
fn test_non_list_value_list_stays_symbolic() {
    let expr = Expression::In(InPredicate::new(Expression::long(1), Expression::name("q")));
    assert_eq!(residual_sql(&optimize(&expr)), "(1 IN q)");
}

// ============================================================================
// Conditionals
// ============================================================================

#[test]
fn test_case_with_symbolic_when_is_unreduced() {
    let case = CaseExpression::searched(
        vec![WhenClause::new(Expression::name("x"), Expression::long(1))],
        Some(Expression::long(2)),
    );
    let expr = Expression::Case(case.clone());
    let value = optimize(&expr);
    assert_eq!(residual_sql(&value), Expression::Case(case).to_string());
}

#[test]
fn test_coalesce_with_leading_symbol_is_unreduced() {
    let coalesce = CoalesceExpression::new(vec![Expression::name("x"), Expression::string("d")]);
    let expr = Expression::Coalesce(coalesce.clone());
    let value = optimize(&expr);
    assert_eq!(
        residual_sql(&value),
        Expression::Coalesce(coalesce).to_string()
    );
}

#[test]
fn test_coalesce_stops_at_definite_value_before_symbol() {
    let expr = Expression::Coalesce(CoalesceExpression::new(vec![
        Expression::null(),
        Expression::string("d"),
        Expression::name("x"),
    ]));
    assert_eq!(optimize(&expr), Value::text("d"));
}

#[test]
fn test_if_with_symbolic_condition_optimizes_both_branches() {
    // true branch folds to 2; false branch fails (division by zero) and
    // is kept symbolic, unoptimized
    let expr = Expression::If(IfExpression::new(
        Expression::name("x"),
        add(Expression::long(1), Expression::long(1)),
        Some(Expression::Arithmetic(ArithmeticExpression::new(
            ArithmeticOp::Divide,
            Expression::long(1),
            Expression::long(0),
        ))),
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "IF(x, 2, (1 / 0))");
}

#[test]
fn test_if_without_false_branch_gains_explicit_null() {
    let expr = Expression::If(IfExpression::new(
        Expression::name("x"),
        Expression::long(1),
        None,
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "IF(x, 1, null)");
}

#[test]
fn test_null_if_with_symbol_is_unreduced() {
    let null_if = NullIfExpression::new(Expression::name("x"), Expression::long(1));
    let expr = Expression::NullIf(null_if.clone());
    assert_eq!(
        residual_sql(&optimize(&expr)),
        Expression::NullIf(null_if).to_string()
    );
}

// ============================================================================
// Function calls
// ============================================================================

#[test]
fn test_deterministic_call_folds() {
    let expr = Expression::FunctionCall(FunctionCall::new(
        QualifiedName::from("abs"),
        vec![Expression::long(-5)],
    ));
    assert_eq!(optimize(&expr), Value::integer(5));
}

#[test]
fn test_non_deterministic_call_is_never_folded() {
    let expr = Expression::FunctionCall(FunctionCall::new(QualifiedName::from("random"), vec![]));
    assert_eq!(residual_sql(&optimize(&expr)), "random()");

    let expr = Expression::FunctionCall(FunctionCall::new(QualifiedName::from("now"), vec![]));
    assert_eq!(residual_sql(&optimize(&expr)), "now()");
}

#[test]
fn test_call_with_symbolic_argument_stays_symbolic() {
    let expr = Expression::FunctionCall(FunctionCall::new(
        QualifiedName::from("abs"),
        vec![Expression::name("x")],
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "abs(x)");
}

// ============================================================================
// LIKE, EXTRACT, CAST
// ============================================================================

#[test]
fn test_like_wildcard_free_pattern_becomes_equality() {
    let expr = Expression::Like(LikePredicate::new(
        Expression::name("x"),
        Expression::string("world"),
        None,
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "(x = 'world')");
}

#[test]
fn test_like_with_wildcards_stays_like() {
    let expr = Expression::Like(LikePredicate::new(
        Expression::name("x"),
        Expression::string("a%"),
        None,
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "(x LIKE 'a%')");
}

#[test]
fn test_symbolic_extract() {
    let expr = Expression::Extract(ExtractExpression::new(
        ExtractField::Year,
        Expression::name("ts"),
    ));
    assert_eq!(residual_sql(&optimize(&expr)), "EXTRACT(YEAR FROM ts)");
}

#[test]
fn test_symbolic_cast_keeps_target() {
    let expr = Expression::Cast(CastExpression::new(Expression::name("x"), "BIGINT"));
    assert_eq!(residual_sql(&optimize(&expr)), "CAST(x AS BIGINT)");
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_optimizing_a_folded_scalar_is_idempotent() {
    let expr = add(Expression::long(1), Expression::long(2));
    let first = optimize(&expr);
    assert_eq!(first, Value::integer(3));

    let refolded = optimize(&sqlfold::value_to_expression(first.clone()));
    assert_eq!(first, refolded);
}

#[test]
fn test_optimizing_a_residual_is_idempotent() {
    let expr = add(Expression::name("x"), Expression::long(0));
    let first = optimize(&expr);
    let again = optimize(&sqlfold::value_to_expression(first.clone()));
    assert_eq!(residual_sql(&first), residual_sql(&again));
}

// ============================================================================
// Residual closure
// ============================================================================

#[test]
fn test_residuals_are_well_formed_trees() {
    // a mix of folded and symbolic parts must render back to valid SQL
    let expr = and(
        Expression::Comparison(ComparisonExpression::new(
            ComparisonOp::GreaterThan,
            Expression::name("x"),
            add(Expression::long(2), Expression::long(3)),
        )),
        Expression::Like(LikePredicate::new(
            Expression::name("y"),
            Expression::string("a%"),
            None,
        )),
    );
    assert_eq!(
        residual_sql(&optimize(&expr)),
        "((x > 5) AND (y LIKE 'a%'))"
    );
}
