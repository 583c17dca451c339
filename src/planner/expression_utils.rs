use indexmap::IndexSet;

use crate::{
    parser::{analyzer::Symbol, ast::{Expression, LogicalOp}},
    planner::{DeterminismEvaluator, PlannerError},
};

/// Conjunction algebra used when moving predicates around the plan.
pub struct ExpressionUtils;

impl ExpressionUtils {
    /// Top-level AND operands, left to right. OR nodes are never split.
    pub fn extract_conjuncts(expr: &Expression) -> Vec<Expression> {
        let mut out = Vec::new();
        Self::collect_conjuncts(expr, &mut out);
        out
    }

    fn collect_conjuncts(expr: &Expression, out: &mut Vec<Expression>) {
        match expr {
            Expression::LogicalBinary { op: LogicalOp::And, left, right } => {
                Self::collect_conjuncts(left, out);
                Self::collect_conjuncts(right, out);
            }
            other => out.push(other.clone()),
        }
    }

    pub fn and<I: IntoIterator<Item = Expression>>(exprs: I) -> Result<Expression, PlannerError> {
        Self::binary_expression(LogicalOp::And, exprs)
    }

    pub fn or<I: IntoIterator<Item = Expression>>(exprs: I) -> Result<Expression, PlannerError> {
        Self::binary_expression(LogicalOp::Or, exprs)
    }

    /// Left-associative fold: `[a, b, c]` -> `((a op b) op c)`.
    pub fn binary_expression<I: IntoIterator<Item = Expression>>(op: LogicalOp, exprs: I) -> Result<Expression, PlannerError> {
        let mut iter = exprs.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| PlannerError::InvalidArgument(format!("{} of an empty expression list", op)))?;
        Ok(Self::fold(op, first, iter))
    }

    fn fold(op: LogicalOp, first: Expression, rest: impl Iterator<Item = Expression>) -> Expression {
        rest.fold(first, |acc, next| Expression::logical(op, acc, next))
    }

    /// [`combine_conjuncts_with`](Self::combine_conjuncts_with) using the
    /// built-in determinism classifier.
    pub fn combine_conjuncts<I: IntoIterator<Item = Expression>>(exprs: I) -> Expression {
        Self::combine_conjuncts_with(exprs, DeterminismEvaluator::deterministic)
    }

    /// Canonical conjunction of `exprs`.
    ///
    /// All inputs are flattened and TRUE literals dropped. Non-deterministic
    /// conjuncts come first, every occurrence kept in order; deterministic ones
    /// follow, de-duplicated by value in first-seen order. Nothing left yields
    /// the TRUE literal.
    pub fn combine_conjuncts_with<I, F>(exprs: I, is_deterministic: F) -> Expression
    where
        I: IntoIterator<Item = Expression>,
        F: Fn(&Expression) -> bool,
    {
        let conjuncts = exprs
            .into_iter()
            .flat_map(|e| Self::extract_conjuncts(&e))
            .filter(|e| !e.is_true_literal());

        let (deterministic, non_deterministic): (Vec<_>, Vec<_>) = conjuncts.partition(|e| is_deterministic(e));
        let deterministic: IndexSet<Expression> = deterministic.into_iter().collect();

        let mut terms = non_deterministic.into_iter().chain(deterministic);
        match terms.next() {
            Some(first) => Self::fold(LogicalOp::And, first, terms),
            None => Expression::true_literal(),
        }
    }

    pub fn strip_non_deterministic_conjuncts(expr: &Expression) -> Expression {
        Self::strip_non_deterministic_conjuncts_with(expr, DeterminismEvaluator::deterministic)
    }

    /// Drops non-deterministic conjuncts entirely and canonicalizes the rest.
    pub fn strip_non_deterministic_conjuncts_with<F>(expr: &Expression, is_deterministic: F) -> Expression
    where
        F: Fn(&Expression) -> bool,
    {
        let kept: Vec<Expression> = Self::extract_conjuncts(expr).into_iter().filter(|e| is_deterministic(e)).collect();
        Self::combine_conjuncts_with(kept, is_deterministic)
    }

    /// Column reference to a planner symbol.
    pub fn symbol_reference(symbol: &Symbol) -> Expression {
        Expression::Column(symbol.to_qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::SqlType,
        parser::{analyzer::SymbolAllocator, ast::{ComparisonOp, Literal}},
    };

    fn a() -> Expression { Expression::compare(ComparisonOp::Eq, Expression::column("a"), Expression::int(1)) }
    fn b() -> Expression { Expression::compare(ComparisonOp::Gt, Expression::column("b"), Expression::int(2)) }
    fn c() -> Expression { Expression::IsNull { expr: Box::new(Expression::column("c")), negated: false } }
    fn n() -> Expression { Expression::compare(ComparisonOp::Lt, Expression::call("rand", vec![]), Expression::int(1)) }
    fn t() -> Expression { Expression::true_literal() }

    fn and2(l: Expression, r: Expression) -> Expression { Expression::logical(LogicalOp::And, l, r) }
    fn or2(l: Expression, r: Expression) -> Expression { Expression::logical(LogicalOp::Or, l, r) }

    #[test]
    fn extract_flattens_left_to_right() {
        assert_eq!(ExpressionUtils::extract_conjuncts(&and2(and2(a(), b()), c())), vec![a(), b(), c()]);
        assert_eq!(ExpressionUtils::extract_conjuncts(&and2(a(), and2(b(), c()))), vec![a(), b(), c()]);
    }

    #[test]
    fn extract_never_splits_or() {
        let e = or2(a(), and2(b(), c()));
        assert_eq!(ExpressionUtils::extract_conjuncts(&e), vec![e.clone()]);
        assert_eq!(ExpressionUtils::extract_conjuncts(&and2(e.clone(), a())), vec![e, a()]);
    }

    #[test]
    fn and_or_fold_left() {
        assert_eq!(ExpressionUtils::and(vec![a(), b(), c()]).unwrap(), and2(and2(a(), b()), c()));
        assert_eq!(ExpressionUtils::or(vec![a(), b(), c()]).unwrap(), or2(or2(a(), b()), c()));
        assert_eq!(ExpressionUtils::and(vec![a()]).unwrap(), a());
    }

    #[test]
    fn and_or_reject_empty_input() {
        assert!(matches!(ExpressionUtils::and(vec![]), Err(PlannerError::InvalidArgument(_))));
        assert!(matches!(ExpressionUtils::or(Vec::new()), Err(PlannerError::InvalidArgument(_))));
    }

    #[test]
    fn combine_round_trips_extract() {
        let e = and2(and2(a(), or2(b(), c())), n());
        let combined = ExpressionUtils::combine_conjuncts(ExpressionUtils::extract_conjuncts(&e));
        // same conjuncts, non-deterministic first
        assert_eq!(combined, and2(and2(n(), a()), or2(b(), c())));

        let canonical = ExpressionUtils::combine_conjuncts(vec![combined.clone()]);
        assert_eq!(canonical, combined);
    }

    #[test]
    fn true_literals_are_dropped() {
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![t(), a(), t()]), a());
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![and2(t(), a())]), a());
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![t(), t()]), t());
    }

    #[test]
    fn false_literal_is_kept() {
        let f = Expression::Literal(Literal::FALSE);
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![f.clone(), a()]), and2(f, a()));
    }

    #[test]
    fn empty_input_is_true() {
        assert_eq!(ExpressionUtils::combine_conjuncts(Vec::new()), t());
    }

    #[test]
    fn deterministic_duplicates_collapse() {
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![a(), a()]), a());
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![a(), b(), and2(a(), c()), b()]), and2(and2(a(), b()), c()));
    }

    #[test]
    fn non_deterministic_duplicates_survive() {
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![n(), n()]), and2(n(), n()));
    }

    #[test]
    fn non_deterministic_terms_go_first() {
        assert_eq!(ExpressionUtils::combine_conjuncts(vec![a(), n()]), and2(n(), a()));
        let combined = ExpressionUtils::combine_conjuncts(vec![a(), n(), b(), n(), a()]);
        assert_eq!(ExpressionUtils::extract_conjuncts(&combined), vec![n(), n(), a(), b()]);
    }

    #[test]
    fn injected_classifier_is_used() {
        let everything_volatile = |_: &Expression| false;
        assert_eq!(ExpressionUtils::combine_conjuncts_with(vec![a(), a()], everything_volatile), and2(a(), a()));

        let only_b_volatile = |e: &Expression| *e != b();
        assert_eq!(ExpressionUtils::combine_conjuncts_with(vec![a(), b()], only_b_volatile), and2(b(), a()));
    }

    #[test]
    fn strip_drops_non_deterministic_conjuncts() {
        assert_eq!(ExpressionUtils::strip_non_deterministic_conjuncts(&and2(a(), n())), a());
        assert_eq!(ExpressionUtils::strip_non_deterministic_conjuncts(&n()), t());
        assert_eq!(ExpressionUtils::strip_non_deterministic_conjuncts(&and2(and2(b(), n()), b())), b());
        // a non-deterministic OR is a single conjunct and goes away whole
        assert_eq!(ExpressionUtils::strip_non_deterministic_conjuncts(&and2(or2(a(), n()), c())), c());
    }

    #[test]
    fn symbol_reference_points_at_symbol() {
        let mut symbols = SymbolAllocator::new();
        let s = symbols.new_symbol("Total", SqlType::Double);
        assert_eq!(ExpressionUtils::symbol_reference(&s), Expression::column("total"));
    }
}
