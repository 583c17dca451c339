use std::fmt;

use crate::parser::ast::{Literal, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub args: Vec<Expression>,
}

/// Immutable expression tree shared by the analyzer and the planner.
///
/// Equality and hashing are structural, which is what predicate
/// de-duplication relies on.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Literal(Literal),
    /// Reference to a column or a planner symbol.
    Column(QualifiedName),
    LogicalBinary { op: LogicalOp, left: Box<Expression>, right: Box<Expression> },
    Comparison { op: ComparisonOp, left: Box<Expression>, right: Box<Expression> },
    Not(Box<Expression>),
    IsNull { expr: Box<Expression>, negated: bool },
    FunctionCall(FunctionCall),
}

impl Expression {
    pub fn true_literal() -> Self {
        Expression::Literal(Literal::TRUE)
    }

    pub fn column(name: &str) -> Self {
        Expression::Column(QualifiedName::of(name))
    }

    pub fn int(value: i64) -> Self {
        Expression::Literal(Literal::Int(value))
    }

    pub fn call(name: &str, args: Vec<Expression>) -> Self {
        Expression::FunctionCall(FunctionCall { name: QualifiedName::of(name), args })
    }

    pub fn logical(op: LogicalOp, left: Expression, right: Expression) -> Self {
        Expression::LogicalBinary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn compare(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        Expression::Comparison { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn is_true_literal(&self) -> bool {
        matches!(self, Expression::Literal(lit) if lit.is_true())
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Literal(_) | Expression::Column(_) => vec![],
            Expression::LogicalBinary { left, right, .. }
            | Expression::Comparison { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expression::Not(expr) | Expression::IsNull { expr, .. } => vec![expr.as_ref()],
            Expression::FunctionCall(call) => call.args.iter().collect(),
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
        };
        f.write_str(op)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::Column(name) => write!(f, "{}", name),
            Expression::LogicalBinary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expression::Comparison { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expression::Not(expr) => write!(f, "(NOT {})", expr),
            Expression::IsNull { expr, negated: false } => write!(f, "({} IS NULL)", expr),
            Expression::IsNull { expr, negated: true } => write!(f, "({} IS NOT NULL)", expr),
            Expression::FunctionCall(call) => {
                let args: Vec<String> = call.args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", call.name, args.join(", "))
            }
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({})", self)
    }
}
