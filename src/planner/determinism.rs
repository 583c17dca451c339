use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::parser::ast::Expression;

const NON_DETERMINISTIC_FUNCTIONS: [&str; 4] = ["rand", "random", "uuid", "shuffle"];

static BUILT_IN: Lazy<DeterminismEvaluator> = Lazy::new(DeterminismEvaluator::default);

/// Classifies expressions as deterministic or not.
///
/// An expression is non-deterministic when any call in its tree targets a
/// function from the configured set. Function names compare case-insensitively.
#[derive(Debug, Clone)]
pub struct DeterminismEvaluator {
    functions: HashSet<String>,
}

impl Default for DeterminismEvaluator {
    fn default() -> Self {
        Self::with_functions(NON_DETERMINISTIC_FUNCTIONS)
    }
}

impl DeterminismEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_functions<I, S>(functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { functions: functions.into_iter().map(|f| f.as_ref().to_ascii_lowercase()).collect() }
    }

    pub fn is_deterministic(&self, expr: &Expression) -> bool {
        if let Expression::FunctionCall(call) = expr {
            if self.functions.contains(call.name.suffix()) {
                return false;
            }
        }
        expr.children().into_iter().all(|child| self.is_deterministic(child))
    }

    /// Classifier with the built-in function set.
    pub fn deterministic(expr: &Expression) -> bool {
        BUILT_IN.is_deterministic(expr)
    }
}
