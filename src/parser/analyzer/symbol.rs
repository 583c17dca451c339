use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::ast::QualifiedName;

/// Query-unique name of a computed or intermediate value.
///
/// Only a [`SymbolAllocator`](crate::parser::analyzer::SymbolAllocator) hands
/// these out; the type lives in the allocator, not in the symbol.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub(crate) fn new(name: String) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn to_qualified_name(&self) -> QualifiedName {
        QualifiedName::new([self.0.as_str()])
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}
