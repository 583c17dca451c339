use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    database::SqlType,
    parser::{analyzer::{AnalyzerError, Symbol}, ast::Expression},
};

static DISAMBIGUATION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_\d+$").expect("valid symbol suffix regex"));

/// Symbol table of one query compilation, shared by every nested scope.
pub type SharedSymbolAllocator = Rc<RefCell<SymbolAllocator>>;

/// Hands out query-unique symbols and remembers their types.
///
/// Symbols are never removed; the table is dropped with the compilation.
#[derive(Debug, Default)]
pub struct SymbolAllocator {
    symbols: IndexMap<Symbol, SqlType>,
    next_id: usize,
}

impl SymbolAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSymbolAllocator {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Allocate a fresh symbol derived from `name_hint`.
    ///
    /// The hint is lowercased and a trailing `_<n>` is dropped, so re-using an
    /// allocated name as a hint does not stack suffixes. The first use of a
    /// hint keeps it as is; collisions get `_<n>` from a counter that only
    /// grows.
    pub fn new_symbol(&mut self, name_hint: &str, ty: SqlType) -> Symbol {
        let hint = Self::normalize_hint(name_hint);

        let mut symbol = Symbol::new(hint.clone());
        while self.symbols.contains_key(&symbol) {
            self.next_id += 1;
            symbol = Symbol::new(format!("{}_{}", hint, self.next_id));
        }

        tracing::trace!(symbol = symbol.name(), %ty, "symbol allocated");
        self.symbols.insert(symbol.clone(), ty);
        symbol
    }

    /// Allocate a symbol named after what `expr` computes.
    pub fn new_symbol_for_expression(&mut self, expr: &Expression, ty: SqlType) -> Symbol {
        let hint = match expr {
            Expression::Column(name) => name.suffix().to_string(),
            Expression::FunctionCall(call) => call.name.suffix().to_string(),
            _ => "expr".to_string(),
        };
        self.new_symbol(&hint, ty)
    }

    pub fn type_of(&self, symbol: &Symbol) -> Result<SqlType, AnalyzerError> {
        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| AnalyzerError::UnknownSymbol(symbol.name().to_string()))
    }

    /// Every allocated symbol, in allocation order.
    pub fn types(&self) -> &IndexMap<Symbol, SqlType> {
        &self.symbols
    }

    fn normalize_hint(name_hint: &str) -> String {
        let lower = name_hint.trim().to_ascii_lowercase();
        let stripped = DISAMBIGUATION_SUFFIX.replace(&lower, "");
        if stripped.is_empty() { "expr".to_string() } else { stripped.into_owned() }
    }
}
