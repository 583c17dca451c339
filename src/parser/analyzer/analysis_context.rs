use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    database::SqlType,
    parser::{
        analyzer::{AnalysisResult, AnalyzerError, SharedSymbolAllocator, Symbol, SymbolAllocator, TupleDescriptor},
        ast::{Expression, Node, NodeId, Subquery},
    },
};

/// Mutable state of one query scope while the analyzer walks the tree.
///
/// Nested scopes are created with [`AnalysisContext::child_context`]; they
/// share the symbol table with their parent but start with empty registries.
/// Registries are keyed by [`NodeId`], so two textually identical relations
/// are tracked independently. Outside code only gets `&` views of them.
pub struct AnalysisContext {
    symbol_allocator: SharedSymbolAllocator,
    /// subquery node -> analysis of the inline view
    inline_views: IndexMap<NodeId, AnalysisResult>,
    /// relation node -> resolved output shape
    table_descriptors: IndexMap<NodeId, TupleDescriptor>,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::with_symbol_allocator(SymbolAllocator::shared())
    }

    pub fn with_symbol_allocator(symbol_allocator: SharedSymbolAllocator) -> Self {
        Self { symbol_allocator, inline_views: IndexMap::new(), table_descriptors: IndexMap::new() }
    }

    pub fn child_context(&self) -> Self {
        Self::with_symbol_allocator(Rc::clone(&self.symbol_allocator))
    }

    /// Overwrites any descriptor already registered for the same node.
    pub fn register_table<N: Node + ?Sized>(&mut self, node: &N, descriptor: TupleDescriptor) {
        if self.table_descriptors.insert(node.node_id(), descriptor).is_some() {
            tracing::trace!(node = %node.node_id(), "table descriptor replaced");
        }
    }

    pub fn lookup_table<N: Node + ?Sized>(&self, node: &N) -> Option<&TupleDescriptor> {
        self.table_descriptors.get(&node.node_id())
    }

    /// Overwrites any result already registered for the same subquery.
    pub fn register_inline_view(&mut self, node: &Subquery, analysis: AnalysisResult) {
        if self.inline_views.insert(node.node_id(), analysis).is_some() {
            tracing::trace!(node = %node.node_id(), "inline view replaced");
        }
    }

    pub fn lookup_inline_view(&self, node: &Subquery) -> Option<&AnalysisResult> {
        self.inline_views.get(&node.node_id())
    }

    pub fn table_descriptors(&self) -> &IndexMap<NodeId, TupleDescriptor> {
        &self.table_descriptors
    }

    pub fn inline_views(&self) -> &IndexMap<NodeId, AnalysisResult> {
        &self.inline_views
    }

    pub fn symbol_allocator(&self) -> &SharedSymbolAllocator {
        &self.symbol_allocator
    }

    /// Snapshot of every symbol allocated so far in this query, nested scopes
    /// included, in allocation order.
    pub fn symbols(&self) -> IndexMap<Symbol, SqlType> {
        self.symbol_allocator.borrow().types().clone()
    }

    pub fn new_symbol(&self, name_hint: &str, ty: SqlType) -> Symbol {
        self.symbol_allocator.borrow_mut().new_symbol(name_hint, ty)
    }

    pub fn new_symbol_for_expression(&self, expr: &Expression, ty: SqlType) -> Symbol {
        self.symbol_allocator.borrow_mut().new_symbol_for_expression(expr, ty)
    }

    pub fn type_of(&self, symbol: &Symbol) -> Result<SqlType, AnalyzerError> {
        self.symbol_allocator.borrow().type_of(symbol)
    }

    /// Freeze this scope into the result its parent registers.
    pub fn into_result(self, output: TupleDescriptor, output_symbols: Vec<Symbol>, criteria: Option<Expression>) -> AnalysisResult {
        AnalysisResult {
            output,
            output_symbols,
            criteria,
            table_descriptors: self.table_descriptors,
            inline_views: self.inline_views,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{analyzer::Field, ast::{NodeIdGenerator, Query, Relation, Table}};

    fn descriptor(name: &str) -> TupleDescriptor {
        TupleDescriptor::new(vec![Field::new(Some("t"), name, SqlType::Bigint)])
    }

    #[test]
    fn lookup_is_by_node_identity() {
        let mut ids = NodeIdGenerator::new();
        let node1 = Relation::Table(Table::new(&mut ids, "orders", None));
        let node2 = Relation::Table(Table::new(&mut ids, "orders", None));

        let mut ctx = AnalysisContext::new();
        ctx.register_table(&node1, descriptor("id"));

        assert_eq!(ctx.lookup_table(&node1), Some(&descriptor("id")));
        assert_eq!(ctx.lookup_table(&node2), None);
    }

    #[test]
    fn re_registration_overwrites() {
        let mut ids = NodeIdGenerator::new();
        let node = Table::new(&mut ids, "orders", None);

        let mut ctx = AnalysisContext::new();
        ctx.register_table(&node, descriptor("id"));
        ctx.register_table(&node, descriptor("total"));

        assert_eq!(ctx.lookup_table(&node), Some(&descriptor("total")));
        assert_eq!(ctx.table_descriptors().len(), 1);
    }

    #[test]
    fn inline_views_are_tracked_per_node() {
        let mut ids = NodeIdGenerator::new();
        let inner = Query::new(&mut ids, vec![], None);
        let first = Subquery::new(&mut ids, inner.clone(), "s");
        let second = Subquery::new(&mut ids, inner, "s");

        let mut ctx = AnalysisContext::new();
        let result = AnalysisContext::new().into_result(descriptor("x"), vec![], None);
        ctx.register_inline_view(&first, result.clone());

        assert_eq!(ctx.lookup_inline_view(&first), Some(&result));
        assert!(ctx.lookup_inline_view(&second).is_none());
        assert_eq!(ctx.inline_views().len(), 1);
    }

    #[test]
    fn child_shares_symbols_but_not_registries() {
        let mut ids = NodeIdGenerator::new();
        let node = Table::new(&mut ids, "orders", None);

        let mut parent = AnalysisContext::new();
        parent.new_symbol("a", SqlType::Bigint);
        parent.register_table(&node, descriptor("id"));

        let child = parent.child_context();
        assert_eq!(child.symbols(), parent.symbols());
        assert!(child.lookup_table(&node).is_none());

        let b = child.new_symbol("b", SqlType::Varchar);
        assert_eq!(parent.symbols().get(&b), Some(&SqlType::Varchar));
        assert_eq!(parent.type_of(&b).unwrap(), SqlType::Varchar);
        assert!(Rc::ptr_eq(parent.symbol_allocator(), child.symbol_allocator()));
    }

    #[test]
    fn allocating_while_holding_symbols_is_fine() {
        let parent = AnalysisContext::new();
        let child = parent.child_context();

        let before = parent.symbols();
        let x = child.new_symbol("x", SqlType::Bigint);

        assert!(before.is_empty());
        assert_eq!(parent.symbols().get(&x), Some(&SqlType::Bigint));
    }

    #[test]
    fn separate_roots_do_not_share_symbols() {
        let a = AnalysisContext::new();
        let b = AnalysisContext::default();
        let s = a.new_symbol("x", SqlType::Bigint);
        assert!(b.symbols().is_empty());
        assert!(matches!(b.type_of(&s), Err(AnalyzerError::UnknownSymbol(_))));
    }
}
